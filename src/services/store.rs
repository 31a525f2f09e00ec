use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use thiserror::Error;

use crate::core::engine::MatchStore;
use crate::models::{MatchReason, MatchResult};

/// Errors that can occur when interacting with the match store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Idempotent upsert keyed on the (product_id, contact_id) pair; rerunning
/// a batch overwrites the same rows instead of duplicating them
const UPSERT_SQL: &str = r#"
    INSERT INTO product_matches (
        product_id, contact_id, match_score, match_reasons,
        industry_score, company_size_score, title_score, tags_score, status_score,
        recommended_approach, why_buy_reasons, objections_anticipated,
        ai_confidence, ai_reasoning, ai_talking_points,
        predicted_conversion, optimal_outreach_time, calculated_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
    ON CONFLICT (product_id, contact_id)
    DO UPDATE SET
        match_score = EXCLUDED.match_score,
        match_reasons = EXCLUDED.match_reasons,
        industry_score = EXCLUDED.industry_score,
        company_size_score = EXCLUDED.company_size_score,
        title_score = EXCLUDED.title_score,
        tags_score = EXCLUDED.tags_score,
        status_score = EXCLUDED.status_score,
        recommended_approach = EXCLUDED.recommended_approach,
        why_buy_reasons = EXCLUDED.why_buy_reasons,
        objections_anticipated = EXCLUDED.objections_anticipated,
        ai_confidence = EXCLUDED.ai_confidence,
        ai_reasoning = EXCLUDED.ai_reasoning,
        ai_talking_points = EXCLUDED.ai_talking_points,
        predicted_conversion = EXCLUDED.predicted_conversion,
        optimal_outreach_time = EXCLUDED.optimal_outreach_time,
        calculated_at = EXCLUDED.calculated_at
    RETURNING *
"#;

/// PostgreSQL-backed match store
///
/// Maintains the `product_matches` table, separate from the hosted CRM
/// database, so batch scoring can rewrite thousands of rows cheaply without
/// touching the CRM's document collections.
pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL match store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Stored matches for a product, best first
    pub async fn top_for_product(
        &self,
        product_id: &str,
        limit: usize,
    ) -> Result<Vec<MatchResult>, StoreError> {
        let query = r#"
            SELECT product_id, contact_id, match_score, match_reasons,
                   industry_score, company_size_score, title_score, tags_score, status_score,
                   recommended_approach, why_buy_reasons, objections_anticipated,
                   ai_confidence, ai_reasoning, ai_talking_points,
                   predicted_conversion, optimal_outreach_time, calculated_at
            FROM product_matches
            WHERE product_id = $1
            ORDER BY match_score DESC, contact_id ASC
            LIMIT $2
        "#;

        let rows = sqlx::query(query)
            .bind(product_id)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let matches: Result<Vec<MatchResult>, StoreError> =
            rows.iter().map(row_to_match).collect();

        tracing::debug!("Loaded top matches for product {}", product_id);

        matches
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    async fn upsert(&self, result: &MatchResult) -> Result<MatchResult, StoreError> {
        let row = bind_match(sqlx::query(UPSERT_SQL), result)?
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(
            "Upserted match {} / {} (score {})",
            result.product_id,
            result.contact_id,
            result.match_score
        );

        row_to_match(&row)
    }

    async fn upsert_many(&self, results: &[MatchResult]) -> Result<Vec<MatchResult>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(results.len());

        for result in results {
            let row = bind_match(sqlx::query(UPSERT_SQL), result)?
                .fetch_one(&mut *tx)
                .await?;
            saved.push(row_to_match(&row)?);
        }

        tx.commit().await?;

        tracing::debug!("Upserted {} matches in one chunk", saved.len());

        Ok(saved)
    }
}

type PgQuery<'q> =
    sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>;

/// Bind all columns of a match result to the upsert statement, in the
/// column order of `UPSERT_SQL`
fn bind_match<'q>(
    query: PgQuery<'q>,
    result: &'q MatchResult,
) -> Result<PgQuery<'q>, StoreError> {
    let talking_points = result
        .ai_talking_points
        .as_ref()
        .map(serde_json::to_value)
        .transpose()?;

    Ok(query
        .bind(&result.product_id)
        .bind(&result.contact_id)
        .bind(result.match_score)
        .bind(serde_json::to_value(&result.match_reasons)?)
        .bind(result.industry_score)
        .bind(result.company_size_score)
        .bind(result.title_score)
        .bind(result.tags_score)
        .bind(result.status_score)
        .bind(&result.recommended_approach)
        .bind(serde_json::to_value(&result.why_buy_reasons)?)
        .bind(serde_json::to_value(&result.objections_anticipated)?)
        .bind(result.ai_confidence)
        .bind(result.ai_reasoning.as_deref())
        .bind(talking_points)
        .bind(result.predicted_conversion)
        .bind(result.optimal_outreach_time.as_deref())
        .bind(result.calculated_at))
}

fn row_to_match(row: &PgRow) -> Result<MatchResult, StoreError> {
    let match_reasons: Vec<MatchReason> =
        serde_json::from_value(row.get::<serde_json::Value, _>("match_reasons"))?;
    let why_buy_reasons: Vec<String> =
        serde_json::from_value(row.get::<serde_json::Value, _>("why_buy_reasons"))?;
    let objections_anticipated: Vec<String> =
        serde_json::from_value(row.get::<serde_json::Value, _>("objections_anticipated"))?;
    let ai_talking_points: Option<Vec<String>> = row
        .get::<Option<serde_json::Value>, _>("ai_talking_points")
        .map(serde_json::from_value)
        .transpose()?;

    Ok(MatchResult {
        product_id: row.get("product_id"),
        contact_id: row.get("contact_id"),
        match_score: row.get("match_score"),
        match_reasons,
        industry_score: row.get("industry_score"),
        company_size_score: row.get("company_size_score"),
        title_score: row.get("title_score"),
        tags_score: row.get("tags_score"),
        status_score: row.get("status_score"),
        recommended_approach: row.get("recommended_approach"),
        why_buy_reasons,
        objections_anticipated,
        ai_confidence: row.get("ai_confidence"),
        ai_reasoning: row.get("ai_reasoning"),
        ai_talking_points,
        predicted_conversion: row.get("predicted_conversion"),
        optimal_outreach_time: row.get("optimal_outreach_time"),
        calculated_at: row.get("calculated_at"),
    })
}
