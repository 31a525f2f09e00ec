use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    AiScoreMatchRequest, AiScoreMatchResponse, BatchScoreRequest, BatchScoreResponse, Contact,
    ErrorResponse, HealthResponse, ScoreMatchRequest, ScoreMatchResponse, TopMatchesQuery,
    TopMatchesResponse,
};
use crate::services::{AppwriteClient, AppwriteError, PgMatchStore};
use crate::core::MatchEngine;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub store: Arc<PgMatchStore>,
    pub engine: MatchEngine,
    pub default_chunk_size: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/score", web::post().to(score_match))
        .route("/matches/score/ai", web::post().to(score_match_ai))
        .route("/matches/batch", web::post().to(batch_score))
        .route("/matches/top", web::get().to(top_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score one contact against a product
///
/// POST /api/v1/matches/score
///
/// Request body:
/// ```json
/// {
///   "productId": "string",
///   "contactId": "string",
///   "persist": true
/// }
/// ```
async fn score_match(
    state: web::Data<AppState>,
    req: web::Json<ScoreMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    tracing::info!(
        "Scoring contact {} against product {}",
        req.contact_id,
        req.product_id
    );

    let product = match state.appwrite.get_product(&req.product_id).await {
        Ok(product) => product,
        Err(e) => return read_model_error("product", &req.product_id, e),
    };
    let contact = match state.appwrite.get_contact(&req.contact_id).await {
        Ok(contact) => contact,
        Err(e) => return read_model_error("contact", &req.contact_id, e),
    };

    if !req.persist {
        let result = state.engine.calculate_match(&product, &contact);
        return HttpResponse::Ok().json(ScoreMatchResponse {
            match_result: result,
            persisted: false,
        });
    }

    match state.engine.calculate_and_save_match(&product, &contact).await {
        Some(saved) => HttpResponse::Ok().json(ScoreMatchResponse {
            match_result: saved,
            persisted: true,
        }),
        None => HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to save match".to_string(),
            message: "The match could not be persisted; see service logs".to_string(),
            status_code: 500,
        }),
    }
}

/// Score one contact with the reasoning service blended in
///
/// POST /api/v1/matches/score/ai
///
/// Request body:
/// ```json
/// {
///   "productId": "string",
///   "contactId": "string",
///   "effort": "low|medium|high"
/// }
/// ```
///
/// A reasoning failure is not an error: the response carries the rule-based
/// match with `aiEnhanced: false`.
async fn score_match_ai(
    state: web::Data<AppState>,
    req: web::Json<AiScoreMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    tracing::info!(
        "AI scoring contact {} against product {} (effort {:?})",
        req.contact_id,
        req.product_id,
        req.effort
    );

    let product = match state.appwrite.get_product(&req.product_id).await {
        Ok(product) => product,
        Err(e) => return read_model_error("product", &req.product_id, e),
    };
    let contact = match state.appwrite.get_contact(&req.contact_id).await {
        Ok(contact) => contact,
        Err(e) => return read_model_error("contact", &req.contact_id, e),
    };

    match state
        .engine
        .calculate_and_save_ai_enhanced_match(&product, &contact, req.effort)
        .await
    {
        Some(outcome) => {
            let ai_enhanced = outcome.is_enhanced();
            HttpResponse::Ok().json(AiScoreMatchResponse {
                match_result: outcome.into_result(),
                ai_enhanced,
                persisted: true,
            })
        }
        None => HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to save match".to_string(),
            message: "The match could not be persisted; see service logs".to_string(),
            status_code: 500,
        }),
    }
}

/// Score a batch of contacts for one product
///
/// POST /api/v1/matches/batch
///
/// Request body:
/// ```json
/// {
///   "productId": "string",
///   "contactIds": ["string"],
///   "chunkSize": 50,
///   "ai": false,
///   "effort": "medium"
/// }
/// ```
///
/// When `contactIds` is omitted, contacts are listed from the CRM.
async fn batch_score(
    state: web::Data<AppState>,
    req: web::Json<BatchScoreRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let product = match state.appwrite.get_product(&req.product_id).await {
        Ok(product) => product,
        Err(e) => return read_model_error("product", &req.product_id, e),
    };

    let contacts: Vec<Contact> = match &req.contact_ids {
        Some(ids) if !ids.is_empty() => {
            match state.appwrite.get_contacts_by_ids(ids).await {
                Ok(contacts) => contacts,
                Err(e) => return read_model_error("contacts", &req.product_id, e),
            }
        }
        _ => match state.appwrite.list_contacts(req.contact_limit).await {
            Ok(contacts) => contacts,
            Err(e) => return read_model_error("contacts", &req.product_id, e),
        },
    };

    let chunk_size = req.chunk_size.unwrap_or(state.default_chunk_size);

    tracing::info!(
        "Batch scoring {} contacts for product {} (chunk size {}, ai: {})",
        contacts.len(),
        req.product_id,
        chunk_size,
        req.ai
    );

    let on_progress = |completed: usize, total: usize| {
        tracing::info!("Batch progress: {}/{}", completed, total);
    };

    let outcome = if req.ai {
        state
            .engine
            .batch_calculate_ai_matches(&product, &contacts, req.effort, chunk_size, on_progress)
            .await
    } else {
        state
            .engine
            .batch_calculate_matches(&product, &contacts, chunk_size, on_progress)
            .await
    };

    HttpResponse::Ok().json(BatchScoreResponse {
        total_contacts: outcome.total_contacts,
        matches_saved: outcome.saved.len(),
        failed_chunks: outcome.failed_chunks,
        ai_enhanced: req.ai,
    })
}

/// Stored matches for a product, best first
///
/// GET /api/v1/matches/top?productId={productId}&limit=20
async fn top_matches(
    state: web::Data<AppState>,
    query: web::Query<TopMatchesQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    // Cap limit at 100 to prevent excessive queries
    let limit = query.limit.min(100) as usize;

    match state.store.top_for_product(&query.product_id, limit).await {
        Ok(matches) => HttpResponse::Ok().json(TopMatchesResponse {
            total_results: matches.len(),
            matches,
        }),
        Err(e) => {
            tracing::error!(
                "Failed to load top matches for {}: {}",
                query.product_id,
                e
            );
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load matches".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Translate a CRM read-model failure into an HTTP error response
fn read_model_error(resource: &str, id: &str, e: AppwriteError) -> HttpResponse {
    match e {
        AppwriteError::NotFound(message) => {
            tracing::info!("{} lookup missed for {}: {}", resource, id, message);
            HttpResponse::NotFound().json(ErrorResponse {
                error: format!("Unknown {}", resource),
                message,
                status_code: 404,
            })
        }
        e => {
            tracing::error!("Failed to fetch {} {}: {}", resource, id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Failed to fetch {}", resource),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_batch_request_defaults() {
        let req: BatchScoreRequest =
            serde_json::from_str(r#"{"productId": "prod_1"}"#).unwrap();

        assert!(req.contact_ids.is_none());
        assert!(req.chunk_size.is_none());
        assert!(!req.ai);
        assert_eq!(req.contact_limit, 500);
    }
}
