use crate::models::{Contact, Product};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Handles all communication with the hosted CRM backend including:
/// - Fetching product profiles
/// - Fetching single contacts
/// - Listing contacts for batch scoring
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub products: String,
    pub contacts: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        }
    }

    /// Fetch a product profile by its ID
    pub async fn get_product(&self, product_id: &str) -> Result<Product, AppwriteError> {
        let doc = self
            .fetch_first_document(
                &self.collections.products,
                &format!(r#"["productId={}"]"#, product_id),
                || format!("Product not found: {}", product_id),
            )
            .await?;

        serde_json::from_value(doc)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse product: {}", e)))
    }

    /// Fetch a single contact by its ID
    pub async fn get_contact(&self, contact_id: &str) -> Result<Contact, AppwriteError> {
        let doc = self
            .fetch_first_document(
                &self.collections.contacts,
                &format!(r#"["contactId={}"]"#, contact_id),
                || format!("Contact not found: {}", contact_id),
            )
            .await?;

        serde_json::from_value(doc)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse contact: {}", e)))
    }

    /// Fetch the contacts with the given IDs; IDs that resolve to no
    /// document are dropped silently
    pub async fn get_contacts_by_ids(
        &self,
        contact_ids: &[String],
    ) -> Result<Vec<Contact>, AppwriteError> {
        let ids_json = serde_json::to_string(contact_ids)
            .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
        let queries = vec![
            format!("equal(\"contactId\", {})", ids_json),
            format!("limit({})", contact_ids.len().max(1)),
        ];

        self.list_documents(&self.collections.contacts, &queries).await
    }

    /// List contacts for batch scoring, up to `limit`
    pub async fn list_contacts(&self, limit: usize) -> Result<Vec<Contact>, AppwriteError> {
        let queries = vec![format!("limit({})", limit)];
        self.list_documents(&self.collections.contacts, &queries).await
    }

    /// Query a collection and return the first matching document
    async fn fetch_first_document(
        &self,
        collection: &str,
        query_json: &str,
        not_found: impl Fn() -> String,
    ) -> Result<Value, AppwriteError> {
        let encoded_query = urlencoding::encode(query_json);

        let url = format!(
            "{}/databases/{}/collections/{}/documents?query={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection,
            encoded_query
        );

        tracing::debug!("Fetching document from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if response.status().as_u16() == 401 {
            return Err(AppwriteError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to fetch document: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let doc = documents
            .first()
            .ok_or_else(|| AppwriteError::NotFound(not_found()))?;

        // Newer Appwrite puts fields on the document itself; older gateways
        // nest them under "data"
        let data = doc.get("data").unwrap_or(doc);

        Ok(data.clone())
    }

    /// Query a collection and parse every document that deserializes
    async fn list_documents<T: serde::de::DeserializeOwned>(
        &self,
        collection: &str,
        queries: &[String],
    ) -> Result<Vec<T>, AppwriteError> {
        let queries_json = serde_json::to_string(queries)
            .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
        let encoded_queries = urlencoding::encode(&queries_json);

        let url = format!(
            "{}/databases/{}/collections/{}/documents?query={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection,
            encoded_queries
        );

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if response.status().as_u16() == 401 {
            return Err(AppwriteError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to list documents: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let parsed: Vec<T> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .collect();

        tracing::debug!("Listed {} documents (total: {})", parsed.len(), total);

        Ok(parsed)
    }
}
