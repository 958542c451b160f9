//! Config endpoint use case.
//!
//! [`ConfigService`] answers every request for [`CONFIG_ROUTE`]:
//!
//! 1. `GET` returns the stored document (or the default one).
//! 2. `POST` replaces the whole document.  The shared secret is checked
//!    before the body is even parsed.
//! 3. `PATCH` sets one leaf named by a path expression such as
//!    `experience[0].title`, after checking it against the schema.
//!
//! Writes are serialized by an async mutex, so a `PATCH` never reads a
//! document that a concurrent `POST` is halfway through replacing, and two
//! `PATCH`es never lose each other's change.

use std::sync::Arc;

use portfolio_core::{ConfigEdit, EditError};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::application::auth::secret_matches;
use crate::domain::api::{ApiMethod, ApiRequest, ApiResponse, PatchBody, CONFIG_ROUTE};
use crate::infrastructure::storage::{ConfigStore, StoreError};

/// Everything that can make a request fail.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The shared secret was missing or wrong.
    #[error("missing or invalid admin secret")]
    Unauthorized,

    /// The body is not JSON of the expected shape.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The `PATCH` names a field or value the schema rejects, or a position
    /// the stored document does not have.
    #[error("invalid edit: {0}")]
    InvalidEdit(#[from] EditError),

    /// The store could not produce the document.
    #[error("failed to load config: {0}")]
    Load(#[source] StoreError),

    /// The store could not persist the document.
    #[error("failed to save config: {0}")]
    Save(#[source] StoreError),
}

impl ServiceError {
    /// The HTTP status code this error is reported with.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::Unauthorized => 401,
            ServiceError::InvalidBody(_) | ServiceError::InvalidEdit(_) => 400,
            ServiceError::Load(_) | ServiceError::Save(_) => 500,
        }
    }

    /// Converts the error into the JSON error body sent to the client.
    ///
    /// Load failures are reported with a generic message only; the cause is
    /// logged instead.
    pub fn into_response(self) -> ApiResponse {
        let status = self.status();
        match self {
            ServiceError::Unauthorized => ApiResponse::error(status, "Unauthorized"),
            ServiceError::InvalidBody(details) => {
                ApiResponse::error_with_details(status, "Invalid JSON body", &details)
            }
            ServiceError::InvalidEdit(e) => {
                ApiResponse::error_with_details(status, "Invalid edit", &e.to_string())
            }
            ServiceError::Load(_) => ApiResponse::error(status, "Failed to load config"),
            ServiceError::Save(e) => {
                ApiResponse::error_with_details(status, "Failed to save config", &e.to_string())
            }
        }
    }
}

/// Serves the portfolio document from a [`ConfigStore`].
pub struct ConfigService {
    store: Arc<dyn ConfigStore>,
    admin_secret: String,
    write_lock: Mutex<()>,
}

impl ConfigService {
    /// Creates a service that accepts writes carrying `admin_secret`.
    pub fn new(store: Arc<dyn ConfigStore>, admin_secret: impl Into<String>) -> Self {
        Self {
            store,
            admin_secret: admin_secret.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Routes one request and turns the outcome into a response.
    ///
    /// Never fails: every error becomes an error response.
    pub async fn handle(&self, request: ApiRequest) -> ApiResponse {
        if request.path != CONFIG_ROUTE {
            debug!(path = %request.path, "no such route");
            return ApiResponse::not_found();
        }

        let secret = request.admin_secret.as_deref();
        let result = match request.method {
            ApiMethod::Get => self.get_config().await.map(ApiResponse::ok),
            ApiMethod::Post => self
                .replace_config(secret, &request.body)
                .await
                .map(|()| ApiResponse::saved()),
            ApiMethod::Patch => self
                .patch_config(secret, &request.body)
                .await
                .map(ApiResponse::ok),
            ApiMethod::Other => return ApiResponse::method_not_allowed(),
        };

        result.unwrap_or_else(|e| {
            if e.status() >= 500 {
                error!("{e}");
            }
            e.into_response()
        })
    }

    /// Returns the current document.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Load`] when the store fails.
    pub async fn get_config(&self) -> Result<Value, ServiceError> {
        self.store.load().await.map_err(ServiceError::Load)
    }

    /// Replaces the whole document with `body`.
    ///
    /// The body must be a JSON object; its content is otherwise stored as-is.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Unauthorized`] – wrong or missing secret (checked
    ///   first, so unauthenticated callers learn nothing about the body).
    /// - [`ServiceError::InvalidBody`] – not JSON, or not an object.
    /// - [`ServiceError::Save`] – the store failed; the old document stays.
    pub async fn replace_config(&self, secret: Option<&str>, body: &[u8]) -> Result<(), ServiceError> {
        self.authorize(secret)?;
        let document = parse_document(body)?;

        let _guard = self.write_lock.lock().await;
        self.store.save(&document).await.map_err(ServiceError::Save)?;
        info!("portfolio document replaced");
        Ok(())
    }

    /// Applies a single-field edit and returns the updated document.
    ///
    /// # Errors
    ///
    /// As [`replace_config`](Self::replace_config), plus
    /// [`ServiceError::InvalidEdit`] when the path or value is rejected and
    /// [`ServiceError::Load`] when the current document cannot be read.
    pub async fn patch_config(&self, secret: Option<&str>, body: &[u8]) -> Result<Value, ServiceError> {
        self.authorize(secret)?;
        let patch: PatchBody =
            serde_json::from_slice(body).map_err(|e| ServiceError::InvalidBody(e.to_string()))?;
        let edit = ConfigEdit::parse(&patch.path, &patch.value)?;

        let _guard = self.write_lock.lock().await;
        let current = self.store.load().await.map_err(ServiceError::Load)?;
        let updated = edit.apply_to_document(&current)?;
        self.store.save(&updated).await.map_err(ServiceError::Save)?;
        info!(field = %edit.field(), "portfolio field updated");
        Ok(updated)
    }

    fn authorize(&self, secret: Option<&str>) -> Result<(), ServiceError> {
        if secret_matches(&self.admin_secret, secret) {
            Ok(())
        } else {
            warn!(
                secret_present = secret.is_some(),
                "rejected write with missing or wrong admin secret"
            );
            Err(ServiceError::Unauthorized)
        }
    }
}

/// Parses a full-document body.  The top level must be an object.
fn parse_document(body: &[u8]) -> Result<Value, ServiceError> {
    let document: Value =
        serde_json::from_slice(body).map_err(|e| ServiceError::InvalidBody(e.to_string()))?;
    if !document.is_object() {
        return Err(ServiceError::InvalidBody(
            "top-level value must be a JSON object".to_string(),
        ));
    }
    Ok(document)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::{default_document, InMemoryConfigStore, MockConfigStore};
    use serde_json::json;
    use std::path::PathBuf;

    const SECRET: &str = "s3cret";

    fn service_with(store: Arc<dyn ConfigStore>) -> ConfigService {
        ConfigService::new(store, SECRET)
    }

    fn in_memory_service() -> (ConfigService, Arc<InMemoryConfigStore>) {
        let store = Arc::new(InMemoryConfigStore::new());
        let service = service_with(Arc::clone(&store) as Arc<dyn ConfigStore>);
        (service, store)
    }

    fn write_failure() -> StoreError {
        StoreError::Write {
            path: PathBuf::from("portfolio-data.json"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        }
    }

    // ── GET ───────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_get_returns_default_when_nothing_saved() {
        let (service, _) = in_memory_service();

        let resp = service.handle(ApiRequest::get()).await;

        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, default_document().unwrap());
    }

    #[tokio::test]
    async fn test_get_store_failure_is_500_with_generic_message() {
        // Arrange
        let mut store = MockConfigStore::new();
        store.expect_load().times(1).returning(|| {
            Err(StoreError::Read {
                path: PathBuf::from("portfolio-data.json"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        });
        let service = service_with(Arc::new(store));

        // Act
        let resp = service.handle(ApiRequest::get()).await;

        // Assert
        assert_eq!(resp.status, 500);
        assert_eq!(resp.body, json!({ "error": "Failed to load config" }));
    }

    // ── POST ──────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_post_with_correct_secret_saves_document() {
        // Arrange
        let (service, store) = in_memory_service();
        let doc = json!({ "personal": { "firstName": "Ana" } });

        // Act
        let resp = service
            .handle(ApiRequest::write(ApiMethod::Post, Some(SECRET), doc.to_string()))
            .await;

        // Assert
        assert_eq!(resp, ApiResponse::saved());
        assert_eq!(store.snapshot().await, Some(doc));
    }

    #[tokio::test]
    async fn test_post_with_wrong_secret_is_401_and_store_untouched() {
        // Arrange: the store must never be asked to save
        let mut store = MockConfigStore::new();
        store.expect_save().never();
        let service = service_with(Arc::new(store));

        // Act
        let resp = service
            .handle(ApiRequest::write(ApiMethod::Post, Some("guess"), "{}"))
            .await;

        // Assert
        assert_eq!(resp.status, 401);
        assert_eq!(resp.body, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn test_post_without_secret_is_401() {
        let (service, store) = in_memory_service();

        let resp = service
            .handle(ApiRequest::write(ApiMethod::Post, None, "{}"))
            .await;

        assert_eq!(resp.status, 401);
        assert!(store.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_post_checks_secret_before_parsing_body() {
        let (service, _) = in_memory_service();

        let resp = service
            .handle(ApiRequest::write(ApiMethod::Post, Some("guess"), "{ not json"))
            .await;

        assert_eq!(resp.status, 401);
    }

    #[tokio::test]
    async fn test_post_malformed_json_is_400() {
        let (service, store) = in_memory_service();

        let resp = service
            .handle(ApiRequest::write(ApiMethod::Post, Some(SECRET), "{ not json"))
            .await;

        assert_eq!(resp.status, 400);
        assert_eq!(resp.body["error"], "Invalid JSON body");
        assert!(resp.body["details"].is_string());
        assert!(store.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_post_non_object_is_400() {
        let (service, _) = in_memory_service();

        for body in ["[]", "42", "\"text\"", "null"] {
            let resp = service
                .handle(ApiRequest::write(ApiMethod::Post, Some(SECRET), body))
                .await;
            assert_eq!(resp.status, 400, "body {body}");
        }
    }

    #[tokio::test]
    async fn test_post_store_failure_is_500_with_details() {
        // Arrange
        let mut store = MockConfigStore::new();
        store
            .expect_save()
            .withf(|doc: &Value| doc["a"] == 1)
            .times(1)
            .returning(|_| Err(write_failure()));
        let service = service_with(Arc::new(store));

        // Act
        let resp = service
            .handle(ApiRequest::write(ApiMethod::Post, Some(SECRET), r#"{"a":1}"#))
            .await;

        // Assert
        assert_eq!(resp.status, 500);
        assert_eq!(resp.body["error"], "Failed to save config");
        assert!(resp.body["details"]
            .as_str()
            .is_some_and(|d| d.contains("portfolio-data.json")));
    }

    #[tokio::test]
    async fn test_post_stores_unknown_fields_verbatim() {
        let (service, store) = in_memory_service();
        let doc = json!({ "personal": { "firstName": 7 }, "extra": [1, 2] });

        let resp = service
            .handle(ApiRequest::write(ApiMethod::Post, Some(SECRET), doc.to_string()))
            .await;

        assert_eq!(resp.status, 200);
        assert_eq!(store.snapshot().await, Some(doc));
    }

    // ── PATCH ─────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_patch_updates_one_field_of_stored_document() {
        // Arrange
        let (service, store) = in_memory_service();
        let body = json!({ "path": "experience[0].title", "value": "Lead QA" });

        // Act
        let resp = service
            .handle(ApiRequest::write(ApiMethod::Patch, Some(SECRET), body.to_string()))
            .await;

        // Assert
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body["experience"][0]["title"], "Lead QA");
        let saved = store.snapshot().await.expect("saved");
        assert_eq!(saved, resp.body);
        assert_eq!(saved["experience"][1], default_document().unwrap()["experience"][1]);
    }

    #[tokio::test]
    async fn test_patch_requires_secret() {
        let (service, store) = in_memory_service();
        let body = json!({ "path": "personal.role", "value": "x" });

        let resp = service
            .handle(ApiRequest::write(ApiMethod::Patch, None, body.to_string()))
            .await;

        assert_eq!(resp.status, 401);
        assert!(store.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_patch_out_of_range_is_400_and_store_untouched() {
        let (service, store) = in_memory_service();
        let body = json!({ "path": "experience[9].title", "value": "x" });

        let resp = service
            .handle(ApiRequest::write(ApiMethod::Patch, Some(SECRET), body.to_string()))
            .await;

        assert_eq!(resp.status, 400);
        assert_eq!(resp.body["error"], "Invalid edit");
        assert!(store.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_patch_unknown_field_is_400() {
        let (service, _) = in_memory_service();
        let body = json!({ "path": "personal.nickname", "value": "x" });

        let resp = service
            .handle(ApiRequest::write(ApiMethod::Patch, Some(SECRET), body.to_string()))
            .await;

        assert_eq!(resp.status, 400);
    }

    #[tokio::test]
    async fn test_patch_wrong_value_type_is_400() {
        let (service, _) = in_memory_service();
        let body = json!({ "path": "learning.progress", "value": "lots" });

        let resp = service
            .handle(ApiRequest::write(ApiMethod::Patch, Some(SECRET), body.to_string()))
            .await;

        assert_eq!(resp.status, 400);
    }

    #[tokio::test]
    async fn test_patch_malformed_body_is_400() {
        let (service, _) = in_memory_service();

        let resp = service
            .handle(ApiRequest::write(ApiMethod::Patch, Some(SECRET), r#"{"value": 1}"#))
            .await;

        assert_eq!(resp.status, 400);
        assert_eq!(resp.body["error"], "Invalid JSON body");
    }

    #[tokio::test]
    async fn test_patch_load_failure_is_500_and_nothing_saved() {
        let mut store = MockConfigStore::new();
        store.expect_load().times(1).returning(|| {
            Err(StoreError::Parse {
                path: PathBuf::from("portfolio-data.json"),
                source: serde_json::from_str::<Value>("{").unwrap_err(),
            })
        });
        store.expect_save().never();
        let service = service_with(Arc::new(store));
        let body = json!({ "path": "personal.role", "value": "x" });

        let resp = service
            .handle(ApiRequest::write(ApiMethod::Patch, Some(SECRET), body.to_string()))
            .await;

        assert_eq!(resp.status, 500);
    }

    // ── Routing ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let (service, _) = in_memory_service();
        let request = ApiRequest {
            path: "/api/other".to_string(),
            ..ApiRequest::get()
        };

        let resp = service.handle(request).await;

        assert_eq!(resp.status, 404);
    }

    #[tokio::test]
    async fn test_other_method_is_405() {
        let (service, _) = in_memory_service();

        let resp = service
            .handle(ApiRequest::write(ApiMethod::Other, Some(SECRET), "{}"))
            .await;

        assert_eq!(resp.status, 405);
        assert!(resp.allow.is_some());
    }

    // ── Concurrency ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_concurrent_patches_are_not_lost() {
        // Arrange
        let (service, store) = in_memory_service();
        let service = Arc::new(service);

        // Act: edit eight different metrics/tech fields at once
        let mut tasks = Vec::new();
        for i in 0..8usize {
            let service = Arc::clone(&service);
            tasks.push(tokio::spawn(async move {
                let body = json!({ "path": format!("techStack[{i}].name"), "value": format!("T{i}") });
                service
                    .handle(ApiRequest::write(ApiMethod::Patch, Some(SECRET), body.to_string()))
                    .await
            }));
        }
        for task in tasks {
            assert_eq!(task.await.unwrap().status, 200);
        }

        // Assert: every edit survived
        let saved = store.snapshot().await.expect("saved");
        for i in 0..8usize {
            assert_eq!(saved["techStack"][i]["name"], format!("T{i}"));
        }
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(ServiceError::Unauthorized.status(), 401);
        assert_eq!(ServiceError::InvalidBody(String::new()).status(), 400);
        assert_eq!(ServiceError::Save(write_failure()).status(), 500);
    }
}
