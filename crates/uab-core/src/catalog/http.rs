//! `reqwest` client for the asset catalog REST service.

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::Deserialize;

use super::{AssetCatalog, CatalogError, CatalogResult};
use crate::config::{normalize_server_url, SyncSettings};
use crate::Error;
use crate::models::{AssetRecord, NewAsset};

#[derive(Clone, Debug)]
pub struct HttpAssetCatalog {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAssetCatalog {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> CatalogResult<Self> {
        let base_url = normalize_server_url(base_url.into()).map_err(|error| match error {
            Error::InvalidInput(message) => CatalogError::InvalidConfiguration(message),
            other => CatalogError::InvalidConfiguration(other.to_string()),
        })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { base_url, client })
    }

    pub fn from_settings(settings: &SyncSettings) -> CatalogResult<Self> {
        Self::new(settings.server_url.clone(), settings.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn assets_url(&self) -> String {
        format!("{}/assets/", self.base_url)
    }

    fn asset_url(&self, id: i64) -> String {
        format!("{}/assets/{id}", self.base_url)
    }
}

impl AssetCatalog for HttpAssetCatalog {
    fn location(&self) -> String {
        self.base_url.clone()
    }

    async fn list_assets(&self) -> CatalogResult<Vec<AssetRecord>> {
        tracing::debug!(url = %self.assets_url(), "GET assets");
        let response = self
            .client
            .get(self.assets_url())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<Vec<AssetRecord>>().await?)
    }

    async fn create_asset(&self, asset: &NewAsset) -> CatalogResult<AssetRecord> {
        tracing::debug!(name = %asset.name, path = %asset.directory_path, "POST asset");
        let response = self
            .client
            .post(self.assets_url())
            .json(asset)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<AssetRecord>().await?)
    }

    async fn delete_asset(&self, id: i64) -> CatalogResult<AssetRecord> {
        tracing::debug!(id, "DELETE asset");
        let response = self.client.delete(self.asset_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }
        let response = ensure_success(response).await?;
        Ok(response.json::<AssetRecord>().await?)
    }
}

async fn ensure_success(response: Response) -> CatalogResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(CatalogError::Api {
        status: status.as_u16(),
        message: parse_api_error(&body),
    })
}

/// FastAPI-style error body (`detail`), with a couple of common fallbacks.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: Option<serde_json::Value>,
    message: Option<String>,
    error: Option<String>,
}

fn parse_api_error(body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        let detail = payload.detail.map(|detail| match detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        });
        if let Some(message) = detail.or(payload.message).or(payload.error) {
            return compact_text(&message);
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else {
        trimmed
    }
}

fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use pretty_assertions::assert_eq;

    use super::*;

    type Store = Arc<Mutex<Vec<AssetRecord>>>;

    async fn list(State(store): State<Store>) -> Json<Vec<AssetRecord>> {
        Json(store.lock().unwrap().clone())
    }

    async fn create(
        State(store): State<Store>,
        Json(asset): Json<NewAsset>,
    ) -> (AxumStatus, Json<AssetRecord>) {
        let mut assets = store.lock().unwrap();
        let created = AssetRecord {
            id: i64::try_from(assets.len()).unwrap() + 1,
            name: asset.name,
            description: asset.description,
            directory_path: asset.directory_path,
            preview_image_file_path: asset.preview_image_file_path,
        };
        assets.push(created.clone());
        (AxumStatus::CREATED, Json(created))
    }

    async fn remove(
        State(store): State<Store>,
        Path(id): Path<i64>,
    ) -> Result<Json<AssetRecord>, (AxumStatus, Json<serde_json::Value>)> {
        let mut assets = store.lock().unwrap();
        let index = assets.iter().position(|asset| asset.id == id).ok_or_else(|| {
            (
                AxumStatus::NOT_FOUND,
                Json(serde_json::json!({"detail": format!("Asset with id `{id}` not found")})),
            )
        })?;
        Ok(Json(assets.remove(index)))
    }

    async fn broken() -> (AxumStatus, Json<serde_json::Value>) {
        (
            AxumStatus::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"detail": "database is locked"})),
        )
    }

    async fn spawn_catalog(store: Store) -> String {
        let app = Router::new()
            .route("/assets/", get(list).post(create))
            .route("/assets/{id}", delete(remove))
            .route("/broken/assets/", get(broken).post(broken))
            .with_state(store);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{address}")
    }

    fn client(base_url: &str) -> HttpAssetCatalog {
        HttpAssetCatalog::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn new_rejects_invalid_base_urls() {
        assert!(HttpAssetCatalog::new(" ", Duration::from_secs(1)).is_err());
        let error = HttpAssetCatalog::new("127.0.0.1:8000", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(
            error,
            CatalogError::InvalidConfiguration(ref message) if message.contains("http://")
        ));
        let catalog = HttpAssetCatalog::new("http://127.0.0.1:8000/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(catalog.base_url(), "http://127.0.0.1:8000");
        assert_eq!(catalog.assets_url(), "http://127.0.0.1:8000/assets/");
        assert_eq!(catalog.asset_url(4), "http://127.0.0.1:8000/assets/4");
    }

    #[test]
    fn parse_api_error_prefers_detail() {
        assert_eq!(parse_api_error(r#"{"detail":"nope"}"#), "nope");
        assert_eq!(
            parse_api_error(r#"{"detail":[{"msg":"field required"}]}"#),
            r#"[{"msg":"field required"}]"#
        );
        assert_eq!(parse_api_error("  plain failure "), "plain failure");
        assert_eq!(parse_api_error(""), "empty response body");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn create_list_and_delete_round_trip_through_http() {
        let store = Store::default();
        let catalog = client(&spawn_catalog(store.clone()).await);

        let created = catalog
            .create_asset(&NewAsset::from_directory("/Assets/HDRIs/noon"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.name, "noon");

        let listed = catalog.list_assets().await.unwrap();
        assert_eq!(listed, vec![created.clone()]);

        let deleted = catalog.delete_asset(created.id).await.unwrap();
        assert_eq!(deleted, created);
        assert!(store.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn delete_missing_asset_is_not_found() {
        let catalog = client(&spawn_catalog(Store::default()).await);
        let error = catalog.delete_asset(42).await.unwrap_err();
        assert!(matches!(error, CatalogError::NotFound(42)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn server_errors_surface_status_and_detail() {
        let base = spawn_catalog(Store::default()).await;
        let catalog = client(&format!("{base}/broken"));

        match catalog.list_assets().await.unwrap_err() {
            CatalogError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database is locked");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn unreachable_server_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let catalog = client(&format!("http://{address}"));
        let error = catalog.list_assets().await.unwrap_err();
        assert!(matches!(error, CatalogError::Http(_)));
    }
}
