// Hand-crafted async HTTP client for the inventory pipeline service.
//
// Base path: /api/v1/
// Auth: X-API-KEY header

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::Error;
use crate::types::{BatchRef, EtlStepResult, RemoteDeviceRecord, StagingDevice, TransformCounts};

// ── Error response shape from the pipeline service ───────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the pipeline service.
///
/// Uses API-key authentication and communicates via JSON REST endpoints
/// under `/api/v1/`.
pub struct PipelineClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PipelineClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects `X-API-KEY` as a default header on every request.
    pub fn from_api_key(
        base_url: &str,
        api_key: &secrecy::SecretString,
        transport: &crate::TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::Authentication {
                message: format!("invalid API key header value: {e}"),
            })?;
        key_value.set_sensitive(true);
        headers.insert("X-API-KEY", key_value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build the base URL ending in `/api/v1/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api/v1") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/v1/"));
        }

        Ok(url)
    }

    /// Join a relative path (e.g. `"devices"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Pipeline operations ──────────────────────────────────────────

    /// Fetch the remote authoritative device set, ordered by name.
    pub async fn pull(&self) -> Result<Vec<RemoteDeviceRecord>, Error> {
        self.get("devices").await
    }

    /// Load a device batch into staging. Returns the batch identifier.
    pub async fn load_staging(
        &self,
        source: &str,
        devices: &[StagingDevice],
    ) -> Result<Uuid, Error> {
        let body = json!({ "source": source, "devices": devices });
        let batch: BatchRef = self.post("staging/batches", &body).await?;
        Ok(batch.batch_id)
    }

    /// Transform a staged batch into the authoritative store.
    pub async fn transform(&self, batch_id: Uuid) -> Result<TransformCounts, Error> {
        self.post(&format!("staging/batches/{batch_id}/transform"), &json!({}))
            .await
    }

    /// Run the full remote pipeline refresh. No input, no local effect.
    pub async fn run_full_pipeline(&self) -> Result<Vec<EtlStepResult>, Error> {
        self.post("pipeline/run", &json!({})).await
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey;
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            return Error::Authentication {
                message: "credential accepted but access denied".into(),
            };
        }

        let raw = resp.text().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            Error::Pipeline {
                status: status.as_u16(),
                message: err.message.unwrap_or_else(|| status.to_string()),
                code: err.code,
            }
        } else {
            Error::Pipeline {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: None,
            }
        }
    }
}
