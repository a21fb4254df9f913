// ── Core error types ──
//
// User-facing errors from fleetmon-core. Consumers never see HTTP
// status codes or JSON parse failures directly; the
// `From<fleetmon_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants, and the sync client attaches a
// network diagnosis to connectivity failures.

use fleetmon_api::NetworkDiagnosis;
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation ───────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {endpoint}: {reason}")]
    Connectivity {
        endpoint: String,
        reason: String,
        /// Layered diagnosis (network → DNS → port), when one was run.
        diagnosis: Option<NetworkDiagnosis>,
    },

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Remote pipeline errors ───────────────────────────────────────
    #[error("Remote transform rejected the batch: {message}")]
    TransformRejection { message: String },

    #[error("Pipeline API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Device not found: {identifier}")]
    DeviceNotFound { identifier: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<fleetmon_api::Error> for CoreError {
    fn from(err: fleetmon_api::Error) -> Self {
        match err {
            fleetmon_api::Error::Authentication { message } => {
                CoreError::Authentication { message }
            }
            fleetmon_api::Error::InvalidApiKey => CoreError::Authentication {
                message: "API key rejected by the pipeline service".into(),
            },
            fleetmon_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_timeout() {
                    CoreError::Connectivity {
                        endpoint: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                        diagnosis: None,
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            fleetmon_api::Error::Tls(reason) => CoreError::Connectivity {
                endpoint: "<tls>".into(),
                reason,
                diagnosis: None,
            },
            fleetmon_api::Error::Pipeline {
                message, status, ..
            } => CoreError::Api {
                message,
                status: Some(status),
            },
            fleetmon_api::Error::Deserialization { message, .. } => CoreError::Api {
                message: format!("malformed pipeline response: {message}"),
                status: None,
            },
            fleetmon_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid endpoint URL: {e}"),
            },
        }
    }
}
