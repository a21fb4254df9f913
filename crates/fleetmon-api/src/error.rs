use thiserror::Error;

/// Top-level error type for the `fleetmon-api` crate.
///
/// Covers every failure mode of the pipeline service surface:
/// authentication, transport, and structured pipeline errors.
/// `fleetmon-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credential rejected by the pipeline service.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// API key rejected (HTTP 401).
    #[error("Invalid API key")]
    InvalidApiKey,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Pipeline service ────────────────────────────────────────────
    /// Structured error returned by the pipeline service.
    #[error("Pipeline error (HTTP {status}): {message}")]
    Pipeline {
        message: String,
        code: Option<String>,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the credential itself was
    /// rejected (as opposed to the service being unreachable).
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::InvalidApiKey)
    }

    /// Returns `true` if the failure happened before any HTTP exchange
    /// completed -- the cases worth running network diagnostics for.
    pub fn is_connection_failure(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            Self::Tls(_) => true,
            _ => false,
        }
    }
}
