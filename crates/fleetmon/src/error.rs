//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use fleetmon_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the pipeline service at {endpoint}")]
    #[diagnostic(
        code(fleetmon::connection_failed),
        help("{diagnosis}\nCheck the host and port with: fleetmon config show")
    )]
    ConnectionFailed {
        endpoint: String,
        reason: String,
        diagnosis: String,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(fleetmon::auth_failed),
        help(
            "Verify the API key.\n\
             Set it with: fleetmon config set --api-key-env FLEETMON_API_KEY\n\
             or export FLEETMON_API_KEY directly."
        )
    )]
    AuthFailed { message: String },

    #[error("No API key configured")]
    #[diagnostic(
        code(fleetmon::no_credentials),
        help(
            "Configure the remote with: fleetmon config set --host <HOST>\n\
             and export FLEETMON_API_KEY."
        )
    )]
    NoCredentials,

    // ── Resources ────────────────────────────────────────────────────

    #[error("Device '{serial}' not found")]
    #[diagnostic(
        code(fleetmon::not_found),
        help("Run: fleetmon list to see the inventory")
    )]
    NotFound { serial: String },

    // ── Remote pipeline ──────────────────────────────────────────────

    #[error("The pipeline rejected the batch: {message}")]
    #[diagnostic(
        code(fleetmon::transform_rejected),
        help("Fix the offending records locally and commit again.")
    )]
    TransformRejected { message: String },

    #[error("Pipeline API error: {message}")]
    #[diagnostic(code(fleetmon::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fleetmon::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No remote pipeline configured")]
    #[diagnostic(
        code(fleetmon::no_remote),
        help("Configure one with: fleetmon config set --host <HOST> --port <PORT>")
    )]
    NoRemote,

    #[error("Configuration error: {message}")]
    #[diagnostic(code(fleetmon::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(fleetmon::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Data / IO ────────────────────────────────────────────────────

    #[error("Cannot read or write data: {message}")]
    #[diagnostic(code(fleetmon::data))]
    Data { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(fleetmon::json), help("Check the file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::TransformRejected { .. } => exit_code::REJECTED,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => Self::Validation {
                field: "device".into(),
                reason: message,
            },
            CoreError::Connectivity {
                endpoint,
                reason,
                diagnosis,
            } => Self::ConnectionFailed {
                endpoint,
                reason,
                diagnosis: diagnosis
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "no diagnosis available".into()),
            },
            CoreError::Authentication { message } => Self::AuthFailed { message },
            CoreError::TransformRejection { message } => Self::TransformRejected { message },
            CoreError::Api { message, status } => Self::ApiError { message, status },
            CoreError::Parse { message } => Self::Data { message },
            CoreError::DeviceNotFound { identifier } => Self::NotFound { serial: identifier },
            CoreError::Config { message } => Self::Config { message },
        }
    }
}

impl From<fleetmon_config::ConfigError> for CliError {
    fn from(err: fleetmon_config::ConfigError) -> Self {
        match err {
            fleetmon_config::ConfigError::NoCredentials => Self::NoCredentials,
            fleetmon_config::ConfigError::Validation { field, reason } => {
                Self::Validation { field, reason }
            }
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
