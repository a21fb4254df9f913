// fleetmon-api: async HTTP client for the remote inventory pipeline.
//
// The pipeline exposes four operations over JSON REST: fetch the
// authoritative device set, load a batch into staging, transform a
// staged batch, and run the full refresh. `fleetmon-core` wraps this
// crate and maps its errors into user-facing diagnostics.

pub mod client;
pub mod diagnose;
pub mod error;
pub mod transport;
pub mod types;

pub use client::PipelineClient;
pub use diagnose::{NetworkDiagnosis, diagnose_connection};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{BatchRef, EtlStepResult, RemoteDeviceRecord, StagingDevice, TransformCounts};
