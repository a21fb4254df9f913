// ── Remote pipeline synchronization ──
//
// Pull, commit and push against the inventory pipeline service. The
// sync client owns no device state; it reads from and writes to the
// caller's `DeviceStore`, keeping the local set atomic across a pull.

use std::time::Duration;

use secrecy::SecretString;
use serde::Serialize;
use tracing::{info, warn};

use fleetmon_api::{PipelineClient, TlsMode, TransportConfig, diagnose_connection};

use crate::convert::{device_from_remote, staging_from_device};
use crate::error::CoreError;
use crate::store::DeviceStore;

/// Source tag stamped onto every staging batch this client loads.
const STAGING_SOURCE: &str = "APP";

/// Connection settings for the pipeline service.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub host: String,
    pub port: u16,
    pub api_key: SecretString,
    pub timeout_secs: u64,
    pub use_https: bool,
    /// Skip TLS certificate verification. Lab setups only.
    pub insecure: bool,
}

impl SyncConfig {
    fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}

/// Outcome of committing the local set to the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncBatchResult {
    pub inserted: u32,
    pub updated: u32,
    pub rejected: u32,
}

/// One step of a remote full-pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EtlStep {
    pub step: String,
    pub status: String,
    pub details: Option<String>,
}

/// Client for pull/commit/push flows against the pipeline service.
pub struct SyncClient {
    client: PipelineClient,
    host: String,
    port: u16,
}

impl SyncClient {
    pub fn new(config: &SyncConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: if config.insecure {
                TlsMode::DangerAcceptInvalid
            } else {
                TlsMode::System
            },
            timeout: Duration::from_secs(config.timeout_secs),
        };
        let client = PipelineClient::from_api_key(&config.base_url(), &config.api_key, &transport)?;
        Ok(Self {
            client,
            host: config.host.clone(),
            port: config.port,
        })
    }

    /// Wrap an already-built [`PipelineClient`].
    pub fn from_client(client: PipelineClient, host: impl Into<String>, port: u16) -> Self {
        Self {
            client,
            host: host.into(),
            port,
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Replace the local set with the remote authoritative one.
    ///
    /// All-or-nothing: on any failure the store is left untouched. An
    /// empty remote set empties the store.
    pub async fn pull(&self, store: &mut DeviceStore) -> Result<usize, CoreError> {
        let records = match self.client.pull().await {
            Ok(records) => records,
            Err(e) => return Err(self.refine(e).await),
        };

        let devices: Vec<_> = records.into_iter().map(device_from_remote).collect();
        let count = devices.len();
        store.replace_all(devices);

        info!(count, "pulled device set from pipeline");
        Ok(count)
    }

    /// Stage the full local set remotely and transform it into the
    /// authoritative store. Local devices are never modified.
    pub async fn commit(&self, store: &DeviceStore) -> Result<SyncBatchResult, CoreError> {
        let batch: Vec<_> = store.snapshot().iter().map(staging_from_device).collect();
        let staged = batch.len();

        let batch_id = match self.client.load_staging(STAGING_SOURCE, &batch).await {
            Ok(id) => id,
            Err(e) => return Err(self.refine(e).await),
        };
        info!(%batch_id, staged, "staging batch loaded");

        let counts = match self.client.transform(batch_id).await {
            Ok(counts) => counts,
            // The batch made it to staging, so a pipeline-level error
            // here is a transform rejection, not a transport problem.
            Err(fleetmon_api::Error::Pipeline { message, .. }) => {
                return Err(CoreError::TransformRejection { message });
            }
            Err(e) => return Err(self.refine(e).await),
        };

        if counts.rejected > 0 {
            warn!(rejected = counts.rejected, "transform rejected some records");
        }
        Ok(SyncBatchResult {
            inserted: counts.inserted,
            updated: counts.updated,
            rejected: counts.rejected,
        })
    }

    /// Trigger a full remote pipeline refresh. Returns the per-step
    /// results in execution order.
    pub async fn push(&self) -> Result<Vec<EtlStep>, CoreError> {
        let steps = match self.client.run_full_pipeline().await {
            Ok(steps) => steps,
            Err(e) => return Err(self.refine(e).await),
        };

        Ok(steps
            .into_iter()
            .map(|s| EtlStep {
                step: s.step,
                status: s.status,
                details: s.details,
            })
            .collect())
    }

    // ── Error refinement ─────────────────────────────────────────────

    /// Translate a transport error and, for connection failures, attach
    /// a layered network diagnosis so the caller can report which layer
    /// broke.
    async fn refine(&self, err: fleetmon_api::Error) -> CoreError {
        // An HTTP-level rejection proves the service was reachable, so
        // only probe when the exchange never completed.
        let run_diagnosis = err.is_connection_failure();
        let mut core = CoreError::from(err);

        if run_diagnosis {
            let diagnosis = diagnose_connection(&self.host, self.port).await;
            info!(%diagnosis, "connection diagnosis");
            if let CoreError::Connectivity {
                diagnosis: slot, ..
            } = &mut core
            {
                *slot = Some(diagnosis);
            }
        }

        core
    }
}
