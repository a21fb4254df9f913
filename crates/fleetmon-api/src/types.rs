// Wire types for the pipeline service (camelCase JSON).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One device row as returned by the authoritative store on pull.
///
/// Category and status arrive as raw warehouse codes (`"SRV-DB"`,
/// `"REPAIR"`, …); mapping onto local enums happens in `fleetmon-core`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDeviceRecord {
    pub serial_number: String,
    pub name: String,
    pub category_code: String,
    pub status_code: String,
    pub install_date: NaiveDate,
}

/// One device row in a staging load payload.
///
/// `category` is the upper-cased enum name; `status` is one of
/// `WORKING` / `BROKEN` / `DECOMMISSIONED`; `install_date` is an ISO date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagingDevice {
    pub name: String,
    pub serial_number: String,
    pub category: String,
    pub status: String,
    pub install_date: NaiveDate,
}

/// Identifier of a staged batch, returned by a staging load.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRef {
    pub batch_id: Uuid,
}

/// Row counts from transforming a staged batch into the authoritative store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformCounts {
    pub inserted: u32,
    pub updated: u32,
    pub rejected: u32,
}

/// Outcome of one stage of a full pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlStepResult {
    pub step: String,
    pub status: String,
    #[serde(default)]
    pub details: Option<String>,
}
