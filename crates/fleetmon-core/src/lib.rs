//! Data layer between `fleetmon-api` and UI consumers (currently the CLI).
//!
//! This crate owns the domain model and business logic of the local
//! inventory:
//!
//! - **[`DeviceStore`]** -- the authoritative, insertion-ordered set of
//!   inventory records for a session, with discrete change events
//!   broadcast to subscribers.
//!
//! - **[`ViewProjection`]** -- a derived, read-only filtered / sorted /
//!   grouped view over the store, recomputed on demand.
//!
//! - **[`merge_into`]** -- the serial-number-keyed import merge engine,
//!   with conflict resolution delegated to a [`ConflictResolver`]
//!   collaborator (interactive prompt, fixed policy, anything).
//!
//! - **[`SyncClient`]** -- the Pull / Commit / Push phase machine against
//!   the remote staging/transform pipeline.
//!
//! - **[`EditSession`]** -- the committed/draft two-slot edit state for a
//!   single selected record.

mod convert;
pub mod error;
pub mod interchange;
pub mod merge;
pub mod model;
pub mod projection;
pub mod session;
pub mod store;
pub mod sync;

pub use error::CoreError;
pub use merge::{ConflictAction, ConflictDecision, ConflictResolver, FixedPolicy, merge_into};
pub use model::{Device, DeviceCategory, DeviceId, DeviceStatus, SortField, ViewMode, ViewSettings};
pub use projection::{DeviceFilter, DeviceGroup, Projected, ViewProjection};
pub use session::EditSession;
pub use store::{DeviceStore, StoreEvent};
pub use sync::{EtlStep, SyncBatchResult, SyncClient, SyncConfig};
