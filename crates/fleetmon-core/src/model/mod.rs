//! Canonical domain types.

mod device;
mod view_settings;

pub use device::{Device, DeviceCategory, DeviceId, DeviceStatus};
pub(crate) use device::today;
pub use view_settings::{SortField, ViewMode, ViewSettings};
