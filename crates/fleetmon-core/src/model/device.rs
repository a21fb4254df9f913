// ── Device domain types ──

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Equipment category.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum DeviceCategory {
    Server,
    Printer,
    PC,
}

/// Device operational status.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum DeviceStatus {
    Working,
    Broken,
    Decommissioned,
}

/// Stable identity of a record inside a [`DeviceStore`](crate::DeviceStore).
///
/// Assigned when a record enters the store, never persisted. It lets
/// collaborators (merge, edit session) refer to "that exact entry" even
/// when names and serial numbers collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(Uuid);

impl DeviceId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One physical asset.
///
/// `serial_number` is the natural dedup key by convention; it may be
/// empty, in which case it never matches another device. `name` must be
/// non-empty by the time the record is committed to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub category: DeviceCategory,
    pub name: String,
    pub serial_number: String,
    pub install_date: NaiveDate,
    pub status: DeviceStatus,
}

impl Default for Device {
    fn default() -> Self {
        Self {
            category: DeviceCategory::Server,
            name: String::new(),
            serial_number: String::new(),
            install_date: today(),
            status: DeviceStatus::Working,
        }
    }
}

impl Device {
    /// Case-insensitive serial match. Empty serials never match anything.
    pub fn serial_matches(&self, other: &str) -> bool {
        !self.serial_number.is_empty() && self.serial_number.eq_ignore_ascii_case(other)
    }
}

/// Today's calendar date, local time zone, no time component.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("server".parse::<DeviceCategory>().unwrap(), DeviceCategory::Server);
        assert_eq!("pc".parse::<DeviceCategory>().unwrap(), DeviceCategory::PC);
        assert!("router".parse::<DeviceCategory>().is_err());
    }

    #[test]
    fn status_round_trips_through_display() {
        for status in [
            DeviceStatus::Working,
            DeviceStatus::Broken,
            DeviceStatus::Decommissioned,
        ] {
            assert_eq!(status.to_string().parse::<DeviceStatus>().unwrap(), status);
        }
    }

    #[test]
    fn serial_match_is_case_insensitive_and_empty_never_matches() {
        let device = Device {
            serial_number: "SN1".into(),
            ..Device::default()
        };
        assert!(device.serial_matches("sn1"));
        assert!(!device.serial_matches("sn2"));

        let blank = Device::default();
        assert!(!blank.serial_matches(""));
        assert!(!blank.serial_matches("anything"));
    }
}
