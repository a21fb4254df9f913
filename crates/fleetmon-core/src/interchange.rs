// ── JSON interchange ──
//
// Export/import of the device set as a standalone JSON document. Export
// is strict; import is lenient on a per-row basis so one damaged row
// never sinks the whole file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CoreError;
use crate::model::{Device, DeviceCategory, DeviceStatus, today};

/// One device row in the interchange document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeviceRecord {
    category: String,
    name: String,
    serial_number: String,
    install_date: String,
    status: String,
}

impl From<&Device> for DeviceRecord {
    fn from(device: &Device) -> Self {
        Self {
            category: device.category.to_string(),
            name: device.name.clone(),
            serial_number: device.serial_number.clone(),
            install_date: device.install_date.format("%Y-%m-%d").to_string(),
            status: device.status.to_string(),
        }
    }
}

/// Serialize devices to a pretty-printed JSON array.
pub fn devices_to_json(devices: &[Device]) -> Result<String, CoreError> {
    let records: Vec<DeviceRecord> = devices.iter().map(DeviceRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(|e| CoreError::Parse {
        message: format!("cannot serialize device set: {e}"),
    })
}

/// Parse an interchange document.
///
/// A document that is not a JSON array is an error. Within the array,
/// rows that are malformed or carry an empty name are skipped with a
/// warning; unknown categories, statuses and unparsable dates fall back
/// to `Server`, `Working` and today.
pub fn devices_from_json(input: &str) -> Result<Vec<Device>, CoreError> {
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(input).map_err(|e| CoreError::Parse {
            message: format!("not a valid device document: {e}"),
        })?;

    let mut devices = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        match parse_row(row) {
            Some(device) => devices.push(device),
            None => warn!(index, "skipping malformed device row"),
        }
    }
    Ok(devices)
}

fn parse_row(row: serde_json::Value) -> Option<Device> {
    let record: DeviceRecord = serde_json::from_value(row).ok()?;
    if record.name.trim().is_empty() {
        return None;
    }

    Some(Device {
        category: record
            .category
            .parse::<DeviceCategory>()
            .unwrap_or(DeviceCategory::Server),
        name: record.name,
        serial_number: record.serial_number,
        install_date: record
            .install_date
            .parse::<NaiveDate>()
            .unwrap_or_else(|_| today()),
        status: record
            .status
            .parse::<DeviceStatus>()
            .unwrap_or(DeviceStatus::Working),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Device> {
        vec![
            Device {
                category: DeviceCategory::Printer,
                name: "laser-a".into(),
                serial_number: "P01".into(),
                install_date: "2020-03-15".parse().unwrap(),
                status: DeviceStatus::Broken,
            },
            Device {
                category: DeviceCategory::PC,
                name: "desk-01".into(),
                serial_number: String::new(),
                install_date: "2022-12-01".parse().unwrap(),
                status: DeviceStatus::Working,
            },
        ]
    }

    #[test]
    fn export_then_import_is_identity() {
        let devices = sample();
        let json = devices_to_json(&devices).unwrap();
        let restored = devices_from_json(&json).unwrap();
        assert_eq!(restored, devices);
    }

    #[test]
    fn export_uses_camel_case_and_iso_dates() {
        let json = devices_to_json(&sample()).unwrap();
        assert!(json.contains("\"serialNumber\": \"P01\""));
        assert!(json.contains("\"installDate\": \"2020-03-15\""));
        assert!(json.contains("\"category\": \"Printer\""));
    }

    #[test]
    fn non_array_document_is_an_error() {
        assert!(devices_from_json("{\"oops\": true}").is_err());
        assert!(devices_from_json("not json at all").is_err());
    }

    #[test]
    fn malformed_and_nameless_rows_are_skipped() {
        let json = r#"[
            {"category": "PC", "name": "good", "serialNumber": "S1",
             "installDate": "2021-01-01", "status": "Working"},
            {"category": "PC", "name": "   ", "serialNumber": "S2",
             "installDate": "2021-01-01", "status": "Working"},
            42,
            {"category": "PC", "name": "also-good", "serialNumber": "S3",
             "installDate": "2021-01-01", "status": "Working"}
        ]"#;

        let devices = devices_from_json(json).unwrap();
        let names: Vec<_> = devices.into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["good", "also-good"]);
    }

    #[test]
    fn unknown_fields_fall_back_to_defaults() {
        let json = r#"[
            {"category": "Toaster", "name": "odd", "serialNumber": "S9",
             "installDate": "garbage", "status": "Haunted"}
        ]"#;

        let devices = devices_from_json(json).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].category, DeviceCategory::Server);
        assert_eq!(devices[0].status, DeviceStatus::Working);
        assert_eq!(devices[0].install_date, today());
    }
}
