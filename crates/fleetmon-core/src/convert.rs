// ── Remote code mapping ──
//
// Translation between remote pipeline codes and domain enums. Codes are
// matched exactly after upper-casing; anything unrecognized falls back
// to the permissive default so a pull never fails on vocabulary drift.

use fleetmon_api::types::{RemoteDeviceRecord, StagingDevice};

use crate::model::{Device, DeviceCategory, DeviceStatus};

pub(crate) fn map_category_code(code: &str) -> DeviceCategory {
    match code.to_uppercase().as_str() {
        "SERVER" | "SRV-DB" | "SRV-APP" | "SRV-FILE" | "SRV-BACKUP" => DeviceCategory::Server,
        "PRINTER" | "PRN-LASER" | "PRN-MFU" | "PRN-INKJET" => DeviceCategory::Printer,
        _ => DeviceCategory::PC,
    }
}

pub(crate) fn map_status_code(code: &str) -> DeviceStatus {
    match code.to_uppercase().as_str() {
        "BROKEN" | "REPAIR" => DeviceStatus::Broken,
        "DECOMMISSIONED" | "DISPOSED" => DeviceStatus::Decommissioned,
        // WORKING, NEW, INSTALLING, RESERVED, MAINTENANCE and anything else.
        _ => DeviceStatus::Working,
    }
}

pub(crate) fn device_from_remote(record: RemoteDeviceRecord) -> Device {
    Device {
        category: map_category_code(&record.category_code),
        name: record.name,
        serial_number: record.serial_number,
        install_date: record.install_date,
        status: map_status_code(&record.status_code),
    }
}

pub(crate) fn staging_from_device(device: &Device) -> StagingDevice {
    StagingDevice {
        name: device.name.clone(),
        serial_number: device.serial_number.clone(),
        category: device.category.to_string().to_uppercase(),
        status: device.status.to_string().to_uppercase(),
        install_date: device.install_date,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_map_per_vocabulary() {
        assert_eq!(map_category_code("SERVER"), DeviceCategory::Server);
        assert_eq!(map_category_code("SRV-DB"), DeviceCategory::Server);
        assert_eq!(map_category_code("srv-backup"), DeviceCategory::Server);
        assert_eq!(map_category_code("PRN-MFU"), DeviceCategory::Printer);
        assert_eq!(map_category_code("printer"), DeviceCategory::Printer);
        assert_eq!(map_category_code("PC"), DeviceCategory::PC);
        assert_eq!(map_category_code("UNKNOWN-CODE"), DeviceCategory::PC);
        assert_eq!(map_category_code(""), DeviceCategory::PC);
    }

    #[test]
    fn status_codes_map_per_vocabulary() {
        assert_eq!(map_status_code("WORKING"), DeviceStatus::Working);
        assert_eq!(map_status_code("MAINTENANCE"), DeviceStatus::Working);
        assert_eq!(map_status_code("repair"), DeviceStatus::Broken);
        assert_eq!(map_status_code("BROKEN"), DeviceStatus::Broken);
        assert_eq!(map_status_code("DISPOSED"), DeviceStatus::Decommissioned);
        assert_eq!(map_status_code("bogus"), DeviceStatus::Working);
    }

    #[test]
    fn staging_payload_uses_uppercase_enum_names() {
        let device = Device {
            category: DeviceCategory::Printer,
            name: "laser-a".into(),
            serial_number: "P01".into(),
            install_date: "2023-04-05".parse().unwrap(),
            status: DeviceStatus::Decommissioned,
        };

        let staged = staging_from_device(&device);
        assert_eq!(staged.category, "PRINTER");
        assert_eq!(staged.status, "DECOMMISSIONED");
        assert_eq!(staged.install_date, device.install_date);
    }

    #[test]
    fn remote_record_converts_with_fallbacks() {
        let record = RemoteDeviceRecord {
            serial_number: "X-9".into(),
            name: "mystery".into(),
            category_code: "GADGET".into(),
            status_code: "LIMBO".into(),
            install_date: "2021-11-30".parse().unwrap(),
        };

        let device = device_from_remote(record);
        assert_eq!(device.category, DeviceCategory::PC);
        assert_eq!(device.status, DeviceStatus::Working);
        assert_eq!(device.name, "mystery");
    }
}
