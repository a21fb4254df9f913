//! Local persistence gateway.
//!
//! The inventory lives in `devices.json` and the view preferences in
//! `settings.json` under the data directory. Commands load at startup,
//! mutate in memory, and write wholesale before exiting. Missing or
//! corrupt settings fall back to defaults; a corrupt device file is an
//! error (silently dropping inventory would be worse).

use std::path::{Path, PathBuf};

use tracing::warn;

use fleetmon_core::{DeviceStore, ViewSettings, interchange};

use crate::error::CliError;

const DEVICES_FILE: &str = "devices.json";
const SETTINGS_FILE: &str = "settings.json";

/// The on-disk workspace: device set plus view settings.
pub struct Workspace {
    dir: PathBuf,
    pub store: DeviceStore,
    pub settings: ViewSettings,
}

impl Workspace {
    /// Load from the data directory, creating empty state on first run.
    pub fn load(dir: &Path) -> Result<Self, CliError> {
        let devices_path = dir.join(DEVICES_FILE);
        let store = if devices_path.exists() {
            let raw = std::fs::read_to_string(&devices_path)?;
            let devices = interchange::devices_from_json(&raw).map_err(|e| CliError::Data {
                message: format!("{}: {e}", devices_path.display()),
            })?;
            DeviceStore::with_devices(devices)
        } else {
            DeviceStore::new()
        };

        Ok(Self {
            dir: dir.to_path_buf(),
            store,
            settings: load_settings(&dir.join(SETTINGS_FILE)),
        })
    }

    /// Write both files back, creating the directory if needed.
    pub fn save(&self) -> Result<(), CliError> {
        std::fs::create_dir_all(&self.dir)?;

        let json = interchange::devices_to_json(&self.store.snapshot()).map_err(CliError::from)?;
        std::fs::write(self.dir.join(DEVICES_FILE), json)?;

        let settings = serde_json::to_string_pretty(&self.settings)?;
        std::fs::write(self.dir.join(SETTINGS_FILE), settings)?;
        Ok(())
    }
}

fn load_settings(path: &Path) -> ViewSettings {
    match std::fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("settings file unreadable, using defaults: {e}");
            ViewSettings::default()
        }),
        Err(_) => ViewSettings::default(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fleetmon_core::{Device, SortField};

    #[test]
    fn first_run_starts_empty_and_saves_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");

        let ws = Workspace::load(&data).unwrap();
        assert!(ws.store.is_empty());
        ws.save().unwrap();

        assert!(data.join(DEVICES_FILE).exists());
        assert!(data.join(SETTINGS_FILE).exists());
    }

    #[test]
    fn devices_and_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        let mut ws = Workspace::load(dir.path()).unwrap();
        ws.store
            .add(Device {
                name: "web-1".into(),
                serial_number: "S01".into(),
                ..Device::default()
            })
            .unwrap();
        ws.settings.sort_field = SortField::Name;
        ws.settings.use_groups = false;
        ws.save().unwrap();

        let reloaded = Workspace::load(dir.path()).unwrap();
        assert_eq!(reloaded.store.len(), 1);
        assert_eq!(reloaded.store.snapshot()[0].name, "web-1");
        assert_eq!(reloaded.settings.sort_field, SortField::Name);
        assert!(!reloaded.settings.use_groups);
    }

    #[test]
    fn corrupt_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{not json").unwrap();

        let ws = Workspace::load(dir.path()).unwrap();
        assert_eq!(ws.settings, ViewSettings::default());
    }

    #[test]
    fn corrupt_device_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEVICES_FILE), "{not an array}").unwrap();

        assert!(Workspace::load(dir.path()).is_err());
    }
}
