// ── View projection ──
//
// Derives the subset and ordering of the store that satisfies the
// active filter and sort/group mode. Holds only disposable state
// (filter predicate, sort descriptors); every call to `project`
// recomputes from the store, never mutating it.

use chrono::NaiveDate;

use crate::model::{Device, DeviceCategory, DeviceStatus, SortField, ViewSettings};
use crate::store::DeviceStore;

/// Filter constraints, AND-combined.
#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    status: Option<DeviceStatus>,
    category: Option<DeviceCategory>,
    text: String,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

impl DeviceFilter {
    pub fn status(&self) -> Option<DeviceStatus> {
        self.status
    }

    pub fn set_status(&mut self, status: Option<DeviceStatus>) {
        self.status = status;
    }

    pub fn category(&self) -> Option<DeviceCategory> {
        self.category
    }

    pub fn set_category(&mut self, category: Option<DeviceCategory>) {
        self.category = category;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    pub fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }

    /// Set the lower date bound. If it lands past the current upper
    /// bound, the upper bound is raised to match -- a one-directional
    /// repair that keeps the range non-empty.
    pub fn set_date_from(&mut self, from: Option<NaiveDate>) {
        self.date_from = from;
        if let (Some(from), Some(to)) = (from, self.date_to)
            && to < from
        {
            self.date_to = Some(from);
        }
    }

    /// Set the upper date bound. Accepted as-is: a bound below
    /// `date_from` simply yields an empty range (zero matches).
    pub fn set_date_to(&mut self, to: Option<NaiveDate>) {
        self.date_to = to;
    }

    /// Drop every constraint.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// All active constraints AND-combined; empty text passes everything.
    pub fn matches(&self, device: &Device) -> bool {
        if self.status.is_some_and(|s| device.status != s) {
            return false;
        }
        if self.category.is_some_and(|c| device.category != c) {
            return false;
        }

        let text = self.text.trim();
        if !text.is_empty() {
            let needle = text.to_lowercase();
            let in_name = device.name.to_lowercase().contains(&needle);
            let in_serial = device.serial_number.to_lowercase().contains(&needle);
            if !in_name && !in_serial {
                return false;
            }
        }

        if self.date_from.is_some_and(|from| device.install_date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| device.install_date > to) {
            return false;
        }

        true
    }
}

/// One group of a grouped projection, keyed by the display value of the
/// active sort field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceGroup {
    pub key: String,
    pub devices: Vec<Device>,
}

/// Result of projecting the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projected {
    /// Stable-sorted flat list (grouping disabled).
    Flat(Vec<Device>),
    /// Groups in first-appearance order of their keys (grouping enabled).
    Grouped(Vec<DeviceGroup>),
}

impl Projected {
    /// Total record count across either shape.
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(devices) => devices.len(),
            Self::Grouped(groups) => groups.iter().map(|g| g.devices.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Derived read-only view over a [`DeviceStore`].
#[derive(Debug, Clone, Default)]
pub struct ViewProjection {
    pub filter: DeviceFilter,
    sort_field: SortField,
    use_groups: bool,
}

impl ViewProjection {
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            filter: DeviceFilter::default(),
            sort_field: settings.sort_field,
            use_groups: settings.use_groups,
        }
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn set_sort_field(&mut self, field: SortField) {
        self.sort_field = field;
    }

    pub fn use_groups(&self) -> bool {
        self.use_groups
    }

    pub fn set_use_groups(&mut self, use_groups: bool) {
        self.use_groups = use_groups;
    }

    /// Recompute the projection from the store's current state.
    pub fn project(&self, store: &DeviceStore) -> Projected {
        let filtered: Vec<Device> = store
            .snapshot()
            .into_iter()
            .filter(|d| self.filter.matches(d))
            .collect();

        if self.use_groups {
            Projected::Grouped(group_by_key(filtered, self.sort_field))
        } else {
            let mut devices = filtered;
            // Stable sort: ties keep original relative order.
            devices.sort_by(|a, b| sort_key(a, self.sort_field).cmp(&sort_key(b, self.sort_field)));
            Projected::Flat(devices)
        }
    }
}

/// Display value of the active sort field. ISO dates are used for
/// `InstallDate` so lexicographic order equals chronological order.
fn sort_key(device: &Device, field: SortField) -> String {
    match field {
        SortField::Category => device.category.to_string(),
        SortField::InstallDate => device.install_date.format("%Y-%m-%d").to_string(),
        SortField::Name => device.name.clone(),
        SortField::Status => device.status.to_string(),
    }
}

/// Partition into groups, keys in first-appearance order of the
/// underlying sequence.
fn group_by_key(devices: Vec<Device>, field: SortField) -> Vec<DeviceGroup> {
    let mut groups: Vec<DeviceGroup> = Vec::new();
    for device in devices {
        let key = sort_key(&device, field);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.devices.push(device),
            None => groups.push(DeviceGroup {
                key,
                devices: vec![device],
            }),
        }
    }
    groups
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Device;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn device(
        name: &str,
        serial: &str,
        category: DeviceCategory,
        status: DeviceStatus,
        installed: &str,
    ) -> Device {
        Device {
            category,
            name: name.into(),
            serial_number: serial.into(),
            install_date: date(installed),
            status,
        }
    }

    fn mixed_store() -> DeviceStore {
        DeviceStore::with_devices(vec![
            device("web-1", "S01", DeviceCategory::Server, DeviceStatus::Working, "2022-01-10"),
            device("web-2", "S02", DeviceCategory::Server, DeviceStatus::Broken, "2022-02-11"),
            device("db-1", "S03", DeviceCategory::Server, DeviceStatus::Broken, "2021-06-01"),
            device("laser-a", "P01", DeviceCategory::Printer, DeviceStatus::Working, "2020-03-15"),
            device("laser-b", "P02", DeviceCategory::Printer, DeviceStatus::Broken, "2023-05-20"),
            device("mfu-1", "P03", DeviceCategory::Printer, DeviceStatus::Decommissioned, "2018-09-09"),
            device("desk-01", "C01", DeviceCategory::PC, DeviceStatus::Working, "2022-12-01"),
            device("desk-02", "C02", DeviceCategory::PC, DeviceStatus::Working, "2022-12-02"),
            device("desk-03", "C03", DeviceCategory::PC, DeviceStatus::Broken, "2019-07-30"),
            device("kiosk", "C04", DeviceCategory::PC, DeviceStatus::Decommissioned, "2017-01-01"),
        ])
    }

    fn names(projected: &Projected) -> Vec<String> {
        match projected {
            Projected::Flat(devices) => devices.iter().map(|d| d.name.clone()).collect(),
            Projected::Grouped(groups) => groups
                .iter()
                .flat_map(|g| g.devices.iter().map(|d| d.name.clone()))
                .collect(),
        }
    }

    #[test]
    fn text_filter_matches_name_or_serial_case_insensitively() {
        let store = mixed_store();
        let mut projection = ViewProjection::default();

        projection.filter.set_text("LASER");
        assert_eq!(projection.project(&store).len(), 2);

        projection.filter.set_text("c0");
        assert_eq!(projection.project(&store).len(), 4); // serials C01..C04

        projection.filter.set_text("");
        assert_eq!(projection.project(&store).len(), 10);
    }

    #[test]
    fn combined_filters_are_the_intersection_of_single_filters() {
        let store = mixed_store();

        let mut by_status = ViewProjection::default();
        by_status.filter.set_status(Some(DeviceStatus::Broken));
        let status_names = names(&by_status.project(&store));

        let mut by_category = ViewProjection::default();
        by_category.filter.set_category(Some(DeviceCategory::Server));
        let category_names = names(&by_category.project(&store));

        let mut both = ViewProjection::default();
        both.filter.set_status(Some(DeviceStatus::Broken));
        both.filter.set_category(Some(DeviceCategory::Server));
        let both_names = names(&both.project(&store));

        let expected: Vec<String> = status_names
            .iter()
            .filter(|n| category_names.contains(n))
            .cloned()
            .collect();
        assert_eq!(both_names, expected);
        assert_eq!(both_names, ["web-2", "db-1"]);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let store = mixed_store();
        let mut projection = ViewProjection::default();
        projection.set_sort_field(SortField::InstallDate);

        projection.filter.set_date_from(Some(date("2022-01-10")));
        projection.filter.set_date_to(Some(date("2022-02-11")));
        let found = names(&projection.project(&store));
        assert_eq!(found, ["web-1", "web-2"]);
    }

    #[test]
    fn raising_date_from_repairs_date_to() {
        let mut filter = DeviceFilter::default();
        filter.set_date_to(Some(date("2022-01-01")));
        filter.set_date_from(Some(date("2023-06-15")));
        assert_eq!(filter.date_to(), Some(date("2023-06-15")));
    }

    #[test]
    fn lowering_date_to_is_accepted_and_yields_empty_range() {
        let store = mixed_store();
        let mut projection = ViewProjection::default();

        projection.filter.set_date_from(Some(date("2022-06-01")));
        projection.filter.set_date_to(Some(date("2020-01-01")));
        assert_eq!(projection.filter.date_from(), Some(date("2022-06-01")));
        assert_eq!(projection.filter.date_to(), Some(date("2020-01-01")));

        // Empty range filters everything out without panicking.
        assert!(projection.project(&store).is_empty());
    }

    #[test]
    fn flat_sort_is_stable_and_ascending() {
        let store = mixed_store();
        let mut projection = ViewProjection::default();
        projection.set_use_groups(false);
        projection.set_sort_field(SortField::Status);

        // Within one status, original insertion order survives.
        let sorted = names(&projection.project(&store));
        assert_eq!(
            sorted,
            [
                "web-2", "db-1", "laser-b", "desk-03", // Broken
                "mfu-1", "kiosk", // Decommissioned
                "web-1", "laser-a", "desk-01", "desk-02", // Working
            ]
        );
    }

    #[test]
    fn groups_follow_first_appearance_order() {
        let store = mixed_store();
        let mut projection = ViewProjection::default();
        projection.set_use_groups(true);
        projection.set_sort_field(SortField::Category);

        let Projected::Grouped(groups) = projection.project(&store) else {
            panic!("expected grouped projection");
        };
        let keys: Vec<_> = groups.iter().map(|g| g.key.clone()).collect();
        assert_eq!(keys, ["Server", "Printer", "PC"]);
        assert_eq!(groups[1].devices.len(), 3);
    }

    #[test]
    fn changing_sort_field_recomputes_without_touching_store() {
        let store = mixed_store();
        let before = store.snapshot();

        let mut projection = ViewProjection::default();
        projection.set_use_groups(false);
        projection.set_sort_field(SortField::Name);
        let _ = projection.project(&store);
        projection.set_sort_field(SortField::InstallDate);
        let by_date = projection.project(&store);

        let Projected::Flat(devices) = by_date else {
            panic!("expected flat projection");
        };
        assert!(devices.windows(2).all(|w| w[0].install_date <= w[1].install_date));
        assert_eq!(store.snapshot(), before);
    }
}
