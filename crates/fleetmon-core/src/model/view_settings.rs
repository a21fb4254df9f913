// ── Persisted view preferences ──

use serde::{Deserialize, Serialize};

/// Presentation mode. Cosmetic only -- carried through persistence so a
/// front end can restore it, never interpreted by the core.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ViewMode {
    List,
    Icons,
    #[default]
    Columns,
}

/// Field the projection sorts or groups by.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum SortField {
    Category,
    InstallDate,
    Name,
    #[default]
    Status,
}

/// UI-independent view preferences, loaded once at startup and written
/// back wholesale at shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub view_mode: ViewMode,
    pub sort_field: SortField,
    pub use_groups: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            sort_field: SortField::default(),
            use_groups: true,
        }
    }
}
