//! User preferences.

use serde::{Deserialize, Serialize};

use super::{SortBy, Theme};

/// Flat record of display and sorting preferences.
///
/// Every field has a default so that records written by older versions, or
/// partially written key/value rows, still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Include completed tasks in listings by default
    pub show_completed: bool,
    pub sort_by: SortBy,
    pub theme: Theme,
    pub notifications: bool,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_completed: true,
            sort_by: SortBy::Date,
            theme: Theme::Dark,
            notifications: true,
            sound_enabled: true,
        }
    }
}
