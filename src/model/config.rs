use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Quiet period after the last change before the list is written
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Write a pending save when the TUI exits instead of dropping it
    #[serde(default)]
    pub flush_on_exit: bool,
}

impl StoreConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            debounce_ms: default_debounce_ms(),
            flush_on_exit: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Mirror the task list into widget.json for home-screen widgets
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Theme slot overrides, e.g. `highlight = "#FF69B4"`
    #[serde(default)]
    pub colors: IndexMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: IndexMap::new(),
        }
    }
}

/// Default: see the template written by `tl init`
fn default_debounce_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}
