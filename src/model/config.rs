use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration from ticklist.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Named checklists file, relative to the working directory
    #[serde(default = "default_file")]
    pub file: PathBuf,
    /// Call-centre checklists file
    #[serde(default = "default_call_file")]
    pub call_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            file: default_file(),
            call_file: default_call_file(),
        }
    }
}

fn default_file() -> PathBuf {
    PathBuf::from("checklists.json")
}

fn default_call_file() -> PathBuf {
    PathBuf::from("call_checklists.json")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// List checklists alphabetically instead of in creation order
    #[serde(default = "default_true")]
    pub sort_checklists: bool,
    /// Show when each task was completed
    #[serde(default)]
    pub show_timestamps: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            sort_checklists: true,
            show_timestamps: false,
        }
    }
}
