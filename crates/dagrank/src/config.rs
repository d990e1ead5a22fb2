//! Plain layout configuration, as it arrives from a settings panel or a JSON file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GAP: [f64; 2] = [24.0, 40.0];
pub const DEFAULT_NODE_SIZE: [f64; 2] = [1.0, 1.0];

/// Strategy tags are kept as strings; unknown tags fall back to the stage default when the
/// runtime options are built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub layering: Option<String>,
    pub decross: Option<String>,
    pub coord: Option<String>,
    /// Horizontal and vertical spacing.
    pub gap: [f64; 2],
    /// Node width and height.
    pub node_size: [f64; 2],
    pub debug: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layering: None,
            decross: None,
            coord: None,
            gap: DEFAULT_GAP,
            node_size: DEFAULT_NODE_SIZE,
            debug: false,
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })
    }
}
