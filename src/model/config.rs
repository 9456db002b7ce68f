use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::cell::font::ThemeFont;

/// Configuration from `charsheet.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub undo: UndoConfig,
    #[serde(default)]
    pub postprocess: PostProcessConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// UI scale factor applied to every measurement
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Cap on a cell's preferred width before scaling; 0 or less disables the cap
    #[serde(default = "default_max_preferred_width")]
    pub max_preferred_width: i32,
    /// Horizontal margin on each side of a cell
    #[serde(default = "default_h_margin")]
    pub h_margin: u32,
    /// Indentation per nesting level
    #[serde(default = "default_indent_width")]
    pub indent_width: u32,
    /// Space reserved for the disclosure triangle in the first column
    #[serde(default = "default_disclosure_width")]
    pub disclosure_width: u32,
    #[serde(default = "ThemeFont::page_primary")]
    pub primary_font: ThemeFont,
    #[serde(default = "ThemeFont::page_secondary")]
    pub secondary_font: ThemeFont,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            scale: default_scale(),
            max_preferred_width: default_max_preferred_width(),
            h_margin: default_h_margin(),
            indent_width: default_indent_width(),
            disclosure_width: default_disclosure_width(),
            primary_font: ThemeFont::page_primary(),
            secondary_font: ThemeFont::page_secondary(),
        }
    }
}

fn default_scale() -> f32 {
    1.0
}

fn default_max_preferred_width() -> i32 {
    250
}

fn default_h_margin() -> u32 {
    2
}

fn default_indent_width() -> u32 {
    16
}

fn default_disclosure_width() -> u32 {
    12
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoConfig {
    /// Maximum number of undo records kept
    #[serde(default = "default_undo_limit")]
    pub limit: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        UndoConfig {
            limit: default_undo_limit(),
        }
    }
}

fn default_undo_limit() -> usize {
    500
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostProcessConfig {
    /// Values substituted for `@name@` placeholders in pasted rows
    #[serde(default)]
    pub placeholders: HashMap<String, String>,
}
