//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

/// Main configuration structure
///
/// Every key is optional; command line arguments take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Color string used when none is given on the command line (e.g. "Red/black")
    #[serde(default)]
    pub color: Option<String>,
    /// Attributes applied with the foreground color (bold, underscore, blink, reverse, concealed)
    #[serde(default)]
    pub attr: Vec<String>,
    /// Foreground color never drawn for `random`
    #[serde(default)]
    pub exclude_random: Option<String>,
    /// Leave empty lines uncolored
    #[serde(default)]
    pub omit_color_empty: bool,
    /// Cycle the foreground color per line
    #[serde(default)]
    pub rainbow_fg: bool,
    /// Cycle the background color per line
    #[serde(default)]
    pub rainbow_bg: bool,
    /// Read chunk size in bytes
    #[serde(default)]
    pub buffer_size: Option<usize>,
}
