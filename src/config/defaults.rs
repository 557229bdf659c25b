//! Default configuration values
//!
//! Named constants for every tunable setting

use crate::constants::{cluster, demo};

/// Default output format
pub const DEFAULT_FORMAT: &str = "json";

/// Default cell width as a fraction of the viewport width
pub const DEFAULT_CELL_WIDTH_RATIO: f64 = cluster::CELL_WIDTH_RATIO;

/// Default cell height as a fraction of the viewport width
pub const DEFAULT_CELL_HEIGHT_RATIO: f64 = cluster::CELL_HEIGHT_RATIO;

/// Default largest bucket passed through unchanged
pub const DEFAULT_PASS_THROUGH_LIMIT: usize = cluster::PASS_THROUGH_LIMIT;

/// Default viewport width per demo post, in projected units
pub const DEFAULT_DEMO_SPACING: f64 = demo::POST_SPACING;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7979;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "mood-map";
