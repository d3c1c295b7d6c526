//! Application-level configuration constants.

use log::LevelFilter;

// Logging
#[cfg(debug_assertions)]
pub const LOG_LEVEL: LevelFilter = LevelFilter::Debug;
#[cfg(not(debug_assertions))]
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

// Panel text
pub const APP_TITLE: &str = "TapTitan";
pub const APP_SUBTITLE: &str = "Simple Screen Tap Automation";

// Marker
pub const MARKER_SIZE_PX: u32 = 64;
