//! Core state machines for the TapTitan tap simulator.
//!
//! Everything in this crate is free of DOM access so it can be exercised
//! natively; the Yew front-end in `main.rs` only wires browser events and
//! timers into these types.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::ops::Sub;

pub mod controller;
pub mod tracker;

pub use controller::{ControlAction, RateController, RunState, TimerSchedule};
pub use tracker::{DragSession, PositionTracker};

/// Default parameters and limits of the rate controller
pub mod defaults {
    pub const SPEED_PERCENT: u8 = 50;
    pub const MIN_SPEED: u8 = 1;
    pub const MAX_SPEED: u8 = 100;
    pub const TARGET_COUNT: u32 = 0;
    /// Interval at `MAX_SPEED`
    pub const MIN_INTERVAL_MS: u32 = 50;
    /// Interval at `MIN_SPEED`
    pub const MAX_INTERVAL_MS: u32 = 2000;
}

// Leading integer, like the browser's parseInt
static LEADING_INT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?)(\d+)").unwrap());

/// A point in viewport pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Center of a `width` x `height` box anchored at the origin.
    pub fn center_of(width: f64, height: f64) -> Self {
        Self::new(width / 2.0, height / 2.0)
    }

    /// Round both axes half-up, the way the browser's `Math.round` does.
    pub fn rounded(&self) -> (i64, i64) {
        (round_half_up(self.x), round_half_up(self.y))
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[inline]
fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// One simulated tap, as handed to the log sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapRecord {
    pub x: i64,
    pub y: i64,
}

impl From<Coordinate> for TapRecord {
    fn from(c: Coordinate) -> Self {
        let (x, y) = c.rounded();
        Self { x, y }
    }
}

impl fmt::Display for TapRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tapped at ({}, {})", self.x, self.y)
    }
}

/// Clamp a raw speed value into `[MIN_SPEED, MAX_SPEED]`.
pub fn clamp_speed(speed: u32) -> u8 {
    speed.clamp(defaults::MIN_SPEED as u32, defaults::MAX_SPEED as u32) as u8
}

/// Map a speed dial value (1..=100) linearly onto the tap interval in ms.
///
/// Speed 1 gives `MAX_INTERVAL_MS`, speed 100 gives `MIN_INTERVAL_MS`.
/// Values outside the dial range are clamped first.
pub fn interval_for_speed(speed_percent: u8) -> u32 {
    let speed = clamp_speed(speed_percent as u32);
    let span = (defaults::MAX_INTERVAL_MS - defaults::MIN_INTERVAL_MS) as f64;
    let steps = (defaults::MAX_SPEED - defaults::MIN_SPEED) as f64;
    let fraction = (speed - defaults::MIN_SPEED) as f64 / steps;
    (defaults::MAX_INTERVAL_MS as f64 - fraction * span).round() as u32
}

/// Taps per second for a given interval, as shown next to the slider.
pub fn clicks_per_second(interval_ms: u32) -> f64 {
    if interval_ms == 0 {
        return 0.0;
    }
    1000.0 / interval_ms as f64
}

/// Numeric input parsing error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountParseError {
    Empty,
    NotANumber(String),
}

impl fmt::Display for CountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountParseError::Empty => write!(f, "Input is empty"),
            CountParseError::NotANumber(input) => write!(f, "Not a number: '{}'", input),
        }
    }
}

impl std::error::Error for CountParseError {}

/// Parse the leading integer of a text field.
///
/// Trailing garbage is ignored (`"12px"` is 12), negative numbers become 0
/// and values too large for `u32` saturate.
///
/// # Examples
/// ```
/// use tap_titan::parse_count_input;
/// assert_eq!(parse_count_input("25"), Ok(25));
/// assert_eq!(parse_count_input(" 7.9"), Ok(7));
/// assert_eq!(parse_count_input("-4"), Ok(0));
/// assert!(parse_count_input("abc").is_err());
/// ```
pub fn parse_count_input(input: &str) -> Result<u32, CountParseError> {
    if input.trim().is_empty() {
        return Err(CountParseError::Empty);
    }

    let captures = LEADING_INT_REGEX
        .captures(input)
        .ok_or_else(|| CountParseError::NotANumber(input.to_string()))?;

    if &captures[1] == "-" {
        return Ok(0);
    }
    Ok(captures[2].parse::<u32>().unwrap_or(u32::MAX))
}

/// Like [`parse_count_input`], but invalid input counts as 0.
pub fn coerce_count_input(input: &str) -> u32 {
    parse_count_input(input).unwrap_or_else(|e| {
        debug!("Treating numeric input as 0: {}", e);
        0
    })
}

/// Text shown in the target count field; 0 is an empty field so the
/// placeholder shows.
pub fn target_count_display(target_count: u32) -> String {
    if target_count == 0 {
        String::new()
    } else {
        target_count.to_string()
    }
}

/// Coerce slider text into a valid speed.
pub fn coerce_speed_input(input: &str) -> u8 {
    clamp_speed(coerce_count_input(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_endpoints() {
        assert_eq!(interval_for_speed(1), 2000);
        assert_eq!(interval_for_speed(100), 50);
    }

    #[test]
    fn interval_is_monotonic() {
        let mut last = u32::MAX;
        for speed in 1..=100u8 {
            let interval = interval_for_speed(speed);
            assert!(interval <= last, "speed {} went up to {}", speed, interval);
            last = interval;
        }
    }

    #[test]
    fn interval_at_default_speed() {
        // 2000 - (49 / 99) * 1950 = 1034.85
        assert_eq!(interval_for_speed(defaults::SPEED_PERCENT), 1035);
        // (33 / 99) * 1950 is exact
        assert_eq!(interval_for_speed(34), 1350);
    }

    #[test]
    fn interval_clamps_out_of_range_speed() {
        assert_eq!(interval_for_speed(0), 2000);
        assert_eq!(interval_for_speed(250), 50);
    }

    #[test]
    fn clicks_per_second_readout() {
        assert_eq!(format!("{:.1}", clicks_per_second(50)), "20.0");
        assert_eq!(format!("{:.1}", clicks_per_second(1035)), "1.0");
        assert_eq!(clicks_per_second(0), 0.0);
    }

    #[test]
    fn rounding_matches_math_round() {
        assert_eq!(Coordinate::new(10.5, 3.49).rounded(), (11, 3));
        assert_eq!(Coordinate::new(-2.5, -2.51).rounded(), (-2, -3));
        let tap = TapRecord::from(Coordinate::new(640.4, 359.5));
        assert_eq!(tap.to_string(), "Tapped at (640, 360)");
    }

    #[test]
    fn parses_leading_integer() {
        assert_eq!(parse_count_input("42"), Ok(42));
        assert_eq!(parse_count_input("  +8 "), Ok(8));
        assert_eq!(parse_count_input("12px"), Ok(12));
        assert_eq!(parse_count_input("3.99"), Ok(3));
        assert_eq!(parse_count_input("-17"), Ok(0));
        assert_eq!(parse_count_input("99999999999999"), Ok(u32::MAX));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(parse_count_input(""), Err(CountParseError::Empty));
        assert_eq!(parse_count_input("   "), Err(CountParseError::Empty));
        assert_eq!(
            parse_count_input("x1"),
            Err(CountParseError::NotANumber("x1".to_string()))
        );
    }

    #[test]
    fn coercion_falls_back_to_zero() {
        assert_eq!(coerce_count_input(""), 0);
        assert_eq!(coerce_count_input("ten"), 0);
        assert_eq!(coerce_count_input("10"), 10);
    }

    #[test]
    fn speed_coercion_stays_on_dial() {
        assert_eq!(coerce_speed_input(""), 1);
        assert_eq!(coerce_speed_input("0"), 1);
        assert_eq!(coerce_speed_input("73"), 73);
        assert_eq!(coerce_speed_input("400"), 100);
    }

    #[test]
    fn target_field_shows_coerced_value() {
        for (typed, shown) in [("-3", ""), ("abc", ""), ("3.7", "3"), ("", ""), ("08", "8")] {
            assert_eq!(target_count_display(coerce_count_input(typed)), shown, "typed {:?}", typed);
        }
    }
}
