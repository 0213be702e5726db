//! Trip length detection from free text.

use regex::Regex;
use std::{num::IntErrorKind, sync::OnceLock};

pub const MIN_TRIP_DAYS: u32 = 3;
pub const MAX_TRIP_DAYS: u32 = 21;
pub const DEFAULT_TRIP_DAYS: u32 = 7;

static DAY_PATTERN: OnceLock<Regex> = OnceLock::new();

fn day_pattern() -> &'static Regex {
    // ASCII digits only, then optional spaces or hyphens before "day"
    DAY_PATTERN.get_or_init(|| Regex::new(r"(?i)([0-9]+)[\s-]*day").expect("valid day pattern"))
}

/// Detect the requested trip length in days.
///
/// The first "<number> day" mention wins and is clamped to
/// [`MIN_TRIP_DAYS`]..=[`MAX_TRIP_DAYS`]. Without one the trip defaults to
/// [`DEFAULT_TRIP_DAYS`].
pub fn detect_days(text: &str) -> u32 {
    let Some(captures) = day_pattern().captures(text) else {
        return DEFAULT_TRIP_DAYS;
    };

    match captures[1].parse::<u64>() {
        Ok(n) => n.clamp(MIN_TRIP_DAYS as u64, MAX_TRIP_DAYS as u64) as u32,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => MAX_TRIP_DAYS,
        Err(_) => DEFAULT_TRIP_DAYS,
    }
}
