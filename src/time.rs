//! # Civil time normalization
//!
//! Conversion of civil timestamps into the continuous time variables used by the
//! solar geometry formulas.
//!
//! Timestamps are carried as [`hifitime::Epoch`] values. Their calendar components are read
//! on the UTC scale and treated as **naive civil time**: the timezone offset is a separate
//! argument, and leap seconds never enter the day count.
//!
//! ## Julian Date
//!
//! The day count uses the NASA truncated Julian Date origin:
//!
//! ```text
//! JD = 2440000.5 at 1968-05-24T00:00:00
//! JD = 2440000.5 + days + seconds / 86400 − timezone / 24
//! JC = (JD − 2451545.0) / 36525
//! ```
//!
//! where `days` and `seconds` are the whole-day and whole-second parts of the civil time
//! elapsed since the origin (`seconds ∈ [0, 86400)`, sub-second digits dropped).
use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{DayFraction, MINUTES_PER_DAY, SECONDS_PER_DAY},
    ecoflux_errors::EcofluxError,
};

/// Julian Date at 1968-05-24T00:00:00, origin of the truncated Julian Date
pub const TRUNCATED_JD_ORIGIN: f64 = 2_440_000.5;

/// Julian Date of the J2000.0 epoch (2000-01-01T12:00:00)
pub const J2000_JD: f64 = 2_451_545.0;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const SECONDS_PER_DAY_INT: i128 = 86_400;

/// A Julian Date and the matching Julian Century since J2000.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JulianTime {
    pub julian_date: f64,
    pub julian_century: f64,
}

impl JulianTime {
    /// Normalize a civil timestamp observed at a given timezone offset.
    ///
    /// Arguments
    /// ---------
    /// * `epoch`: the civil timestamp (calendar date and time of day)
    /// * `timezone`: offset of the civil clock with respect to UTC, in hours (UTC+ positive)
    ///
    /// Return
    /// ------
    /// * the Julian Date and Julian Century of the instant
    pub fn from_civil(epoch: &Epoch, timezone: f64) -> Self {
        let julian_date = julian_date(epoch, timezone);
        JulianTime {
            julian_date,
            julian_century: julian_century(julian_date),
        }
    }
}

/// Civil calendar components `(year, month, day, hour, minute, second, nanos)` of an epoch.
pub fn civil_components(epoch: &Epoch) -> (i32, u8, u8, u8, u8, u8, u32) {
    epoch.to_gregorian_utc()
}

/// Whole days and whole seconds of civil time elapsed since 1968-05-24T00:00:00.
///
/// Floor division is used, so the seconds part always lies in `[0, 86400)` and the day part
/// is negative for instants before the origin.
fn civil_days_seconds(epoch: &Epoch) -> (i128, i128) {
    let (year, month, day, hour, minute, second, nanos) = civil_components(epoch);

    // TAI has no leap seconds: the difference is a pure calendar difference.
    let civil = Epoch::from_gregorian_tai(year, month, day, hour, minute, second, nanos);
    let origin = Epoch::from_gregorian_tai_at_midnight(1968, 5, 24);

    let whole_seconds = (civil - origin)
        .total_nanoseconds()
        .div_euclid(NANOS_PER_SECOND);

    (
        whole_seconds.div_euclid(SECONDS_PER_DAY_INT),
        whole_seconds.rem_euclid(SECONDS_PER_DAY_INT),
    )
}

/// Julian Date of a civil timestamp observed at `timezone` hours from UTC.
///
/// Arguments
/// ---------
/// * `epoch`: the civil timestamp
/// * `timezone`: timezone offset in hours (UTC+ positive)
///
/// Return
/// ------
/// * the Julian Date (days)
pub fn julian_date(epoch: &Epoch, timezone: f64) -> f64 {
    let (days, seconds) = civil_days_seconds(epoch);
    TRUNCATED_JD_ORIGIN + days as f64 + seconds as f64 / SECONDS_PER_DAY - timezone / 24.0
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_century(julian_date: f64) -> f64 {
    (julian_date - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Fraction of the civil day elapsed at the timestamp, sub-second digits included.
pub fn fractional_day(epoch: &Epoch) -> DayFraction {
    let (_, _, _, hour, minute, second, nanos) = civil_components(epoch);
    hour as f64 / 24.0
        + minute as f64 / MINUTES_PER_DAY
        + (second as f64 + nanos as f64 * 1e-9) / SECONDS_PER_DAY
}

/// Parse a civil timestamp in the format `YYYY-MM-DDTHH:MM:SS[.FFF]`.
///
/// A space may replace the `T` separator. A bare calendar date is rejected: every solar
/// geometry routine needs the time of day. The string is a local clock reading, so a UTC
/// offset, a `Z` or a time scale suffix is rejected; the offset is given separately as the
/// timezone.
///
/// Arguments
/// ---------
/// * `timestamp`: the civil timestamp string
///
/// Return
/// ------
/// * the parsed [`Epoch`], or
///   - [`EcofluxError::MissingTimeOfDay`] if the string carries no time-of-day component,
///   - [`EcofluxError::InvalidTimestamp`] if the string cannot be parsed.
pub fn parse_civil_timestamp(timestamp: &str) -> Result<Epoch, EcofluxError> {
    let trimmed = timestamp.trim();

    let (date, time_of_day) = trimmed
        .split_once(|c: char| c == 'T' || c == ' ')
        .ok_or_else(|| EcofluxError::MissingTimeOfDay(trimmed.to_string()))?;

    let time_of_day = time_of_day.trim();
    if time_of_day.is_empty() {
        return Err(EcofluxError::MissingTimeOfDay(trimmed.to_string()));
    }

    // a civil clock reading only: no UTC offset, `Z` or time scale suffix
    let is_clock = |part: &str, extra: char| {
        part.chars().all(|c| c.is_ascii_digit() || c == extra || c == '.')
    };
    if !(is_clock(date, '-') && is_clock(time_of_day, ':')) {
        return Err(EcofluxError::InvalidTimestamp(format!(
            "{trimmed}: expected a naive YYYY-MM-DDTHH:MM:SS[.FFF] clock reading"
        )));
    }

    let normalized = format!("{date}T{time_of_day}");
    Epoch::from_gregorian_str(&normalized)
        .map_err(|e| EcofluxError::InvalidTimestamp(format!("{trimmed}: {e}")))
}
