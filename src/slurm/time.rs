// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Slurm duration strings: `SS`, `MM:SS`, `HH:MM:SS` and `D-HH:MM:SS`.
//!
//! These appear as `RunTime`/`TimeLimit` in `scontrol` output and as
//! `Elapsed`/`Timelimit` in `sacct`. Parsing yields whole seconds; formatting
//! renders the canonical `[D-]HH:MM:SS` form back.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
pub const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Why a duration string could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlurmTimeError {
    #[error("empty duration string")]
    Empty,

    #[error("too many ':' separated fields ({0}), expected at most 3")]
    TooManyFields(usize),

    #[error("invalid {field} field '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("duration '{0}' overflows the seconds counter")]
    Overflow(String),
}

/// Parse a Slurm duration string into whole seconds.
///
/// The day part is split off at the first `-`; the rest is read as
/// `SS`, `MM:SS` or `HH:MM:SS` depending on the number of `:` fields.
/// Field values are not range checked, so `00:75` is 4500 seconds.
pub fn parse_slurm_time(s: &str) -> Result<u64, SlurmTimeError> {
    if s.is_empty() {
        return Err(SlurmTimeError::Empty);
    }

    let (days, rest) = match s.split_once('-') {
        Some((days, rest)) => (parse_field("days", days)?, rest),
        None => (0, s),
    };

    let fields: Vec<&str> = rest.split(':').collect();
    let (hours, minutes, seconds) = match fields.as_slice() {
        [ss] => (0, 0, parse_field("seconds", ss)?),
        [mm, ss] => (0, parse_field("minutes", mm)?, parse_field("seconds", ss)?),
        [hh, mm, ss] => (
            parse_field("hours", hh)?,
            parse_field("minutes", mm)?,
            parse_field("seconds", ss)?,
        ),
        _ => return Err(SlurmTimeError::TooManyFields(fields.len())),
    };

    days.checked_mul(SECS_PER_DAY)
        .and_then(|t| t.checked_add(hours.checked_mul(SECS_PER_HOUR)?))
        .and_then(|t| t.checked_add(minutes.checked_mul(SECS_PER_MINUTE)?))
        .and_then(|t| t.checked_add(seconds))
        .ok_or_else(|| SlurmTimeError::Overflow(s.to_string()))
}

/// Parse one numeric field. Only ASCII digits are accepted; `u64::from_str`
/// alone would let a leading `+` through.
fn parse_field(field: &'static str, value: &str) -> Result<u64, SlurmTimeError> {
    let invalid = || SlurmTimeError::InvalidField {
        field,
        value: value.to_string(),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

/// Render seconds as `HH:MM:SS`, or `D-HH:MM:SS` from one day upwards.
pub fn format_slurm_time(total: u64) -> String {
    let days = total / SECS_PER_DAY;
    let hours = (total % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total % SECS_PER_MINUTE;

    if days > 0 {
        format!("{days}-{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// A job or partition time limit as Slurm reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLimit {
    Limited(u64),
    Unlimited,
}

impl TimeLimit {
    /// Limit in seconds, `None` when unlimited
    pub fn as_secs(&self) -> Option<u64> {
        match self {
            TimeLimit::Limited(secs) => Some(*secs),
            TimeLimit::Unlimited => None,
        }
    }
}

impl FromStr for TimeLimit {
    type Err = SlurmTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("UNLIMITED") || s.eq_ignore_ascii_case("INFINITE") {
            return Ok(TimeLimit::Unlimited);
        }
        parse_slurm_time(s).map(TimeLimit::Limited)
    }
}

impl fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeLimit::Limited(secs) => f.write_str(&format_slurm_time(*secs)),
            TimeLimit::Unlimited => f.write_str("UNLIMITED"),
        }
    }
}

/// Parse a `TimeLimit=` value, where placeholders mean "no job-specific limit"
pub fn parse_time_limit(s: &str) -> Result<Option<TimeLimit>, SlurmTimeError> {
    let placeholder = ["Partition_Limit", "NONE", "N/A"]
        .iter()
        .any(|p| s.eq_ignore_ascii_case(p));
    if placeholder {
        return Ok(None);
    }
    s.parse().map(Some)
}
