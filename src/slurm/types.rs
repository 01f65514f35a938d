// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Output types for the NDJSON report format.
//!
//! Each report is written as one JSON object per line, tagged with a
//! `type` discriminator so mixed streams stay easy to filter.

use serde::{Deserialize, Serialize};

use super::scontrol::JobInfo;
use super::time::{format_slurm_time, TimeLimit};

/// Result of parsing one duration string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationReport {
    /// Message type discriminator (always "duration")
    #[serde(rename = "type")]
    pub msg_type: String,

    /// The string as given on the command line
    pub input: String,

    /// Total whole seconds
    pub seconds: u64,

    /// Canonical `[D-]HH:MM:SS` rendering
    pub canonical: String,
}

impl DurationReport {
    pub fn new(input: &str, seconds: u64) -> Self {
        Self {
            msg_type: "duration".to_string(),
            input: input.to_string(),
            seconds,
            canonical: format_slurm_time(seconds),
        }
    }
}

/// Time accounting of a single job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTimes {
    /// Message type discriminator (always "job_times")
    #[serde(rename = "type")]
    pub msg_type: String,

    pub job_id: u32,

    pub name: String,

    /// Slurm's long state name, e.g. "RUNNING"
    pub state: String,

    /// Elapsed run time in seconds
    pub run_time: u64,

    /// Time limit in seconds. Absent when unlimited or inherited
    /// from the partition (see `unlimited`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u64>,

    /// True if Slurm reports the limit as UNLIMITED/INFINITE
    pub unlimited: bool,

    /// Seconds left before the limit, saturating at zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u64>,
}

impl From<&JobInfo> for JobTimes {
    fn from(info: &JobInfo) -> Self {
        Self {
            msg_type: "job_times".to_string(),
            job_id: info.job_id,
            name: info.name.clone(),
            state: info.state.as_str().to_string(),
            run_time: info.run_time,
            time_limit: info.time_limit.and_then(|l| l.as_secs()),
            unlimited: info.time_limit == Some(TimeLimit::Unlimited),
            remaining: info.remaining(),
        }
    }
}
