// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Slurm CLI integration: query job information via scontrol.

use std::process::Command;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, warn};

use super::time::{parse_slurm_time, parse_time_limit, TimeLimit};

/// Job state as reported by Slurm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Suspended,
    Completing,
    Completed,
    Cancelled,
    Failed,
    Timeout,
    NodeFail,
    Unknown(String),
}

impl From<&str> for JobState {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "PENDING" | "PD" => JobState::Pending,
            "RUNNING" | "R" => JobState::Running,
            "SUSPENDED" | "S" => JobState::Suspended,
            "COMPLETING" | "CG" => JobState::Completing,
            "COMPLETED" | "CD" => JobState::Completed,
            "CANCELLED" | "CA" => JobState::Cancelled,
            "FAILED" | "F" => JobState::Failed,
            "TIMEOUT" | "TO" => JobState::Timeout,
            "NODE_FAIL" | "NF" => JobState::NodeFail,
            other => JobState::Unknown(other.to_string()),
        }
    }
}

impl JobState {
    /// Slurm's long state name
    pub fn as_str(&self) -> &str {
        match self {
            JobState::Pending => "PENDING",
            JobState::Running => "RUNNING",
            JobState::Suspended => "SUSPENDED",
            JobState::Completing => "COMPLETING",
            JobState::Completed => "COMPLETED",
            JobState::Cancelled => "CANCELLED",
            JobState::Failed => "FAILED",
            JobState::Timeout => "TIMEOUT",
            JobState::NodeFail => "NODE_FAIL",
            JobState::Unknown(s) => s.as_str(),
        }
    }
}

/// Information about a Slurm job
#[derive(Debug, Clone)]
pub struct JobInfo {
    /// Job ID
    pub job_id: u32,
    /// Job name
    pub name: String,
    /// Job state
    pub state: JobState,
    /// Elapsed run time in seconds
    pub run_time: u64,
    /// Time limit, `None` when the job inherits the partition limit
    pub time_limit: Option<TimeLimit>,
}

impl JobInfo {
    /// Seconds left before the job hits its limit.
    ///
    /// `None` when the limit is unlimited or unknown; saturates at zero
    /// for jobs that ran past their limit (e.g. during the kill grace time).
    pub fn remaining(&self) -> Option<u64> {
        self.time_limit
            .and_then(|limit| limit.as_secs())
            .map(|limit| limit.saturating_sub(self.run_time))
    }
}

/// Get job information from Slurm via scontrol
pub fn get_job_info(jobid: u32) -> Result<JobInfo> {
    debug!(jobid, "querying scontrol");
    let output = Command::new("scontrol")
        .args(["show", "job", &jobid.to_string(), "--oneliner"])
        .output()
        .context("Failed to execute scontrol")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("Invalid job id") || stderr.contains("not found") {
            return Err(anyhow!("Job {} not found", jobid));
        }
        return Err(anyhow!("scontrol failed: {}", stderr.trim()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_scontrol_output(&stdout, jobid)
}

/// Parse scontrol show job output (oneliner format)
pub fn parse_scontrol_output(output: &str, jobid: u32) -> Result<JobInfo> {
    let line = output
        .lines()
        .find(|l| !l.is_empty())
        .ok_or_else(|| anyhow!("Empty scontrol output"))?;

    let mut info = JobInfo {
        job_id: jobid,
        name: String::new(),
        state: JobState::Unknown("".to_string()),
        run_time: 0,
        time_limit: None,
    };

    // Parse key=value pairs
    for part in line.split_whitespace() {
        if let Some((key, value)) = part.split_once('=') {
            match key {
                "JobId" => {
                    info.job_id = value.parse().unwrap_or(jobid);
                }
                "JobName" | "Name" => {
                    info.name = value.to_string();
                }
                "JobState" => {
                    info.state = JobState::from(value);
                }
                "RunTime" => match parse_slurm_time(value) {
                    Ok(secs) => info.run_time = secs,
                    Err(e) => warn!(jobid, value, error = %e, "unparseable RunTime, assuming 0"),
                },
                "TimeLimit" => match parse_time_limit(value) {
                    Ok(limit) => info.time_limit = limit,
                    Err(e) => warn!(jobid, value, error = %e, "unparseable TimeLimit, ignoring"),
                },
                _ => {}
            }
        }
    }

    Ok(info)
}
