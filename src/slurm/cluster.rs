// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::scontrol::get_job_info;
use super::time::{parse_slurm_time, SlurmTimeError};
use super::types::JobTimes;

/// Handle on the Slurm cluster an experiment runs on.
#[derive(Debug, Clone)]
pub struct SlurmCluster {
    log_path: PathBuf,
}

impl SlurmCluster {
    /// Create a cluster handle whose experiment logs live under `log_path`
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Convert a Slurm duration string (`SS`, `MM:SS`, `HH:MM:SS`,
    /// `D-HH:MM:SS`) into whole seconds
    pub fn slurm_time_to_seconds(&self, duration: &str) -> Result<u64, SlurmTimeError> {
        parse_slurm_time(duration)
    }

    /// Query run time, limit and remaining time of a job via scontrol
    pub fn job_times(&self, job_id: u32) -> Result<JobTimes> {
        let info = get_job_info(job_id)
            .with_context(|| format!("Failed to query times of job {}", job_id))?;
        Ok(JobTimes::from(&info))
    }
}
