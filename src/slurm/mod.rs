// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Slurm integration for experiment launchers.
//!
//! - `time`: parse and format Slurm duration strings
//! - `scontrol`: read-only job queries
//! - `cluster`: the `SlurmCluster` handle tying both together

pub mod cluster;
pub mod scontrol;
pub mod time;
pub mod types;

pub use cluster::SlurmCluster;
pub use time::{format_slurm_time, parse_slurm_time, parse_time_limit, SlurmTimeError, TimeLimit};
pub use types::{DurationReport, JobTimes};
