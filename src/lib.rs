// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Slurm time handling for launching and tracking experiments on HPC clusters.

pub mod slurm;

pub use slurm::{format_slurm_time, parse_slurm_time, SlurmCluster, SlurmTimeError, TimeLimit};
