// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tube::slurm::{format_slurm_time, DurationReport, JobTimes, SlurmCluster};

#[derive(Parser, Debug)]
#[command(name = "tube")]
#[command(about = "Slurm duration parsing and job time queries for experiment launchers")]
#[command(version)]
struct Args {
    /// Emit one JSON object per result (NDJSON)
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding experiment logs
    #[arg(long, env = "TUBE_LOG_PATH", default_value = ".")]
    log_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert Slurm duration strings (e.g. 1-12:20:12) to seconds
    Parse {
        #[arg(required = true)]
        durations: Vec<String>,
    },

    /// Render second counts as Slurm duration strings
    Format {
        #[arg(required = true)]
        seconds: Vec<u64>,
    },

    /// Show run time, time limit and remaining time of a job
    Job {
        /// Numeric Slurm job ID, defaults to the job this runs in. Array task
        /// ids such as 1234_5 are not accepted; pass the task's own job ID
        /// (SLURM_JOB_ID inside the task) instead.
        #[arg(env = "SLURM_JOB_ID")]
        jobid: u32,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let cluster = SlurmCluster::new(args.log_path.clone());
    debug!(log_path = %cluster.log_path().display(), "cluster handle created");

    let mut stdout = io::stdout().lock();
    run(args.command, args.json, &cluster, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn run<W: Write>(command: Command, json: bool, cluster: &SlurmCluster, out: &mut W) -> Result<()> {
    match command {
        Command::Parse { durations } => {
            for duration in &durations {
                let seconds = cluster
                    .slurm_time_to_seconds(duration)
                    .with_context(|| format!("Invalid duration '{}'", duration))?;
                if json {
                    write_json(out, &DurationReport::new(duration, seconds))?;
                } else {
                    writeln!(out, "{}", seconds)?;
                }
            }
        }
        Command::Format { seconds } => {
            for secs in seconds {
                let canonical = format_slurm_time(secs);
                if json {
                    write_json(out, &DurationReport::new(&canonical, secs))?;
                } else {
                    writeln!(out, "{}", canonical)?;
                }
            }
        }
        Command::Job { jobid } => {
            let times = cluster.job_times(jobid)?;
            emit_job_times(out, &times, json)?;
        }
    }
    Ok(())
}

/// Log to stderr so stdout stays machine-readable
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string(value)?)?;
    Ok(())
}

fn emit_job_times<W: Write>(out: &mut W, times: &JobTimes, json: bool) -> Result<()> {
    if json {
        write_json(out, times)
    } else {
        print_job_times(out, times)
    }
}

fn print_job_times<W: Write>(out: &mut W, times: &JobTimes) -> Result<()> {
    let limit = match (times.time_limit, times.unlimited) {
        (Some(secs), _) => format_slurm_time(secs),
        (None, true) => "UNLIMITED".to_string(),
        (None, false) => "Partition_Limit".to_string(),
    };
    let remaining = times
        .remaining
        .map(format_slurm_time)
        .unwrap_or_else(|| "-".to_string());

    writeln!(out, "Job {} ({}) {}", times.job_id, times.name, times.state)?;
    writeln!(out, "  run time:  {}", format_slurm_time(times.run_time))?;
    writeln!(out, "  limit:     {}", limit)?;
    writeln!(out, "  remaining: {}", remaining)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_durations() {
        let args = Args::try_parse_from(["tube", "--json", "parse", "15:00", "1-12:20:12"]).unwrap();
        assert!(args.json);
        match args.command {
            Command::Parse { durations } => assert_eq!(durations, vec!["15:00", "1-12:20:12"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_args_require_input() {
        assert!(Args::try_parse_from(["tube", "parse"]).is_err());
        assert!(Args::try_parse_from(["tube", "format", "abc"]).is_err());
    }

    fn run_args(argv: &[&str]) -> Result<String> {
        let args = Args::try_parse_from(argv.iter().copied())?;
        let cluster = SlurmCluster::new(args.log_path.clone());
        let mut buf = Vec::new();
        run(args.command, args.json, &cluster, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    fn sample_job_times() -> JobTimes {
        JobTimes {
            msg_type: "job_times".to_string(),
            job_id: 12345,
            name: "train".to_string(),
            state: "RUNNING".to_string(),
            run_time: 600,
            time_limit: Some(130812),
            unlimited: false,
            remaining: Some(130212),
        }
    }

    #[test]
    fn test_run_parse_plain() {
        let out = run_args(&["tube", "parse", "15:00", "1-12:20:12", "12"]).unwrap();
        assert_eq!(out, "900\n130812\n12\n");
    }

    #[test]
    fn test_run_parse_stops_at_malformed() {
        let err = run_args(&["tube", "parse", "15:00", "1:2:3:4"]).unwrap_err();
        assert!(err.to_string().contains("Invalid duration '1:2:3:4'"));
    }

    #[test]
    fn test_run_format_plain() {
        let out = run_args(&["tube", "format", "900", "130812"]).unwrap();
        assert_eq!(out, "00:15:00\n1-12:20:12\n");
    }

    #[test]
    fn test_run_format_json() {
        let out = run_args(&["tube", "format", "--json", "4812"]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1);

        let report: DurationReport = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(report.msg_type, "duration");
        assert_eq!(report.seconds, 4812);
        assert_eq!(report.canonical, "01:20:12");
    }

    #[test]
    fn test_emit_job_times_json() {
        let times = sample_job_times();
        let mut buf = Vec::new();
        emit_job_times(&mut buf, &times, true).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"type\":\"job_times\""));
        let parsed: JobTimes = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(parsed, times);
    }

    #[test]
    fn test_args_reject_array_task_id() {
        assert!(Args::try_parse_from(["tube", "job", "1234_5"]).is_err());
        assert!(Args::try_parse_from(["tube", "job", "1234"]).is_ok());
    }

    #[test]
    fn test_print_job_times() {
        let times = sample_job_times();

        let mut buf = Vec::new();
        print_job_times(&mut buf, &times).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Job 12345 (train) RUNNING"));
        assert!(text.contains("run time:  00:10:00"));
        assert!(text.contains("limit:     1-12:20:12"));
        assert!(text.contains("remaining: 1-12:10:12"));
    }

    #[test]
    fn test_write_json_is_one_line() {
        let mut buf = Vec::new();
        write_json(&mut buf, &DurationReport::new("12", 12)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with('\n'));
    }
}
