// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use roomsim_config::ScenarioManifest;

mod runner;

use runner::{PreparedScenario, RunReport, RunStatus, StepRecord};

const EXIT_PASS: u8 = 0;
const EXIT_ASSERT_FAIL: u8 = 1;
const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_RUNTIME_ERROR: u8 = 3;

#[derive(Parser, Debug)]
#[command(author, version, about = "RoomSim climate-control simulator", long_about = None)]
struct Cli {
    /// Enable debug logging (pin mode changes, relay writes, thermostat cycles)
    #[arg(short, long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario on a simulated clock.
    Run(RunArgs),

    /// Parse and validate a scenario, then print the initial room state.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Path to the scenario (YAML)
    #[arg(short, long)]
    scenario: PathBuf,

    /// Override the number of steps (takes precedence over the scenario)
    #[arg(long)]
    steps: Option<u64>,

    /// Print one JSON object per step followed by the summary
    #[arg(long)]
    json: bool,

    /// Write all step records to this file as a JSON array
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Path to the scenario (YAML)
    #[arg(short, long)]
    scenario: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so that --json output on stdout stays parseable.
    let level = if cli.trace {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => run_scenario(args),
        Commands::Check(args) => check_scenario(args),
    }
}

fn load(path: &Path) -> Result<PreparedScenario, ExitCode> {
    let manifest = ScenarioManifest::from_file(path).map_err(|e| {
        error!("{:#}", e);
        ExitCode::from(EXIT_CONFIG_ERROR)
    })?;
    PreparedScenario::new(manifest).map_err(|e| {
        error!("{:#}", e);
        ExitCode::from(EXIT_CONFIG_ERROR)
    })
}

fn check_scenario(args: CheckArgs) -> ExitCode {
    let prepared = match load(&args.scenario) {
        Ok(p) => p,
        Err(code) => return code,
    };

    info!(
        "Scenario '{}' is valid ({} pins)",
        prepared.manifest().name,
        prepared.pins().len()
    );
    for def in prepared.pins() {
        info!("  pin {}", def);
    }

    match serde_json::to_string_pretty(&prepared.snapshot()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::from(EXIT_PASS)
        }
        Err(e) => {
            error!("Failed to serialize room snapshot: {}", e);
            ExitCode::from(EXIT_RUNTIME_ERROR)
        }
    }
}

fn run_scenario(args: RunArgs) -> ExitCode {
    let prepared = match load(&args.scenario) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let steps = args.steps.unwrap_or(prepared.manifest().run.steps);
    if steps == 0 {
        error!("--steps must be greater than zero");
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    info!(
        "Running scenario '{}' for {} steps of {} ms",
        prepared.manifest().name,
        steps,
        prepared.manifest().run.poll_interval_ms
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let json = args.json;
    let report = prepared.run(steps, |record: &StepRecord| {
        if json {
            serde_json::to_writer(&mut out, record)?;
            writeln!(out)?;
        }
        Ok(())
    });
    let report = match report {
        Ok(r) => r,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_RUNTIME_ERROR);
        }
    };

    if let Some(path) = &args.output {
        if let Err(e) = write_records(path, &report.records) {
            error!("Failed to write records to {:?}: {:#}", path, e);
            return ExitCode::from(EXIT_RUNTIME_ERROR);
        }
        info!("Wrote {} records to {:?}", report.records.len(), path);
    }

    if json {
        match serde_json::to_string(&report.summary) {
            Ok(line) => println!("{}", line),
            Err(e) => {
                error!("Failed to serialize summary: {}", e);
                return ExitCode::from(EXIT_RUNTIME_ERROR);
            }
        }
    }
    log_summary(&report);

    match report.summary.status {
        RunStatus::Pass | RunStatus::Completed => ExitCode::from(EXIT_PASS),
        RunStatus::Fail => ExitCode::from(EXIT_ASSERT_FAIL),
    }
}

fn write_records(path: &Path, records: &[StepRecord]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

fn log_summary(report: &RunReport) {
    let summary = &report.summary;
    let fmt_temp = |t: Option<f64>| t.map_or_else(|| "n/a".to_string(), |t| format!("{:.2}", t));

    info!("Simulation finished after {:.0} s", summary.elapsed_s);
    info!(
        "  inside: final {} min {} max {}",
        fmt_temp(summary.final_inside),
        fmt_temp(summary.min_inside),
        fmt_temp(summary.max_inside)
    );
    info!(
        "  heater on {} steps, cooler on {} steps",
        summary.heater_on_steps, summary.cooler_on_steps
    );
    match (&summary.expect, summary.status) {
        (Some(expect), RunStatus::Pass) => info!(
            "PASS: final inside within [{}, {}]",
            expect.min_temperature, expect.max_temperature
        ),
        (Some(expect), _) => error!(
            "FAIL: final inside {} outside [{}, {}]",
            fmt_temp(summary.final_inside),
            expect.min_temperature,
            expect.max_temperature
        ),
        (None, _) => info!("No expectation configured"),
    }
}
