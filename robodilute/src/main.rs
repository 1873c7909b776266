//! RoboDilute CLI - plate concentration sheet to dilution worksheet
//!
//! ```bash
//! robodilute plate.xlsx              # write <dir>/robo_sp3_info/*.txt
//! robodilute plate.csv --dry-run     # print the worksheet, write nothing
//! robodilute plate.xlsx --json       # also print a JSON run report
//! ROBODILUTE_INPUT=plate.xlsx robodilute
//! ```
//!
//! Exit status is 0 on success or when no input is given, 1 on any error.

use clap::Parser;
use robodilute::app::{run_with, ArgPicker, ConsoleNotifier, Outcome};
use robodilute::export::{render_combined, ExportRow};
use robodilute::logs::{LogEntry, LOG_BROADCASTER};
use robodilute::RunOptions;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "robodilute")]
#[command(about = "Compute sample/buffer volumes for a plate and write the robot worksheet", long_about = None)]
struct Cli {
    /// Plate file (.xlsx, .xls, .ods, .csv, .tsv)
    #[arg(env = "ROBODILUTE_INPUT")]
    input: Option<PathBuf>,

    /// Parent directory for robo_sp3_info/ (default: next to the input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Validate and compute only; print the worksheet instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Print a JSON run report to stdout
    #[arg(long)]
    json: bool,

    /// Suppress progress logs
    #[arg(short, long)]
    quiet: bool,
}

/// JSON run report
#[derive(Serialize)]
struct RunReport {
    status: &'static str,
    output_dir: Option<PathBuf>,
    files: Vec<PathBuf>,
    rows: Vec<ExportRow>,
    error: Option<ReportError>,
    logs: Vec<LogEntry>,
}

#[derive(Serialize)]
struct ReportError {
    title: String,
    message: String,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    LOG_BROADCASTER.set_quiet(cli.quiet);

    let options = RunOptions {
        output_parent: cli.output_dir,
        dry_run: cli.dry_run,
        ..RunOptions::default()
    };

    let mut picker = ArgPicker::new(cli.input);
    let mut notifier = ConsoleNotifier;
    let outcome = run_with(&mut picker, &mut notifier, &options);

    if cli.dry_run && !cli.json {
        if let Outcome::Success(run) = &outcome {
            let rows: Vec<ExportRow> = run.rows.iter().map(ExportRow::from).collect();
            println!("{}", render_combined(&rows));
        }
    }

    if cli.json {
        let report = build_report(&outcome);
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("❌ Cannot serialize report: {}", e),
        }
    }

    std::process::exit(outcome.exit_code());
}

fn build_report(outcome: &Outcome) -> RunReport {
    let mut report = RunReport {
        status: "cancelled",
        output_dir: None,
        files: Vec::new(),
        rows: Vec::new(),
        error: None,
        logs: LOG_BROADCASTER.history(),
    };

    match outcome {
        Outcome::Success(run) => {
            report.status = "success";
            report.rows = run.rows.iter().map(ExportRow::from).collect();
            if let Some(summary) = &run.export {
                report.output_dir = Some(summary.output_dir.clone());
                report.files = summary.files.clone();
            }
        }
        Outcome::Cancelled => {}
        Outcome::Failed(err) => {
            report.status = "error";
            report.error = Some(ReportError {
                title: err.title().to_string(),
                message: err.to_string(),
            });
        }
    }

    report
}
