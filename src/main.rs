//! xodr - OpenDRIVE road network inspector

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::LevelFilter;

use xodr::{CallRecorder, Document, ParseOptions, RoadParser};

#[derive(Parser)]
#[command(name = "xodr")]
#[command(version, about = "Read an OpenDRIVE road network and show the map-builder calls", long_about = None)]
#[command(after_help = "EXAMPLES:
    xodr town.xodr              Summarize roads, sections and lanes
    xodr --json town.xodr       Print every map-builder call as JSON
    xodr --strict town.xodr     Fail on the first malformed road")]
struct Cli {
    /// Input OpenDRIVE file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Print one JSON object per map-builder call
    #[arg(long)]
    json: bool,

    /// Fail instead of skipping roads with more lane sections than lane offsets
    #[arg(long)]
    strict: bool,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress warnings
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Log filter when `RUST_LOG` is unset; skipped roads are reported as warnings.
const DEFAULT_FILTER: &str = "warn";

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    logger.target(env_logger::Target::Stderr);
    if let Some(level) = level_override(cli.verbose, cli.quiet) {
        logger.filter_level(level);
    }
    logger.init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Level forced by `-v` / `-q`; `None` leaves `RUST_LOG` (or warn) in charge.
fn level_override(verbose: bool, quiet: bool) -> Option<LevelFilter> {
    if verbose {
        Some(LevelFilter::Debug)
    } else if quiet {
        Some(LevelFilter::Error)
    } else {
        None
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let doc = Document::open(&cli.input).map_err(|e| e.to_string())?;
    let parser = RoadParser::with_options(ParseOptions { strict: cli.strict });

    let mut recorder = CallRecorder::new();
    let report = parser
        .parse(&doc, &mut recorder)
        .map_err(|e| e.to_string())?;

    if cli.json {
        for call in recorder.calls() {
            let line = serde_json::to_string(call).map_err(|e| e.to_string())?;
            println!("{line}");
        }
        return Ok(());
    }

    println!("File: {}", cli.input);
    println!("Roads: {}", report.emitted.roads);
    println!("Speed zones: {}", report.emitted.speed_zones);
    println!("Lane sections: {}", report.emitted.sections);
    println!("Lanes: {}", report.emitted.lanes);
    if !report.is_complete() {
        println!("Skipped roads: {}", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {skipped}");
        }
    }

    Ok(())
}
