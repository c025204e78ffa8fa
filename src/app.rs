//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and the environment configuration
//! - checks each run case's preconditions
//! - launches the external script and maps its exit status

use std::path::Path;

use chrono::Local;
use clap::Parser;
use clap::error::ErrorKind;

use crate::cli::{Cli, INFERENCE_USAGE, USAGE};
use crate::command::{self, INFERENCE_SCRIPT, METRICS_SCRIPT};
use crate::config::RunnerConfig;
use crate::domain::{Layout, RunCase, scene_name};
use crate::download::{self, Downloader};
use crate::error::AppError;
use crate::process;

/// Scenes evaluated by run case 2 when none are given.
pub const DEFAULT_METRIC_SCENES: [&str; 1] = ["calendar"];

/// Entry point for the `runner` binary.
pub fn run(argv: Vec<String>) -> Result<(), AppError> {
    let Some(cli) = parse_cli(argv)? else {
        return Ok(());
    };
    let mut config = RunnerConfig::from_env()?;
    config.dry_run = cli.dry_run;
    if let Some(root) = cli.root {
        config.root = root;
    }

    let Some(raw) = cli.runcase else {
        println!("{USAGE}");
        println!("{INFERENCE_USAGE}");
        return Err(AppError::failure("Error: missing <runcase_number> argument."));
    };
    let case = RunCase::parse(&raw)?;

    dispatch(case, &cli.args, &config)
}

/// Parse argv; `Ok(None)` means clap already printed help or version.
fn parse_cli(argv: Vec<String>) -> Result<Option<Cli>, AppError> {
    match Cli::try_parse_from(argv) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            Ok(None)
        }
        Err(err) => Err(AppError::failure(err.render().to_string().trim_end().to_string())),
    }
}

/// Execute one run case with its trailing arguments.
pub fn dispatch(case: RunCase, args: &[String], config: &RunnerConfig) -> Result<(), AppError> {
    println!(
        "Executing run case {case} ({}) at {}",
        case.display_name(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    let layout = Layout::new(&config.root);

    match case {
        RunCase::Download => handle_download(&layout, config)?,
        RunCase::Inference => handle_inference(args, &layout, config)?,
        RunCase::Metrics => handle_metrics(args, &layout, config)?,
        RunCase::TrainTecoGan | RunCase::TrainFrvsr => {
            println!(
                "Run case {case}: {} is not implemented in this revision.",
                case.display_name()
            );
        }
        RunCase::Unsupported(n) => {
            println!("Run case {n} is not supported.");
        }
    }

    println!("Finished run case {case}.");
    Ok(())
}

fn handle_download(layout: &Layout, config: &RunnerConfig) -> Result<(), AppError> {
    let fetches = download::plan(layout, &config.asset_url);

    if config.dry_run {
        for fetch in &fetches {
            println!("would fetch {} -> {}", fetch.url, fetch.archive.display());
            println!("would run: {}", fetch.unzip_command());
        }
        return Ok(());
    }

    Downloader::new().fetch_all(&fetches)
}

fn handle_inference(args: &[String], layout: &Layout, config: &RunnerConfig) -> Result<(), AppError> {
    let Some(input) = args.first() else {
        println!("{INFERENCE_USAGE}");
        return Err(AppError::failure(
            "Error: missing <input_lr_directory> argument for run case 1.",
        ));
    };
    let input_dir = Path::new(input);

    if !input_dir.is_dir() {
        return Err(AppError::failure(format!(
            "Error: input LR directory '{input}' not found or is not a directory."
        )));
    }

    let scene = scene_name(input_dir)?;
    layout.ensure_results_dir()?;

    println!("Input LR directory: {input}");
    println!(
        "Output will be saved in a subfolder named '{scene}' inside '{}'",
        layout.results_dir().display()
    );

    if !layout.checkpoint_exists() {
        return Err(AppError::failure(format!(
            "Error: TecoGAN model checkpoint not found at '{}'. Download it with run case 0.",
            layout.checkpoint().display()
        )));
    }

    let invocation = command::inference(config, layout, input_dir, &scene);
    println!("Command: {invocation}");
    if config.dry_run {
        return Ok(());
    }

    let outcome = process::run_blocking(&invocation)?;
    process::report(INFERENCE_SCRIPT, &outcome)?;
    println!("{INFERENCE_SCRIPT} completed for directory: {input}");
    Ok(())
}

fn handle_metrics(args: &[String], layout: &Layout, config: &RunnerConfig) -> Result<(), AppError> {
    let scenes: Vec<String> = if args.is_empty() {
        DEFAULT_METRIC_SCENES.iter().map(|s| s.to_string()).collect()
    } else {
        args.to_vec()
    };

    for (result, target) in command::metrics_pairs(layout, &scenes) {
        for dir in [&result, &target] {
            if !dir.is_dir() {
                return Err(AppError::failure(format!(
                    "Error: metrics directory '{}' not found.",
                    dir.display()
                )));
            }
        }
    }

    let invocation = command::metrics(config, layout, &scenes);
    println!("Command: {invocation}");
    if config.dry_run {
        return Ok(());
    }

    let outcome = process::run_blocking(&invocation)?;
    process::report(METRICS_SCRIPT, &outcome)
}
