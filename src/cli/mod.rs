//! Command-line parsing for the run-case dispatcher.
//!
//! The run case stays a raw string here so that a non-integer selector can be
//! reported with the runner's own exit code instead of clap's.

use std::path::PathBuf;

use clap::Parser;

pub const USAGE: &str = "Usage: runner <runcase_number> [additional_arguments...]";
pub const INFERENCE_USAGE: &str = "Usage for run case 1 (inference): runner 1 <input_lr_directory>";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "runner",
    version,
    about = "Run-case dispatcher for the TecoGAN/FRVSR video super-resolution scripts"
)]
pub struct Cli {
    /// Print the command lines (or download plan) without running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Directory containing model/, LR/, HR/ and results/ (overrides RUNNER_ROOT).
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// 0 download, 1 inference, 2 metrics, 3 train TecoGAN, 4 train FRVSR.
    #[arg(allow_negative_numbers = true)]
    pub runcase: Option<String>,

    /// Arguments for the selected run case.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
