//! Command lines for the external TecoGAN scripts.
//!
//! Builders here only assemble arguments; precondition checks live in `app`
//! and launching lives in `process`.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::RunnerConfig;
use crate::domain::{Layout, dir_arg};

pub const INFERENCE_SCRIPT: &str = "main.py";
pub const METRICS_SCRIPT: &str = "metrics.py";

const NUM_RESBLOCK: u32 = 16;
const OUTPUT_EXT: &str = "png";
const SUMMARY_SUBDIR: &str = "log";
const METRIC_LOG_SUBDIR: &str = "metric_log";

/// A program plus its ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append `flag value`.
    pub fn flag(self, flag: &str, value: impl Into<OsString>) -> Self {
        self.arg(flag).arg(value)
    }

    /// Value following `flag`, if present.
    pub fn value_of(&self, flag: &str) -> Option<&OsString> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// `main.py --mode inference` on one LR frame directory.
pub fn inference(config: &RunnerConfig, layout: &Layout, input_dir: &Path, scene: &str) -> Invocation {
    let results = layout.results_dir();
    let summary_dir = results.join(SUMMARY_SUBDIR).join(scene);

    Invocation::new(&config.python)
        .arg(INFERENCE_SCRIPT)
        .flag("--cudaID", config.cuda_id.to_string())
        .flag("--output_dir", dir_arg(&results))
        .flag("--summary_dir", summary_dir)
        .flag("--mode", "inference")
        .flag("--input_dir_LR", input_dir)
        .flag("--output_pre", scene)
        .flag("--num_resblock", NUM_RESBLOCK.to_string())
        .flag("--checkpoint", layout.checkpoint())
        .flag("--output_ext", OUTPUT_EXT)
}

/// Directories a metrics run compares: `(results/<scene>, HR/<scene>)` per scene.
pub fn metrics_pairs(layout: &Layout, scenes: &[String]) -> Vec<(PathBuf, PathBuf)> {
    scenes
        .iter()
        .map(|s| (layout.results_dir().join(s), layout.hr_dir().join(s)))
        .collect()
}

/// `metrics.py` over the given scenes, comparing results to HR ground truth.
pub fn metrics(config: &RunnerConfig, layout: &Layout, scenes: &[String]) -> Invocation {
    let pairs = metrics_pairs(layout, scenes);
    let results = join_paths(pairs.iter().map(|(r, _)| r.as_path()));
    let targets = join_paths(pairs.iter().map(|(_, t)| t.as_path()));

    Invocation::new(&config.python)
        .arg(METRICS_SCRIPT)
        .flag("--output", dir_arg(&layout.results_dir().join(METRIC_LOG_SUBDIR)))
        .flag("--results", results)
        .flag("--targets", targets)
}

fn join_paths<'a>(paths: impl Iterator<Item = &'a Path>) -> String {
    paths
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RunnerConfig {
        RunnerConfig::default()
    }

    #[test]
    fn inference_command_matches_expected_flags() {
        let layout = Layout::new(".");
        let cmd = inference(&config(), &layout, Path::new("./LR/calendar"), "calendar");

        assert_eq!(
            cmd.to_string(),
            "python3 main.py --cudaID 0 --output_dir ./results/ \
             --summary_dir ./results/log/calendar --mode inference \
             --input_dir_LR ./LR/calendar --output_pre calendar --num_resblock 16 \
             --checkpoint ./model/TecoGAN --output_ext png"
        );
    }

    #[test]
    fn inference_command_follows_config() {
        let config = RunnerConfig {
            python: "/venv/bin/python".into(),
            cuda_id: 3,
            ..RunnerConfig::default()
        };
        let layout = Layout::new("/work");
        let cmd = inference(&config, &layout, Path::new("/frames/walk/"), "walk");

        assert_eq!(cmd.program, "/venv/bin/python");
        assert_eq!(cmd.value_of("--cudaID").unwrap(), "3");
        assert_eq!(cmd.value_of("--output_dir").unwrap(), "/work/results/");
        assert_eq!(cmd.value_of("--summary_dir").unwrap(), "/work/results/log/walk");
        assert_eq!(cmd.value_of("--checkpoint").unwrap(), "/work/model/TecoGAN");
        assert_eq!(cmd.value_of("--input_dir_LR").unwrap(), "/frames/walk/");
    }

    #[test]
    fn metrics_command_joins_scenes_with_commas() {
        let layout = Layout::new(".");
        let scenes = vec!["calendar".to_string(), "foliage".to_string()];
        let cmd = metrics(&config(), &layout, &scenes);

        assert_eq!(cmd.args[0], "metrics.py");
        assert_eq!(cmd.value_of("--output").unwrap(), "./results/metric_log/");
        assert_eq!(
            cmd.value_of("--results").unwrap(),
            "./results/calendar,./results/foliage"
        );
        assert_eq!(cmd.value_of("--targets").unwrap(), "./HR/calendar,./HR/foliage");
    }

    #[test]
    fn value_of_missing_flag_is_none() {
        let cmd = Invocation::new("true").flag("--a", "1");
        assert_eq!(cmd.value_of("--a").unwrap(), "1");
        assert!(cmd.value_of("--b").is_none());
    }
}
