use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run the binary inside `cwd` with a clean runner environment.
fn runner(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_runner"))
        .current_dir(cwd)
        .env_remove("RUNNER_ROOT")
        .env_remove("RUNNER_PYTHON")
        .env_remove("RUNNER_CUDA_ID")
        .env_remove("RUNNER_ASSET_URL")
        .env_remove("RUNNER_LOG")
        .args(args)
        .output()
        .expect("run runner")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Workspace with `LR/calendar` frames and a checkpoint index file.
fn prepared_workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::create_dir_all(dir.path().join("LR").join("calendar")).unwrap();
    fs::create_dir_all(dir.path().join("model")).unwrap();
    fs::write(dir.path().join("model").join("TecoGAN.index"), b"").unwrap();
    dir
}

#[test]
fn no_arguments_prints_usage_and_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = runner(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Usage: runner <runcase_number>"));
}

#[test]
fn non_integer_runcase_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = runner(dir.path(), &["inference"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid run case 'inference'"));
}

#[test]
fn inference_without_directory_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = runner(dir.path(), &["1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("missing <input_lr_directory>"));
}

#[test]
fn inference_with_missing_directory_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = runner(dir.path(), &["1", "./LR/does_not_exist"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("./LR/does_not_exist"));
}

#[test]
fn inference_without_checkpoint_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("LR").join("calendar")).unwrap();
    let output = runner(dir.path(), &["1", "./LR/calendar"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("checkpoint"));
}

#[test]
fn unsupported_runcase_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = runner(dir.path(), &["9"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Run case 9 is not supported."));
    assert!(stdout(&output).contains("Finished run case 9."));
}

#[test]
fn training_runcases_are_stubs() {
    let dir = tempfile::tempdir().unwrap();
    for case in ["3", "4"] {
        let output = runner(dir.path(), &[case]);
        assert!(output.status.success());
        assert!(stdout(&output).contains("not implemented"));
    }
}

#[test]
fn inference_dry_run_prints_command_line() {
    let dir = prepared_workspace();
    let output = runner(dir.path(), &["--dry-run", "1", "./LR/calendar/"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains(
        "Command: python3 main.py --cudaID 0 --output_dir ./results/ \
         --summary_dir ./results/log/calendar --mode inference \
         --input_dir_LR ./LR/calendar/ --output_pre calendar --num_resblock 16 \
         --checkpoint ./model/TecoGAN --output_ext png"
    ));
    assert!(dir.path().join("results").is_dir());
}

#[test]
fn environment_overrides_interpreter_and_gpu() {
    let dir = prepared_workspace();
    let output = Command::new(env!("CARGO_BIN_EXE_runner"))
        .current_dir(dir.path())
        .env("RUNNER_PYTHON", "python3.11")
        .env("RUNNER_CUDA_ID", "1")
        .args(["--dry-run", "1", "LR/calendar"])
        .output()
        .expect("run runner");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Command: python3.11 main.py --cudaID 1 "));
}

#[test]
fn metrics_dry_run_lists_scenes() {
    let dir = tempfile::tempdir().unwrap();
    for scene in ["calendar", "walk"] {
        fs::create_dir_all(dir.path().join("results").join(scene)).unwrap();
        fs::create_dir_all(dir.path().join("HR").join(scene)).unwrap();
    }
    let output = runner(dir.path(), &["--dry-run", "2", "calendar", "walk"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains(
        "--results ./results/calendar,./results/walk --targets ./HR/calendar,./HR/walk"
    ));
}

#[test]
fn download_dry_run_lists_archives() {
    let dir = tempfile::tempdir().unwrap();
    let output = runner(dir.path(), &["--dry-run", "0"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("https://ge.in.tum.de/download/data/TecoGAN/model.zip"));
    assert!(out.contains("unzip -q -o ./HR/tos.zip -d ./HR"));
    assert!(!dir.path().join("model").exists());
}

#[cfg(unix)]
#[test]
fn dotenv_log_filter_enables_diagnostics() {
    let dir = prepared_workspace();
    fs::write(dir.path().join(".env"), "RUNNER_LOG=info\nRUNNER_PYTHON=true\n").unwrap();
    let output = runner(dir.path(), &["1", "./LR/calendar"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Command: true main.py "));
    assert!(
        stderr(&output).contains("spawning child process"),
        "missing tracing output in stderr: {}",
        stderr(&output)
    );
}

#[cfg(unix)]
#[test]
fn child_exit_code_is_propagated() {
    let dir = prepared_workspace();
    let output = Command::new(env!("CARGO_BIN_EXE_runner"))
        .current_dir(dir.path())
        .env("RUNNER_PYTHON", "false")
        .args(["1", "./LR/calendar"])
        .output()
        .expect("run runner");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Return code: 1"));
}
