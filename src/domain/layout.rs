//! Conventional working-directory layout.
//!
//! ```text
//! <root>/model/TecoGAN.{index,data-00000-of-00001}
//! <root>/LR/<scene>/      low-resolution inputs
//! <root>/HR/<scene>/      ground truth
//! <root>/results/<scene>/ upscaled outputs
//! ```

use std::path::{Component, Path, PathBuf};

use crate::error::AppError;

pub const MODEL_DIR: &str = "model";
pub const LR_DIR: &str = "LR";
pub const HR_DIR: &str = "HR";
pub const RESULTS_DIR: &str = "results";

/// Checkpoint base name; the files on disk carry TensorFlow suffixes.
pub const CHECKPOINT_NAME: &str = "TecoGAN";
const CHECKPOINT_SUFFIXES: [&str; 2] = [".data-00000-of-00001", ".index"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn model_dir(&self) -> PathBuf {
        self.root.join(MODEL_DIR)
    }

    pub fn hr_dir(&self) -> PathBuf {
        self.root.join(HR_DIR)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.root.join(RESULTS_DIR)
    }

    /// Checkpoint prefix as passed to `--checkpoint`.
    pub fn checkpoint(&self) -> PathBuf {
        self.model_dir().join(CHECKPOINT_NAME)
    }

    /// True when either of the checkpoint's data or index files is present.
    pub fn checkpoint_exists(&self) -> bool {
        let prefix = self.checkpoint();
        CHECKPOINT_SUFFIXES
            .iter()
            .any(|suffix| with_suffix(&prefix, suffix).exists())
    }

    /// Create `results/` if it does not exist yet.
    pub fn ensure_results_dir(&self) -> Result<PathBuf, AppError> {
        let dir = self.results_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| {
                AppError::failure(format!(
                    "Error creating results directory {}: {e}",
                    dir.display()
                ))
            })?;
            println!("Created results directory: {}", dir.display());
        }
        Ok(dir)
    }
}

/// Render a directory path with a trailing separator, the form the external scripts expect.
pub fn dir_arg(path: &Path) -> String {
    let s = path.display().to_string();
    if s.ends_with('/') {
        s
    } else {
        format!("{s}/")
    }
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut s = prefix.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

/// Name of the scene an input directory holds: the last component of the
/// lexically normalised path (`./LR/calendar/` gives `calendar`).
///
/// Paths that normalise to nothing nameable (`.`, `/`, `a/..`) fall back to
/// the canonicalised directory.
pub fn scene_name(input: &Path) -> Result<String, AppError> {
    if let Some(name) = normalize(input).file_name() {
        return Ok(name.to_string_lossy().into_owned());
    }

    let canonical = input.canonicalize().map_err(|e| {
        AppError::failure(format!(
            "Cannot resolve input directory '{}': {e}",
            input.display()
        ))
    })?;
    canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            AppError::failure(format!(
                "Cannot derive a scene name from '{}'.",
                input.display()
            ))
        })
}

fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}
