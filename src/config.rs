//! Runner configuration from the environment (and an optional `.env`).

use std::path::PathBuf;

use crate::error::AppError;

pub const PYTHON_ENV: &str = "RUNNER_PYTHON";
pub const ROOT_ENV: &str = "RUNNER_ROOT";
pub const CUDA_ID_ENV: &str = "RUNNER_CUDA_ID";
pub const ASSET_URL_ENV: &str = "RUNNER_ASSET_URL";

pub const DEFAULT_PYTHON: &str = "python3";
pub const DEFAULT_ASSET_URL: &str = "https://ge.in.tum.de/download/data/TecoGAN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Interpreter used to launch `main.py` / `metrics.py`.
    pub python: String,
    /// Directory holding `model/`, `LR/`, `HR/` and `results/`.
    pub root: PathBuf,
    /// GPU index forwarded as `--cudaID`.
    pub cuda_id: u32,
    /// Base URL of the downloadable archives, without a trailing slash.
    pub asset_url: String,
    /// Print what would run without launching or fetching anything.
    pub dry_run: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            python: DEFAULT_PYTHON.to_string(),
            root: PathBuf::from("."),
            cuda_id: 0,
            asset_url: DEFAULT_ASSET_URL.to_string(),
            dry_run: false,
        }
    }
}

impl RunnerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(python) = get(PYTHON_ENV) {
            config.python = python;
        }
        if let Some(root) = get(ROOT_ENV) {
            config.root = PathBuf::from(root);
        }
        if let Some(raw) = get(CUDA_ID_ENV) {
            config.cuda_id = raw.trim().parse().map_err(|_| {
                AppError::failure(format!("Invalid {CUDA_ID_ENV} '{raw}': expected a GPU index."))
            })?;
        }
        if let Some(url) = get(ASSET_URL_ENV) {
            config.asset_url = url.trim_end_matches('/').to_string();
        }

        Ok(config)
    }
}
