//! Pretrained model and sample sequence download (run case 0).

use std::fs::{File, create_dir_all, remove_file};
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;

use crate::command::Invocation;
use crate::domain::{HR_DIR, LR_DIR, Layout, MODEL_DIR};
use crate::error::AppError;
use crate::process;

/// One remote archive and where it lands locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    /// File name on the server.
    pub remote: &'static str,
    /// Subdirectory of the root it unpacks into.
    pub dir: &'static str,
    /// Local file name of the downloaded archive inside `dir`.
    pub archive: &'static str,
}

pub const ASSETS: [Asset; 5] = [
    Asset {
        remote: "model.zip",
        dir: MODEL_DIR,
        archive: "model.zip",
    },
    Asset {
        remote: "vid3_LR.zip",
        dir: LR_DIR,
        archive: "vid3.zip",
    },
    Asset {
        remote: "tos_LR.zip",
        dir: LR_DIR,
        archive: "tos.zip",
    },
    Asset {
        remote: "vid4_HR.zip",
        dir: HR_DIR,
        archive: "Vid4.zip",
    },
    Asset {
        remote: "tos_HR.zip",
        dir: HR_DIR,
        archive: "tos.zip",
    },
];

/// A resolved download step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetch {
    pub url: String,
    pub archive: PathBuf,
    pub dest: PathBuf,
}

impl Fetch {
    pub fn unzip_command(&self) -> Invocation {
        Invocation::new("unzip")
            .arg("-q")
            .arg("-o")
            .arg(&self.archive)
            .flag("-d", &self.dest)
    }
}

/// Resolve every asset against `base_url` and the layout root.
pub fn plan(layout: &Layout, base_url: &str) -> Vec<Fetch> {
    let base = base_url.trim_end_matches('/');
    ASSETS
        .iter()
        .map(|asset| {
            let dest = layout.root().join(asset.dir);
            Fetch {
                url: format!("{base}/{}", asset.remote),
                archive: dest.join(asset.archive),
                dest,
            }
        })
        .collect()
}

pub struct Downloader {
    client: Client,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Download, unpack and delete each archive in order. Stops at the first failure.
    pub fn fetch_all(&self, fetches: &[Fetch]) -> Result<(), AppError> {
        for (i, fetch) in fetches.iter().enumerate() {
            println!("[{}/{}] {} -> {}", i + 1, fetches.len(), fetch.url, fetch.dest.display());
            create_dir_all(&fetch.dest).map_err(|e| {
                AppError::failure(format!("Failed to create {}: {e}", fetch.dest.display()))
            })?;

            let bytes = self.download_to(&fetch.url, &fetch.archive)?;
            tracing::info!(url = %fetch.url, bytes, "archive downloaded");

            unpack(fetch)?;
            remove_file(&fetch.archive).map_err(|e| {
                AppError::failure(format!(
                    "Failed to remove archive {}: {e}",
                    fetch.archive.display()
                ))
            })?;
        }
        Ok(())
    }

    /// Stream `url` into `path`, returning the number of bytes written.
    pub fn download_to(&self, url: &str, path: &Path) -> Result<u64, AppError> {
        let mut resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::failure(format!("Download of {url} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::failure(format!(
                "Download of {url} failed with status {}.",
                resp.status()
            )));
        }

        let mut file = File::create(path)
            .map_err(|e| AppError::failure(format!("Failed to create {}: {e}", path.display())))?;
        match resp.copy_to(&mut file) {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                drop(file);
                // A truncated archive must not survive to be unpacked by a rerun.
                let _ = remove_file(path);
                Err(AppError::failure(format!("Failed to write {}: {e}", path.display())))
            }
        }
    }
}

fn unpack(fetch: &Fetch) -> Result<(), AppError> {
    let outcome = process::run_blocking(&fetch.unzip_command())?;
    if !outcome.success() {
        return Err(AppError::failure(format!(
            "unzip failed for {} (code {:?}).",
            fetch.archive.display(),
            outcome.code
        )));
    }
    Ok(())
}
