use crate::config::{DATA_URL, PipelineConfig};
use crate::error::{PipelineError, Result};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Cache files at or below this size are treated as missing.
pub const MIN_DATASET_BYTES: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    Downloaded { url: String },
    Synthetic { reason: String },
}

impl Provenance {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Provenance::Synthetic { .. })
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Downloaded { url } if url == DATA_URL => write!(
                f,
                "Source: PromptCloud IMDb Movies Dataset (https://github.com/PromptCloud/IMDb-Movie-Database)."
            ),
            Provenance::Downloaded { url } => write!(f, "Source: {url}."),
            Provenance::Synthetic { reason } => write!(
                f,
                "Source: Synthetic dataset generated locally because outbound network access was \
                 blocked ({reason}). Replace by downloading the IMDb Movies dataset when network \
                 access is available."
            ),
        }
    }
}

fn cached_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

pub fn cache_is_usable(path: &Path) -> bool {
    cached_size(path) > MIN_DATASET_BYTES
}

/// Streams `url` into a temporary file next to `dest` and moves it into place
/// only when the body is large enough to be a dataset.
pub fn download(url: &str, dest: &Path, timeout: Duration) -> Result<u64> {
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(PipelineError::io(dir))?;
    let mut staged = NamedTempFile::new_in(dir).map_err(PipelineError::io(dir))?;

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let mut response = client.get(url).send()?.error_for_status()?;
    let size = response.copy_to(&mut staged)?;
    debug!("received {size} bytes from {url}");

    if size <= MIN_DATASET_BYTES {
        return Err(PipelineError::DatasetTooSmall { size });
    }
    staged
        .persist(dest)
        .map_err(|e| PipelineError::io(dest)(e.error))?;
    Ok(size)
}

/// Makes sure a usable dataset sits at `dest`, downloading it when needed.
pub fn fetch_dataset(url: &str, dest: &Path, timeout: Duration) -> Result<()> {
    if cache_is_usable(dest) {
        debug!("using cached dataset at {}", dest.display());
        return Ok(());
    }
    info!("Downloading dataset from {url}...");
    download(url, dest, timeout)?;
    Ok(())
}

/// Decides where this run's data comes from. Never fails: any problem with
/// the remote dataset turns into a synthetic provenance carrying the reason.
pub fn acquire(config: &PipelineConfig) -> Provenance {
    let downloaded = Provenance::Downloaded {
        url: config.url.clone(),
    };

    if config.offline {
        if cache_is_usable(&config.raw_path) {
            return downloaded;
        }
        return Provenance::Synthetic {
            reason: "offline mode requested".to_string(),
        };
    }

    match fetch_dataset(&config.url, &config.raw_path, config.timeout()) {
        Ok(()) => downloaded,
        Err(err) => {
            warn!("falling back to synthetic dataset: {err}");
            Provenance::Synthetic {
                reason: err.to_string(),
            }
        }
    }
}
