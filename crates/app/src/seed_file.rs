//! Loading the initial part list.

use std::path::{Path, PathBuf};

use thiserror::Error;

use autoparts_inventory::{Part, seed};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parts from a JSON array file (the serde form of [`Part`]).
pub fn load_parts(path: &Path) -> Result<Vec<Part>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parts: Vec<Part> = serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), parts = parts.len(), "loaded seed file");
    Ok(parts)
}

/// The configured seed file, or the built-in demo parts.
pub fn initial_parts(seed_file: Option<&Path>) -> Result<Vec<Part>, SeedError> {
    match seed_file {
        Some(path) => load_parts(path),
        None => Ok(seed::demo_parts()),
    }
}
