//! JSON persistence for entity lists.
//!
//! Every store is a JSON array in one file: the merged-record checkpoint, the
//! per-channel upload caches, the scraper outputs, and the final dataset.
//! Loads fail loudly on malformed input — this is a batch job, so a hard stop
//! a human notices beats silently dropping records. Saves go through a temp
//! file and rename so a crash mid-write never leaves an unparsable checkpoint
//! for the next run.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed store file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn io_err(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_owned(),
        source,
    }
}

/// Load a JSON array of `T` from `path`.
///
/// # Errors
///
/// - [`StoreError::Io`] if the file cannot be read.
/// - [`StoreError::Parse`] if the content is not a valid array of `T`.
///   Partial files are never silently truncated.
pub fn load_list<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>, StoreError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_json::from_str(&raw).map_err(|e| StoreError::Parse {
        path: path.to_owned(),
        source: e,
    })
}

/// Save `items` as a JSON array at `path`, creating parent directories.
///
/// Writes to a `.tmp` sibling first and renames it over the destination, so
/// checkpoint overwrites are atomic at the filesystem level. `pretty` selects
/// indented output; compact is used for large stores.
///
/// # Errors
///
/// - [`StoreError::Io`] on any filesystem failure.
/// - [`StoreError::Parse`] if serialization fails (should not happen for the
///   entity types in this crate).
pub fn save_list<T: Serialize>(
    items: &[T],
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), StoreError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }

    let body = if pretty {
        serde_json::to_vec_pretty(items)
    } else {
        serde_json::to_vec(items)
    }
    .map_err(|e| StoreError::Parse {
        path: path.to_owned(),
        source: e,
    })?;

    let tmp_path = tmp_sibling(path);
    {
        let mut tmp = fs::File::create(&tmp_path).map_err(|e| io_err(&tmp_path, e))?;
        tmp.write_all(&body).map_err(|e| io_err(&tmp_path, e))?;
        tmp.flush().map_err(|e| io_err(&tmp_path, e))?;
    }
    fs::rename(&tmp_path, path).map_err(|e| io_err(path, e))?;

    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map_or_else(
        || std::ffi::OsString::from("store"),
        std::ffi::OsStr::to_os_string,
    );
    name.push(".tmp");
    path.with_file_name(name)
}
