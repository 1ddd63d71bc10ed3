//! File-backed key/value storage: one JSON file per key under a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueBackend;

const APP_DIR: &str = "jewelbill";

#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    /// Open (creating if needed) storage rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory at {:?}", dir))?;
        Ok(Self { dir })
    }

    /// Open storage in the OS app data directory.
    pub fn open_default() -> anyhow::Result<Self> {
        let dir = default_data_dir()?;
        Self::open(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::backend(format!("invalid storage key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn write_atomic(path: &Path, value: &str) -> anyhow::Result<()> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).with_context(|| format!("failed to write {:?}", tmp))?;
        fs::rename(&tmp, path).with_context(|| format!("failed to replace {:?}", path))?;
        Ok(())
    }
}

impl KeyValueBackend for FileKv {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                tracing::error!(path = ?path, error = %err, "failed to read local storage file");
                Err(StoreError::backend(format!("failed to read {:?}: {err}", path)))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        Self::write_atomic(&path, value).map_err(|err| {
            tracing::error!(path = ?path, error = %err, "failed to write local storage file");
            StoreError::backend(format!("{err:#}"))
        })
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::backend(format!("failed to remove {:?}: {err}", path))),
        }
    }
}

/// `<data_dir>/jewelbill`, falling back to `~/.local/share/jewelbill`.
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    Ok(base.join(APP_DIR))
}
