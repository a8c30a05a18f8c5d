//! Settings persistence and atomic output writes

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::Builder;

use crate::config::{BoardConfig, Settings};
use crate::error::{Error, Result};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `contents` next to `path` and rename it into place
///
/// Readers never observe a partially written file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(io_error(&dir))?;

    let mut tmp = Builder::new()
        .prefix(".skimibowi.")
        .tempfile_in(&dir)
        .map_err(io_error(&dir))?;
    tmp.write_all(contents.as_bytes()).map_err(io_error(path))?;
    tmp.flush().map_err(io_error(path))?;
    tmp.persist(path).map_err(|e| io_error(path)(e.error))?;

    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Save the selections of `config` as a settings file
pub fn persist(path: &Path, config: &BoardConfig) -> Result<()> {
    save_settings(path, &config.to_settings())
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let yaml = serde_yaml::to_string(settings).map_err(|source| Error::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, &yaml)?;
    log::info!("Saved settings to {}", path.display());
    Ok(())
}

/// Read a settings file without resolving its labels
///
/// A missing file yields the default settings.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => return Err(io_error(path)(e)),
    };
    if text.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(&text).map_err(|source| Error::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a settings file and resolve it
pub fn restore(path: &Path) -> Result<BoardConfig> {
    let config = load_settings(path)?.resolve()?;
    log::info!("Loaded settings from {}", path.display());
    Ok(config)
}
