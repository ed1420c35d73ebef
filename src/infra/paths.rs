// src/infra/paths.rs — Config and data directories
//
// All paths respect the STUDYDESK_HOME environment variable for isolation.
// When set, config lives directly under it and data under $STUDYDESK_HOME/data.
// When unset, config uses ~/.studydesk/ and data uses XDG_DATA_HOME/studydesk.

use anyhow::Context;
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

fn studydesk_home() -> Option<PathBuf> {
    std::env::var_os("STUDYDESK_HOME").map(PathBuf::from)
}

/// Configuration directory: $STUDYDESK_HOME/ or ~/.studydesk/
pub fn config_dir() -> anyhow::Result<PathBuf> {
    if let Some(home) = studydesk_home() {
        return Ok(home);
    }
    let base = BaseDirs::new().context("Could not determine home directory")?;
    Ok(base.home_dir().join(".studydesk"))
}

/// Data directory: $STUDYDESK_HOME/data/ or ~/.local/share/studydesk/
pub fn data_dir() -> anyhow::Result<PathBuf> {
    if let Some(home) = studydesk_home() {
        return Ok(home.join("data"));
    }
    let dirs = ProjectDirs::from("", "", "studydesk")
        .context("Could not determine home directory")?;
    Ok(dirs.data_local_dir().to_path_buf())
}

/// Config file path
pub fn config_file_path() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Default location of the key-value database
pub fn store_path() -> anyhow::Result<PathBuf> {
    Ok(data_dir()?.join("studydesk.db"))
}
