//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Application directory name under the XDG config home.
const APP_DIR: &str = "imdbq";

/// Resolves the config file path.
///
/// Precedence: `dir` (from `--dir`), then `$XDG_CONFIG_HOME/imdbq`,
/// then `$HOME/.config/imdbq`.
///
/// # Errors
///
/// Returns an error if no directory is given and neither
/// `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    config_path_from(dir.map(PathBuf::as_path), xdg.as_deref(), home.as_deref())
}

/// Path resolution with the environment passed in explicitly.
fn config_path_from(dir: Option<&Path>, xdg: Option<&Path>, home: Option<&Path>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    // An empty XDG_CONFIG_HOME counts as unset.
    if let Some(xdg) = xdg.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(xdg.join(APP_DIR).join(CONFIG_FILE));
    }
    match home {
        Some(home) => Ok(home.join(".config").join(APP_DIR).join(CONFIG_FILE)),
        None => bail!("neither XDG_CONFIG_HOME nor HOME is set; pass --dir"),
    }
}
