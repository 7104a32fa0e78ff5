//! Config file location.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Application directory under the user's config root.
const APP_DIR: &str = "rickmorty";

/// Resolves the config file path from `--dir` and the environment.
///
/// Lookup order:
/// 1. `{dir}/config.toml` when `--dir` is given.
/// 2. `$XDG_CONFIG_HOME/rickmorty/config.toml` when set to an absolute path.
/// 3. `$HOME/.config/rickmorty/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `--dir`, `XDG_CONFIG_HOME` nor `HOME` yields a
/// location.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(
        dir,
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn config_path_from(
    dir: Option<&PathBuf>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    // Relative XDG paths are invalid and must be ignored.
    let config_root = xdg_config_home
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| {
            home.filter(|h| !h.is_empty())
                .map(|h| PathBuf::from(h).join(".config"))
        });

    let Some(root) = config_root else {
        bail!("cannot locate config directory: neither XDG_CONFIG_HOME nor HOME is set");
    };
    Ok(root.join(APP_DIR).join(CONFIG_FILE))
}
