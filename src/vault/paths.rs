use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};

use crate::vault::config::VaultConfig;

/// Where compass keeps its own files (config, scratch state, logs), as
/// opposed to the vault it manages.
#[derive(Debug, Clone)]
pub struct CompassHome {
    pub home: PathBuf,
    pub config_file: PathBuf,
    pub state_file: PathBuf,
    pub logs_dir: PathBuf,
}

/// The vault root plus its five top-level folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultPaths {
    pub root: PathBuf,
    pub charts: PathBuf,
    pub logbook: PathBuf,
    pub harbor: PathBuf,
    pub navigation: PathBuf,
    pub template: PathBuf,
}

fn required_home_dir() -> Result<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Ok(home);
    }
    Err(anyhow::anyhow!("HOME directory could not be resolved"))
}

fn env_path(var: &str) -> Option<PathBuf> {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => Some(PathBuf::from(v.trim())),
        _ => None,
    }
}

fn home_for_config(config_file: &Path) -> PathBuf {
    config_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolves the config file: explicit flag, then `COMPASS_CONFIG_PATH`,
/// then `{COMPASS_HOME or ~/.compass}/config.json`. State and logs live
/// beside whichever config file wins.
pub fn resolve_home(config_override: Option<&Path>) -> Result<CompassHome> {
    let config_file = match config_override {
        Some(path) => path.to_path_buf(),
        None => match env_path("COMPASS_CONFIG_PATH") {
            Some(path) => path,
            None => {
                let home = match env_path("COMPASS_HOME") {
                    Some(home) => home,
                    None => required_home_dir()?.join(".compass"),
                };
                home.join("config.json")
            }
        },
    };

    let home = home_for_config(&config_file);
    Ok(CompassHome {
        state_file: home.join(".state.json"),
        logs_dir: home.join("logs"),
        config_file,
        home,
    })
}

impl VaultPaths {
    pub fn from_config(cfg: &VaultConfig) -> Self {
        let root = PathBuf::from(&cfg.obsidian_path);
        Self {
            charts: root.join(&cfg.folders.charts),
            logbook: root.join(&cfg.folders.logbook),
            harbor: root.join(&cfg.folders.harbor),
            navigation: root.join(&cfg.folders.navigation),
            template: root.join(&cfg.folders.template),
            root,
        }
    }
}
