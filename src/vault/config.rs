use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Component, Path};

use crate::error::CompassError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VaultFolders {
    pub charts: String,
    pub logbook: String,
    pub harbor: String,
    pub navigation: String,
    pub template: String,
}

impl Default for VaultFolders {
    fn default() -> Self {
        Self {
            charts: "charts".to_string(),
            logbook: "logbook".to_string(),
            harbor: "harbor".to_string(),
            navigation: "navigation".to_string(),
            template: "template".to_string(),
        }
    }
}

/// Credentials for the prospective AI integration. Loaded and reported,
/// never used to make calls.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub enabled: bool,
    pub provider: String,
    pub model: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfig {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssistantConfig {
    pub name: String,
    pub version: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: "1.0.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaultConfig {
    pub obsidian_path: String,
    #[serde(default)]
    pub folders: VaultFolders,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub user: UserConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl VaultConfig {
    pub fn for_root(root: impl Into<String>) -> Self {
        Self {
            obsidian_path: root.into(),
            folders: VaultFolders::default(),
            api: ApiConfig::default(),
            user: UserConfig::default(),
            assistant: AssistantConfig::default(),
        }
    }

    /// Name used to greet the user.
    pub fn display_name(&self) -> &str {
        [self.user.name.as_str(), self.assistant.name.as_str()]
            .into_iter()
            .map(str::trim)
            .find(|name| !name.is_empty())
            .unwrap_or("there")
    }
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn invalid(msg: impl Into<String>) -> anyhow::Error {
    CompassError::InvalidConfig(msg.into()).into()
}

fn validate_folder(label: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(format!("folders.{label} cannot be empty")));
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        return Err(invalid(format!(
            "folders.{label} must be relative to obsidian_path"
        )));
    }
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(invalid(format!("folders.{label} cannot contain `..`")));
    }
    Ok(())
}

fn validate(cfg: &VaultConfig) -> Result<()> {
    if cfg.obsidian_path.trim().is_empty() {
        return Err(invalid("obsidian_path cannot be empty"));
    }
    for (label, value) in [
        ("charts", &cfg.folders.charts),
        ("logbook", &cfg.folders.logbook),
        ("harbor", &cfg.folders.harbor),
        ("navigation", &cfg.folders.navigation),
        ("template", &cfg.folders.template),
    ] {
        validate_folder(label, value)?;
    }
    Ok(())
}

fn parse_config(path: &Path, raw: &str) -> Result<VaultConfig> {
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        toml::from_str(raw).map_err(|err| invalid(format!("{}: {err}", path.display())))
    } else {
        json5::from_str(raw).map_err(|err| invalid(format!("{}: {err}", path.display())))
    }
}

/// Loads the settings file. A missing file is fatal and nothing else is
/// touched before this returns.
pub fn load_config(path: &Path) -> Result<VaultConfig> {
    if !path.is_file() {
        return Err(CompassError::ConfigMissing {
            path: path.to_path_buf(),
        }
        .into());
    }

    let raw = fs::read_to_string(path)
        .map_err(|err| invalid(format!("failed to read {}: {err}", path.display())))?;
    let mut cfg = parse_config(path, &raw)?;
    cfg.obsidian_path = env_or_string("COMPASS_VAULT_PATH", &cfg.obsidian_path);

    validate(&cfg)?;
    Ok(cfg)
}
