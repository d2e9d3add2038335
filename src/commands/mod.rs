pub mod card;
pub mod context;
pub mod course;
pub mod init;
pub mod navigation;
pub mod status;
pub mod view;

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::vault::audit;
use crate::vault::bootstrap::{BootstrapOutcome, bootstrap};
use crate::vault::config::{VaultConfig, load_config};
use crate::vault::paths::{CompassHome, VaultPaths, resolve_home};
use crate::vault::store::VaultStore;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
            data: None,
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }

    pub fn with_data<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.data = Some(serde_json::to_value(data)?);
        Ok(self)
    }
}

/// Everything a command needs, resolved once per invocation. The vault is
/// bootstrapped before any command sees it.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub home: CompassHome,
    pub config: VaultConfig,
    pub store: VaultStore,
    pub now: NaiveDateTime,
    pub bootstrap: BootstrapOutcome,
}

impl Workspace {
    pub fn open(config_override: Option<&Path>) -> Result<Self> {
        let home = resolve_home(config_override)?;
        let config = load_config(&home.config_file)?;
        let store = VaultStore::new(VaultPaths::from_config(&config));
        let now = Local::now().naive_local();
        debug!(
            "event=workspace_open config={} vault={}",
            home.config_file.display(),
            store.paths().root.display()
        );

        let outcome = bootstrap(&store, now.date())?;
        if !outcome.is_noop() {
            audit::append_event(
                &home,
                "bootstrap",
                "created",
                &format!(
                    "dirs={} templates={} initial_course={}",
                    outcome.created_dirs.len(),
                    outcome.seeded_templates.len(),
                    outcome.initial_course.is_some()
                ),
            )?;
        }

        Ok(Self {
            home,
            config,
            store,
            now,
            bootstrap: outcome,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// Path shown to the user, relative to the vault root when possible.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.store.paths().root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
