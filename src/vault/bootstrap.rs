use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

use crate::vault::document::{DocumentId, DocumentKind};
use crate::vault::harbor::HarborCategory;
use crate::vault::store::VaultStore;
use crate::vault::templates::{DEFAULT_COURSE_TEMPLATE, seed_templates};

#[derive(Debug, Clone, Default)]
pub struct BootstrapOutcome {
    pub created_dirs: Vec<PathBuf>,
    pub seeded_templates: Vec<PathBuf>,
    pub initial_course: Option<PathBuf>,
}

impl BootstrapOutcome {
    pub fn is_noop(&self) -> bool {
        self.created_dirs.is_empty()
            && self.seeded_templates.is_empty()
            && self.initial_course.is_none()
    }
}

fn ensure_dir(dir: PathBuf, created: &mut Vec<PathBuf>) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    debug!("event=bootstrap_dir status=created path={}", dir.display());
    created.push(dir);
    Ok(())
}

/// Brings a vault to the layout every command expects. Idempotent: folders,
/// templates and the first course are only created when missing.
pub fn bootstrap(store: &VaultStore, today: NaiveDate) -> Result<BootstrapOutcome> {
    let mut out = BootstrapOutcome::default();
    let paths = store.paths();

    for dir in [
        &paths.charts,
        &paths.logbook,
        &paths.harbor,
        &paths.navigation,
        &paths.template,
    ] {
        ensure_dir(dir.clone(), &mut out.created_dirs)?;
    }
    for category in HarborCategory::ALL {
        ensure_dir(paths.harbor.join(category.as_str()), &mut out.created_dirs)?;
    }

    out.seeded_templates = seed_templates(store)?;

    if store.latest(DocumentKind::Course)?.is_none() {
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        let template = match store.template_path(DocumentKind::Course) {
            Some(path) => store.read(&path)?,
            None => None,
        };
        let text = template.unwrap_or_else(|| DEFAULT_COURSE_TEMPLATE.to_string());
        let path = store.path_for(&DocumentId::Course(yesterday));
        store.write(&path, &text)?;
        info!("event=bootstrap_course status=created path={}", path.display());
        out.initial_course = Some(path);
    }

    Ok(out)
}
