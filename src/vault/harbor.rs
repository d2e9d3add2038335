use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::CompassError;
use crate::vault::store::{VaultStore, list_markdown};
use crate::vault::templates::{file_name, file_stem};
use crate::vault::util::{first_line_description, preview};

const PREVIEW_CHARS: usize = 200;
const DESCRIPTION_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HarborCategory {
    Concepts,
    Frameworks,
    Companies,
    People,
    Skills,
}

impl HarborCategory {
    pub const ALL: [HarborCategory; 5] = [
        HarborCategory::Concepts,
        HarborCategory::Frameworks,
        HarborCategory::Companies,
        HarborCategory::People,
        HarborCategory::Skills,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concepts => "concepts",
            Self::Frameworks => "frameworks",
            Self::Companies => "companies",
            Self::People => "people",
            Self::Skills => "skills",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, CompassError> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == raw.trim())
            .ok_or_else(|| CompassError::InvalidHarborCategory(raw.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HarborEntry {
    pub name: String,
    pub filename: String,
    pub category: HarborCategory,
    pub description: String,
    pub preview: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HarborFile {
    pub category: HarborCategory,
    pub filename: String,
    pub name: String,
    pub content: String,
}

/// Every category, each with its `*.md` files sorted by name.
pub fn list_harbor(store: &VaultStore) -> Result<BTreeMap<HarborCategory, Vec<HarborEntry>>> {
    let mut out = BTreeMap::new();
    for category in HarborCategory::ALL {
        let mut entries = Vec::new();
        for path in list_markdown(&store.paths().harbor.join(category.as_str()))? {
            let content = store.read(&path)?.unwrap_or_default();
            entries.push(HarborEntry {
                name: file_stem(&path),
                filename: file_name(&path),
                category,
                description: first_line_description(&content),
                preview: preview(&content, PREVIEW_CHARS),
            });
        }
        out.insert(category, entries);
    }
    Ok(out)
}

fn validate_filename(filename: &str) -> Result<(), CompassError> {
    let trimmed = filename.trim();
    let plain = Path::new(trimmed)
        .file_name()
        .is_some_and(|name| name == trimmed);
    if trimmed.is_empty() || !plain || trimmed == ".." {
        return Err(CompassError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}

pub fn read_harbor_file(
    store: &VaultStore,
    category: HarborCategory,
    filename: &str,
) -> Result<HarborFile> {
    validate_filename(filename)?;
    let path = store.paths().harbor.join(category.as_str()).join(filename);
    let Some(content) = store.read(&path)? else {
        return Err(CompassError::NotFound(format!("harbor file {filename}")).into());
    };
    Ok(HarborFile {
        category,
        filename: filename.to_string(),
        name: file_stem(&path),
        content,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisTemplate {
    pub name: String,
    pub path: String,
    pub full_name: String,
    pub description: Option<String>,
}

fn template_description(content: &str) -> Option<String> {
    let first = content.split('\n').next()?.trim();
    if first.starts_with('#') {
        Some(first.trim_start_matches('#').trim().to_string())
    } else {
        Some(preview(first, DESCRIPTION_CHARS))
    }
}

/// Report frameworks kept under `harbor/frameworks`.
pub fn analysis_templates(store: &VaultStore) -> Result<Vec<AnalysisTemplate>> {
    let dir = store.paths().harbor.join(HarborCategory::Frameworks.as_str());
    let mut out = Vec::new();
    for path in list_markdown(&dir)? {
        let description = match store.read(&path)? {
            Some(content) if !content.is_empty() => template_description(&content),
            _ => None,
        };
        out.push(AnalysisTemplate {
            name: file_stem(&path),
            path: path.display().to_string(),
            full_name: file_name(&path),
            description,
        });
    }
    Ok(out)
}
