use anyhow::Result;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::vault::document::DocumentKind;
use crate::vault::store::{VaultStore, list_markdown};
use crate::vault::util::preview;

pub const DEFAULT_COURSE_TEMPLATE: &str = "\
## Task: long-term goals
[Fill in your long-term goal here]

## Focus: current topics
[Fill in the topics you are focusing on lately]

## Note: personal thoughts
[Each day, write down your own views or preferences on the topics discussed]

## Reference: documents
[List the files, web pages or texts you want used as references]

---
## Today's Summary
[Daily summary, filled in automatically]

## What's Next
[Next steps, filled in automatically]
";

pub const DEFAULT_SOUNDING_TEMPLATE: &str = "\
## Focus
[Extracted automatically from the course document]

## News Update
What objectively happened in the last two days on the focus topics

## Analysis Update
How media, institutions, experts and stakeholders read these facts, the scenarios that could follow, and whether you should adjust your plans
";

pub const DEFAULT_CARD_TEMPLATE: &str = "\
# Title

## Time
YYYY-MM-DD HH:MM

## Type
insight / fleeting

## Content
[Card content]

## Tags
#tag1 #tag2

## Links
- link 1
- link 2

## Source
Generated by Compass
";

const PREVIEW_CHARS: usize = 200;

fn default_template(kind: DocumentKind) -> Option<&'static str> {
    match kind {
        DocumentKind::Course => Some(DEFAULT_COURSE_TEMPLATE),
        DocumentKind::Sounding => Some(DEFAULT_SOUNDING_TEMPLATE),
        DocumentKind::Card => Some(DEFAULT_CARD_TEMPLATE),
        DocumentKind::MapCanvas => None,
    }
}

/// Writes each missing default template. User-edited templates are never
/// touched. Returns the paths created.
pub fn seed_templates(store: &VaultStore) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    for kind in [DocumentKind::Course, DocumentKind::Sounding, DocumentKind::Card] {
        let (Some(path), Some(text)) = (store.template_path(kind), default_template(kind)) else {
            continue;
        };
        if path.exists() {
            continue;
        }
        store.write(&path, text)?;
        info!("event=template_seed status=created path={}", path.display());
        created.push(path);
    }
    Ok(created)
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateEntry {
    pub name: String,
    pub filename: String,
    pub content: String,
    pub preview: String,
}

pub fn list_templates(store: &VaultStore) -> Result<Vec<TemplateEntry>> {
    let mut out = Vec::new();
    for path in list_markdown(&store.paths().template)? {
        let content = store.read(&path)?.unwrap_or_default();
        out.push(TemplateEntry {
            name: file_stem(&path),
            filename: file_name(&path),
            preview: preview(&content, PREVIEW_CHARS),
            content,
        });
    }
    Ok(out)
}

pub(crate) fn file_stem(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

pub(crate) fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::config::VaultConfig;
    use crate::vault::paths::VaultPaths;
    use crate::vault::render::layout;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn default_templates_carry_every_placeholder() {
        for kind in [DocumentKind::Course, DocumentKind::Sounding] {
            let text = default_template(kind).expect("template");
            for slot in layout(kind).slots {
                assert!(
                    text.contains(slot.placeholder),
                    "{kind:?} missing {}",
                    slot.placeholder
                );
            }
        }
    }

    #[test]
    fn seeding_creates_missing_and_keeps_edited() {
        let tmp = tempdir().expect("tempdir");
        let cfg = VaultConfig::for_root(tmp.path().to_string_lossy().to_string());
        let store = VaultStore::new(VaultPaths::from_config(&cfg));
        fs::create_dir_all(&store.paths().template).expect("mkdir");
        let course = store.paths().template.join("course-template.md");
        fs::write(&course, "## Task\nmine\n").expect("write");

        let created = seed_templates(&store).expect("seed");
        assert_eq!(created.len(), 2);
        assert_eq!(fs::read_to_string(&course).expect("read"), "## Task\nmine\n");

        let again = seed_templates(&store).expect("seed again");
        assert!(again.is_empty());

        let listed = list_templates(&store).expect("list");
        let names: Vec<_> = listed.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["card-template", "course-template", "sounding-template"]
        );
    }
}
