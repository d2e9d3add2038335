use anyhow::Result;
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::path::PathBuf;

use crate::vault::document::{DocumentId, DocumentKind, MAP_CANVAS_FILE, format_date};
use crate::vault::render::{FieldValues, Renderer};
use crate::vault::sections::{ParsedSections, SectionKey, parse};
use crate::vault::store::VaultStore;

#[derive(Debug, Clone)]
pub struct DraftOutcome {
    pub path: PathBuf,
    pub focus: String,
    pub templated: bool,
}

fn latest_course(store: &VaultStore) -> Result<ParsedSections> {
    let parsed = parse(store.read_latest(DocumentKind::Course)?.as_deref());
    if parsed.is_empty() {
        warn!("event=course_parse status=empty");
    } else {
        let found: Vec<&str> = parsed
            .iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(key, _)| key.as_str())
            .collect();
        debug!("event=course_parse status=ok sections={}", found.join(","));
    }
    Ok(parsed)
}

/// Renders today's sounding from the latest course's focus and writes it,
/// replacing any earlier draft for the day.
pub fn write_sounding_draft(store: &VaultStore, now: NaiveDateTime) -> Result<DraftOutcome> {
    let course = latest_course(store)?;
    let focus = course.value(SectionKey::Focus).to_string();

    let mut values = FieldValues::new();
    values.insert(SectionKey::Focus, focus.clone());

    let renderer = Renderer::select(store, DocumentKind::Sounding)?;
    let body = renderer.render(DocumentKind::Sounding, &ParsedSections::default(), &values);
    let text = format!(
        "{}\n\n---\nGenerated: {}\n",
        body.trim_end(),
        now.format("%Y-%m-%d %H:%M")
    );

    let path = store.path_for(&DocumentId::Sounding(now.date()));
    store.write(&path, &text)?;
    info!(
        "event=sounding_draft status=ok templated={} path={}",
        renderer.is_templated(),
        path.display()
    );
    Ok(DraftOutcome {
        path,
        focus,
        templated: renderer.is_templated(),
    })
}

/// Links to the day's sounding and map, used as the course reference block.
pub fn daily_reference(store: &VaultStore, now: NaiveDateTime) -> String {
    let date = format_date(now.date());
    let folders = store.paths();
    let rel = |dir: &std::path::Path| {
        dir.strip_prefix(&folders.root)
            .unwrap_or(dir)
            .display()
            .to_string()
    };
    format!(
        "- Today's sounding: {}/{date}_sounding.md\n- Today's map: {}/{date}/{MAP_CANVAS_FILE}",
        rel(&folders.charts),
        rel(&folders.logbook)
    )
}

#[derive(Debug, Clone, Default)]
pub struct CourseInput {
    pub summary: String,
    pub next_actions: String,
    pub reference: Option<String>,
}

/// Writes today's course: task, focus and note carry over from the latest
/// course, the reference defaults to today's links.
pub fn write_course(
    store: &VaultStore,
    input: &CourseInput,
    now: NaiveDateTime,
) -> Result<DraftOutcome> {
    let previous = latest_course(store)?;

    let mut values = FieldValues::new();
    values.insert(SectionKey::Summary, input.summary.clone());
    values.insert(SectionKey::NextActions, input.next_actions.clone());
    let reference = input
        .reference
        .clone()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| daily_reference(store, now));
    values.insert(SectionKey::Reference, reference);

    let renderer = Renderer::select(store, DocumentKind::Course)?;
    let text = renderer.render(DocumentKind::Course, &previous, &values);

    let path = store.path_for(&DocumentId::Course(now.date()));
    store.write(&path, &text)?;
    info!(
        "event=course_write status=ok templated={} path={}",
        renderer.is_templated(),
        path.display()
    );
    Ok(DraftOutcome {
        path,
        focus: previous.value(SectionKey::Focus).to_string(),
        templated: renderer.is_templated(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::config::VaultConfig;
    use crate::vault::paths::VaultPaths;
    use crate::vault::render::{FOCUS_PLACEHOLDER, SOUNDING_FOCUS_PLACEHOLDER};
    use crate::vault::templates::seed_templates;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::tempdir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 10)
            .and_then(|d| d.and_hms_opt(7, 30, 0))
            .expect("now")
    }

    fn store_at(root: &std::path::Path) -> VaultStore {
        let cfg = VaultConfig::for_root(root.to_string_lossy().to_string());
        VaultStore::new(VaultPaths::from_config(&cfg))
    }

    fn write_yesterday_course(store: &VaultStore, text: &str) {
        let yesterday = NaiveDate::from_ymd_opt(2024, 9, 9).expect("date");
        store
            .write(&store.path_for(&DocumentId::Course(yesterday)), text)
            .expect("write");
    }

    #[test]
    fn sounding_draft_carries_focus_in_both_modes() {
        let tmp = tempdir().expect("tempdir");
        let store = store_at(tmp.path());
        write_yesterday_course(&store, "## Task\nGoal\n## Focus\nEmbedded Rust\n");

        let out = write_sounding_draft(&store, now()).expect("default");
        assert!(!out.templated);
        let text = fs::read_to_string(&out.path).expect("read");
        assert!(text.starts_with("## Focus\nEmbedded Rust\n"));
        assert!(text.ends_with("---\nGenerated: 2024-09-10 07:30\n"));

        seed_templates(&store).expect("seed");
        let out = write_sounding_draft(&store, now()).expect("templated");
        assert!(out.templated);
        let text = fs::read_to_string(&out.path).expect("read");
        assert!(text.contains("## Focus\nEmbedded Rust\n"));
        assert!(!text.contains(SOUNDING_FOCUS_PLACEHOLDER));
        assert_eq!(out.path.file_name().and_then(|n| n.to_str()), Some("2024-09-10_sounding.md"));
    }

    #[test]
    fn course_carries_over_fields_and_links_today() {
        let tmp = tempdir().expect("tempdir");
        let store = store_at(tmp.path());
        seed_templates(&store).expect("seed");
        write_yesterday_course(&store, "## Task: goals\nGoal\n## Note\nThoughts\n");

        let input = CourseInput {
            summary: "Shipped the parser".to_string(),
            next_actions: "Write docs".to_string(),
            reference: None,
        };
        let out = write_course(&store, &input, now()).expect("course");
        let parsed = parse(Some(&fs::read_to_string(&out.path).expect("read")));

        assert_eq!(parsed.value(SectionKey::Task), "Goal");
        assert_eq!(parsed.value(SectionKey::Note), "Thoughts");
        assert_eq!(parsed.value(SectionKey::Summary), "Shipped the parser");
        assert_eq!(parsed.value(SectionKey::NextActions), "Write docs");
        assert!(
            parsed
                .value(SectionKey::Reference)
                .contains("charts/2024-09-10_sounding.md")
        );
        assert!(
            parsed
                .value(SectionKey::Reference)
                .contains("logbook/2024-09-10/map.canvas")
        );
        assert!(parsed.value(SectionKey::Focus).contains(FOCUS_PLACEHOLDER));
    }
}
