use anyhow::Result;
use chrono::Days;

use crate::commands::{CommandReport, Workspace};
use crate::vault::context::build_status;
use crate::vault::document::DocumentId;
use crate::vault::render::{FOCUS_PLACEHOLDER, TASK_PLACEHOLDER};
use crate::vault::sections::{SectionKey, parse};
use crate::vault::state;

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn run(ws: &Workspace) -> Result<CommandReport> {
    let mut report = CommandReport::new("status");
    let status = build_status(&ws.store, ws.today())?;

    report.detail(format!("hello {}", ws.config.display_name()));
    report.detail(format!("date={}", status.date));
    report.detail(format!("vault={}", ws.store.paths().root.display()));
    report.detail(format!("home={}", ws.home.home.display()));
    report.detail(format!("config={}", ws.home.config_file.display()));
    report.detail(format!("sounding={}", yes_no(status.sounding_exists)));
    report.detail(format!("course={}", yes_no(status.course_exists)));
    report.detail(format!("logbook={}", yes_no(status.logbook_exists)));
    if status.recent_cards.is_empty() {
        report.detail("cards=none");
    } else {
        report.detail(format!("cards={}", status.recent_cards.join(", ")));
    }
    if ws.config.api.enabled {
        report.detail(format!(
            "api={} model={}",
            ws.config.api.provider, ws.config.api.model
        ));
        if ws.config.api.api_key.trim().is_empty() {
            report.detail("note: api.enabled is true but api.api_key is empty");
        }
    } else {
        report.detail("api=disabled");
    }

    match state::load(&ws.home) {
        Ok(scratch) => {
            if !scratch.current_date.is_empty() {
                report.detail(format!("last_navigation={}", scratch.current_date));
            }
            if !scratch.current_focus.is_empty() {
                report.detail(format!("current_focus={}", scratch.current_focus.join("; ")));
            }
        }
        Err(err) => report.issue(format!("scratch state unreadable: {err:#}")),
    }

    if let Some(course) = &ws.bootstrap.initial_course {
        report.detail(format!(
            "hint: created a starter course at {}; fill in Task and Focus",
            ws.display_path(course)
        ));
    } else if let Some(yesterday) = ws.today().checked_sub_days(Days::new(1))
        && let Some(text) = ws.store.read(&ws.store.path_for(&DocumentId::Course(yesterday)))?
    {
        let parsed = parse(Some(&text));
        if parsed.value(SectionKey::Task).contains(TASK_PLACEHOLDER)
            || parsed.value(SectionKey::Focus).contains(FOCUS_PLACEHOLDER)
        {
            report.detail(format!(
                "hint: yesterday's course still has placeholder text; edit {}",
                ws.display_path(&ws.store.path_for(&DocumentId::Course(yesterday)))
            ));
        }
    }
    if !status.sounding_exists {
        report.detail("hint: run `compass navigation` to draft today's sounding");
    }

    Ok(report.with_data(&status)?)
}
