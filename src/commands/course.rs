use anyhow::Result;

use crate::commands::{CommandReport, Workspace};
use crate::vault::audit;
use crate::vault::daily::{CourseInput, write_course};

pub fn run(ws: &Workspace, input: &CourseInput) -> Result<CommandReport> {
    let mut report = CommandReport::new("course");
    if input.summary.trim().is_empty() {
        report.detail("summary is empty; keeping the previous summary");
    }
    if input.next_actions.trim().is_empty() {
        report.detail("next actions are empty; keeping the previous ones");
    }

    let outcome = write_course(&ws.store, input, ws.now)?;
    let shown = ws.display_path(&outcome.path);
    audit::append_event(&ws.home, "course", "written", &shown)?;

    report.detail(format!("course={shown}"));
    report.detail(format!(
        "layout={}",
        if outcome.templated { "template" } else { "default" }
    ));
    Ok(report)
}
