use anyhow::Result;

use crate::commands::{CommandReport, Workspace};
use crate::vault::audit;
use crate::vault::daily::write_sounding_draft;
use crate::vault::document::format_date;
use crate::vault::state;

pub fn run(ws: &Workspace) -> Result<CommandReport> {
    let mut report = CommandReport::new("navigation");
    let draft = write_sounding_draft(&ws.store, ws.now)?;

    let mut scratch = state::load(&ws.home)?;
    scratch.current_date = format_date(ws.today());
    scratch.current_focus = draft
        .focus
        .lines()
        .map(|line| line.trim().trim_start_matches(['-', '*']).trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    state::save(&ws.home, &scratch)?;

    let shown = ws.display_path(&draft.path);
    audit::append_event(&ws.home, "navigation", "written", &shown)?;

    report.detail(format!("sounding={shown}"));
    report.detail(format!(
        "layout={}",
        if draft.templated { "template" } else { "default" }
    ));
    if draft.focus.is_empty() {
        report.detail("hint: the latest course has no Focus section; the sounding focus is empty");
    } else {
        report.detail(format!("focus={}", scratch.current_focus.join("; ")));
    }
    Ok(report)
}
