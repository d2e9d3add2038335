use anyhow::Result;

use crate::commands::{CommandReport, Workspace};

/// Bootstrap already ran when the workspace opened; this reports what it did.
pub fn run(ws: &Workspace) -> Result<CommandReport> {
    let mut report = CommandReport::new("init");
    let outcome = &ws.bootstrap;

    report.detail(format!("vault={}", ws.store.paths().root.display()));
    if outcome.is_noop() {
        report.detail("vault already initialized");
        return Ok(report);
    }

    for dir in &outcome.created_dirs {
        report.detail(format!("created dir {}", ws.display_path(dir)));
    }
    for template in &outcome.seeded_templates {
        report.detail(format!("seeded template {}", ws.display_path(template)));
    }
    if let Some(course) = &outcome.initial_course {
        report.detail(format!("created starter course {}", ws.display_path(course)));
    }
    Ok(report)
}
