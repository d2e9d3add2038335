use anyhow::Result;

use crate::commands::{CommandReport, Workspace};
use crate::vault::context::build_context;

pub fn run(ws: &Workspace) -> Result<CommandReport> {
    let context = build_context(&ws.store, ws.today())?;
    CommandReport::new("context").with_data(&context)
}
