use anyhow::Result;

use crate::commands::{CommandReport, Workspace};
use crate::vault::audit;
use crate::vault::card::{Card, write_card};
use crate::vault::document::CardType;

#[derive(Debug, Clone)]
pub struct CardOptions {
    pub title: String,
    pub content: String,
    pub card_type: CardType,
    pub tags: Vec<String>,
}

pub fn run(ws: &Workspace, opts: &CardOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("card");
    let card = Card::new(opts.title.clone(), opts.card_type, opts.content.clone())
        .with_tags(opts.tags.iter().cloned());
    let outcome = write_card(&ws.store, &card, ws.now)?;

    let status = if outcome.appended { "appended" } else { "created" };
    let shown = ws.display_path(&outcome.path);
    audit::append_event(&ws.home, "card", status, &shown)?;

    report.detail(format!("{status} {shown}"));
    Ok(report)
}
