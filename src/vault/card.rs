use anyhow::Result;
use chrono::NaiveDateTime;
use log::info;
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::vault::document::{CardType, DocumentId, DocumentKind, sanitize_title};
use crate::vault::render::Renderer;
use crate::vault::store::VaultStore;

const UNTAGGED: &str = "#to-fill";
const SOURCE_LINE: &str = "Generated by Compass";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub card_type: CardType,
    pub tags: BTreeSet<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct CardOutcome {
    pub path: PathBuf,
    pub appended: bool,
}

impl Card {
    pub fn new(title: impl Into<String>, card_type: CardType, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            card_type,
            tags: BTreeSet::new(),
            body: body.into(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(
            tags.into_iter()
                .map(Into::into)
                .map(|t: String| t.trim().trim_start_matches('#').to_string())
                .filter(|t| !t.is_empty()),
        );
        self
    }

    fn tags_line(&self) -> String {
        if self.tags.is_empty() {
            return UNTAGGED.to_string();
        }
        self.tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn header(&self, now: NaiveDateTime) -> String {
        format!(
            "# {}\n\n## Time\n{}\n\n## Type\n{}\n",
            self.title,
            now.format("%Y-%m-%d %H:%M"),
            self.card_type.as_str()
        )
    }

    /// Full text of a newly created card.
    pub fn render_new(&self, renderer: &Renderer, now: NaiveDateTime) -> String {
        let header = self.header(now);
        match renderer {
            Renderer::Templated(template) => format!(
                "{header}\n{template}\n\n**Content**:\n{}\n\n**Tags**: {}\n\n---\n{SOURCE_LINE}\n",
                self.body,
                self.tags_line()
            ),
            Renderer::Default => format!(
                "{header}\n## Content\n{}\n\n## Tags\n{}\n\n## Links\n-\n\n## Source\n{SOURCE_LINE}\n",
                self.body,
                self.tags_line()
            ),
        }
    }

    /// Subsection appended when the card file already exists.
    pub fn render_update(&self, now: NaiveDateTime) -> String {
        format!("\n\n---\n## Update {}\n\n{}\n", now.format("%H:%M"), self.body)
    }

    pub fn id(&self, now: NaiveDateTime) -> DocumentId {
        DocumentId::Card {
            card_type: self.card_type,
            title: sanitize_title(&self.title),
            date: now.date(),
        }
    }
}

/// Creates the card for `(title, date)` or, when it already exists, appends
/// a timestamped update to it. The append runs under the store's per-file
/// lock and never rewrites earlier bytes.
pub fn write_card(store: &VaultStore, card: &Card, now: NaiveDateTime) -> Result<CardOutcome> {
    let path = store.path_for(&card.id(now));
    let renderer = Renderer::select(store, DocumentKind::Card)?;

    let appended = store.append(&path, |prior| match prior {
        Some(_) => card.render_update(now),
        None => card.render_new(&renderer, now),
    })?;

    info!(
        "event=card_write status={} type={} path={}",
        if appended { "appended" } else { "created" },
        card.card_type.as_str(),
        path.display()
    );
    Ok(CardOutcome { path, appended })
}
