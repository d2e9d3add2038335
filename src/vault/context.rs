use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::vault::document::{CardType, DocumentId, DocumentKind, format_date};
use crate::vault::harbor::{AnalysisTemplate, analysis_templates};
use crate::vault::sections::{SectionKey, parse};
use crate::vault::store::{VaultStore, list_markdown};
use crate::vault::templates::file_name;

/// Output style every caller is expected to follow. Not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPreferences {
    pub use_emoji: bool,
    pub style: &'static str,
    pub format: &'static str,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            use_emoji: false,
            style: "professional",
            format: "structured",
        }
    }
}

/// Read-only snapshot of "today" built from the vault at call time.
#[derive(Debug, Clone, Serialize)]
pub struct Context {
    pub date: String,
    pub task: String,
    pub focus: String,
    pub note: String,
    pub reference: String,
    pub last_summary: String,
    pub next_actions: String,
    pub sounding_exists: bool,
    pub course_exists: bool,
    pub logbook_path: String,
    pub output_preferences: OutputPreferences,
    pub analysis_templates: Vec<AnalysisTemplate>,
}

pub fn build_context(store: &VaultStore, today: NaiveDate) -> Result<Context> {
    let parsed = parse(store.read_latest(DocumentKind::Course)?.as_deref());
    let field = |key: SectionKey| parsed.value(key).to_string();

    Ok(Context {
        date: format_date(today),
        task: field(SectionKey::Task),
        focus: field(SectionKey::Focus),
        note: field(SectionKey::Note),
        reference: field(SectionKey::Reference),
        last_summary: field(SectionKey::Summary),
        next_actions: field(SectionKey::NextActions),
        sounding_exists: store.exists(&DocumentId::Sounding(today)),
        course_exists: store.exists(&DocumentId::Course(today)),
        logbook_path: store.logbook_dir(today).display().to_string(),
        output_preferences: OutputPreferences::default(),
        analysis_templates: analysis_templates(store)?,
    })
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TodayCards {
    pub insights: Vec<String>,
    pub fleeting: Vec<String>,
}

impl TodayCards {
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.insights.iter().chain(self.fleeting.iter())
    }
}

/// Card filenames filed under `date`, by type.
pub fn cards_for(store: &VaultStore, date: NaiveDate) -> Result<TodayCards> {
    let names = |card_type: CardType| -> Result<Vec<String>> {
        Ok(list_markdown(&store.card_dir(card_type, date))?
            .iter()
            .map(|p| file_name(p))
            .collect())
    };
    Ok(TodayCards {
        insights: names(CardType::Insight)?,
        fleeting: names(CardType::Fleeting)?,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub date: String,
    pub sounding_exists: bool,
    pub course_exists: bool,
    pub logbook_exists: bool,
    pub recent_cards: Vec<String>,
}

pub fn build_status(store: &VaultStore, today: NaiveDate) -> Result<Status> {
    let cards = cards_for(store, today)?;
    Ok(Status {
        date: format_date(today),
        sounding_exists: store.exists(&DocumentId::Sounding(today)),
        course_exists: store.exists(&DocumentId::Course(today)),
        logbook_exists: store.logbook_dir(today).is_dir(),
        recent_cards: cards.all().cloned().collect(),
    })
}
