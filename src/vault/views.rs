//! Read-only projections of the vault for the front end.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CompassError;
use crate::vault::context::{TodayCards, cards_for};
use crate::vault::document::{CardType, DocumentId, DocumentKind, format_date};
use crate::vault::sections::{SectionKey, parse};
use crate::vault::store::{VaultStore, list_markdown};
use crate::vault::templates::{file_name, file_stem};
use crate::vault::util::preview;

const CARD_PREVIEW_CHARS: usize = 300;
const CHART_PREVIEW_CHARS: usize = 300;

#[derive(Debug, Clone, Serialize)]
pub struct TodayView {
    pub date: String,
    pub task: String,
    pub focus: String,
    pub note: String,
    pub sounding: Option<String>,
    pub sounding_exists: bool,
    pub course_exists: bool,
    pub cards: TodayCards,
}

pub fn today_view(store: &VaultStore, today: NaiveDate) -> Result<TodayView> {
    let parsed = parse(store.read_latest(DocumentKind::Course)?.as_deref());
    let sounding_path = store.path_for(&DocumentId::Sounding(today));
    Ok(TodayView {
        date: format_date(today),
        task: parsed.value(SectionKey::Task).to_string(),
        focus: parsed.value(SectionKey::Focus).to_string(),
        note: parsed.value(SectionKey::Note).to_string(),
        sounding: store.read(&sounding_path)?,
        sounding_exists: sounding_path.is_file(),
        course_exists: store.exists(&DocumentId::Course(today)),
        cards: cards_for(store, today)?,
    })
}

/// Logbook dates holding at least one card, newest first.
pub fn card_dates(store: &VaultStore) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for date in store.logbook_dates()? {
        let mut has_cards = false;
        for card_type in CardType::ALL {
            if !list_markdown(&store.card_dir(card_type, date))?.is_empty() {
                has_cards = true;
                break;
            }
        }
        if has_cards {
            out.push(format_date(date));
        }
    }
    Ok(out)
}

#[derive(Debug, Clone, Serialize)]
pub struct CardEntry {
    pub name: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub folder: String,
    pub date: String,
    pub content: String,
    pub preview: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardsView {
    pub date: String,
    pub cards: Vec<CardEntry>,
}

/// Cards filed under `date`, insights before fleeting, each folder sorted
/// by filename descending.
pub fn cards_view(
    store: &VaultStore,
    date: NaiveDate,
    card_type: Option<CardType>,
) -> Result<CardsView> {
    let types: Vec<CardType> = match card_type {
        Some(t) => vec![t],
        None => CardType::ALL.to_vec(),
    };

    let mut cards = Vec::new();
    for card_type in types {
        let mut paths = list_markdown(&store.card_dir(card_type, date))?;
        paths.reverse();
        for path in paths {
            let content = store.read(&path)?.unwrap_or_default();
            cards.push(CardEntry {
                name: file_stem(&path),
                filename: file_name(&path),
                folder: card_type.folder().to_string(),
                date: format_date(date),
                preview: preview(&content, CARD_PREVIEW_CHARS),
                content,
            });
        }
    }
    Ok(CardsView {
        date: format_date(date),
        cards,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartEntry {
    pub date: String,
    pub filename: String,
    pub content: String,
    pub preview: String,
}

pub fn charts_view(store: &VaultStore) -> Result<Vec<ChartEntry>> {
    let mut out = Vec::new();
    for doc in store.list(DocumentKind::Sounding)? {
        let content = store.read(&doc.path)?.unwrap_or_default();
        out.push(ChartEntry {
            date: format_date(doc.id.date()),
            filename: file_name(&doc.path),
            preview: preview(&content, CHART_PREVIEW_CHARS),
            content,
        });
    }
    Ok(out)
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub date: String,
    pub content: String,
}

pub fn chart_view(store: &VaultStore, date: NaiveDate) -> Result<ChartView> {
    let path = store.path_for(&DocumentId::Sounding(date));
    let Some(content) = store.read(&path)? else {
        return Err(CompassError::NotFound(format!("sounding for {}", format_date(date))).into());
    };
    Ok(ChartView {
        date: format_date(date),
        content,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseEntry {
    pub date: String,
    pub filename: String,
    pub task: String,
    pub focus: String,
    pub summary: String,
    pub next: String,
}

pub fn courses_view(store: &VaultStore) -> Result<Vec<CourseEntry>> {
    let mut out = Vec::new();
    for doc in store.list(DocumentKind::Course)? {
        let parsed = parse(store.read(&doc.path)?.as_deref());
        out.push(CourseEntry {
            date: format_date(doc.id.date()),
            filename: file_name(&doc.path),
            task: parsed.value(SectionKey::Task).to_string(),
            focus: parsed.value(SectionKey::Focus).to_string(),
            summary: parsed.value(SectionKey::Summary).to_string(),
            next: parsed.value(SectionKey::NextActions).to_string(),
        });
    }
    Ok(out)
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseView {
    pub date: String,
    pub content: String,
    pub task: String,
    pub focus: String,
    pub note: String,
    pub summary: String,
    pub next: String,
}

pub fn course_view(store: &VaultStore, date: NaiveDate) -> Result<CourseView> {
    let path = store.path_for(&DocumentId::Course(date));
    let Some(content) = store.read(&path)? else {
        return Err(CompassError::NotFound(format!("course for {}", format_date(date))).into());
    };
    let parsed = parse(Some(&content));
    Ok(CourseView {
        date: format_date(date),
        task: parsed.value(SectionKey::Task).to_string(),
        focus: parsed.value(SectionKey::Focus).to_string(),
        note: parsed.value(SectionKey::Note).to_string(),
        summary: parsed.value(SectionKey::Summary).to_string(),
        next: parsed.value(SectionKey::NextActions).to_string(),
        content,
    })
}
