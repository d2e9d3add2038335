use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::CompassError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MAP_CANVAS_FILE: &str = "map.canvas";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Course,
    Sounding,
    Card,
    MapCanvas,
}

impl DocumentKind {
    /// Filename suffix for the date-named kinds.
    pub fn file_suffix(self) -> Option<&'static str> {
        match self {
            Self::Course => Some("_course.md"),
            Self::Sounding => Some("_sounding.md"),
            Self::Card | Self::MapCanvas => None,
        }
    }

    pub fn template_file(self) -> Option<&'static str> {
        match self {
            Self::Course => Some("course-template.md"),
            Self::Sounding => Some("sounding-template.md"),
            Self::Card => Some("card-template.md"),
            Self::MapCanvas => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Insight,
    Fleeting,
}

impl CardType {
    pub const ALL: [CardType; 2] = [CardType::Insight, CardType::Fleeting];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insight => "insight",
            Self::Fleeting => "fleeting",
        }
    }

    /// Subfolder under `logbook/{date}/`.
    pub fn folder(self) -> &'static str {
        match self {
            Self::Insight => "insights",
            Self::Fleeting => "fleeting",
        }
    }
}

/// Identifies one logical document; the path is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentId {
    Course(NaiveDate),
    Sounding(NaiveDate),
    Card {
        card_type: CardType,
        title: String,
        date: NaiveDate,
    },
    MapCanvas(NaiveDate),
}

impl DocumentId {
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Course(date) | Self::Sounding(date) | Self::MapCanvas(date) => *date,
            Self::Card { date, .. } => *date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalDocument {
    pub id: DocumentId,
    pub path: PathBuf,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, CompassError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| CompassError::InvalidDate(trimmed.to_string()))
}

/// Keeps alphanumerics, spaces, `-` and `_`, then trims.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let trimmed = kept.trim();
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}
