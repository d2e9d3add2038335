use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::commands::{CommandReport, Workspace};
use crate::vault::canvas::read_map;
use crate::vault::document::CardType;
use crate::vault::harbor::{HarborCategory, list_harbor, read_harbor_file};
use crate::vault::templates::list_templates;
use crate::vault::views;

/// Read-only projections; dates default to today when `None`.
#[derive(Debug, Clone)]
pub enum View {
    Today,
    Cards {
        date: Option<NaiveDate>,
        card_type: Option<CardType>,
    },
    CardDates,
    Charts,
    Chart {
        date: NaiveDate,
    },
    Courses,
    Course {
        date: NaiveDate,
    },
    Harbor,
    HarborFile {
        category: String,
        filename: String,
    },
    Templates,
    Map {
        date: Option<NaiveDate>,
    },
    User,
}

impl View {
    fn name(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Cards { .. } => "cards",
            Self::CardDates => "card-dates",
            Self::Charts => "charts",
            Self::Chart { .. } => "chart",
            Self::Courses => "courses",
            Self::Course { .. } => "course",
            Self::Harbor => "harbor",
            Self::HarborFile { .. } => "harbor-file",
            Self::Templates => "templates",
            Self::Map { .. } => "map",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub name: String,
    pub version: String,
    pub api_enabled: bool,
}

pub fn run(ws: &Workspace, view: &View) -> Result<CommandReport> {
    let report = CommandReport::new(format!("view {}", view.name()));
    let store = &ws.store;
    let today = ws.today();

    match view {
        View::Today => report.with_data(&views::today_view(store, today)?),
        View::Cards { date, card_type } => {
            report.with_data(&views::cards_view(store, date.unwrap_or(today), *card_type)?)
        }
        View::CardDates => report.with_data(&views::card_dates(store)?),
        View::Charts => report.with_data(&views::charts_view(store)?),
        View::Chart { date } => report.with_data(&views::chart_view(store, *date)?),
        View::Courses => report.with_data(&views::courses_view(store)?),
        View::Course { date } => report.with_data(&views::course_view(store, *date)?),
        View::Harbor => report.with_data(&list_harbor(store)?),
        View::HarborFile { category, filename } => {
            let category = HarborCategory::parse(category)?;
            report.with_data(&read_harbor_file(store, category, filename)?)
        }
        View::Templates => report.with_data(&list_templates(store)?),
        View::Map { date } => report.with_data(&read_map(store, date.unwrap_or(today))?),
        View::User => report.with_data(&UserView {
            name: ws.config.display_name().to_string(),
            version: ws.config.assistant.version.clone(),
            api_enabled: ws.config.api.enabled,
        }),
    }
}
