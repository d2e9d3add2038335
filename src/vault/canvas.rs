use anyhow::Result;
use chrono::NaiveDate;
use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::vault::document::{DocumentId, format_date};
use crate::vault::store::VaultStore;

/// A day's knowledge map. `data` is `None` when the file is missing or is
/// not valid JSON; `content` still carries the raw text in the latter case.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub date: String,
    pub exists: bool,
    pub content: Option<String>,
    pub data: Option<Value>,
}

pub fn read_map(store: &VaultStore, date: NaiveDate) -> Result<MapView> {
    let path = store.path_for(&DocumentId::MapCanvas(date));
    let Some(content) = store.read(&path)? else {
        return Ok(MapView {
            date: format_date(date),
            exists: false,
            content: None,
            data: None,
        });
    };

    let data = match serde_json::from_str::<Value>(&content) {
        Ok(data) => Some(data),
        Err(err) => {
            warn!(
                "event=canvas_parse status=degraded path={} err={err}",
                path.display()
            );
            None
        }
    };

    Ok(MapView {
        date: format_date(date),
        exists: true,
        content: Some(content),
        data,
    })
}
