use crate::vault::paths::CompassHome;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Session scratch space. Nothing in parsing or rendering reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompassState {
    pub current_date: String,
    pub current_focus: Vec<String>,
    pub pending_cards: Vec<String>,
    pub discussion_context: BTreeMap<String, Value>,
}

pub fn load(home: &CompassHome) -> Result<CompassState> {
    let file = &home.state_file;
    if !file.exists() {
        return Ok(CompassState::default());
    }

    let raw =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let parsed: CompassState = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", file.display()))?;
    Ok(parsed)
}

pub fn save(home: &CompassHome, state: &CompassState) -> Result<PathBuf> {
    let file = home.state_file.clone();
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let data = serde_json::to_string_pretty(state)?;
    fs::write(&file, format!("{data}\n"))
        .with_context(|| format!("failed to write {}", file.display()))?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::paths::resolve_home;
    use tempfile::tempdir;

    #[test]
    fn missing_state_is_default_and_save_round_trips() {
        let tmp = tempdir().expect("tempdir");
        let home = resolve_home(Some(&tmp.path().join("config.json"))).expect("home");
        assert_eq!(load(&home).expect("load"), CompassState::default());

        let state = CompassState {
            current_date: "2024-10-01".to_string(),
            current_focus: vec!["Rust".to_string()],
            ..CompassState::default()
        };
        save(&home, &state).expect("save");
        assert_eq!(load(&home).expect("reload"), state);
    }

    #[test]
    fn unknown_fields_and_partial_files_are_tolerated() {
        let tmp = tempdir().expect("tempdir");
        let home = resolve_home(Some(&tmp.path().join("config.json"))).expect("home");
        fs::write(&home.state_file, r#"{"current_date":"2024-10-02","extra":1}"#).expect("write");
        let state = load(&home).expect("load");
        assert_eq!(state.current_date, "2024-10-02");
        assert!(state.pending_cards.is_empty());
    }
}
