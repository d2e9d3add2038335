use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompassError {
    #[error(
        "config file not found: {}\n\
         to configure compass:\n  \
         1. copy config.example.json to config.json\n  \
         2. edit config.json and set obsidian_path (and folder names if yours differ)",
        path.display()
    )]
    ConfigMissing { path: PathBuf },
    #[error("config file invalid or unreadable: {0}")]
    InvalidConfig(String),
    #[error("invalid date `{0}`: use YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid harbor category `{0}`: use concepts, frameworks, companies, people or skills")]
    InvalidHarborCategory(String),
    #[error("invalid filename `{0}`")]
    InvalidFilename(String),
    #[error("{0} not found")]
    NotFound(String),
}
