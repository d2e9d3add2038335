use anyhow::{Context, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::vault::document::{
    CardType, DocumentId, DocumentKind, LogicalDocument, MAP_CANVAS_FILE, format_date,
};
use crate::vault::paths::VaultPaths;

/// Resolves logical documents to paths under the vault and does whole-file
/// text I/O on them.
#[derive(Debug, Clone)]
pub struct VaultStore {
    paths: VaultPaths,
}

impl VaultStore {
    pub fn new(paths: VaultPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    pub fn logbook_dir(&self, date: NaiveDate) -> PathBuf {
        self.paths.logbook.join(format_date(date))
    }

    pub fn card_dir(&self, card_type: CardType, date: NaiveDate) -> PathBuf {
        self.logbook_dir(date).join(card_type.folder())
    }

    pub fn path_for(&self, id: &DocumentId) -> PathBuf {
        match id {
            DocumentId::Course(date) => self
                .paths
                .navigation
                .join(format!("{}_course.md", format_date(*date))),
            DocumentId::Sounding(date) => self
                .paths
                .charts
                .join(format!("{}_sounding.md", format_date(*date))),
            DocumentId::Card {
                card_type,
                title,
                date,
            } => self
                .card_dir(*card_type, *date)
                .join(format!("{title}_{}.md", format_date(*date))),
            DocumentId::MapCanvas(date) => self.logbook_dir(*date).join(MAP_CANVAS_FILE),
        }
    }

    pub fn template_path(&self, kind: DocumentKind) -> Option<PathBuf> {
        kind.template_file().map(|name| self.paths.template.join(name))
    }

    pub fn exists(&self, id: &DocumentId) -> bool {
        self.path_for(id).is_file()
    }

    /// Returns `None` when the file does not exist; every other I/O failure
    /// is an error.
    pub fn read(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    /// Creates missing parents, then replaces the file wholesale. An existing
    /// file keeps its permissions; a new one gets the umask default.
    pub fn write(&self, path: &Path, text: &str) -> Result<()> {
        let parent = path
            .parent()
            .with_context(|| format!("{} has no parent directory", path.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;

        let existing = fs::metadata(path).ok().map(|meta| meta.permissions());
        let mut builder = tempfile::Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut tmp = builder
            .tempfile_in(parent)
            .with_context(|| format!("failed to stage write in {}", parent.display()))?;
        if let Some(perms) = existing {
            tmp.as_file()
                .set_permissions(perms)
                .with_context(|| format!("failed to copy permissions of {}", path.display()))?;
        }
        tmp.write_all(text.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        tmp.persist(path)
            .map_err(|err| err.error)
            .with_context(|| format!("failed to write {}", path.display()))?;

        debug!(
            "event=document_write status=ok path={} bytes={}",
            path.display(),
            text.len()
        );
        Ok(())
    }

    /// Appends under an exclusive lock on the file itself. `suffix` receives
    /// the current content (`None` for a new or empty file) and returns the
    /// bytes to add at the end. Existing bytes are never rewritten, so a
    /// failed append leaves them intact. Returns whether prior content
    /// existed.
    pub fn append<F>(&self, path: &Path, suffix: F) -> Result<bool>
    where
        F: FnOnce(Option<&str>) -> String,
    {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("failed to lock {}", path.display()))?;

        let mut prior = String::new();
        file.read_to_string(&mut prior)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let existed = !prior.is_empty();
        let tail = suffix(existed.then_some(prior.as_str()));

        file.write_all(tail.as_bytes())
            .with_context(|| format!("failed to append to {}", path.display()))?;
        file.sync_all()
            .with_context(|| format!("failed to sync {}", path.display()))?;
        FileExt::unlock(&file).with_context(|| format!("failed to unlock {}", path.display()))?;

        debug!(
            "event=document_append status=ok path={} existed={existed} bytes={}",
            path.display(),
            tail.len()
        );
        Ok(existed)
    }

    /// All documents of `kind`, newest date first.
    pub fn list(&self, kind: DocumentKind) -> Result<Vec<LogicalDocument>> {
        let mut docs = match kind {
            DocumentKind::Course => self.list_dated(&self.paths.navigation, kind)?,
            DocumentKind::Sounding => self.list_dated(&self.paths.charts, kind)?,
            DocumentKind::Card => self.list_cards()?,
            DocumentKind::MapCanvas => self
                .logbook_dates()?
                .into_iter()
                .map(DocumentId::MapCanvas)
                .map(|id| LogicalDocument {
                    path: self.path_for(&id),
                    id,
                })
                .filter(|doc| doc.path.is_file())
                .collect(),
        };
        docs.sort_by(|a, b| {
            b.id.date()
                .cmp(&a.id.date())
                .then_with(|| b.path.cmp(&a.path))
        });
        Ok(docs)
    }

    pub fn latest(&self, kind: DocumentKind) -> Result<Option<LogicalDocument>> {
        Ok(self.list(kind)?.into_iter().next())
    }

    /// Text of the newest document of `kind`, if any.
    pub fn read_latest(&self, kind: DocumentKind) -> Result<Option<String>> {
        match self.latest(kind)? {
            Some(doc) => self.read(&doc.path),
            None => Ok(None),
        }
    }

    /// Date-named subfolders of the logbook, newest first.
    pub fn logbook_dates(&self) -> Result<Vec<NaiveDate>> {
        let mut dates: Vec<NaiveDate> = read_dir_sorted(&self.paths.logbook)?
            .into_iter()
            .filter(|path| path.is_dir())
            .filter_map(|path| date_token(&path, ""))
            .collect();
        dates.sort_by(|a, b| b.cmp(a));
        Ok(dates)
    }

    fn list_dated(&self, dir: &Path, kind: DocumentKind) -> Result<Vec<LogicalDocument>> {
        let Some(suffix) = kind.file_suffix() else {
            return Ok(Vec::new());
        };
        let mut out = Vec::new();
        for path in read_dir_sorted(dir)? {
            if !path.is_file() {
                continue;
            }
            let Some(date) = date_token(&path, suffix) else {
                continue;
            };
            let id = match kind {
                DocumentKind::Sounding => DocumentId::Sounding(date),
                _ => DocumentId::Course(date),
            };
            out.push(LogicalDocument { id, path });
        }
        Ok(out)
    }

    fn list_cards(&self) -> Result<Vec<LogicalDocument>> {
        let mut out = Vec::new();
        for date in self.logbook_dates()? {
            for card_type in CardType::ALL {
                for path in list_markdown(&self.card_dir(card_type, date))? {
                    let Some(title) = card_title(&path, date) else {
                        continue;
                    };
                    out.push(LogicalDocument {
                        id: DocumentId::Card {
                            card_type,
                            title,
                            date,
                        },
                        path,
                    });
                }
            }
        }
        Ok(out)
    }
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", dir.display()));
        }
    };
    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read {}", dir.display()))?;
        out.push(entry.path());
    }
    out.sort();
    Ok(out)
}

/// `*.md` files directly inside `dir`, sorted by name. A missing directory
/// yields an empty list.
pub fn list_markdown(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(read_dir_sorted(dir)?
        .into_iter()
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("md"))
        .collect())
}

/// Parses the ISO date in front of `suffix` in the file name.
fn date_token(path: &Path, suffix: &str) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    let token = name.strip_suffix(suffix)?;
    NaiveDate::parse_from_str(token, crate::vault::document::DATE_FORMAT).ok()
}

fn card_title(path: &Path, date: NaiveDate) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let title = stem
        .strip_suffix(&format!("_{}", format_date(date)))
        .unwrap_or(stem);
    Some(title.to_string())
}
