//! Section extraction for course-style Markdown.
//!
//! Headings are recognised leniently: a line opens a section when it
//! contains the section's fragment(s) anywhere, so `## Task: long-term goals`
//! and `## Task` both open `task`. Fragments are tried in a fixed order and
//! the first match wins.

use serde::Serialize;

/// The fixed set of sections a course document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKey {
    Task,
    Focus,
    Note,
    Reference,
    Summary,
    NextActions,
}

impl SectionKey {
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Task,
        SectionKey::Focus,
        SectionKey::Note,
        SectionKey::Reference,
        SectionKey::Summary,
        SectionKey::NextActions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Focus => "focus",
            Self::Note => "note",
            Self::Reference => "reference",
            Self::Summary => "summary",
            Self::NextActions => "next-actions",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

pub const SEPARATOR: &str = "---";

/// Heading matchers in priority order. A line opens the section when it
/// contains every fragment of the entry.
const HEADING_MATCHERS: [(&[&str], SectionKey); 6] = [
    (&["## Task"], SectionKey::Task),
    (&["## Focus"], SectionKey::Focus),
    (&["## Note"], SectionKey::Note),
    (&["## Reference"], SectionKey::Reference),
    (&["## Today", "Summary"], SectionKey::Summary),
    (&["## What", "Next"], SectionKey::NextActions),
];

/// Accumulated raw text per section. Every key is always present; an absent
/// heading reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSections {
    values: [String; 6],
}

impl ParsedSections {
    /// Raw accumulated text, one trailing newline per captured line.
    pub fn raw(&self, key: SectionKey) -> &str {
        &self.values[key.index()]
    }

    /// Trimmed text, the form callers display and compare.
    pub fn value(&self, key: SectionKey) -> &str {
        self.raw(key).trim()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &str)> {
        SectionKey::ALL.into_iter().map(|key| (key, self.raw(key)))
    }

    fn append_line(&mut self, key: SectionKey, line: &str) {
        let slot = &mut self.values[key.index()];
        slot.push_str(line);
        slot.push('\n');
    }
}

fn heading_for(line: &str) -> Option<SectionKey> {
    HEADING_MATCHERS
        .iter()
        .find(|(fragments, _)| fragments.iter().all(|f| line.contains(f)))
        .map(|(_, key)| *key)
}

/// Splits `text` into the fixed sections. `None` (no document) gives every
/// section empty.
pub fn parse(text: Option<&str>) -> ParsedSections {
    let mut sections = ParsedSections::default();
    let Some(text) = text else {
        return sections;
    };

    let mut current: Option<SectionKey> = None;
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(key) = heading_for(line) {
            current = Some(key);
        } else if line.trim() == SEPARATOR {
            current = None;
        } else if let Some(key) = current
            && !line.trim().is_empty()
            && !line.starts_with('#')
        {
            sections.append_line(key, line);
        }
    }
    sections
}
