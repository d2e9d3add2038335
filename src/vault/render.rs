//! Template-or-default rendering of sectioned documents.
//!
//! A [`Renderer`] is chosen once per render by checking for the kind's
//! template on disk. Template mode substitutes each field's placeholder
//! literal; default mode emits the built-in skeleton.

use anyhow::Result;
use log::debug;
use std::collections::BTreeMap;

use crate::vault::document::DocumentKind;
use crate::vault::sections::{ParsedSections, SectionKey};
use crate::vault::store::VaultStore;

pub type FieldValues = BTreeMap<SectionKey, String>;

/// One field of a kind's layout.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub key: SectionKey,
    /// Heading emitted by the default skeleton.
    pub heading: &'static str,
    /// Literal replaced in template mode.
    pub placeholder: &'static str,
    pub separator_before: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub slots: &'static [Slot],
    /// Static text the default skeleton appends after the slots.
    pub trailer: &'static str,
}

pub const TASK_PLACEHOLDER: &str = "[Fill in your long-term goal here]";
pub const FOCUS_PLACEHOLDER: &str = "[Fill in the topics you are focusing on lately]";
pub const NOTE_PLACEHOLDER: &str =
    "[Each day, write down your own views or preferences on the topics discussed]";
pub const REFERENCE_PLACEHOLDER: &str =
    "[List the files, web pages or texts you want used as references]";
pub const SUMMARY_PLACEHOLDER: &str = "[Daily summary, filled in automatically]";
pub const NEXT_PLACEHOLDER: &str = "[Next steps, filled in automatically]";
pub const SOUNDING_FOCUS_PLACEHOLDER: &str = "[Extracted automatically from the course document]";

const COURSE_SLOTS: [Slot; 6] = [
    Slot {
        key: SectionKey::Task,
        heading: "## Task",
        placeholder: TASK_PLACEHOLDER,
        separator_before: false,
    },
    Slot {
        key: SectionKey::Focus,
        heading: "## Focus",
        placeholder: FOCUS_PLACEHOLDER,
        separator_before: false,
    },
    Slot {
        key: SectionKey::Note,
        heading: "## Note",
        placeholder: NOTE_PLACEHOLDER,
        separator_before: false,
    },
    Slot {
        key: SectionKey::Reference,
        heading: "## Reference",
        placeholder: REFERENCE_PLACEHOLDER,
        separator_before: false,
    },
    Slot {
        key: SectionKey::Summary,
        heading: "## Today's Summary",
        placeholder: SUMMARY_PLACEHOLDER,
        separator_before: true,
    },
    Slot {
        key: SectionKey::NextActions,
        heading: "## What's Next",
        placeholder: NEXT_PLACEHOLDER,
        separator_before: false,
    },
];

const SOUNDING_SLOTS: [Slot; 1] = [Slot {
    key: SectionKey::Focus,
    heading: "## Focus",
    placeholder: SOUNDING_FOCUS_PLACEHOLDER,
    separator_before: false,
}];

const SOUNDING_TRAILER: &str = "\
## News Update
[To be filled: what objectively happened in the last two days on the focus topics]

## Analysis Update
[To be filled: how media, institutions, experts and stakeholders read these facts, and the plausible scenarios ahead]
";

pub fn layout(kind: DocumentKind) -> Layout {
    match kind {
        DocumentKind::Course => Layout {
            slots: &COURSE_SLOTS,
            trailer: "",
        },
        DocumentKind::Sounding => Layout {
            slots: &SOUNDING_SLOTS,
            trailer: SOUNDING_TRAILER,
        },
        DocumentKind::Card | DocumentKind::MapCanvas => Layout {
            slots: &[],
            trailer: "",
        },
    }
}

/// New value if non-empty, else the previous document's value if non-empty.
fn resolve<'a>(
    key: SectionKey,
    existing: &'a ParsedSections,
    new_values: &'a FieldValues,
) -> Option<&'a str> {
    new_values
        .get(&key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .or_else(|| Some(existing.value(key)).filter(|v| !v.is_empty()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Renderer {
    /// Raw text of the user's template for the kind.
    Templated(String),
    Default,
}

impl Renderer {
    /// Template mode when the kind's template file exists and is non-empty.
    pub fn select(store: &VaultStore, kind: DocumentKind) -> Result<Self> {
        let Some(path) = store.template_path(kind) else {
            return Ok(Self::Default);
        };
        match store.read(&path)? {
            Some(text) if !text.trim().is_empty() => {
                debug!("event=render_select mode=template path={}", path.display());
                Ok(Self::Templated(text))
            }
            _ => {
                debug!("event=render_select mode=default kind={kind:?}");
                Ok(Self::Default)
            }
        }
    }

    pub fn is_templated(&self) -> bool {
        matches!(self, Self::Templated(_))
    }

    pub fn render(
        &self,
        kind: DocumentKind,
        existing: &ParsedSections,
        new_values: &FieldValues,
    ) -> String {
        let layout = layout(kind);
        match self {
            Self::Templated(template) => {
                let mut out = template.clone();
                for slot in layout.slots {
                    let value = resolve(slot.key, existing, new_values).unwrap_or(slot.placeholder);
                    out = out.replace(slot.placeholder, value);
                }
                out
            }
            Self::Default => {
                let mut blocks = Vec::with_capacity(layout.slots.len() + 1);
                for slot in layout.slots {
                    let value = resolve(slot.key, existing, new_values).unwrap_or("");
                    let separator = if slot.separator_before { "---\n" } else { "" };
                    blocks.push(format!("{separator}{}\n{value}\n", slot.heading));
                }
                if !layout.trailer.is_empty() {
                    blocks.push(layout.trailer.to_string());
                }
                blocks.join("\n")
            }
        }
    }
}
