//! Schedule domain types and the reply-parsing pipeline.
//!
//! The model returns free text with structured payloads embedded in tagged
//! sections. The pipeline runs in four stages, leaf-first:
//!
//! 1. [`tags`] — locate tagged sections and the leftover display text
//! 2. [`decode`] — strict JSON parse with truncation-tolerant recovery
//! 3. [`normalize`] — map abbreviated field names onto the canonical schema
//! 4. [`store`] — merge days into the date-keyed [`ScheduleStore`]
//!
//! [`reply::parse_reply`] ties the stages together for one model turn.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod decode;
pub mod normalize;
pub mod reply;
pub mod store;
pub mod tags;

pub use reply::{parse_reply, ParsedReply, ScheduleOutcome};
pub use store::ScheduleStore;

// ---------------------------------------------------------------------------
// Canonical schedule schema
// ---------------------------------------------------------------------------

/// One planned calendar day.
///
/// `date` is the identity key within the store; `label` is display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDay {
    /// ISO `YYYY-MM-DD` date, unique within the store.
    pub date: String,
    /// Human-readable day label, e.g. "Mon Mar 2". Display-only.
    #[serde(default)]
    pub label: String,
    /// Time blocks in the order the model proposed them.
    #[serde(default)]
    pub blocks: Vec<ScheduleBlock>,
}

/// One time block within a day.
///
/// Every field is a string and defaults to `""` so rendering never has to
/// handle an absent value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    /// Wall-clock start, `HH:MM` 24-hour.
    #[serde(default)]
    pub start: String,
    /// Wall-clock end, `HH:MM` 24-hour.
    #[serde(default)]
    pub end: String,
    /// Free-text activity label.
    #[serde(default)]
    pub title: String,
    /// Who the block belongs to.
    #[serde(default)]
    pub who: Who,
    /// Optional free-text annotation.
    #[serde(default)]
    pub note: String,
}

/// Ownership token for a schedule block.
///
/// The model is the sole producer and the vocabulary is open-ended, so
/// unrecognized values are carried through as [`Who::Other`] rather than
/// rejected. The render layer can special-case known roles and fall back
/// to a default treatment for the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Who {
    /// The first partner.
    PartnerA,
    /// The second partner.
    PartnerB,
    /// The whole family together.
    Family,
    /// Partners split the block between them.
    Split,
    /// Partners alternate this block across days.
    Alternate,
    /// Work time.
    Work,
    /// Exercise time.
    Exercise,
    /// Kid-focused activity.
    Kids,
    /// Household chores.
    Chores,
    /// Unstructured free time.
    Free,
    /// Any token outside the recognized set, carried verbatim.
    Other(String),
}

impl Who {
    /// The wire-format token for this value.
    pub fn token(&self) -> &str {
        match self {
            Self::PartnerA => "partner_a",
            Self::PartnerB => "partner_b",
            Self::Family => "family",
            Self::Split => "split",
            Self::Alternate => "alternate",
            Self::Work => "work",
            Self::Exercise => "exercise",
            Self::Kids => "kids",
            Self::Chores => "chores",
            Self::Free => "free",
            Self::Other(s) => s,
        }
    }
}

impl Default for Who {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for Who {
    fn from(s: String) -> Self {
        match s.as_str() {
            "partner_a" => Self::PartnerA,
            "partner_b" => Self::PartnerB,
            "family" => Self::Family,
            "split" => Self::Split,
            "alternate" => Self::Alternate,
            "work" => Self::Work,
            "exercise" => Self::Exercise,
            "kids" => Self::Kids,
            "chores" => Self::Chores,
            "free" => Self::Free,
            _ => Self::Other(s),
        }
    }
}

impl From<Who> for String {
    fn from(who: Who) -> Self {
        who.token().to_owned()
    }
}

// ---------------------------------------------------------------------------
// Fairness summary
// ---------------------------------------------------------------------------

/// Per-person hour totals by category over the two-week window.
///
/// Carried in the `<SUMMARY>` section. Both the person keys and the category
/// keys are open-ended; only numeric leaves are kept during normalization.
/// Each turn's summary replaces the previous one wholesale (last section
/// wins), independently of what the schedule section merged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FairnessSummary(pub BTreeMap<String, BTreeMap<String, f64>>);

impl FairnessSummary {
    /// Whether the summary carries no totals at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
