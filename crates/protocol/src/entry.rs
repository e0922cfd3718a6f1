use crate::ids::EntryId;
use crate::model::{
    Assessment, AssessmentWidgetRegistration, AssessmentWidgetTrayConfig, ContextResult,
    CulturalContext, Dimension, Method, Range, ResourceDef, WidgetBlockConfig,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of every entry the engine writes to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Range,
    Dimension,
    ResourceDef,
    Method,
    CulturalContext,
    Assessment,
    ContextResult,
    WidgetRegistration,
    WidgetBlock,
    WidgetTray,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Dimension => "dimension",
            Self::ResourceDef => "resource_def",
            Self::Method => "method",
            Self::CulturalContext => "cultural_context",
            Self::Assessment => "assessment",
            Self::ContextResult => "context_result",
            Self::WidgetRegistration => "widget_registration",
            Self::WidgetBlock => "widget_block",
            Self::WidgetTray => "widget_tray",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Entry {
    Range(Range),
    Dimension(Dimension),
    ResourceDef(ResourceDef),
    Method(Method),
    CulturalContext(CulturalContext),
    Assessment(Assessment),
    ContextResult(ContextResult),
    WidgetRegistration(AssessmentWidgetRegistration),
    WidgetBlock(WidgetBlockConfig),
    WidgetTray(AssessmentWidgetTrayConfig),
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Range(_) => EntryKind::Range,
            Self::Dimension(_) => EntryKind::Dimension,
            Self::ResourceDef(_) => EntryKind::ResourceDef,
            Self::Method(_) => EntryKind::Method,
            Self::CulturalContext(_) => EntryKind::CulturalContext,
            Self::Assessment(_) => EntryKind::Assessment,
            Self::ContextResult(_) => EntryKind::ContextResult,
            Self::WidgetRegistration(_) => EntryKind::WidgetRegistration,
            Self::WidgetBlock(_) => EntryKind::WidgetBlock,
            Self::WidgetTray(_) => EntryKind::WidgetTray,
        }
    }

    /// The time the payload itself records, if it carries one.
    pub fn timestamp(&self) -> Option<u64> {
        match self {
            Self::Assessment(assessment) => Some(assessment.timestamp),
            _ => None,
        }
    }
}

/// Typed view over one [`Entry`] variant.
pub trait EntryType: Sized {
    const KIND: EntryKind;

    fn into_entry(self) -> Entry;

    fn from_entry(entry: Entry) -> Option<Self>;
}

macro_rules! entry_type {
    ($ty:ty, $variant:ident) => {
        impl EntryType for $ty {
            const KIND: EntryKind = EntryKind::$variant;

            fn into_entry(self) -> Entry {
                Entry::$variant(self)
            }

            fn from_entry(entry: Entry) -> Option<Self> {
                match entry {
                    Entry::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

entry_type!(Range, Range);
entry_type!(Dimension, Dimension);
entry_type!(ResourceDef, ResourceDef);
entry_type!(Method, Method);
entry_type!(CulturalContext, CulturalContext);
entry_type!(Assessment, Assessment);
entry_type!(ContextResult, ContextResult);
entry_type!(AssessmentWidgetRegistration, WidgetRegistration);
entry_type!(WidgetBlockConfig, WidgetBlock);
entry_type!(AssessmentWidgetTrayConfig, WidgetTray);

/// An entry together with the ledger id it was written under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Identified<T> {
    pub id: EntryId,
    #[serde(flatten)]
    pub entry: T,
}

impl<T> Identified<T> {
    pub fn new(id: EntryId, entry: T) -> Self {
        Self { id, entry }
    }
}
