//! # Sensemaker Protocol
//!
//! Shared data model and typed call surface for the sensemaker engine.
//!
//! Every type here is `Serialize + Deserialize + JsonSchema` so that the UI
//! collaborator and the ledger agree on field shapes without sharing code.
//!
//! ```text
//! Range ──> Dimension ──> ResourceDef
//!              │              │
//!              ├──> Method    ├──> CulturalContext (thresholds + order_by)
//!              │              │
//!              └──> Assessment (value, author, timestamp)
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod entry;
mod ids;
mod inputs;
mod model;

pub use entry::{Entry, EntryKind, EntryType, Identified};
pub use ids::{AgentId, EntryId, ResourceId};
pub use inputs::{
    AssessmentsForResourcesFilter, AtomicDimensionMethodInput, ComputeContextInput,
    CreateAssessmentInput, DimensionRole, MethodDimensionFilter, PartialMethod, RunMethodInput,
    SetWidgetTrayConfigInput,
};
pub use model::{
    Assessment, AssessmentWidgetRegistration, AssessmentWidgetTrayConfig, ContextResult,
    CulturalContext, Dimension, Method, OrderingDirection, Program, Range, RangeKind,
    ResourceDef, Threshold, ThresholdKind, Value, ValueKind, WidgetBlockConfig, WidgetKind,
};

/// Error shape handed to the UI collaborator.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
