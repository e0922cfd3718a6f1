use sensemaker_ledger::LedgerError;
use sensemaker_protocol::{EntryId, EntryKind, ErrorEnvelope, ResourceId, ValueKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Coarse error classes the UI collaborator branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authorization,
    Validation,
    TypeMismatch,
    NotFound,
    Ledger,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Only the community activator may write {kind} entries")]
    NotCommunityActivator { kind: EntryKind },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Output dimension must be computed (objective)")]
    MustBeObjectiveDimension,

    #[error("Partial method already names an output dimension; use create_method instead")]
    UseCreateMethodInstead,

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: ValueKind, found: ValueKind },

    #[error("Incompatible range types: threshold or ordering is {expected}, resource value is {found}")]
    IncompatibleRangeTypes { expected: ValueKind, found: ValueKind },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No widget tray configured for resource def {0}")]
    NotConfigured(EntryId),

    #[error("No input assessments for method {method_id} on resource {resource_id}")]
    NoInputs {
        method_id: EntryId,
        resource_id: ResourceId,
    },

    #[error("Aggregation overflow while applying {0}")]
    Overflow(String),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotCommunityActivator { .. } => ErrorCategory::Authorization,
            Self::Validation(_)
            | Self::InvalidConfiguration(_)
            | Self::MustBeObjectiveDimension
            | Self::UseCreateMethodInstead
            | Self::NoInputs { .. }
            | Self::Overflow(_) => ErrorCategory::Validation,
            Self::TypeMismatch { .. } | Self::IncompatibleRangeTypes { .. } => {
                ErrorCategory::TypeMismatch
            }
            Self::NotFound(_) | Self::NotConfigured(_) => ErrorCategory::NotFound,
            Self::Ledger(LedgerError::NotFound(_)) => ErrorCategory::NotFound,
            Self::Ledger(_) => ErrorCategory::Ledger,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotCommunityActivator { .. } => "not_community_activator",
            Self::Validation(_) => "validation_error",
            Self::InvalidConfiguration(_) => "invalid_configuration",
            Self::MustBeObjectiveDimension => "must_be_objective_dimension",
            Self::UseCreateMethodInstead => "use_create_method_instead",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::IncompatibleRangeTypes { .. } => "incompatible_range_types",
            Self::NotFound(_) => "not_found",
            Self::NotConfigured(_) => "not_configured",
            Self::NoInputs { .. } => "no_inputs",
            Self::Overflow(_) => "overflow",
            Self::Ledger(_) => "ledger_error",
        }
    }

    pub fn to_envelope(&self) -> ErrorEnvelope {
        let envelope = ErrorEnvelope::new(self.code(), self.to_string());
        match self {
            Self::NotCommunityActivator { kind } => envelope
                .with_details(serde_json::json!({ "entry_kind": kind }))
                .with_hint("Configuration entries are written by the community activator only"),
            Self::UseCreateMethodInstead => {
                envelope.with_hint("Call create_method when the output dimension already exists")
            }
            Self::TypeMismatch { expected, found }
            | Self::IncompatibleRangeTypes { expected, found } => envelope
                .with_details(serde_json::json!({ "expected": expected, "found": found })),
            Self::NotConfigured(resource_def_id) => envelope
                .with_details(serde_json::json!({ "resource_def_id": resource_def_id }))
                .with_hint("Call set_assessment_widget_tray_config first"),
            _ => envelope,
        }
    }
}
