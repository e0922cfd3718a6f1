use crate::ids::{AgentId, EntryId, ResourceId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Numeric tag shared by [`Value`] and [`RangeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ValueKind {
    Integer,
    Float,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("Integer"),
            Self::Float => f.write_str("Float"),
        }
    }
}

/// A tagged numeric value. Mixed tags are never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum Value {
    Integer(i64),
    Float(f64),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
        }
    }

    /// Orders two values of the same tag. Floats use IEEE total order.
    /// Returns `None` when the tags differ.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => Some(a.total_cmp(b)),
            (Self::Integer(_), Self::Float(_)) | (Self::Float(_), Self::Integer(_)) => None,
        }
    }

    /// Numeric comparison for threshold checks: `-0.0 == 0.0`, and NaN is
    /// unordered. Returns `None` when the tags differ or a NaN is involved.
    pub fn numeric_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Integer(_), Self::Float(_)) | (Self::Float(_), Self::Integer(_)) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "Integer({v})"),
            Self::Float(v) => write!(f, "Float({v})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum RangeKind {
    Integer { min: i64, max: i64 },
    Float { min: f64, max: f64 },
}

impl RangeKind {
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Self::Integer { .. } => ValueKind::Integer,
            Self::Float { .. } => ValueKind::Float,
        }
    }

    /// True when `value` has this range's tag and lies within its bounds.
    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Integer { min, max }, Value::Integer(v)) => (*min..=*max).contains(v),
            (Self::Float { min, max }, Value::Float(v)) => *min <= *v && *v <= *max,
            (Self::Integer { .. }, Value::Float(_)) | (Self::Float { .. }, Value::Integer(_)) => {
                false
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Integer { min, max } => {
                if min > max {
                    return Err(format!("integer range min ({min}) exceeds max ({max})"));
                }
            }
            Self::Float { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err("float range bounds must be finite".to_string());
                }
                if min > max {
                    return Err(format!("float range min ({min}) exceeds max ({max})"));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Range {
    pub name: String,
    pub kind: RangeKind,
}

/// A named numeric axis. `computed = false` is subjective (entered by people),
/// `computed = true` is objective (only produced by running a [`Method`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Dimension {
    pub name: String,
    pub range: Range,
    pub computed: bool,
}

impl Dimension {
    pub fn value_kind(&self) -> ValueKind {
        self.range.kind.value_kind()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceDef {
    pub name: String,
    pub base_types: BTreeSet<String>,
    pub dimension_refs: Vec<EntryId>,
}

impl ResourceDef {
    pub fn has_dimension(&self, dimension_id: &EntryId) -> bool {
        self.dimension_refs.contains(dimension_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Program {
    Sum,
    Average,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Method {
    pub name: String,
    pub input_dimension_ids: Vec<EntryId>,
    pub output_dimension_id: EntryId,
    pub program: Program,
    pub can_compute_live: bool,
    pub must_publish_dataset: bool,
}

impl Method {
    pub fn reads(&self, dimension_id: &EntryId) -> bool {
        self.input_dimension_ids.contains(dimension_id)
    }
}

/// One rating record. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Assessment {
    pub value: Value,
    pub dimension_id: EntryId,
    pub resource_id: ResourceId,
    pub resource_def_id: EntryId,
    pub author: AgentId,
    /// Unix milliseconds.
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maybe_input_dataset: Option<Vec<EntryId>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ThresholdKind {
    GreaterThan,
    LessThan,
    Equal,
}

impl ThresholdKind {
    /// Whether `measured.compare(threshold)` yielding `ordering` passes.
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Self::GreaterThan => ordering == Ordering::Greater,
            Self::LessThan => ordering == Ordering::Less,
            Self::Equal => ordering == Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Threshold {
    pub dimension_id: EntryId,
    pub kind: ThresholdKind,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum OrderingDirection {
    /// Descending.
    Biggest,
    /// Ascending.
    Smallest,
}

impl OrderingDirection {
    pub fn apply(&self, ascending: Ordering) -> Ordering {
        match self {
            Self::Biggest => ascending.reverse(),
            Self::Smallest => ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CulturalContext {
    pub name: String,
    pub resource_def_id: EntryId,
    pub thresholds: Vec<Threshold>,
    pub order_by: Vec<(EntryId, OrderingDirection)>,
}

impl CulturalContext {
    /// Threshold dimensions first, then ordering dimensions, without repeats.
    pub fn dimension_ids(&self) -> Vec<EntryId> {
        let mut out: Vec<EntryId> = Vec::new();
        let candidates = self
            .thresholds
            .iter()
            .map(|t| &t.dimension_id)
            .chain(self.order_by.iter().map(|(id, _)| id));
        for id in candidates {
            if !out.contains(id) {
                out.push(id.clone());
            }
        }
        out
    }
}

/// Published output of a context computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContextResult {
    pub context_id: EntryId,
    pub resource_ids: Vec<ResourceId>,
    pub dimension_ids: Vec<EntryId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum WidgetKind {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AssessmentWidgetRegistration {
    pub applet_id: String,
    pub widget_key: String,
    pub name: String,
    pub range_kind: ValueKind,
    pub kind: WidgetKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WidgetBlockConfig {
    pub input_assessment_widget: EntryId,
    pub output_assessment_widget: EntryId,
}

/// The tray for one resource def. Each write replaces the previous tray.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AssessmentWidgetTrayConfig {
    pub resource_def_id: EntryId,
    pub block_ids: Vec<EntryId>,
}
