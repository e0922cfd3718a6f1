//! Request shapes accepted by the engine's call surface.

use crate::ids::{EntryId, ResourceId};
use crate::model::{Dimension, Program, Value, WidgetBlockConfig};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CreateAssessmentInput {
    pub value: Value,
    pub dimension_id: EntryId,
    pub resource_id: ResourceId,
    pub resource_def_id: EntryId,
    #[serde(default)]
    pub maybe_input_dataset: Option<Vec<EntryId>>,
}

/// A method whose output dimension does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PartialMethod {
    pub name: String,
    pub input_dimension_ids: Vec<EntryId>,
    #[serde(default)]
    pub output_dimension_id: Option<EntryId>,
    pub program: Program,
    pub can_compute_live: bool,
    pub must_publish_dataset: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AtomicDimensionMethodInput {
    pub partial_method: PartialMethod,
    pub output_dimension: Dimension,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunMethodInput {
    pub resource_id: ResourceId,
    pub resource_def_id: EntryId,
    pub method_id: EntryId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComputeContextInput {
    pub resource_ids: Vec<ResourceId>,
    pub context_id: EntryId,
    /// Falls back to the engine configuration when omitted.
    #[serde(default)]
    pub can_publish_result: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SetWidgetTrayConfigInput {
    pub resource_def_id: EntryId,
    pub widget_configs: Vec<WidgetBlockConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DimensionRole {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MethodDimensionFilter {
    pub role: DimensionRole,
    pub dimension_id: EntryId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AssessmentsForResourcesFilter {
    #[serde(default)]
    pub resource_ids: Option<Vec<ResourceId>>,
    #[serde(default)]
    pub dimension_ids: Option<Vec<EntryId>>,
}

impl AssessmentsForResourcesFilter {
    pub fn matches(&self, resource_id: &ResourceId, dimension_id: &EntryId) -> bool {
        let resource_ok = self
            .resource_ids
            .as_ref()
            .map_or(true, |ids| ids.contains(resource_id));
        let dimension_ok = self
            .dimension_ids
            .as_ref()
            .map_or(true, |ids| ids.contains(dimension_id));
        resource_ok && dimension_ok
    }
}
