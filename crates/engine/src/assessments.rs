use crate::error::{EngineError, Result};
use crate::sensemaker::Sensemaker;
use sensemaker_ledger::current_unix_ms;
use sensemaker_protocol::{
    Assessment, CreateAssessmentInput, Dimension, EntryId, Identified, ResourceDef, ResourceId,
    Value,
};
use std::collections::HashMap;

/// Latest value per (resource, dimension), as seen in ledger order.
#[derive(Debug, Default)]
pub(crate) struct LatestValues {
    by_resource: HashMap<ResourceId, HashMap<EntryId, Value>>,
}

impl LatestValues {
    pub(crate) fn record(&mut self, resource_id: ResourceId, dimension_id: EntryId, value: Value) {
        self.by_resource
            .entry(resource_id)
            .or_default()
            .insert(dimension_id, value);
    }

    pub(crate) fn get(&self, resource_id: &ResourceId, dimension_id: &EntryId) -> Option<Value> {
        self.by_resource
            .get(resource_id)
            .and_then(|values| values.get(dimension_id))
            .copied()
    }
}

impl Sensemaker {
    /// Record a hand-entered rating on a subjective dimension.
    ///
    /// Open to every agent. Objective dimensions only receive values from
    /// [`Sensemaker::run_method`].
    pub fn create_assessment(&self, input: CreateAssessmentInput) -> Result<Identified<Assessment>> {
        let dimension = self.resolve::<Dimension>(&input.dimension_id)?;
        if dimension.entry.computed {
            return Err(EngineError::validation(format!(
                "dimension {} is computed; its assessments come from run_method",
                dimension.id
            )));
        }
        let resource_def = self.resolve::<ResourceDef>(&input.resource_def_id)?;
        if !resource_def.entry.has_dimension(&dimension.id) {
            return Err(EngineError::validation(format!(
                "dimension {} is not assessable on resource def {}",
                dimension.id, resource_def.id
            )));
        }

        let expected = dimension.entry.value_kind();
        if input.value.kind() != expected {
            return Err(EngineError::TypeMismatch {
                expected,
                found: input.value.kind(),
            });
        }
        if self.config().validate_assessment_bounds && !dimension.entry.range.kind.contains(&input.value) {
            return Err(EngineError::validation(format!(
                "{} is outside range {} of dimension {}",
                input.value, dimension.entry.range.name, dimension.id
            )));
        }
        if let Some(dataset) = &input.maybe_input_dataset {
            for assessment_id in dataset {
                self.resolve::<Assessment>(assessment_id)?;
            }
        }

        let assessment = Assessment {
            value: input.value,
            dimension_id: input.dimension_id,
            resource_id: input.resource_id,
            resource_def_id: input.resource_def_id,
            author: self.agent().clone(),
            timestamp: current_unix_ms(),
            maybe_input_dataset: input.maybe_input_dataset,
        };
        let created = self.append(assessment)?;
        log::debug!(
            "assessment {} = {} on {} by {}",
            created.id,
            created.entry.value,
            created.entry.resource_id,
            created.entry.author
        );
        Ok(created)
    }

    pub fn get_assessment(&self, id: &EntryId) -> Result<Identified<Assessment>> {
        self.fetch(id)
    }

    /// Every assessment in ledger order.
    pub fn get_all_assessments(&self) -> Result<Vec<Identified<Assessment>>> {
        self.list()
    }

    pub(crate) fn assessments_matching(
        &self,
        mut predicate: impl FnMut(&Assessment) -> bool,
    ) -> Result<Vec<Identified<Assessment>>> {
        Ok(self
            .list::<Assessment>()?
            .into_iter()
            .filter(|assessment| predicate(&assessment.entry))
            .collect())
    }

    /// Most recent value for each requested (resource, dimension) pair.
    pub(crate) fn latest_values(
        &self,
        resource_ids: &[ResourceId],
        dimension_ids: &[EntryId],
    ) -> Result<LatestValues> {
        let mut latest = LatestValues::default();
        let matching = self.assessments_matching(|a| {
            resource_ids.contains(&a.resource_id) && dimension_ids.contains(&a.dimension_id)
        })?;
        for assessment in matching {
            let Assessment {
                value,
                dimension_id,
                resource_id,
                ..
            } = assessment.entry;
            latest.record(resource_id, dimension_id, value);
        }
        Ok(latest)
    }
}
