use crate::assessments::LatestValues;
use crate::error::{EngineError, Result};
use crate::sensemaker::Sensemaker;
use sensemaker_protocol::{
    ComputeContextInput, ContextResult, CulturalContext, EntryId, Identified, ResourceId,
};
use std::cmp::Ordering;

impl Sensemaker {
    /// Filter `resource_ids` through the context's thresholds and rank the
    /// survivors by its `order_by` keys.
    ///
    /// One tag mismatch anywhere aborts the whole call. The returned order is
    /// stable, so repeated calls over unchanged state agree.
    pub fn compute_context(&self, input: ComputeContextInput) -> Result<Vec<ResourceId>> {
        let context = self.fetch::<CulturalContext>(&input.context_id)?;

        let mut resource_ids: Vec<ResourceId> = Vec::with_capacity(input.resource_ids.len());
        for resource_id in input.resource_ids {
            if !resource_ids.contains(&resource_id) {
                resource_ids.push(resource_id);
            }
        }

        let dimension_ids = context.entry.dimension_ids();
        let latest = self.latest_values(&resource_ids, &dimension_ids)?;
        let candidates = resource_ids.len();
        let ranked = rank_resources(&context.entry, resource_ids, &latest)?;

        let publish = input
            .can_publish_result
            .unwrap_or(self.config().publish_context_results_by_default);
        if publish {
            let result = self.commit(ContextResult {
                context_id: context.id.clone(),
                resource_ids: ranked.clone(),
                dimension_ids,
            })?;
            log::debug!("published context result {}", result.id);
        }

        log::info!(
            "context {} kept {} of {} resources",
            context.entry.name,
            ranked.len(),
            candidates
        );
        Ok(ranked)
    }

    pub fn get_latest_context_result(&self, context_id: &EntryId) -> Result<Identified<ContextResult>> {
        self.list::<ContextResult>()?
            .into_iter()
            .rev()
            .find(|result| &result.entry.context_id == context_id)
            .ok_or_else(|| EngineError::not_found(format!("context result for {context_id}")))
    }
}

pub(crate) fn rank_resources(
    context: &CulturalContext,
    resource_ids: Vec<ResourceId>,
    latest: &LatestValues,
) -> Result<Vec<ResourceId>> {
    let mut passing = Vec::with_capacity(resource_ids.len());
    for resource_id in resource_ids {
        // Every threshold is checked even after a failure so that a tag
        // mismatch on any resource is always reported.
        let mut passes = true;
        for threshold in &context.thresholds {
            let Some(measured) = latest.get(&resource_id, &threshold.dimension_id) else {
                passes = false;
                continue;
            };
            if measured.kind() != threshold.value.kind() {
                return Err(EngineError::IncompatibleRangeTypes {
                    expected: threshold.value.kind(),
                    found: measured.kind(),
                });
            }
            // NaN satisfies no threshold.
            passes &= measured
                .numeric_cmp(&threshold.value)
                .is_some_and(|ordering| threshold.kind.holds(ordering));
        }
        if passes {
            passing.push(resource_id);
        }
    }

    for (dimension_id, _) in &context.order_by {
        let mut kinds = passing
            .iter()
            .filter_map(|resource_id| latest.get(resource_id, dimension_id))
            .map(|value| value.kind());
        if let Some(expected) = kinds.next() {
            if let Some(found) = kinds.find(|kind| *kind != expected) {
                return Err(EngineError::IncompatibleRangeTypes { expected, found });
            }
        }
    }

    passing.sort_by(|a, b| {
        for (dimension_id, direction) in &context.order_by {
            let ordering = match (latest.get(a, dimension_id), latest.get(b, dimension_id)) {
                (Some(x), Some(y)) => direction.apply(x.compare(&y).unwrap_or(Ordering::Equal)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
    Ok(passing)
}
