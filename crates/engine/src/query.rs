use crate::error::Result;
use crate::sensemaker::Sensemaker;
use sensemaker_protocol::{
    Assessment, AssessmentsForResourcesFilter, DimensionRole, Identified, Method,
    MethodDimensionFilter, ResourceId,
};
use std::collections::BTreeMap;

impl Sensemaker {
    /// Methods reading (`Input`) or producing (`Output`) a dimension; all
    /// methods when `filter` is `None`.
    pub fn get_methods_for_dimension(
        &self,
        filter: Option<MethodDimensionFilter>,
    ) -> Result<Vec<Identified<Method>>> {
        let methods = self.get_methods()?;
        let Some(filter) = filter else {
            return Ok(methods);
        };
        let matching: Vec<_> = methods
            .into_iter()
            .filter(|method| match filter.role {
                DimensionRole::Input => method.entry.reads(&filter.dimension_id),
                DimensionRole::Output => method.entry.output_dimension_id == filter.dimension_id,
            })
            .collect();
        log::debug!(
            "{} methods use {} as {:?}",
            matching.len(),
            filter.dimension_id,
            filter.role
        );
        Ok(matching)
    }

    /// Assessments grouped by resource, each group in ledger order. An empty
    /// filter groups every assessed resource.
    pub fn get_assessments_for_resources(
        &self,
        filter: AssessmentsForResourcesFilter,
    ) -> Result<BTreeMap<ResourceId, Vec<Identified<Assessment>>>> {
        let mut grouped: BTreeMap<ResourceId, Vec<Identified<Assessment>>> = BTreeMap::new();
        if let Some(resource_ids) = &filter.resource_ids {
            for resource_id in resource_ids {
                grouped.entry(resource_id.clone()).or_default();
            }
        }
        for assessment in self
            .assessments_matching(|a| filter.matches(&a.resource_id, &a.dimension_id))?
        {
            grouped
                .entry(assessment.entry.resource_id.clone())
                .or_default()
                .push(assessment);
        }
        Ok(grouped)
    }
}
