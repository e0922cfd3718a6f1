//! Configuration entries: ranges, dimensions, resource defs, methods and
//! cultural contexts. Every write here is community-activator only.

use crate::error::{EngineError, Result};
use crate::sensemaker::{require_name, require_unique, Sensemaker};
use sensemaker_protocol::{
    CulturalContext, Dimension, EntryId, EntryKind, Identified, Method, Range, ResourceDef,
    ValueKind,
};

impl Sensemaker {
    /// Add a named range to the catalog. Dimensions copy their range by
    /// value, so catalog entries are never consulted during validation.
    pub fn create_range(&self, range: Range) -> Result<Identified<Range>> {
        self.guard().validate_write(EntryKind::Range, self.agent())?;
        validate_range(&range)?;
        self.append(range)
    }

    pub fn get_range(&self, id: &EntryId) -> Result<Identified<Range>> {
        self.fetch(id)
    }

    pub fn get_ranges(&self) -> Result<Vec<Identified<Range>>> {
        self.list()
    }

    pub fn create_dimension(&self, dimension: Dimension) -> Result<Identified<Dimension>> {
        self.guard().validate_write(EntryKind::Dimension, self.agent())?;
        validate_dimension(&dimension)?;
        let created = self.append(dimension)?;
        log::debug!(
            "created dimension {} ({}, computed={})",
            created.id,
            created.entry.name,
            created.entry.computed
        );
        Ok(created)
    }

    pub fn get_dimension(&self, id: &EntryId) -> Result<Identified<Dimension>> {
        self.fetch(id)
    }

    pub fn get_dimensions(&self) -> Result<Vec<Identified<Dimension>>> {
        self.list()
    }

    pub fn create_resource_def(&self, resource_def: ResourceDef) -> Result<Identified<ResourceDef>> {
        self.guard().validate_write(EntryKind::ResourceDef, self.agent())?;
        require_name("resource def", &resource_def.name)?;
        require_unique("resource def dimension_refs", &resource_def.dimension_refs)?;
        for dimension_id in &resource_def.dimension_refs {
            self.resolve::<Dimension>(dimension_id)?;
        }
        self.append(resource_def)
    }

    pub fn get_resource_def(&self, id: &EntryId) -> Result<Identified<ResourceDef>> {
        self.fetch(id)
    }

    pub fn get_resource_defs(&self) -> Result<Vec<Identified<ResourceDef>>> {
        self.list()
    }

    pub fn create_method(&self, method: Method) -> Result<Identified<Method>> {
        self.guard().validate_write(EntryKind::Method, self.agent())?;
        require_name("method", &method.name)?;
        let output = self.resolve::<Dimension>(&method.output_dimension_id)?;
        if !output.entry.computed {
            return Err(EngineError::validation(format!(
                "method output dimension {} must be computed",
                output.id
            )));
        }
        if method.reads(&output.id) {
            return Err(EngineError::validation(
                "method output dimension cannot also be an input",
            ));
        }
        self.validate_method_inputs(&method.input_dimension_ids, output.entry.value_kind())?;
        let created = self.append(method)?;
        log::debug!(
            "created method {} ({:?} over {} inputs)",
            created.id,
            created.entry.program,
            created.entry.input_dimension_ids.len()
        );
        Ok(created)
    }

    pub fn get_method(&self, id: &EntryId) -> Result<Identified<Method>> {
        self.fetch(id)
    }

    pub fn get_methods(&self) -> Result<Vec<Identified<Method>>> {
        self.list()
    }

    pub fn create_cultural_context(
        &self,
        context: CulturalContext,
    ) -> Result<Identified<CulturalContext>> {
        self.guard().validate_write(EntryKind::CulturalContext, self.agent())?;
        require_name("cultural context", &context.name)?;
        let resource_def = self.resolve::<ResourceDef>(&context.resource_def_id)?;

        let order_dims: Vec<EntryId> = context.order_by.iter().map(|(id, _)| id.clone()).collect();
        require_unique("cultural context order_by", &order_dims)?;

        // Threshold value tags are checked when the context is computed, not here.
        for dimension_id in context.dimension_ids() {
            self.resolve::<Dimension>(&dimension_id)?;
            if !resource_def.entry.has_dimension(&dimension_id) {
                return Err(EngineError::validation(format!(
                    "dimension {dimension_id} is not assessable on resource def {}",
                    resource_def.id
                )));
            }
        }
        self.append(context)
    }

    pub fn get_cultural_context(&self, id: &EntryId) -> Result<Identified<CulturalContext>> {
        self.fetch(id)
    }

    pub fn get_cultural_contexts(&self) -> Result<Vec<Identified<CulturalContext>>> {
        self.list()
    }

    /// Inputs must be existing, distinct, subjective dimensions of `output_kind`.
    pub(crate) fn validate_method_inputs(
        &self,
        input_dimension_ids: &[EntryId],
        output_kind: ValueKind,
    ) -> Result<()> {
        if input_dimension_ids.is_empty() {
            return Err(EngineError::validation(
                "method needs at least one input dimension",
            ));
        }
        require_unique("method input_dimension_ids", input_dimension_ids)?;
        for dimension_id in input_dimension_ids {
            let input = self.resolve::<Dimension>(dimension_id)?;
            if input.entry.computed {
                return Err(EngineError::validation(format!(
                    "computed dimension {dimension_id} cannot be a method input"
                )));
            }
            if input.entry.value_kind() != output_kind {
                return Err(EngineError::validation(format!(
                    "input dimension {dimension_id} is {} but the output is {output_kind}",
                    input.entry.value_kind()
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_range(range: &Range) -> Result<()> {
    require_name("range", &range.name)?;
    range.kind.validate().map_err(EngineError::Validation)
}

pub(crate) fn validate_dimension(dimension: &Dimension) -> Result<()> {
    require_name("dimension", &dimension.name)?;
    validate_range(&dimension.range)
}
