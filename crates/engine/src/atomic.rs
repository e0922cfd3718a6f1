use crate::error::{EngineError, Result};
use crate::registry::validate_dimension;
use crate::sensemaker::{require_name, Sensemaker};
use sensemaker_protocol::{
    AtomicDimensionMethodInput, Dimension, EntryKind, Identified, Method,
};

impl Sensemaker {
    /// Create an objective dimension and the method that produces it as one unit.
    ///
    /// The ledger only offers single-entry atomicity, so every check (shape,
    /// references, authorization) runs before the first write. Any rejection
    /// leaves the ledger untouched.
    pub fn atomic_create_dimension_with_method(
        &self,
        input: AtomicDimensionMethodInput,
    ) -> Result<(Identified<Dimension>, Identified<Method>)> {
        let AtomicDimensionMethodInput {
            partial_method,
            output_dimension,
        } = input;

        if !output_dimension.computed {
            return Err(EngineError::MustBeObjectiveDimension);
        }
        if partial_method.output_dimension_id.is_some() {
            return Err(EngineError::UseCreateMethodInstead);
        }
        validate_dimension(&output_dimension)?;
        require_name("method", &partial_method.name)?;
        self.validate_method_inputs(
            &partial_method.input_dimension_ids,
            output_dimension.value_kind(),
        )?;
        self.guard().validate_write(EntryKind::Dimension, self.agent())?;
        self.guard().validate_write(EntryKind::Method, self.agent())?;

        let dimension = self.append(output_dimension)?;
        let method = Method {
            name: partial_method.name,
            input_dimension_ids: partial_method.input_dimension_ids,
            output_dimension_id: dimension.id.clone(),
            program: partial_method.program,
            can_compute_live: partial_method.can_compute_live,
            must_publish_dataset: partial_method.must_publish_dataset,
        };
        let method = self.append(method).map_err(|err| {
            log::error!(
                "method write failed after dimension {} was written: {err}",
                dimension.id
            );
            err
        })?;

        log::info!(
            "atomically created dimension {} with method {}",
            dimension.id,
            method.id
        );
        Ok((dimension, method))
    }
}
