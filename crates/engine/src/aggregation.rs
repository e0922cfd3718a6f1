use crate::error::{EngineError, Result};
use crate::sensemaker::Sensemaker;
use sensemaker_ledger::current_unix_ms;
use sensemaker_protocol::{
    Assessment, Dimension, EntryId, Identified, Method, Program, ResourceDef, RunMethodInput,
    Value, ValueKind,
};

/// Apply `program` to `values`, all of which must carry the `kind` tag.
///
/// Integer averages truncate toward zero; float averages are exact.
pub fn aggregate(program: Program, kind: ValueKind, values: &[Value]) -> Result<Value> {
    if values.is_empty() {
        return Err(EngineError::validation("cannot aggregate an empty value set"));
    }

    match kind {
        ValueKind::Integer => {
            let mut sum: i64 = 0;
            for value in values {
                let Value::Integer(v) = value else {
                    return Err(mismatch(kind, value));
                };
                sum = sum
                    .checked_add(*v)
                    .ok_or_else(|| EngineError::Overflow(format!("{program:?}")))?;
            }
            match program {
                Program::Sum => Ok(Value::Integer(sum)),
                Program::Average => {
                    let count = i64::try_from(values.len())
                        .map_err(|_| EngineError::Overflow(format!("{program:?}")))?;
                    Ok(Value::Integer(sum / count))
                }
            }
        }
        ValueKind::Float => {
            let mut sum = 0.0_f64;
            for value in values {
                let Value::Float(v) = value else {
                    return Err(mismatch(kind, value));
                };
                sum += v;
            }
            if !sum.is_finite() {
                return Err(EngineError::Overflow(format!("{program:?}")));
            }
            match program {
                Program::Sum => Ok(Value::Float(sum)),
                #[allow(clippy::cast_precision_loss)]
                Program::Average => Ok(Value::Float(sum / values.len() as f64)),
            }
        }
    }
}

fn mismatch(expected: ValueKind, value: &Value) -> EngineError {
    EngineError::TypeMismatch {
        expected,
        found: value.kind(),
    }
}

struct MethodRun {
    method: Identified<Method>,
    output_kind: ValueKind,
    inputs: Vec<Identified<Assessment>>,
}

impl MethodRun {
    fn values(&self) -> Vec<Value> {
        self.inputs.iter().map(|a| a.entry.value).collect()
    }

    fn evaluate(&self) -> Result<Value> {
        aggregate(self.method.entry.program, self.output_kind, &self.values())
    }
}

impl Sensemaker {
    /// Run a method over every input assessment of one resource and append
    /// the result as a new objective assessment authored by the caller.
    ///
    /// Assessments are not deduplicated by author, and repeated runs append
    /// repeated results.
    pub fn run_method(&self, input: RunMethodInput) -> Result<Identified<Assessment>> {
        let run = self.prepare_method_run(&input)?;
        let value = run.evaluate()?;

        let maybe_input_dataset = run
            .method
            .entry
            .must_publish_dataset
            .then(|| run.inputs.iter().map(|a| a.id.clone()).collect());
        let assessment = Assessment {
            value,
            dimension_id: run.method.entry.output_dimension_id.clone(),
            resource_id: input.resource_id,
            resource_def_id: input.resource_def_id,
            author: self.agent().clone(),
            timestamp: current_unix_ms(),
            maybe_input_dataset,
        };
        let created = self.commit(assessment)?;
        log::info!(
            "method {} over {} inputs on {} -> {}",
            run.method.entry.name,
            run.inputs.len(),
            created.entry.resource_id,
            created.entry.value
        );
        Ok(created)
    }

    /// Evaluate a method without persisting anything. Only methods flagged
    /// `can_compute_live` may be previewed.
    pub fn compute_method_live(&self, input: RunMethodInput) -> Result<Value> {
        let run = self.prepare_method_run(&input)?;
        if !run.method.entry.can_compute_live {
            return Err(EngineError::validation(format!(
                "method {} cannot be computed live",
                run.method.id
            )));
        }
        run.evaluate()
    }

    fn prepare_method_run(&self, input: &RunMethodInput) -> Result<MethodRun> {
        let method = self.fetch::<Method>(&input.method_id)?;
        let resource_def = self.fetch::<ResourceDef>(&input.resource_def_id)?;

        let missing: Vec<&EntryId> = method
            .entry
            .input_dimension_ids
            .iter()
            .chain(std::iter::once(&method.entry.output_dimension_id))
            .filter(|id| !resource_def.entry.has_dimension(id))
            .collect();
        if !missing.is_empty() {
            let missing: Vec<&str> = missing.iter().map(|id| id.as_str()).collect();
            return Err(EngineError::InvalidConfiguration(format!(
                "resource def {} does not include method dimension(s) {}",
                resource_def.id,
                missing.join(", ")
            )));
        }

        let output_kind = self
            .fetch::<Dimension>(&method.entry.output_dimension_id)?
            .entry
            .value_kind();
        for dimension_id in &method.entry.input_dimension_ids {
            let found = self.fetch::<Dimension>(dimension_id)?.entry.value_kind();
            if found != output_kind {
                return Err(EngineError::TypeMismatch {
                    expected: output_kind,
                    found,
                });
            }
        }

        let inputs = self.assessments_matching(|a| {
            a.resource_id == input.resource_id && method.entry.reads(&a.dimension_id)
        })?;
        if inputs.is_empty() {
            return Err(EngineError::NoInputs {
                method_id: method.id,
                resource_id: input.resource_id.clone(),
            });
        }

        Ok(MethodRun {
            method,
            output_kind,
            inputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn integer_sum_and_truncating_average() {
        let values = [Value::Integer(2), Value::Integer(4)];
        assert_eq!(
            aggregate(Program::Sum, ValueKind::Integer, &values).unwrap(),
            Value::Integer(6)
        );
        assert_eq!(
            aggregate(Program::Average, ValueKind::Integer, &values).unwrap(),
            Value::Integer(3)
        );
        assert_eq!(
            aggregate(
                Program::Average,
                ValueKind::Integer,
                &[Value::Integer(1), Value::Integer(2)]
            )
            .unwrap(),
            Value::Integer(1)
        );
    }

    #[test]
    fn float_average_is_exact() {
        let values = [Value::Float(-2.0), Value::Float(3.0)];
        assert_eq!(
            aggregate(Program::Average, ValueKind::Float, &values).unwrap(),
            Value::Float(0.5)
        );
    }

    #[test]
    fn mixed_tags_are_rejected() {
        let err = aggregate(
            Program::Sum,
            ValueKind::Integer,
            &[Value::Integer(1), Value::Float(1.0)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::TypeMismatch {
                expected: ValueKind::Integer,
                found: ValueKind::Float
            }
        ));
    }

    #[test]
    fn integer_overflow_is_reported() {
        let err = aggregate(
            Program::Sum,
            ValueKind::Integer,
            &[Value::Integer(i64::MAX), Value::Integer(1)],
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Overflow(_)));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(aggregate(Program::Sum, ValueKind::Float, &[]).is_err());
    }

    proptest! {
        #[test]
        fn proptest_integer_average_stays_within_bounds(
            raw in proptest::collection::vec(-1_000_000i64..1_000_000i64, 1..64)
        ) {
            let values: Vec<Value> = raw.iter().copied().map(Value::Integer).collect();
            let sum = aggregate(Program::Sum, ValueKind::Integer, &values).unwrap();
            prop_assert_eq!(sum, Value::Integer(raw.iter().sum()));

            let Value::Integer(avg) = aggregate(Program::Average, ValueKind::Integer, &values).unwrap() else {
                panic!("integer average must stay an integer");
            };
            let min = *raw.iter().min().unwrap();
            let max = *raw.iter().max().unwrap();
            prop_assert!(min <= avg && avg <= max);
        }

        #[test]
        fn proptest_float_sum_preserves_tag(
            raw in proptest::collection::vec(-1.0e6f64..1.0e6f64, 1..64)
        ) {
            let values: Vec<Value> = raw.iter().copied().map(Value::Float).collect();
            let sum = aggregate(Program::Sum, ValueKind::Float, &values).unwrap();
            prop_assert_eq!(sum.kind(), ValueKind::Float);
        }
    }
}
