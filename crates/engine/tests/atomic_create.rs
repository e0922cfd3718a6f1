mod support;

use pretty_assertions::assert_eq;
use sensemaker_engine::{EngineError, Sensemaker};
use sensemaker_protocol::{
    AtomicDimensionMethodInput, EntryId, PartialMethod, Program, ResourceId, RunMethodInput, Value,
};
use support::{assess, fixture, float_dimension, integer_dimension, resource_def};

fn partial(inputs: &[&EntryId]) -> PartialMethod {
    PartialMethod {
        name: "total".to_string(),
        input_dimension_ids: inputs.iter().map(|id| (*id).clone()).collect(),
        output_dimension_id: None,
        program: Program::Sum,
        can_compute_live: true,
        must_publish_dataset: false,
    }
}

fn counts(engine: &Sensemaker) -> (usize, usize) {
    (
        engine.get_dimensions().unwrap().len(),
        engine.get_methods().unwrap().len(),
    )
}

#[test]
fn creates_dimension_and_method_together() {
    let fx = fixture();
    let likes = fx
        .activator
        .create_dimension(integer_dimension("likes", 0, 10, false))
        .unwrap()
        .id;

    let (dimension, method) = fx
        .activator
        .atomic_create_dimension_with_method(AtomicDimensionMethodInput {
            partial_method: partial(&[&likes]),
            output_dimension: integer_dimension("total_likes", 0, 1_000_000, true),
        })
        .unwrap();

    assert!(dimension.entry.computed);
    assert_eq!(method.entry.output_dimension_id, dimension.id);
    assert_eq!(method.entry.input_dimension_ids, vec![likes.clone()]);
    assert_eq!(fx.activator.get_method(&method.id).unwrap(), method);
    assert_eq!(counts(&fx.activator), (2, 1));

    let rd = resource_def(&fx.activator, "post", &[&likes, &dimension.id]);
    assess(&fx.member, "R", &rd, &likes, Value::Integer(4));
    let preview = fx
        .member
        .compute_method_live(RunMethodInput {
            resource_id: ResourceId::new("R"),
            resource_def_id: rd,
            method_id: method.id,
        })
        .unwrap();
    assert_eq!(preview, Value::Integer(4));
}

#[test]
fn subjective_output_is_rejected_without_writes() {
    let fx = fixture();
    let likes = fx
        .activator
        .create_dimension(integer_dimension("likes", 0, 10, false))
        .unwrap()
        .id;
    let before = counts(&fx.activator);

    let err = fx
        .activator
        .atomic_create_dimension_with_method(AtomicDimensionMethodInput {
            partial_method: partial(&[&likes]),
            output_dimension: integer_dimension("total_likes", 0, 1_000_000, false),
        })
        .unwrap_err();
    assert!(matches!(err, EngineError::MustBeObjectiveDimension), "{err:?}");
    assert_eq!(counts(&fx.activator), before);
}

#[test]
fn preset_output_id_is_rejected_without_writes() {
    let fx = fixture();
    let likes = fx
        .activator
        .create_dimension(integer_dimension("likes", 0, 10, false))
        .unwrap()
        .id;
    let before = counts(&fx.activator);

    let err = fx
        .activator
        .atomic_create_dimension_with_method(AtomicDimensionMethodInput {
            partial_method: PartialMethod {
                output_dimension_id: Some(likes.clone()),
                ..partial(&[&likes])
            },
            output_dimension: integer_dimension("total_likes", 0, 1_000_000, true),
        })
        .unwrap_err();
    assert!(matches!(err, EngineError::UseCreateMethodInstead), "{err:?}");
    assert_eq!(counts(&fx.activator), before);
}

#[test]
fn bad_inputs_and_unauthorized_callers_write_nothing() {
    let fx = fixture();
    let likes = fx
        .activator
        .create_dimension(integer_dimension("likes", 0, 10, false))
        .unwrap()
        .id;
    let before = counts(&fx.activator);

    let missing = EntryId::new("missing");
    let err = fx
        .activator
        .atomic_create_dimension_with_method(AtomicDimensionMethodInput {
            partial_method: partial(&[&missing]),
            output_dimension: integer_dimension("total", 0, 100, true),
        })
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)), "{err:?}");

    let err = fx
        .activator
        .atomic_create_dimension_with_method(AtomicDimensionMethodInput {
            partial_method: partial(&[&likes]),
            output_dimension: float_dimension("total", 0.0, 100.0, true),
        })
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)), "{err:?}");

    let err = fx
        .member
        .atomic_create_dimension_with_method(AtomicDimensionMethodInput {
            partial_method: partial(&[&likes]),
            output_dimension: integer_dimension("total", 0, 100, true),
        })
        .unwrap_err();
    assert!(matches!(err, EngineError::NotCommunityActivator { .. }), "{err:?}");

    assert_eq!(counts(&fx.activator), before);
}
