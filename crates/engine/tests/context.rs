mod support;

use pretty_assertions::assert_eq;
use sensemaker_engine::{EngineConfig, EngineError};
use sensemaker_protocol::{
    AgentId, ComputeContextInput, CulturalContext, EntryId, OrderingDirection, ResourceId,
    Threshold, ThresholdKind, Value, ValueKind,
};
use support::{assess, fixture, fixture_with, likes_model, Fixture, LikesModel, ACTIVATOR};

fn ids(raw: &[&str]) -> Vec<ResourceId> {
    raw.iter().map(|id| ResourceId::new(*id)).collect()
}

fn above(model: &LikesModel, value: Value) -> Threshold {
    Threshold {
        dimension_id: model.likes.clone(),
        kind: ThresholdKind::GreaterThan,
        value,
    }
}

fn context(fx: &Fixture, model: &LikesModel, threshold: Threshold, direction: OrderingDirection) -> EntryId {
    fx.activator
        .create_cultural_context(CulturalContext {
            name: "hot".to_string(),
            resource_def_id: model.resource_def.clone(),
            thresholds: vec![threshold],
            order_by: vec![(model.likes.clone(), direction)],
        })
        .unwrap()
        .id
}

fn seed(fx: &Fixture, model: &LikesModel) {
    for (resource, likes) in [("R8", 8), ("R4", 4), ("R6", 6)] {
        assess(&fx.member, resource, &model.resource_def, &model.likes, Value::Integer(likes));
    }
}

fn compute(fx: &Fixture, context_id: &EntryId, resources: &[&str]) -> Result<Vec<ResourceId>, EngineError> {
    fx.member.compute_context(ComputeContextInput {
        resource_ids: ids(resources),
        context_id: context_id.clone(),
        can_publish_result: None,
    })
}

#[test]
fn thresholds_filter_and_order_by_ranks() {
    let fx = fixture();
    let model = likes_model(&fx.activator);
    seed(&fx, &model);

    let biggest = context(&fx, &model, above(&model, Value::Integer(5)), OrderingDirection::Biggest);
    assert_eq!(compute(&fx, &biggest, &["R8", "R4", "R6"]).unwrap(), ids(&["R8", "R6"]));

    let smallest = context(&fx, &model, above(&model, Value::Integer(5)), OrderingDirection::Smallest);
    assert_eq!(compute(&fx, &smallest, &["R8", "R4", "R6"]).unwrap(), ids(&["R6", "R8"]));
}

#[test]
fn results_are_stable_across_calls() {
    let fx = fixture();
    let model = likes_model(&fx.activator);
    for resource in ["a", "b", "c", "d"] {
        assess(&fx.member, resource, &model.resource_def, &model.likes, Value::Integer(7));
    }
    let ctx = context(&fx, &model, above(&model, Value::Integer(5)), OrderingDirection::Biggest);

    let first = compute(&fx, &ctx, &["c", "a", "d", "b"]).unwrap();
    assert_eq!(first, ids(&["c", "a", "d", "b"]));
    assert_eq!(compute(&fx, &ctx, &["c", "a", "d", "b"]).unwrap(), first);
}

#[test]
fn latest_assessment_is_the_current_value() {
    let fx = fixture();
    let model = likes_model(&fx.activator);
    seed(&fx, &model);
    assess(&fx.member, "R4", &model.resource_def, &model.likes, Value::Integer(10));
    let ctx = context(&fx, &model, above(&model, Value::Integer(5)), OrderingDirection::Biggest);

    assert_eq!(
        compute(&fx, &ctx, &["R8", "R4", "R6"]).unwrap(),
        ids(&["R4", "R8", "R6"])
    );
}

#[test]
fn unassessed_and_duplicate_resources() {
    let fx = fixture();
    let model = likes_model(&fx.activator);
    seed(&fx, &model);
    let ctx = context(&fx, &model, above(&model, Value::Integer(0)), OrderingDirection::Smallest);

    assert_eq!(
        compute(&fx, &ctx, &["R6", "ghost", "R6", "R4"]).unwrap(),
        ids(&["R4", "R6"])
    );
    assert!(compute(&fx, &ctx, &[]).unwrap().is_empty());
}

#[test]
fn mismatched_threshold_tag_aborts() {
    let fx = fixture();
    let model = likes_model(&fx.activator);
    seed(&fx, &model);
    let ctx = context(&fx, &model, above(&model, Value::Float(5.0)), OrderingDirection::Biggest);

    let err = compute(&fx, &ctx, &["R8", "R4", "R6"]).unwrap_err();
    match err {
        EngineError::IncompatibleRangeTypes { expected, found } => {
            assert_eq!(expected, ValueKind::Float);
            assert_eq!(found, ValueKind::Integer);
        }
        other => panic!("expected IncompatibleRangeTypes, got {other:?}"),
    }
    assert!(fx
        .member
        .get_latest_context_result(&ctx)
        .is_err());
}

#[test]
fn unknown_context_is_not_found() {
    let fx = fixture();
    let err = compute(&fx, &EntryId::new("nope"), &["R"]).unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)), "{err:?}");
}

#[test]
fn context_dimensions_must_belong_to_resource_def() {
    let fx = fixture();
    let model = likes_model(&fx.activator);
    let stray = fx
        .activator
        .create_dimension(support::integer_dimension("stray", 0, 1, false))
        .unwrap()
        .id;

    let err = fx
        .activator
        .create_cultural_context(CulturalContext {
            name: "stray".to_string(),
            resource_def_id: model.resource_def.clone(),
            thresholds: vec![],
            order_by: vec![(stray, OrderingDirection::Biggest)],
        })
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)), "{err:?}");
}

#[test]
fn publishing_follows_configuration_default() {
    let mut config = EngineConfig::new(AgentId::new(ACTIVATOR));
    config.publish_context_results_by_default = true;
    let fx = fixture_with(config);
    let model = likes_model(&fx.activator);
    seed(&fx, &model);
    let ctx = context(&fx, &model, above(&model, Value::Integer(5)), OrderingDirection::Biggest);

    let ranked = compute(&fx, &ctx, &["R8", "R4", "R6"]).unwrap();
    let published = fx.member.get_latest_context_result(&ctx).unwrap();
    assert_eq!(published.entry.resource_ids, ranked);
    assert_eq!(published.entry.dimension_ids, vec![model.likes.clone()]);

    let before = fx.ledger.len();
    fx.member
        .compute_context(ComputeContextInput {
            resource_ids: ids(&["R8"]),
            context_id: ctx,
            can_publish_result: Some(false),
        })
        .unwrap();
    assert_eq!(fx.ledger.len(), before);
}

#[test]
fn signed_zero_assessments_meet_float_thresholds_numerically() {
    let fx = fixture();
    let balance = fx
        .activator
        .create_dimension(support::float_dimension("balance", -1.0, 1.0, false))
        .unwrap()
        .id;
    let rd = support::resource_def(&fx.activator, "ledger-line", &[&balance]);
    assess(&fx.member, "neg_zero", &rd, &balance, Value::Float(-0.0));
    assess(&fx.member, "pos_zero", &rd, &balance, Value::Float(0.0));

    let threshold_context = |kind: ThresholdKind, value: Value| {
        fx.activator
            .create_cultural_context(CulturalContext {
                name: format!("{kind:?}"),
                resource_def_id: rd.clone(),
                thresholds: vec![Threshold {
                    dimension_id: balance.clone(),
                    kind,
                    value,
                }],
                order_by: vec![],
            })
            .unwrap()
            .id
    };

    let equal = threshold_context(ThresholdKind::Equal, Value::Float(0.0));
    assert_eq!(
        compute(&fx, &equal, &["neg_zero", "pos_zero"]).unwrap(),
        ids(&["neg_zero", "pos_zero"])
    );

    let above_neg_zero = threshold_context(ThresholdKind::GreaterThan, Value::Float(-0.0));
    assert!(compute(&fx, &above_neg_zero, &["neg_zero", "pos_zero"])
        .unwrap()
        .is_empty());
}
