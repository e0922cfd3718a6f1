#![allow(dead_code)]

use sensemaker_engine::{EngineConfig, Sensemaker};
use sensemaker_ledger::MemoryLedger;
use sensemaker_protocol::{
    AgentId, CreateAssessmentInput, Dimension, EntryId, Identified, Method, Program, Range,
    RangeKind, ResourceDef, ResourceId, Value,
};
use std::collections::BTreeSet;
use std::sync::Arc;

pub const ACTIVATOR: &str = "agent-activator";
pub const MEMBER: &str = "agent-member";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub struct Fixture {
    pub ledger: Arc<MemoryLedger>,
    pub activator: Sensemaker,
    pub member: Sensemaker,
}

pub fn fixture() -> Fixture {
    fixture_with(EngineConfig::new(AgentId::new(ACTIVATOR)))
}

pub fn fixture_with(config: EngineConfig) -> Fixture {
    init_logging();
    let ledger = Arc::new(MemoryLedger::new());
    let activator = Sensemaker::new(ledger.clone(), config, AgentId::new(ACTIVATOR));
    let member = activator.as_agent(AgentId::new(MEMBER));
    Fixture {
        ledger,
        activator,
        member,
    }
}

pub fn integer_dimension(name: &str, min: i64, max: i64, computed: bool) -> Dimension {
    Dimension {
        name: name.to_string(),
        range: Range {
            name: format!("{min}-{max}"),
            kind: RangeKind::Integer { min, max },
        },
        computed,
    }
}

pub fn float_dimension(name: &str, min: f64, max: f64, computed: bool) -> Dimension {
    Dimension {
        name: name.to_string(),
        range: Range {
            name: format!("{min}-{max}"),
            kind: RangeKind::Float { min, max },
        },
        computed,
    }
}

pub fn resource_def(engine: &Sensemaker, name: &str, dimension_refs: &[&EntryId]) -> EntryId {
    engine
        .create_resource_def(ResourceDef {
            name: name.to_string(),
            base_types: BTreeSet::from(["post".to_string()]),
            dimension_refs: dimension_refs.iter().map(|id| (*id).clone()).collect(),
        })
        .expect("resource def")
        .id
}

pub fn method(name: &str, inputs: &[&EntryId], output: &EntryId, program: Program) -> Method {
    Method {
        name: name.to_string(),
        input_dimension_ids: inputs.iter().map(|id| (*id).clone()).collect(),
        output_dimension_id: output.clone(),
        program,
        can_compute_live: false,
        must_publish_dataset: false,
    }
}

pub fn assess(
    engine: &Sensemaker,
    resource: &str,
    resource_def_id: &EntryId,
    dimension_id: &EntryId,
    value: Value,
) -> Identified<sensemaker_protocol::Assessment> {
    engine
        .create_assessment(CreateAssessmentInput {
            value,
            dimension_id: dimension_id.clone(),
            resource_id: ResourceId::new(resource),
            resource_def_id: resource_def_id.clone(),
            maybe_input_dataset: None,
        })
        .expect("assessment")
}

/// Subjective `likes` (Integer 0..=10), objective `total_likes`, and a
/// resource def carrying both.
pub struct LikesModel {
    pub likes: EntryId,
    pub total_likes: EntryId,
    pub resource_def: EntryId,
}

pub fn likes_model(engine: &Sensemaker) -> LikesModel {
    let likes = engine
        .create_dimension(integer_dimension("likes", 0, 10, false))
        .expect("likes")
        .id;
    let total_likes = engine
        .create_dimension(integer_dimension("total_likes", 0, 1_000_000, true))
        .expect("total_likes")
        .id;
    let resource_def = resource_def(engine, "post", &[&likes, &total_likes]);
    LikesModel {
        likes,
        total_likes,
        resource_def,
    }
}
