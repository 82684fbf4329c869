//! Assignment persistence and slot ownership against a real schema.

use crate::postgres::helpers::{PgEngine, pg_engine, template, version};
use missive::assignment::{
    domain::{ActiveTemplate, NoAssignmentReason, TemplateAssignment},
    ports::{AssignmentRepository, AssignmentRepositoryError},
};
use missive::error::ErrorKind;
use missive::template::domain::{TemplateId, TemplateType};
use missive::template::ports::TemplateRepository;
use missive::tenancy::OwnerId;
use mockable::DefaultClock;
use rstest::rstest;

fn stored_template(engine: &PgEngine, owner_id: OwnerId, template_type: TemplateType) -> TemplateId {
    let subject = template(owner_id, template_type);
    engine
        .rt
        .block_on(engine.templates.create(&subject, &version(&subject, 1, "Ciao")))
        .expect("template stored");
    subject.id()
}

#[rstest]
fn reassignment_keeps_the_original_row(pg_engine: PgEngine) {
    let engine = pg_engine;
    let owner_id = OwnerId::new();
    let agent_id = engine.agent(owner_id);
    let first = stored_template(&engine, owner_id, TemplateType::Opening);
    let original = engine
        .rt
        .block_on(engine.assignments.assign_template(owner_id, agent_id, TemplateType::Opening, first))
        .expect("first assignment");
    engine
        .rt
        .block_on(engine.store.archive_template(first, owner_id))
        .expect("archive");
    let second = stored_template(&engine, owner_id, TemplateType::Opening);

    engine
        .rt
        .block_on(engine.assignments.assign_template(owner_id, agent_id, TemplateType::Opening, second))
        .expect("reassignment");

    let listed = engine
        .rt
        .block_on(engine.assignments.list_agent_assignments(owner_id, agent_id))
        .expect("listing");
    assert_eq!(listed.len(), 1);
    let stored = listed.first().expect("one assignment");
    assert_eq!(stored.id(), original.id());
    assert_eq!(stored.template_id(), second);
    assert_eq!(stored.owner_id(), owner_id);
}

#[rstest]
fn foreign_owner_cannot_overwrite_a_slot(pg_engine: PgEngine) {
    let engine = pg_engine;
    let owner_id = OwnerId::new();
    let agent_id = engine.agent(owner_id);
    let own = stored_template(&engine, owner_id, TemplateType::FollowupGentle);
    let held = engine
        .rt
        .block_on(engine.assignments.assign_template(
            owner_id,
            agent_id,
            TemplateType::FollowupGentle,
            own,
        ))
        .expect("owner assigns");

    let intruder = OwnerId::new();
    let foreign = stored_template(&engine, intruder, TemplateType::FollowupGentle);
    let via_service = engine
        .rt
        .block_on(engine.assignments.assign_template(
            intruder,
            agent_id,
            TemplateType::FollowupGentle,
            foreign,
        ))
        .expect_err("agent belongs to another owner");
    assert_eq!(via_service.kind(), ErrorKind::NotFound);

    let raw = TemplateAssignment::new(
        intruder,
        agent_id,
        TemplateType::FollowupGentle,
        foreign,
        &DefaultClock,
    );
    let via_repository = engine.rt.block_on(engine.assignment_repo.upsert(&raw));
    assert!(
        matches!(via_repository, Err(AssignmentRepositoryError::ForeignSlot { .. })),
        "expected the slot to be refused, got {via_repository:?}"
    );

    let stored = engine
        .rt
        .block_on(engine.assignment_repo.find(agent_id, TemplateType::FollowupGentle))
        .expect("lookup");
    assert_eq!(stored.as_ref().map(TemplateAssignment::id), Some(held.id()));
    assert_eq!(stored.map(|assignment| assignment.template_id()), Some(own));
}

#[rstest]
fn unassigned_slot_falls_back(pg_engine: PgEngine) {
    let engine = pg_engine;
    let owner_id = OwnerId::new();
    let agent_id = engine.agent(owner_id);
    let own = stored_template(&engine, owner_id, TemplateType::Opening);
    engine
        .rt
        .block_on(engine.assignments.assign_template(owner_id, agent_id, TemplateType::Opening, own))
        .expect("assign");
    let assigned = engine
        .rt
        .block_on(engine.assignments.get_active_template_for_agent(agent_id, TemplateType::Opening))
        .expect("lookup");
    assert!(!assigned.is_fallback());

    let removed = engine
        .rt
        .block_on(engine.assignments.unassign_template(owner_id, agent_id, TemplateType::Opening))
        .expect("unassign");
    let after = engine
        .rt
        .block_on(engine.assignments.get_active_template_for_agent(agent_id, TemplateType::Opening))
        .expect("lookup");

    assert!(removed);
    assert_eq!(
        after,
        ActiveTemplate::NoAssignment(NoAssignmentReason::NotAssigned)
    );
}
