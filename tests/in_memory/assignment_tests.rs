//! Assignment tests across template edits and archiving.
//!
//! Tests that agents always send the active version of their assigned
//! template and fall back cleanly when it disappears.

use crate::in_memory::helpers::{add_agent, create_opening, engine, owner_id, runtime};
use missive::assignment::domain::{ActiveTemplate, NoAssignmentReason};
use missive::error::ErrorKind;
use missive::template::{domain::TemplateType, validation::VariableMapping};
use missive::tenancy::OwnerId;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// A new version reaches the agent without reassigning.
#[rstest]
fn assigned_agent_follows_the_active_version(runtime: io::Result<Runtime>, owner_id: OwnerId) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let template_id = detail.template().id();
    let agent_id = add_agent(&engine, owner_id);

    rt.block_on(engine.assignments.assign_template(
        owner_id,
        agent_id,
        TemplateType::Opening,
        template_id,
    ))
    .expect("assign");
    rt.block_on(engine.store.create_new_version(
        template_id,
        owner_id,
        "Salve {nome_lead}",
        &[VariableMapping::new("nome_lead", 1)],
    ))
    .expect("new version");

    let active = rt
        .block_on(engine.assignments.get_active_template_for_agent(agent_id, TemplateType::Opening))
        .expect("lookup");
    assert!(!active.is_fallback());
    let version = active.version().expect("assigned version");
    assert_eq!(version.version_number().value(), 2);
    assert_eq!(version.body(), "Salve {nome_lead}");
}

/// Archiving the assigned template makes the agent fall back.
#[rstest]
fn archived_assignment_falls_back(runtime: io::Result<Runtime>, owner_id: OwnerId) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let template_id = detail.template().id();
    let agent_id = add_agent(&engine, owner_id);
    rt.block_on(engine.assignments.assign_template(
        owner_id,
        agent_id,
        TemplateType::Opening,
        template_id,
    ))
    .expect("assign");

    rt.block_on(engine.store.archive_template(template_id, owner_id))
        .expect("archive");

    let active = rt
        .block_on(engine.assignments.get_active_template_for_agent(agent_id, TemplateType::Opening))
        .expect("lookup fails open");
    assert!(matches!(
        active,
        ActiveTemplate::NoAssignment(NoAssignmentReason::TemplateArchived)
    ));

    let err = rt
        .block_on(engine.assignments.assign_template(
            owner_id,
            agent_id,
            TemplateType::Opening,
            template_id,
        ))
        .expect_err("archived templates cannot be assigned");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

/// Slots are independent per type, and unassigning clears only one.
#[rstest]
fn unassigning_clears_a_single_slot(runtime: io::Result<Runtime>, owner_id: OwnerId) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let agent_id = add_agent(&engine, owner_id);
    rt.block_on(engine.assignments.assign_template(
        owner_id,
        agent_id,
        TemplateType::Opening,
        detail.template().id(),
    ))
    .expect("assign");

    let followup = rt
        .block_on(engine.assignments.get_active_template_for_agent(
            agent_id,
            TemplateType::FollowupGentle,
        ))
        .expect("lookup");
    assert!(matches!(
        followup,
        ActiveTemplate::NoAssignment(NoAssignmentReason::NotAssigned)
    ));

    assert!(
        !rt.block_on(engine.assignments.unassign_template(
            OwnerId::new(),
            agent_id,
            TemplateType::Opening,
        ))
        .expect("foreign unassign"),
        "another owner cannot clear the slot"
    );
    assert!(
        rt.block_on(engine.assignments.unassign_template(owner_id, agent_id, TemplateType::Opening))
            .expect("unassign")
    );
    let opening = rt
        .block_on(engine.assignments.get_active_template_for_agent(agent_id, TemplateType::Opening))
        .expect("lookup");
    assert!(opening.is_fallback());
}

/// Another owner can neither take over nor list an agent's slots.
#[rstest]
fn agent_slots_stay_with_their_owner(runtime: io::Result<Runtime>, owner_id: OwnerId) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let own = create_opening(&rt, &engine, owner_id);
    let agent_id = add_agent(&engine, owner_id);
    rt.block_on(engine.assignments.assign_template(
        owner_id,
        agent_id,
        TemplateType::Opening,
        own.template().id(),
    ))
    .expect("assign");

    let intruder = OwnerId::new();
    let foreign = create_opening(&rt, &engine, intruder);
    let err = rt
        .block_on(engine.assignments.assign_template(
            intruder,
            agent_id,
            TemplateType::Opening,
            foreign.template().id(),
        ))
        .expect_err("foreign agent");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let listing = rt.block_on(engine.assignments.list_agent_assignments(intruder, agent_id));
    assert!(listing.is_err_and(|listing_err| listing_err.kind() == ErrorKind::NotFound));

    let active = rt
        .block_on(engine.assignments.get_active_template_for_agent(agent_id, TemplateType::Opening))
        .expect("lookup");
    let ActiveTemplate::Assigned { template, .. } = active else {
        panic!("owner keeps the slot, got {active:?}");
    };
    assert_eq!(template.owner_id(), owner_id);
    let listed = rt
        .block_on(engine.assignments.list_agent_assignments(owner_id, agent_id))
        .expect("owner lists");
    assert_eq!(listed.len(), 1);
}
