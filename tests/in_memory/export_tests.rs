//! Export tests against the in-memory content registry.
//!
//! Tests positional conversion, per-version registry names, and approval sync.

use crate::in_memory::helpers::{add_credentials, create_opening, engine, owner_id, runtime};
use missive::error::ErrorKind;
use missive::export::services::ExportServiceError;
use missive::template::{
    domain::{ApprovalStatus, VersionNumber},
    validation::VariableMapping,
};
use missive::tenancy::OwnerId;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Exporting sends a positional body and records the registry identifier.
#[rstest]
fn export_submits_positional_body(runtime: io::Result<Runtime>, owner_id: OwnerId) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let template_id = detail.template().id();
    add_credentials(&engine, owner_id);

    let outcome = rt
        .block_on(engine.exporter.export_version(template_id, owner_id, None))
        .expect("export");

    assert_eq!(outcome.friendly_name.as_str(), "primo_contatto_v1");
    assert_eq!(outcome.approval_status, ApprovalStatus::PendingApproval);
    let submission = engine
        .registry
        .submission(&outcome.content_id)
        .expect("registry lookup")
        .expect("content was created");
    assert_eq!(
        submission.body,
        "Ciao {{1}}, sono {{2}} di {{3}}. Mi hai scritto per {{4}}."
    );
    assert_eq!(submission.variable_descriptions.len(), 4);

    let stored = rt
        .block_on(engine.store.get_version(template_id, owner_id, VersionNumber::FIRST))
        .expect("lookup")
        .expect("version exists");
    assert_eq!(stored.sync().content_id(), Some(outcome.content_id.as_str()));
    assert_eq!(stored.sync().approval_status(), ApprovalStatus::PendingApproval);
    assert!(stored.sync().last_synced_at().is_some());
}

/// Each version registers under its own name, and a sync picks up
/// approvals made out of band.
#[rstest]
fn versions_export_separately_and_sync_statuses(
    runtime: io::Result<Runtime>,
    owner_id: OwnerId,
) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let template_id = detail.template().id();
    add_credentials(&engine, owner_id);

    let first = rt
        .block_on(engine.exporter.export_version(template_id, owner_id, None))
        .expect("first export");
    rt.block_on(engine.store.create_new_version(
        template_id,
        owner_id,
        "Salve {nome_lead}",
        &[VariableMapping::new("nome_lead", 1)],
    ))
    .expect("new version");
    let second = rt
        .block_on(engine.exporter.export_version(template_id, owner_id, None))
        .expect("second export");

    assert_ne!(first.content_id, second.content_id);
    assert_eq!(
        engine.registry.friendly_names().expect("names"),
        vec!["primo_contatto_v1".to_owned(), "primo_contatto_v2".to_owned()]
    );

    engine
        .registry
        .set_status(&first.content_id, "approved")
        .expect("status set");
    let report = rt
        .block_on(engine.exporter.sync_approval_statuses(owner_id, None))
        .expect("sync");

    assert!(report.failures.is_empty());
    assert_eq!(report.updated.len(), 2);
    assert_eq!(report.changed(), 1);
    let approved = rt
        .block_on(engine.store.get_version(template_id, owner_id, VersionNumber::FIRST))
        .expect("lookup")
        .expect("version exists");
    assert_eq!(approved.sync().approval_status(), ApprovalStatus::Approved);
}

/// Exporting without credentials is a configuration problem.
#[rstest]
fn export_without_credentials_is_rejected(runtime: io::Result<Runtime>, owner_id: OwnerId) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);

    let err = rt
        .block_on(engine.exporter.export_version(detail.template().id(), owner_id, None))
        .expect_err("no credentials configured");

    assert!(matches!(err, ExportServiceError::NoCredentials(id) if id == owner_id));
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(
        engine
            .registry
            .friendly_names()
            .expect("names")
            .is_empty()
    );
}
