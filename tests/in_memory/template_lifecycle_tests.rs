//! Template lifecycle tests over the in-memory engine.
//!
//! Tests version history, archiving, and the one-live-template-per-type rule.

use crate::in_memory::helpers::{
    OPENING_BODY, create_opening, engine, opening_request, owner_id, runtime,
};
use missive::error::ErrorKind;
use missive::template::{
    domain::{TemplateListFilter, TemplateType, VersionNumber},
    services::TemplateStoreError,
    validation::{ValidationIssue, VariableMapping},
};
use missive::tenancy::OwnerId;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

fn opening_mappings() -> Vec<VariableMapping> {
    vec![
        VariableMapping::new("nome_lead", 1),
        VariableMapping::new("nome_consulente", 2),
        VariableMapping::new("nome_azienda", 3),
        VariableMapping::new("obiettivi", 4),
    ]
}

/// Each edit appends a version and moves the active flag to it.
#[rstest]
fn edits_append_versions_and_move_active_flag(runtime: io::Result<Runtime>, owner_id: OwnerId) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let template_id = detail.template().id();

    for edit in ["Buongiorno", "Salve"] {
        let body = OPENING_BODY.replacen("Ciao", edit, 1);
        rt.block_on(engine.store.create_new_version(
            template_id,
            owner_id,
            body,
            &opening_mappings(),
        ))
        .expect("new version");
    }

    let history = rt
        .block_on(engine.store.get_template(template_id, owner_id))
        .expect("lookup")
        .expect("template exists");
    let numbers: Vec<u32> = history
        .versions()
        .iter()
        .map(|version| version.version_number().value())
        .collect();
    assert_eq!(numbers, vec![3, 2, 1], "history is newest first");
    assert_eq!(
        history.versions().iter().filter(|version| version.is_active()).count(),
        1
    );
    let active = history.active_version().expect("active version");
    assert_eq!(active.version_number().value(), 3);
    assert!(active.body().starts_with("Salve"));

    let first = rt
        .block_on(engine.store.get_version(template_id, owner_id, VersionNumber::FIRST))
        .expect("lookup")
        .expect("first version kept");
    assert_eq!(first.body(), OPENING_BODY, "old versions are immutable");
}

/// A rejected edit persists nothing.
#[rstest]
fn invalid_edit_leaves_history_untouched(runtime: io::Result<Runtime>, owner_id: OwnerId) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let template_id = detail.template().id();

    let err = rt
        .block_on(engine.store.create_new_version(
            template_id,
            owner_id,
            "Ciao {nome_lead}, ecco {sconosciuto}",
            &[VariableMapping::new("nome_lead", 1)],
        ))
        .expect_err("unknown placeholder is rejected");

    assert_eq!(err.kind(), ErrorKind::Validation);
    let TemplateStoreError::Validation(report) = err else {
        panic!("expected validation report");
    };
    assert!(report.errors().iter().any(|issue| matches!(
        issue,
        ValidationIssue::UnmappedPlaceholders { keys } if keys == &vec!["sconosciuto".to_owned()]
    )));

    let history = rt
        .block_on(engine.store.get_template(template_id, owner_id))
        .expect("lookup")
        .expect("template exists");
    assert_eq!(history.versions().len(), 1);
}

/// Archiving frees the type slot; restoring then conflicts with the
/// replacement.
#[rstest]
fn archive_frees_slot_and_restore_conflicts(runtime: io::Result<Runtime>, owner_id: OwnerId) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let original = create_opening(&rt, &engine, owner_id);
    let original_id = original.template().id();

    let duplicate = rt
        .block_on(engine.store.create_template(opening_request(owner_id, "Secondo")))
        .expect_err("second live opening is rejected");
    assert_eq!(duplicate.kind(), ErrorKind::Conflict);

    assert!(
        rt.block_on(engine.store.archive_template(original_id, owner_id))
            .expect("archive")
    );
    assert!(
        !rt.block_on(engine.store.archive_template(original_id, owner_id))
            .expect("archive twice"),
        "archiving twice is a no-op"
    );

    rt.block_on(engine.store.create_template(opening_request(owner_id, "Secondo")))
        .expect("slot is free after archiving");

    let restore = rt
        .block_on(engine.store.restore_template(original_id, owner_id))
        .expect_err("restore conflicts with the new live template");
    assert_eq!(restore.kind(), ErrorKind::Conflict);

    let live = rt
        .block_on(engine.store.list_templates(owner_id, TemplateListFilter::all()))
        .expect("list");
    assert_eq!(live.len(), 1);
    assert_eq!(live.first().map(|summary| summary.template.name().as_str()), Some("Secondo"));

    let archived = rt
        .block_on(engine.store.get_template(original_id, owner_id))
        .expect("lookup")
        .expect("archived templates stay readable");
    assert!(archived.template().is_archived());
}

/// Owners never see or touch each other's templates.
#[rstest]
fn templates_are_scoped_to_their_owner(runtime: io::Result<Runtime>, owner_id: OwnerId) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let template_id = detail.template().id();
    let stranger = OwnerId::new();

    assert!(
        rt.block_on(engine.store.get_template(template_id, stranger))
            .expect("lookup")
            .is_none()
    );
    let err = rt
        .block_on(engine.store.create_new_version(
            template_id,
            stranger,
            OPENING_BODY,
            &opening_mappings(),
        ))
        .expect_err("foreign edit is rejected");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(
        !rt.block_on(engine.store.archive_template(template_id, stranger))
            .expect("archive")
    );

    rt.block_on(engine.store.create_template(opening_request(stranger, "Suo")))
        .expect("type uniqueness is per owner");
    let filtered = rt
        .block_on(
            engine
                .store
                .list_templates(owner_id, TemplateListFilter::of_type(TemplateType::FollowupGentle)),
        )
        .expect("list");
    assert!(filtered.is_empty());
}

/// The built-in catalog backs every stock template key.
#[rstest]
fn seeded_catalog_covers_stock_keys(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);

    let keys: Vec<String> = rt
        .block_on(engine.catalog.list_catalog())
        .expect("catalog listing")
        .iter()
        .map(|entry| entry.key().as_str().to_owned())
        .collect();

    for key in ["nome_lead", "nome_consulente", "nome_azienda", "obiettivi"] {
        assert!(keys.iter().any(|listed| listed == key), "missing {key}");
    }
    assert!(
        rt.block_on(engine.catalog.seed_defaults())
            .expect("reseed")
            .is_empty(),
        "seeding twice adds nothing"
    );
}
