//! Template persistence against a real schema.

use crate::postgres::helpers::{PgEngine, pg_engine, template, version};
use diesel::prelude::*;
use missive::error::ErrorKind;
use missive::template::{
    domain::{TemplateListFilter, TemplateType, TemplateVersion},
    ports::{TemplateRepository, TemplateRepositoryError},
    services::CreateTemplateRequest,
};
use missive::tenancy::OwnerId;
use mockable::DefaultClock;
use rstest::rstest;

const OPENING_BODY: &str = "Ciao {nome_lead}, sono {nome_consulente}.";

#[rstest]
fn appended_versions_leave_one_active(pg_engine: PgEngine) {
    let engine = pg_engine;
    let owner_id = OwnerId::new();
    let subject = template(owner_id, TemplateType::Opening);
    engine
        .rt
        .block_on(engine.templates.create(&subject, &version(&subject, 1, "v1")))
        .expect("create");
    for number in 2..=3 {
        engine
            .rt
            .block_on(engine.templates.append_version(&version(&subject, number, "next")))
            .expect("append");
    }

    let detail = engine
        .rt
        .block_on(engine.templates.find_by_id(subject.id()))
        .expect("lookup")
        .expect("template exists");
    let active: Vec<u32> = detail
        .versions()
        .iter()
        .filter(|candidate| candidate.is_active())
        .map(|candidate| candidate.version_number().value())
        .collect();
    assert_eq!(active, [3]);
    assert_eq!(detail.versions().len(), 3);

    let listed = engine
        .rt
        .block_on(engine.templates.list_by_owner(owner_id, TemplateListFilter::all()))
        .expect("listing");
    assert_eq!(listed.len(), 1);
}

#[rstest]
fn stale_version_number_loses_the_race(pg_engine: PgEngine) {
    let engine = pg_engine;
    let subject = template(OwnerId::new(), TemplateType::FollowupGentle);
    engine
        .rt
        .block_on(engine.templates.create(&subject, &version(&subject, 1, "v1")))
        .expect("create");
    engine
        .rt
        .block_on(engine.templates.append_version(&version(&subject, 2, "winner")))
        .expect("first writer wins");

    let result = engine
        .rt
        .block_on(engine.templates.append_version(&version(&subject, 2, "loser")));

    assert!(
        matches!(result, Err(TemplateRepositoryError::VersionConflict { .. })),
        "expected a version conflict, got {result:?}"
    );
    let detail = engine
        .rt
        .block_on(engine.templates.find_by_id(subject.id()))
        .expect("lookup")
        .expect("template exists");
    assert_eq!(
        detail.active_version().map(TemplateVersion::body),
        Some("winner")
    );
}

#[rstest]
fn schema_allows_a_single_active_version(pg_engine: PgEngine) {
    let engine = pg_engine;
    let subject = template(OwnerId::new(), TemplateType::Opening);
    engine
        .rt
        .block_on(engine.templates.create(&subject, &version(&subject, 1, "v1")))
        .expect("create");
    engine
        .rt
        .block_on(engine.templates.append_version(&version(&subject, 2, "v2")))
        .expect("append");

    let mut conn = engine.pool.get().expect("connection");
    let result =
        diesel::sql_query("UPDATE template_versions SET is_active = TRUE WHERE template_id = $1")
            .bind::<diesel::sql_types::Uuid, _>(subject.id().into_inner())
            .execute(&mut conn);

    assert!(
        matches!(
            result,
            Err(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _
            ))
        ),
        "expected the single-active index to fire, got {result:?}"
    );
}

#[rstest]
fn archived_template_takes_no_new_versions(pg_engine: PgEngine) {
    let engine = pg_engine;
    let mut subject = template(OwnerId::new(), TemplateType::Opening);
    engine
        .rt
        .block_on(engine.templates.create(&subject, &version(&subject, 1, "v1")))
        .expect("create");
    subject.archive(&DefaultClock);
    engine
        .rt
        .block_on(engine.templates.update(&subject))
        .expect("archive persists");

    let result = engine
        .rt
        .block_on(engine.templates.append_version(&version(&subject, 2, "late edit")));

    assert!(
        matches!(result, Err(TemplateRepositoryError::TemplateNotFound(id)) if id == subject.id()),
        "expected archived template to be hidden, got {result:?}"
    );
    let detail = engine
        .rt
        .block_on(engine.templates.find_by_id(subject.id()))
        .expect("lookup")
        .expect("template exists");
    assert_eq!(detail.versions().len(), 1);
}

#[rstest]
fn restoring_into_an_occupied_slot_conflicts(pg_engine: PgEngine) {
    let engine = pg_engine;
    let owner_id = OwnerId::new();
    let request = || {
        CreateTemplateRequest::new(owner_id, "Primo contatto", TemplateType::Opening, OPENING_BODY)
            .with_variable("nome_lead", 1)
            .with_variable("nome_consulente", 2)
    };
    let first = engine
        .rt
        .block_on(engine.store.create_template(request()))
        .expect("first create");
    let duplicate = engine
        .rt
        .block_on(engine.store.create_template(request()))
        .expect_err("one live opening per owner");
    assert_eq!(duplicate.kind(), ErrorKind::Conflict);

    engine
        .rt
        .block_on(engine.store.archive_template(first.template().id(), owner_id))
        .expect("archive");
    engine
        .rt
        .block_on(engine.store.create_template(request()))
        .expect("archived templates free the slot");

    let err = engine
        .rt
        .block_on(engine.store.restore_template(first.template().id(), owner_id))
        .expect_err("slot is taken");
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[rstest]
fn catalog_variables_survive_a_round_trip(pg_engine: PgEngine) {
    let engine = pg_engine;
    let owner_id = OwnerId::new();
    let seeded = engine
        .rt
        .block_on(engine.catalog.list_catalog())
        .expect("catalog listing");
    assert!(seeded.iter().any(|entry| entry.key().as_str() == "nome_lead"));

    let created = engine
        .rt
        .block_on(engine.store.create_template(
            CreateTemplateRequest::new(owner_id, "Primo contatto", TemplateType::Opening, OPENING_BODY)
                .with_variable("nome_consulente", 2)
                .with_variable("nome_lead", 1),
        ))
        .expect("create");

    let stored = engine
        .rt
        .block_on(engine.templates.find_by_id(created.template().id()))
        .expect("lookup")
        .expect("template exists");
    let active = stored.active_version().expect("active version");
    let keys: Vec<(u32, &str)> = active
        .variables()
        .iter()
        .map(|variable| (variable.position().value(), variable.entry().key().as_str()))
        .collect();
    assert_eq!(keys, [(1, "nome_lead"), (2, "nome_consulente")]);
}
