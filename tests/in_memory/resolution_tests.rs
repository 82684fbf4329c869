//! Resolution tests over stored templates and directory records.
//!
//! Tests the recipient fallback chain, degraded results, and sample previews.

use crate::in_memory::helpers::{Engine, create_opening, engine, owner_id, runtime};
use missive::error::ErrorKind;
use missive::resolution::{
    domain::{
        AgentConfig, OwnerProfile, RecipientId, RecipientRecord, Resolution, ResolutionRequest,
        VariableSource,
    },
    services::ResolverError,
};
use missive::template::validation::VariableMapping;
use missive::tenancy::{AgentId, OwnerId};
use rstest::rstest;
use serde_json::json;
use std::collections::BTreeMap;
use std::io;
use tokio::runtime::Runtime;

fn seed_owner_and_agent(engine: &Engine, owner_id: OwnerId) -> AgentId {
    let mut owner = OwnerProfile::new(owner_id);
    owner.first_name = Some("Luca".to_owned());
    owner.business_name = Some("Studio Rossi".to_owned());
    engine
        .directory
        .put_owner_profile(owner)
        .expect("owner profile stored");

    let agent_id = AgentId::new();
    let mut agent = AgentConfig::new(agent_id, owner_id);
    agent.consultant_display_name = Some("Dott. Rossi".to_owned());
    engine
        .directory
        .put_agent_config(agent)
        .expect("agent config stored");
    agent_id
}

fn seed_recipient(
    engine: &Engine,
    owner_id: OwnerId,
    agent_id: AgentId,
    first_name: Option<&str>,
    goal: Option<&str>,
) -> RecipientId {
    let recipient_id = RecipientId::new();
    let mut recipient = RecipientRecord::new(recipient_id, owner_id);
    recipient.agent_id = Some(agent_id);
    recipient.first_name = first_name.map(str::to_owned);
    recipient.lead_info = goal.map_or_else(|| json!({}), |text| json!({ "obiettivi": text }));
    engine
        .directory
        .put_recipient(recipient)
        .expect("recipient stored");
    recipient_id
}

fn source_of(resolution: &Resolution, key: &str) -> VariableSource {
    resolution
        .variables
        .iter()
        .find(|variable| variable.key.as_str() == key)
        .map(|variable| variable.source)
        .unwrap_or_else(|| panic!("variable {key} resolved"))
}

/// Every link of the chain contributes to one recipient render.
#[rstest]
fn recipient_render_walks_the_fallback_chain(runtime: io::Result<Runtime>, owner_id: OwnerId) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let agent_id = seed_owner_and_agent(&engine, owner_id);
    let recipient_id = seed_recipient(&engine, owner_id, agent_id, Some("Giulia"), Some("perdere peso"));
    let version_id = detail.active_version().expect("active").id();

    let resolution = rt
        .block_on(engine.resolver.resolve_variables(
            owner_id,
            version_id,
            &ResolutionRequest::recipient(recipient_id),
        ))
        .expect("resolution");

    assert_eq!(
        resolution.rendered_text,
        "Ciao Giulia, sono Dott. Rossi di Studio Rossi. Mi hai scritto per perdere peso."
    );
    assert!(resolution.is_final());
    assert_eq!(source_of(&resolution, "nome_lead"), VariableSource::RecipientData);
    assert_eq!(source_of(&resolution, "nome_consulente"), VariableSource::RecipientData);
    assert_eq!(source_of(&resolution, "nome_azienda"), VariableSource::FallbackPath);
    let positions: Vec<u32> = resolution
        .variables
        .iter()
        .map(|variable| variable.position.value())
        .collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);
}

/// Missing data falls back to the static value, then to a visible
/// placeholder with a warning.
#[rstest]
fn sparse_recipient_gets_fallbacks_and_placeholders(
    runtime: io::Result<Runtime>,
    owner_id: OwnerId,
) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let agent_id = seed_owner_and_agent(&engine, owner_id);
    let recipient_id = seed_recipient(&engine, owner_id, agent_id, None, None);

    let resolution = rt
        .block_on(engine.resolver.preview_template(
            detail.template().id(),
            owner_id,
            &ResolutionRequest::recipient(recipient_id),
        ))
        .expect("resolution");

    assert_eq!(
        resolution.rendered_text,
        "Ciao Cliente, sono Dott. Rossi di Studio Rossi. Mi hai scritto per {obiettivi}."
    );
    assert_eq!(source_of(&resolution, "nome_lead"), VariableSource::StaticFallback);
    assert_eq!(source_of(&resolution, "obiettivi"), VariableSource::Placeholder);
    assert!(resolution.has_missing());
    assert!(!resolution.is_final());
    assert!(resolution.warnings.iter().any(|warning| warning.variable == "obiettivi"));
}

/// An unknown recipient degrades instead of failing.
#[rstest]
fn unknown_recipient_degrades_to_raw_body(runtime: io::Result<Runtime>, owner_id: OwnerId) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let version_id = detail.active_version().expect("active").id();

    let resolution = rt
        .block_on(engine.resolver.resolve_variables(
            owner_id,
            version_id,
            &ResolutionRequest::recipient(RecipientId::new()),
        ))
        .expect("degraded result is still Ok");

    assert!(resolution.degraded);
    assert_eq!(resolution.rendered_text, resolution.original_text);
    assert_eq!(resolution.warnings.len(), 1);
    assert!(resolution.variables.is_empty());
}

/// A superseded version still resolves against its own body.
#[rstest]
fn superseded_version_keeps_resolving_its_own_body(
    runtime: io::Result<Runtime>,
    owner_id: OwnerId,
) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let first_version = detail.active_version().expect("active").id();
    rt.block_on(engine.store.create_new_version(
        detail.template().id(),
        owner_id,
        "Salve {nome_lead}",
        &[VariableMapping::new("nome_lead", 1)],
    ))
    .expect("new version");

    let values: BTreeMap<String, String> = [("nome_lead".to_owned(), "Marta".to_owned())].into();
    let resolution = rt
        .block_on(engine.resolver.resolve_variables(
            owner_id,
            first_version,
            &ResolutionRequest::sample_values(values),
        ))
        .expect("resolution");

    assert!(resolution.rendered_text.starts_with("Ciao Marta, sono "));
    assert_eq!(resolution.variables.len(), 4);
    assert_eq!(source_of(&resolution, "nome_lead"), VariableSource::Sample);
}

/// The owner's default sample set feeds previews of saved templates.
#[rstest]
fn default_sample_set_feeds_previews(runtime: io::Result<Runtime>, owner_id: OwnerId) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let values: BTreeMap<String, String> = [
        ("nome_lead".to_owned(), "Anna".to_owned()),
        ("obiettivi".to_owned(), "correre una maratona".to_owned()),
    ]
    .into();
    rt.block_on(engine.samples.create_sample_data_set(owner_id, "Demo", values, true))
        .expect("sample set");

    let resolution = rt
        .block_on(engine.resolver.preview_template(
            detail.template().id(),
            owner_id,
            &ResolutionRequest::default_sample(),
        ))
        .expect("preview");

    assert_eq!(source_of(&resolution, "nome_lead"), VariableSource::Sample);
    assert_eq!(source_of(&resolution, "obiettivi"), VariableSource::Sample);
    assert!(resolution.rendered_text.contains("correre una maratona"));
}

/// Archived templates cannot be resolved.
#[rstest]
fn archived_template_versions_are_not_resolvable(
    runtime: io::Result<Runtime>,
    owner_id: OwnerId,
) {
    let rt = runtime.expect("runtime creation");
    let engine = engine(&rt);
    let detail = create_opening(&rt, &engine, owner_id);
    let version_id = detail.active_version().expect("active").id();
    rt.block_on(engine.store.archive_template(detail.template().id(), owner_id))
        .expect("archive");

    let err = rt
        .block_on(engine.resolver.resolve_variables(
            owner_id,
            version_id,
            &ResolutionRequest::default_sample(),
        ))
        .expect_err("archived version is hidden");

    assert!(matches!(err, ResolverError::VersionNotFound(id) if id == version_id));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
