//! When steps for template versioning BDD scenarios.

use super::world::{TemplateWorld, mappings_for, run_async};
use missive::resolution::domain::ResolutionRequest;
use missive::template::{domain::TemplateType, services::CreateTemplateRequest};
use rstest_bdd_macros::when;

#[when(r#"the owner saves a new version with body "{body}""#)]
fn save_new_version(world: &mut TemplateWorld, body: String) -> Result<(), eyre::Report> {
    let template_id = world.template()?.template().id();
    let mappings = mappings_for(&body);
    world.last_version_result = Some(run_async(world.store.create_new_version(
        template_id,
        world.owner_id,
        body,
        &mappings,
    )));
    Ok(())
}

#[when(r#"the owner creates another opening template named "{name}""#)]
fn create_another_opening(world: &mut TemplateWorld, name: String) {
    let request = CreateTemplateRequest::new(
        world.owner_id,
        name,
        TemplateType::Opening,
        "Buongiorno {nome_lead}",
    )
    .with_variable("nome_lead", 1);
    world.last_create_result = Some(run_async(world.store.create_template(request)));
}

#[when("the owner previews the template for the recipient")]
fn preview_for_recipient(world: &mut TemplateWorld) -> Result<(), eyre::Report> {
    let template_id = world.template()?.template().id();
    let recipient_id = world
        .recipient_id
        .ok_or_else(|| eyre::eyre!("no recipient in scenario world"))?;
    let preview = run_async(world.resolver.preview_template(
        template_id,
        world.owner_id,
        &ResolutionRequest::recipient(recipient_id),
    ))
    .map_err(|err| eyre::eyre!("preview failed: {err}"))?;
    world.last_preview = Some(preview);
    Ok(())
}

#[when("the owner archives the template")]
fn archive_template(world: &mut TemplateWorld) -> Result<(), eyre::Report> {
    let template_id = world.template()?.template().id();
    let archived = run_async(world.store.archive_template(template_id, world.owner_id))
        .map_err(|err| eyre::eyre!("archive failed: {err}"))?;
    if !archived {
        return Err(eyre::eyre!("template {template_id} was not archived"));
    }
    Ok(())
}
