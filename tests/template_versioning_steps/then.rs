//! Then steps for template versioning BDD scenarios.

use super::world::{TemplateWorld, run_async};
use missive::error::ErrorKind;
use missive::template::{
    domain::{TemplateType, VersionNumber},
    services::TemplateStoreError,
};
use rstest_bdd_macros::then;

#[then("the template has {count:usize} versions")]
fn template_has_versions(world: &mut TemplateWorld, count: usize) -> Result<(), eyre::Report> {
    let template_id = world.template()?.template().id();
    let detail = run_async(world.store.get_template(template_id, world.owner_id))
        .map_err(|err| eyre::eyre!("get_template failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("template {template_id} not found"))?;
    let found = detail.versions().len();
    world.template = Some(detail);
    if found != count {
        return Err(eyre::eyre!("expected {count} versions, found {found}"));
    }
    Ok(())
}

#[then("version {number:u32} is the active version")]
fn version_is_active(world: &TemplateWorld, number: u32) -> Result<(), eyre::Report> {
    let active = world
        .template()?
        .active_version()
        .ok_or_else(|| eyre::eyre!("template has no active version"))?;
    if active.version_number().value() != number {
        return Err(eyre::eyre!(
            "expected version {number} to be active, found {}",
            active.version_number()
        ));
    }
    Ok(())
}

#[then(r#"version {number:u32} still reads "{body}""#)]
fn version_still_reads(world: &TemplateWorld, number: u32, body: String) -> Result<(), eyre::Report> {
    let version_number =
        VersionNumber::new(number).map_err(|err| eyre::eyre!("invalid version number: {err}"))?;
    let version = world
        .template()?
        .version(version_number)
        .ok_or_else(|| eyre::eyre!("version {number} not found"))?;
    if version.body() != body {
        return Err(eyre::eyre!(
            "expected version {number} to read {body:?}, found {:?}",
            version.body()
        ));
    }
    Ok(())
}

#[then("creation fails with a conflict")]
fn creation_conflicts(world: &TemplateWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing creation result in scenario world"))?;
    match result {
        Err(err) if err.kind() == ErrorKind::Conflict => Ok(()),
        Err(err) => Err(eyre::eyre!("expected a conflict, got {err}")),
        Ok(detail) => Err(eyre::eyre!(
            "expected a conflict, template {} was created",
            detail.template().id()
        )),
    }
}

#[then("the edit fails validation")]
fn edit_fails_validation(world: &TemplateWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_version_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing version result in scenario world"))?;
    if !matches!(result, Err(TemplateStoreError::Validation(_))) {
        return Err(eyre::eyre!("expected a validation failure, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the preview reads "{text}""#)]
fn preview_reads(world: &TemplateWorld, text: String) -> Result<(), eyre::Report> {
    let preview = world
        .last_preview
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no preview in scenario world"))?;
    if preview.rendered_text != text {
        return Err(eyre::eyre!(
            "expected preview {text:?}, found {:?}",
            preview.rendered_text
        ));
    }
    Ok(())
}

#[then("the preview is ready to send")]
fn preview_is_final(world: &TemplateWorld) -> Result<(), eyre::Report> {
    let preview = world
        .last_preview
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no preview in scenario world"))?;
    if !preview.is_final() {
        return Err(eyre::eyre!("preview has warnings: {:?}", preview.warnings));
    }
    Ok(())
}

#[then("the agent has no active opening template")]
fn agent_has_no_template(world: &TemplateWorld) -> Result<(), eyre::Report> {
    let agent_id = world
        .agent_id
        .ok_or_else(|| eyre::eyre!("no agent in scenario world"))?;
    let active = run_async(
        world
            .assignments
            .get_active_template_for_agent(agent_id, TemplateType::Opening),
    )
    .map_err(|err| eyre::eyre!("active template lookup failed: {err}"))?;
    if !active.is_fallback() {
        return Err(eyre::eyre!("expected the agent to fall back, got {active:?}"));
    }
    Ok(())
}
