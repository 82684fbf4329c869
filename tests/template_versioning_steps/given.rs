//! Given steps for template versioning BDD scenarios.

use super::world::{TemplateWorld, mappings_for, run_async};
use eyre::WrapErr;
use missive::resolution::domain::{AgentConfig, OwnerProfile, RecipientId, RecipientRecord};
use missive::template::{domain::TemplateType, services::CreateTemplateRequest};
use missive::tenancy::AgentId;
use rstest_bdd_macros::given;

#[given(r#"an opening template with body "{body}""#)]
fn opening_template(world: &mut TemplateWorld, body: String) -> Result<(), eyre::Report> {
    world.ensure_catalog()?;
    let request =
        CreateTemplateRequest::new(world.owner_id, "Primo contatto", TemplateType::Opening, body.as_str())
            .with_mappings(mappings_for(&body));
    let created = run_async(world.store.create_template(request))
        .wrap_err("create opening template for scenario")?;
    world.template = Some(created);
    Ok(())
}

#[given(r#"the owner's consultant name is "{name}""#)]
fn consultant_name(world: &mut TemplateWorld, name: String) -> Result<(), eyre::Report> {
    world
        .directory
        .put_owner_profile(OwnerProfile::new(world.owner_id))
        .wrap_err("store owner profile")?;
    let agent_id = AgentId::new();
    let mut config = AgentConfig::new(agent_id, world.owner_id);
    config.consultant_display_name = Some(name);
    world
        .directory
        .put_agent_config(config)
        .wrap_err("store agent config")?;
    world.agent_id = Some(agent_id);
    Ok(())
}

fn store_recipient(world: &mut TemplateWorld, first_name: Option<String>) -> Result<(), eyre::Report> {
    let recipient_id = RecipientId::new();
    let mut recipient = RecipientRecord::new(recipient_id, world.owner_id);
    recipient.agent_id = world.agent_id;
    recipient.first_name = first_name;
    world
        .directory
        .put_recipient(recipient)
        .wrap_err("store recipient")?;
    world.recipient_id = Some(recipient_id);
    Ok(())
}

#[given(r#"a recipient named "{name}""#)]
fn recipient_named(world: &mut TemplateWorld, name: String) -> Result<(), eyre::Report> {
    store_recipient(world, Some(name))
}

#[given("a recipient without a first name")]
fn recipient_without_name(world: &mut TemplateWorld) -> Result<(), eyre::Report> {
    store_recipient(world, None)
}

#[given("the template is assigned to an agent")]
fn template_assigned(world: &mut TemplateWorld) -> Result<(), eyre::Report> {
    let template_id = world.template()?.template().id();
    let agent_id = match world.agent_id {
        Some(agent_id) => agent_id,
        None => {
            let fresh = AgentId::new();
            world
                .directory
                .put_agent_config(AgentConfig::new(fresh, world.owner_id))
                .wrap_err("store agent config")?;
            fresh
        }
    };
    run_async(world.assignments.assign_template(
        world.owner_id,
        agent_id,
        TemplateType::Opening,
        template_id,
    ))
    .wrap_err("assign template for scenario")?;
    world.agent_id = Some(agent_id);
    Ok(())
}
