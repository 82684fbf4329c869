//! Shared test helpers for in-memory engine integration tests.

use std::sync::Arc;

use missive::assignment::{
    adapters::memory::InMemoryAssignmentRepository, services::AssignmentRegistryService,
};
use missive::catalog::{
    adapters::memory::InMemoryVariableCatalog, services::VariableCatalogService,
};
use missive::export::{
    ContentApiConfig,
    adapters::memory::{InMemoryContentRegistry, InMemoryCredentialStore},
    domain::ContentCredentials,
    services::TemplateExportService,
};
use missive::resolution::{
    adapters::memory::{InMemoryRecipientDirectory, InMemorySampleDataRepository},
    domain::AgentConfig,
    services::{SampleDataService, VariableResolver},
};
use missive::template::{
    adapters::memory::InMemoryTemplateRepository,
    domain::{TemplateDetail, TemplateType},
    services::{CreateTemplateRequest, TemplateStoreService},
};
use missive::tenancy::{AgentId, OwnerId};
use mockable::DefaultClock;
use rstest::fixture;
use std::io;
use tokio::runtime::Runtime;

/// Opening body using the built-in catalog keys.
pub const OPENING_BODY: &str =
    "Ciao {nome_lead}, sono {nome_consulente} di {nome_azienda}. Mi hai scritto per {obiettivi}.";

/// Every service of the engine, wired to one set of in-memory adapters.
pub struct Engine {
    /// Catalog administration.
    pub catalog: VariableCatalogService<InMemoryVariableCatalog, DefaultClock>,
    /// Template authoring.
    pub store: TemplateStoreService<InMemoryTemplateRepository, InMemoryVariableCatalog, DefaultClock>,
    /// Resolution and previews.
    pub resolver: VariableResolver<
        InMemoryTemplateRepository,
        InMemoryVariableCatalog,
        InMemoryRecipientDirectory,
        InMemorySampleDataRepository,
    >,
    /// Sample data sets.
    pub samples: SampleDataService<InMemorySampleDataRepository, DefaultClock>,
    /// Registry export.
    pub exporter: TemplateExportService<
        InMemoryTemplateRepository,
        InMemoryCredentialStore,
        InMemoryContentRegistry,
        DefaultClock,
    >,
    /// Agent slot assignments.
    pub assignments: AssignmentRegistryService<
        InMemoryAssignmentRepository,
        InMemoryTemplateRepository,
        InMemoryRecipientDirectory,
        DefaultClock,
    >,
    /// Recipient, owner, and agent records.
    pub directory: Arc<InMemoryRecipientDirectory>,
    /// Registry credentials.
    pub credentials: Arc<InMemoryCredentialStore>,
    /// Fake content registry.
    pub registry: Arc<InMemoryContentRegistry>,
}

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides an owner for tests.
#[fixture]
pub fn owner_id() -> OwnerId {
    OwnerId::new()
}

/// Builds an engine over fresh adapters and seeds the built-in catalog.
pub fn engine(rt: &Runtime) -> Engine {
    let catalog_repo = Arc::new(InMemoryVariableCatalog::new());
    let templates = Arc::new(InMemoryTemplateRepository::new());
    let directory = Arc::new(InMemoryRecipientDirectory::new());
    let sample_repo = Arc::new(InMemorySampleDataRepository::new());
    let credentials = Arc::new(InMemoryCredentialStore::new());
    let registry = Arc::new(InMemoryContentRegistry::new());
    let assignment_repo = Arc::new(InMemoryAssignmentRepository::new());
    let clock = Arc::new(DefaultClock);

    let catalog = VariableCatalogService::new(Arc::clone(&catalog_repo), Arc::clone(&clock));
    rt.block_on(catalog.seed_defaults())
        .expect("built-in catalog seeds");

    Engine {
        catalog,
        store: TemplateStoreService::new(
            Arc::clone(&templates),
            Arc::clone(&catalog_repo),
            Arc::clone(&clock),
        ),
        resolver: VariableResolver::new(
            Arc::clone(&templates),
            catalog_repo,
            Arc::clone(&directory),
            Arc::clone(&sample_repo),
        ),
        samples: SampleDataService::new(sample_repo, Arc::clone(&clock)),
        exporter: TemplateExportService::new(
            Arc::clone(&templates),
            Arc::clone(&credentials),
            Arc::clone(&registry),
            Arc::clone(&clock),
            ContentApiConfig::default(),
        ),
        assignments: AssignmentRegistryService::new(
            assignment_repo,
            templates,
            Arc::clone(&directory),
            clock,
        ),
        directory,
        credentials,
        registry,
    }
}

/// Request for the standard opening template.
pub fn opening_request(owner_id: OwnerId, name: &str) -> CreateTemplateRequest {
    CreateTemplateRequest::new(owner_id, name, TemplateType::Opening, OPENING_BODY)
        .with_variable("nome_lead", 1)
        .with_variable("nome_consulente", 2)
        .with_variable("nome_azienda", 3)
        .with_variable("obiettivi", 4)
}

/// Creates the standard opening template.
pub fn create_opening(rt: &Runtime, engine: &Engine, owner_id: OwnerId) -> TemplateDetail {
    rt.block_on(engine.store.create_template(opening_request(owner_id, "Primo contatto")))
        .expect("opening template creates")
}

/// Stores registry credentials for `owner_id`.
pub fn add_credentials(engine: &Engine, owner_id: OwnerId) -> ContentCredentials {
    let credentials = ContentCredentials::new(owner_id, "AC123", "secret");
    engine
        .credentials
        .put(credentials.clone())
        .expect("credentials stored");
    credentials
}

/// Configures a bare agent for `owner_id`.
pub fn add_agent(engine: &Engine, owner_id: OwnerId) -> AgentId {
    let agent_id = AgentId::new();
    engine
        .directory
        .put_agent_config(AgentConfig::new(agent_id, owner_id))
        .expect("agent config stored");
    agent_id
}
