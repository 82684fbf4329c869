//! Shared world state for template versioning BDD scenarios.

use std::sync::Arc;

use missive::assignment::{
    adapters::memory::InMemoryAssignmentRepository, services::AssignmentRegistryService,
};
use missive::catalog::{
    adapters::memory::InMemoryVariableCatalog, services::VariableCatalogService,
};
use missive::resolution::{
    adapters::memory::{InMemoryRecipientDirectory, InMemorySampleDataRepository},
    domain::{RecipientId, Resolution},
    services::VariableResolver,
};
use missive::template::{
    adapters::memory::InMemoryTemplateRepository,
    domain::{TemplateDetail, TemplateVersion, extract_placeholders},
    services::{TemplateStoreError, TemplateStoreService},
    validation::VariableMapping,
};
use missive::tenancy::{AgentId, OwnerId};
use mockable::DefaultClock;
use rstest::fixture;

/// Template store used by the BDD world.
pub type TestStore =
    TemplateStoreService<InMemoryTemplateRepository, InMemoryVariableCatalog, DefaultClock>;

/// Resolver used by the BDD world.
pub type TestResolver = VariableResolver<
    InMemoryTemplateRepository,
    InMemoryVariableCatalog,
    InMemoryRecipientDirectory,
    InMemorySampleDataRepository,
>;

/// Assignment service used by the BDD world.
pub type TestAssignments = AssignmentRegistryService<
    InMemoryAssignmentRepository,
    InMemoryTemplateRepository,
    InMemoryRecipientDirectory,
    DefaultClock,
>;

/// Scenario world for template versioning behaviour tests.
pub struct TemplateWorld {
    /// Catalog administration, seeded on first use.
    pub catalog: VariableCatalogService<InMemoryVariableCatalog, DefaultClock>,
    /// The template store under test.
    pub store: TestStore,
    /// The resolver under test.
    pub resolver: TestResolver,
    /// The assignment service under test.
    pub assignments: TestAssignments,
    /// Directory records read by the resolver.
    pub directory: Arc<InMemoryRecipientDirectory>,
    /// Owner acting in the scenario.
    pub owner_id: OwnerId,
    /// Agent configured for the owner, if any.
    pub agent_id: Option<AgentId>,
    /// Recipient created by the scenario, if any.
    pub recipient_id: Option<RecipientId>,
    /// Template created by the scenario.
    pub template: Option<TemplateDetail>,
    /// Result of the last template creation attempt.
    pub last_create_result: Option<Result<TemplateDetail, TemplateStoreError>>,
    /// Result of the last version creation attempt.
    pub last_version_result: Option<Result<TemplateVersion, TemplateStoreError>>,
    /// Last preview produced.
    pub last_preview: Option<Resolution>,
    catalog_seeded: bool,
}

impl TemplateWorld {
    /// Creates a world over fresh in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let catalog_repo = Arc::new(InMemoryVariableCatalog::new());
        let templates = Arc::new(InMemoryTemplateRepository::new());
        let directory = Arc::new(InMemoryRecipientDirectory::new());
        let clock = Arc::new(DefaultClock);
        Self {
            catalog: VariableCatalogService::new(Arc::clone(&catalog_repo), Arc::clone(&clock)),
            store: TemplateStoreService::new(
                Arc::clone(&templates),
                Arc::clone(&catalog_repo),
                Arc::clone(&clock),
            ),
            resolver: VariableResolver::new(
                Arc::clone(&templates),
                catalog_repo,
                Arc::clone(&directory),
                Arc::new(InMemorySampleDataRepository::new()),
            ),
            assignments: AssignmentRegistryService::new(
                Arc::new(InMemoryAssignmentRepository::new()),
                templates,
                Arc::clone(&directory),
                clock,
            ),
            directory,
            owner_id: OwnerId::new(),
            agent_id: None,
            recipient_id: None,
            template: None,
            last_create_result: None,
            last_version_result: None,
            last_preview: None,
            catalog_seeded: false,
        }
    }

    /// Seeds the built-in catalog once per scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails.
    pub fn ensure_catalog(&mut self) -> Result<(), eyre::Report> {
        if !self.catalog_seeded {
            run_async(self.catalog.seed_defaults())
                .map_err(|err| eyre::eyre!("catalog seeding failed: {err}"))?;
            self.catalog_seeded = true;
        }
        Ok(())
    }

    /// Returns the template created by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no template has been created yet.
    pub fn template(&self) -> Result<&TemplateDetail, eyre::Report> {
        self.template
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no template in scenario world"))
    }
}

impl Default for TemplateWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TemplateWorld {
    TemplateWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Maps each placeholder in `body` to its position of first appearance.
pub fn mappings_for(body: &str) -> Vec<VariableMapping> {
    (1..)
        .zip(extract_placeholders(body))
        .map(|(position, key)| VariableMapping::new(key, position))
        .collect()
}
