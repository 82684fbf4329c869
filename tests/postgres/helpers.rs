//! Shared helpers for `PostgreSQL` integration tests.

use std::io;
use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use missive::assignment::{
    adapters::postgres::PostgresAssignmentRepository, services::AssignmentRegistryService,
};
use missive::catalog::{adapters::postgres::PostgresVariableCatalog, services::VariableCatalogService};
use missive::resolution::{adapters::memory::InMemoryRecipientDirectory, domain::AgentConfig};
use missive::template::{
    adapters::postgres::PostgresTemplateRepository,
    domain::{Template, TemplateName, TemplateType, TemplateVersion, VersionNumber},
    services::TemplateStoreService,
};
use missive::tenancy::{AgentId, OwnerId};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
pub use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::fixture;
use tokio::runtime::Runtime;
use tracing::warn;

/// Boxed error used by the database setup helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Connection pool shared by every adapter of one test database.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema migrations, applied in order to the template database.
const MIGRATIONS: [&str; 3] = [
    include_str!("../../migrations/2026-01-01-000000_create_variable_catalog/up.sql"),
    include_str!("../../migrations/2026-01-01-000001_create_templates/up.sql"),
    include_str!("../../migrations/2026-01-01-000002_create_template_assignments/up.sql"),
];

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "missive_test_template";

/// Creates a tokio runtime for driving the async adapters.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
pub fn test_runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Ensures the template database exists with every migration applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            for migration in MIGRATIONS {
                conn.batch_execute(migration)
                    .map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            }
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// A database cloned from the template, dropped with the guard.
pub struct TestDatabase {
    cluster: &'static TestCluster,
    name: String,
}

impl TestDatabase {
    /// Clones the template into a fresh database and opens a pool on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the clone or the pool cannot be created.
    pub fn create(cluster: &'static TestCluster, prefix: &str) -> Result<(Self, PgPool), BoxError> {
        ensure_template(cluster)?;
        let name = format!("{prefix}_{}", uuid::Uuid::new_v4().simple());
        cluster
            .create_database_from_template(name.as_str(), TEMPLATE_DB)
            .map_err(|e| Box::new(e) as BoxError)?;
        let database = Self { cluster, name };

        let manager = ConnectionManager::<PgConnection>::new(
            cluster.connection().database_url(&database.name),
        );
        let pool = Pool::builder()
            .max_size(2)
            .build(manager)
            .map_err(|e| Box::new(e) as BoxError)?;
        Ok((database, pool))
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.name.as_str()) {
            warn!(database = %self.name, %err, "failed to drop test database");
        }
    }
}

/// Engine services wired to one test database.
///
/// Fields drop in declaration order, so every pool handle is released
/// before the database itself is dropped.
pub struct PgEngine {
    /// Catalog administration, seeded with the built-in keys.
    pub catalog: VariableCatalogService<PostgresVariableCatalog, DefaultClock>,
    /// Template authoring.
    pub store: TemplateStoreService<PostgresTemplateRepository, PostgresVariableCatalog, DefaultClock>,
    /// Raw template repository.
    pub templates: Arc<PostgresTemplateRepository>,
    /// Raw assignment repository.
    pub assignment_repo: Arc<PostgresAssignmentRepository>,
    /// Agent slot assignments.
    pub assignments: AssignmentRegistryService<
        PostgresAssignmentRepository,
        PostgresTemplateRepository,
        InMemoryRecipientDirectory,
        DefaultClock,
    >,
    /// Agent records consulted for ownership.
    pub directory: Arc<InMemoryRecipientDirectory>,
    /// Pool for schema-level assertions.
    pub pool: PgPool,
    /// Runtime driving the adapters.
    pub rt: Runtime,
    _database: TestDatabase,
}

impl PgEngine {
    /// Configures a bare agent for `owner_id`.
    pub fn agent(&self, owner_id: OwnerId) -> AgentId {
        let agent_id = AgentId::new();
        self.directory
            .put_agent_config(AgentConfig::new(agent_id, owner_id))
            .expect("agent config stored");
        agent_id
    }
}

fn build_engine(cluster: &'static TestCluster) -> Result<PgEngine, BoxError> {
    let (database, pool) = TestDatabase::create(cluster, "missive")?;
    let rt = test_runtime()?;
    let catalog_repo = Arc::new(PostgresVariableCatalog::new(pool.clone()));
    let templates = Arc::new(PostgresTemplateRepository::new(pool.clone()));
    let assignment_repo = Arc::new(PostgresAssignmentRepository::new(pool.clone()));
    let directory = Arc::new(InMemoryRecipientDirectory::new());
    let clock = Arc::new(DefaultClock);

    let catalog = VariableCatalogService::new(Arc::clone(&catalog_repo), Arc::clone(&clock));
    rt.block_on(catalog.seed_defaults())
        .map_err(|e| Box::new(e) as BoxError)?;

    Ok(PgEngine {
        catalog,
        store: TemplateStoreService::new(
            Arc::clone(&templates),
            catalog_repo,
            Arc::clone(&clock),
        ),
        assignments: AssignmentRegistryService::new(
            Arc::clone(&assignment_repo),
            Arc::clone(&templates),
            Arc::clone(&directory),
            clock,
        ),
        templates,
        assignment_repo,
        directory,
        pool,
        rt,
        _database: database,
    })
}

/// Provides engine services over a fresh, migrated database.
#[fixture]
pub fn pg_engine(shared_test_cluster: &'static TestCluster) -> PgEngine {
    build_engine(shared_test_cluster).expect("postgres engine setup")
}

/// Builds an unsaved template for repository-level tests.
pub fn template(owner_id: OwnerId, template_type: TemplateType) -> Template {
    Template::new(
        owner_id,
        TemplateName::new("Sequenza").expect("valid name"),
        template_type,
        "",
        &DefaultClock,
    )
}

/// Builds an unsaved version without variables.
pub fn version(template: &Template, number: u32, body: &str) -> TemplateVersion {
    TemplateVersion::new(
        template.id(),
        VersionNumber::new(number).expect("positive version"),
        body,
        Vec::new(),
        template.owner_id(),
        &DefaultClock,
    )
}
