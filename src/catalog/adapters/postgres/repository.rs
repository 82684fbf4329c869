//! `PostgreSQL` repository implementation for the variable catalog.

use super::{
    models::{CatalogEntryRow, NewCatalogEntryRow},
    schema::variable_catalog,
};
use crate::catalog::{
    domain::{
        CatalogEntryId, PersistedCatalogEntry, SourcePath, SourceRef, SourceType,
        VariableCatalogEntry, VariableKey,
    },
    ports::{CatalogRepositoryError, CatalogRepositoryResult, VariableCatalogRepository},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by catalog adapters.
pub type CatalogPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed variable catalog.
#[derive(Debug, Clone)]
pub struct PostgresVariableCatalog {
    pool: CatalogPgPool,
}

impl PostgresVariableCatalog {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CatalogPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CatalogRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CatalogRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CatalogRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CatalogRepositoryError::persistence)?
    }
}

#[async_trait]
impl VariableCatalogRepository for PostgresVariableCatalog {
    async fn register(&self, entry: &VariableCatalogEntry) -> CatalogRepositoryResult<()> {
        let entry_id = entry.id();
        let key = entry.key().clone();
        let new_row = to_new_row(entry);

        self.run_blocking(move |connection| {
            diesel::insert_into(variable_catalog::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_key_unique_violation(info.as_ref()) =>
                    {
                        CatalogRepositoryError::DuplicateKey(key.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CatalogRepositoryError::DuplicateEntry(entry_id)
                    }
                    _ => CatalogRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_key(
        &self,
        key: &VariableKey,
    ) -> CatalogRepositoryResult<Option<VariableCatalogEntry>> {
        let key_str = key.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = variable_catalog::table
                .filter(variable_catalog::variable_key.eq(&key_str))
                .select(CatalogEntryRow::as_select())
                .first::<CatalogEntryRow>(connection)
                .optional()
                .map_err(CatalogRepositoryError::persistence)?;
            row.map(row_to_entry).transpose()
        })
        .await
    }

    async fn find_by_keys(
        &self,
        keys: &[VariableKey],
    ) -> CatalogRepositoryResult<Vec<VariableCatalogEntry>> {
        let key_strs: Vec<String> = keys.iter().map(|key| key.as_str().to_owned()).collect();
        self.run_blocking(move |connection| {
            let rows = variable_catalog::table
                .filter(variable_catalog::variable_key.eq_any(&key_strs))
                .select(CatalogEntryRow::as_select())
                .load::<CatalogEntryRow>(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }

    async fn find_by_ids(
        &self,
        ids: &[CatalogEntryId],
    ) -> CatalogRepositoryResult<Vec<VariableCatalogEntry>> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = variable_catalog::table
                .filter(variable_catalog::id.eq_any(&uuids))
                .select(CatalogEntryRow::as_select())
                .load::<CatalogEntryRow>(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }

    async fn list_all(&self) -> CatalogRepositoryResult<Vec<VariableCatalogEntry>> {
        self.run_blocking(move |connection| {
            let rows = variable_catalog::table
                .order((variable_catalog::source_type, variable_catalog::display_name))
                .select(CatalogEntryRow::as_select())
                .load::<CatalogEntryRow>(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }
}

fn to_new_row(entry: &VariableCatalogEntry) -> NewCatalogEntryRow {
    let fallback = entry.fallback_source();
    NewCatalogEntryRow {
        id: entry.id().into_inner(),
        variable_key: entry.key().as_str().to_owned(),
        display_name: entry.display_name().to_owned(),
        description: entry.description().to_owned(),
        source_type: entry.source_type().as_str().to_owned(),
        source_path: entry.source().path().to_string(),
        fallback_source_type: fallback.map(|source| source.source_type().as_str().to_owned()),
        fallback_source_path: fallback.map(|source| source.path().to_string()),
        fallback_value: entry.fallback_value().map(str::to_owned),
        created_at: entry.created_at(),
    }
}

/// Reconstructs a catalog entry from its row.
pub(crate) fn row_to_entry(row: CatalogEntryRow) -> CatalogRepositoryResult<VariableCatalogEntry> {
    let CatalogEntryRow {
        id,
        variable_key,
        display_name,
        description,
        source_type,
        source_path,
        fallback_source_type,
        fallback_source_path,
        fallback_value,
        created_at,
    } = row;

    let key = VariableKey::new(variable_key).map_err(CatalogRepositoryError::invalid_persisted_data)?;
    let primary_type = SourceType::try_from(source_type.as_str())
        .map_err(CatalogRepositoryError::invalid_persisted_data)?;
    let primary_path =
        SourcePath::parse(&source_path).map_err(CatalogRepositoryError::invalid_persisted_data)?;

    let fallback_source = match fallback_source_path {
        Some(path) => {
            let fallback_type = fallback_source_type
                .as_deref()
                .map(SourceType::try_from)
                .transpose()
                .map_err(CatalogRepositoryError::invalid_persisted_data)?
                .unwrap_or(primary_type);
            let parsed =
                SourcePath::parse(&path).map_err(CatalogRepositoryError::invalid_persisted_data)?;
            Some(SourceRef::new(fallback_type, parsed))
        }
        None => None,
    };

    Ok(VariableCatalogEntry::from_persisted(PersistedCatalogEntry {
        id: CatalogEntryId::from_uuid(id),
        key,
        display_name,
        description,
        source: SourceRef::new(primary_type, primary_path),
        fallback_source,
        fallback_value,
        created_at,
    }))
}

fn is_key_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_variable_catalog_key_unique")
}
