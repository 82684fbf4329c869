//! `PostgreSQL` repository implementation for templates and versions.

use super::{
    models::{
        NewTemplateRow, NewTemplateVersionRow, TemplateChangeset, TemplateRow, TemplateVariableRow,
        TemplateVersionRow,
    },
    schema::{template_variables, template_versions, templates},
};
use crate::catalog::adapters::postgres::{CatalogEntryRow, row_to_entry, schema::variable_catalog};
use crate::catalog::domain::VariableCatalogEntry;
use crate::template::{
    domain::{
        ActiveVersionSummary, ApprovalStatus, ExternalSync, PersistedTemplateData,
        PersistedVersionData, Position, Template, TemplateDetail, TemplateId, TemplateListFilter,
        TemplateName, TemplateSummary, TemplateType, TemplateVariable, TemplateVersion,
        TemplateVersionId, VersionNumber, VersionRecord,
    },
    ports::{TemplateRepository, TemplateRepositoryError, TemplateRepositoryResult},
};
use crate::tenancy::OwnerId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL` connection pool type used by template adapters.
pub type TemplatePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed template repository.
#[derive(Debug, Clone)]
pub struct PostgresTemplateRepository {
    pool: TemplatePgPool,
}

impl PostgresTemplateRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TemplatePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TemplateRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TemplateRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TemplateRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TemplateRepositoryError::persistence)?
    }
}

#[async_trait]
impl TemplateRepository for PostgresTemplateRepository {
    async fn create(
        &self,
        template: &Template,
        first_version: &TemplateVersion,
    ) -> TemplateRepositoryResult<()> {
        let template_id = template.id();
        let owner_id = template.owner_id();
        let template_type = template.template_type();
        let template_row = to_new_template_row(template);
        let version_row = to_new_version_row(first_version)?;
        let variable_rows = to_variable_rows(first_version)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TemplateRepositoryError, _>(|tx| {
                diesel::insert_into(templates::table)
                    .values(&template_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                            if is_constraint(info.as_ref(), "idx_templates_owner_type_active") =>
                        {
                            TemplateRepositoryError::ActiveTypeConflict {
                                owner_id,
                                template_type,
                            }
                        }
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TemplateRepositoryError::DuplicateTemplate(template_id)
                        }
                        _ => TemplateRepositoryError::persistence(err),
                    })?;
                diesel::insert_into(template_versions::table)
                    .values(&version_row)
                    .execute(tx)?;
                if !variable_rows.is_empty() {
                    diesel::insert_into(template_variables::table)
                        .values(&variable_rows)
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn append_version(&self, version: &TemplateVersion) -> TemplateRepositoryResult<()> {
        let template_id = version.template_id();
        let version_number = version.version_number();
        let created_at = version.created_at();
        let version_row = to_new_version_row(version)?;
        let variable_rows = to_variable_rows(version)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TemplateRepositoryError, _>(|tx| {
                // Serialises concurrent writers on the same template, and
                // with archive.
                let locked = templates::table
                    .find(template_id.into_inner())
                    .filter(templates::archived_at.is_null())
                    .select(templates::id)
                    .for_update()
                    .first::<uuid::Uuid>(tx)
                    .optional()?;
                if locked.is_none() {
                    return Err(TemplateRepositoryError::TemplateNotFound(template_id));
                }

                let current_max = template_versions::table
                    .filter(template_versions::template_id.eq(template_id.into_inner()))
                    .select(diesel::dsl::max(template_versions::version_number))
                    .first::<Option<i32>>(tx)?;
                let expected = current_max
                    .map(VersionNumber::try_from)
                    .transpose()
                    .map_err(TemplateRepositoryError::invalid_persisted_data)?
                    .map_or(VersionNumber::FIRST, VersionNumber::next);
                if expected != version_number {
                    return Err(TemplateRepositoryError::VersionConflict {
                        template_id,
                        version_number,
                    });
                }

                diesel::update(
                    template_versions::table
                        .filter(template_versions::template_id.eq(template_id.into_inner()))
                        .filter(template_versions::is_active.eq(true)),
                )
                .set(template_versions::is_active.eq(false))
                .execute(tx)?;

                diesel::insert_into(template_versions::table)
                    .values(&version_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TemplateRepositoryError::VersionConflict {
                                template_id,
                                version_number,
                            }
                        }
                        _ => TemplateRepositoryError::persistence(err),
                    })?;
                if !variable_rows.is_empty() {
                    diesel::insert_into(template_variables::table)
                        .values(&variable_rows)
                        .execute(tx)?;
                }

                diesel::update(templates::table.find(template_id.into_inner()))
                    .set(templates::updated_at.eq(created_at))
                    .execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TemplateId) -> TemplateRepositoryResult<Option<TemplateDetail>> {
        self.run_blocking(move |connection| {
            let Some(template_row) = templates::table
                .find(id.into_inner())
                .select(TemplateRow::as_select())
                .first::<TemplateRow>(connection)
                .optional()?
            else {
                return Ok(None);
            };

            let version_rows = template_versions::table
                .filter(template_versions::template_id.eq(id.into_inner()))
                .order(template_versions::version_number.desc())
                .select(TemplateVersionRow::as_select())
                .load::<TemplateVersionRow>(connection)?;
            let versions = hydrate_versions(connection, version_rows)?;
            Ok(Some(TemplateDetail::new(row_to_template(template_row)?, versions)))
        })
        .await
    }

    async fn list_by_owner(
        &self,
        owner_id: OwnerId,
        filter: TemplateListFilter,
    ) -> TemplateRepositoryResult<Vec<TemplateSummary>> {
        self.run_blocking(move |connection| {
            let mut query = templates::table
                .filter(templates::owner_id.eq(owner_id.into_inner()))
                .filter(templates::archived_at.is_null())
                .into_boxed();
            if let Some(template_type) = filter.template_type {
                query = query.filter(templates::template_type.eq(template_type.as_str()));
            }
            let template_rows = query
                .order(templates::created_at.desc())
                .select(TemplateRow::as_select())
                .load::<TemplateRow>(connection)?;

            let template_ids: Vec<uuid::Uuid> = template_rows.iter().map(|row| row.id).collect();
            let active_rows = template_versions::table
                .filter(template_versions::template_id.eq_any(&template_ids))
                .filter(template_versions::is_active.eq(true))
                .select(TemplateVersionRow::as_select())
                .load::<TemplateVersionRow>(connection)?;
            let active_by_template: HashMap<uuid::Uuid, TemplateVersion> =
                hydrate_versions(connection, active_rows)?
                    .into_iter()
                    .map(|version| (version.template_id().into_inner(), version))
                    .collect();

            template_rows
                .into_iter()
                .map(|row| {
                    let active_version = active_by_template
                        .get(&row.id)
                        .map(ActiveVersionSummary::from);
                    Ok(TemplateSummary {
                        template: row_to_template(row)?,
                        active_version,
                    })
                })
                .collect()
        })
        .await
    }

    async fn find_version(
        &self,
        version_id: TemplateVersionId,
    ) -> TemplateRepositoryResult<Option<VersionRecord>> {
        self.run_blocking(move |connection| {
            let Some((version_row, template_row)) = template_versions::table
                .inner_join(templates::table)
                .filter(template_versions::id.eq(version_id.into_inner()))
                .select((TemplateVersionRow::as_select(), TemplateRow::as_select()))
                .first::<(TemplateVersionRow, TemplateRow)>(connection)
                .optional()?
            else {
                return Ok(None);
            };

            let version = hydrate_versions(connection, vec![version_row])?
                .pop()
                .ok_or(TemplateRepositoryError::VersionNotFound(version_id))?;
            Ok(Some(VersionRecord {
                template: row_to_template(template_row)?,
                version,
            }))
        })
        .await
    }

    async fn update(&self, template: &Template) -> TemplateRepositoryResult<()> {
        let template_id = template.id();
        let owner_id = template.owner_id();
        let template_type = template.template_type();
        let changeset = TemplateChangeset {
            name: template.name().as_str().to_owned(),
            description: template.description().to_owned(),
            archived_at: template.archived_at(),
            updated_at: template.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated = diesel::update(templates::table.find(template_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_constraint(info.as_ref(), "idx_templates_owner_type_active") =>
                    {
                        TemplateRepositoryError::ActiveTypeConflict {
                            owner_id,
                            template_type,
                        }
                    }
                    _ => TemplateRepositoryError::persistence(err),
                })?;
            if updated == 0 {
                return Err(TemplateRepositoryError::TemplateNotFound(template_id));
            }
            Ok(())
        })
        .await
    }

    async fn record_sync(
        &self,
        version_id: TemplateVersionId,
        sync: &ExternalSync,
    ) -> TemplateRepositoryResult<()> {
        let content_id = sync.content_id().map(str::to_owned);
        let status = sync.approval_status().as_str().to_owned();
        let last_synced_at = sync.last_synced_at();

        self.run_blocking(move |connection| {
            let updated = diesel::update(template_versions::table.find(version_id.into_inner()))
                .set((
                    template_versions::external_content_id.eq(content_id),
                    template_versions::external_approval_status.eq(status),
                    template_versions::last_synced_at.eq(last_synced_at),
                ))
                .execute(connection)?;
            if updated == 0 {
                return Err(TemplateRepositoryError::VersionNotFound(version_id));
            }
            Ok(())
        })
        .await
    }

    async fn list_synced_versions(
        &self,
        owner_id: OwnerId,
    ) -> TemplateRepositoryResult<Vec<VersionRecord>> {
        self.run_blocking(move |connection| {
            let rows = template_versions::table
                .inner_join(templates::table)
                .filter(templates::owner_id.eq(owner_id.into_inner()))
                .filter(template_versions::external_content_id.is_not_null())
                .order((templates::created_at.asc(), template_versions::version_number.asc()))
                .select((TemplateVersionRow::as_select(), TemplateRow::as_select()))
                .load::<(TemplateVersionRow, TemplateRow)>(connection)?;

            let (version_rows, template_rows): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
            let versions = hydrate_versions(connection, version_rows)?;
            versions
                .into_iter()
                .zip(template_rows)
                .map(|(version, template_row)| {
                    Ok(VersionRecord {
                        template: row_to_template(template_row)?,
                        version,
                    })
                })
                .collect()
        })
        .await
    }
}

/// Loads variables and catalog entries for `rows`, preserving row order.
fn hydrate_versions(
    connection: &mut PgConnection,
    rows: Vec<TemplateVersionRow>,
) -> TemplateRepositoryResult<Vec<TemplateVersion>> {
    let version_ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();
    let variable_rows = template_variables::table
        .filter(template_variables::template_version_id.eq_any(&version_ids))
        .select(TemplateVariableRow::as_select())
        .load::<TemplateVariableRow>(connection)?;

    let mut entry_ids: Vec<uuid::Uuid> =
        variable_rows.iter().map(|row| row.catalog_entry_id).collect();
    entry_ids.sort_unstable();
    entry_ids.dedup();
    let entries: HashMap<uuid::Uuid, VariableCatalogEntry> = variable_catalog::table
        .filter(variable_catalog::id.eq_any(&entry_ids))
        .select(CatalogEntryRow::as_select())
        .load::<CatalogEntryRow>(connection)?
        .into_iter()
        .map(|row| {
            let entry = row_to_entry(row).map_err(TemplateRepositoryError::invalid_persisted_data)?;
            Ok((entry.id().into_inner(), entry))
        })
        .collect::<TemplateRepositoryResult<_>>()?;

    let mut variables_by_version: HashMap<uuid::Uuid, Vec<TemplateVariable>> = HashMap::new();
    for row in variable_rows {
        let entry = entries.get(&row.catalog_entry_id).cloned().ok_or_else(|| {
            TemplateRepositoryError::invalid_persisted_data(std::io::Error::other(format!(
                "template variable references missing catalog entry {}",
                row.catalog_entry_id
            )))
        })?;
        let position =
            Position::try_from(row.position).map_err(TemplateRepositoryError::invalid_persisted_data)?;
        variables_by_version
            .entry(row.template_version_id)
            .or_default()
            .push(TemplateVariable::new(position, entry));
    }

    rows.into_iter()
        .map(|row| {
            let variables = variables_by_version.remove(&row.id).unwrap_or_default();
            row_to_version(row, variables)
        })
        .collect()
}

fn row_to_template(row: TemplateRow) -> TemplateRepositoryResult<Template> {
    let TemplateRow {
        id,
        owner_id,
        name,
        template_type,
        description,
        archived_at,
        created_at,
        updated_at,
    } = row;

    Ok(Template::from_persisted(PersistedTemplateData {
        id: TemplateId::from_uuid(id),
        owner_id: OwnerId::from_uuid(owner_id),
        name: TemplateName::new(name).map_err(TemplateRepositoryError::invalid_persisted_data)?,
        template_type: TemplateType::try_from(template_type.as_str())
            .map_err(TemplateRepositoryError::invalid_persisted_data)?,
        description,
        archived_at,
        created_at,
        updated_at,
    }))
}

fn row_to_version(
    row: TemplateVersionRow,
    variables: Vec<TemplateVariable>,
) -> TemplateRepositoryResult<TemplateVersion> {
    let TemplateVersionRow {
        id,
        template_id,
        version_number,
        body_text,
        is_active,
        external_content_id,
        external_approval_status,
        last_synced_at,
        created_at,
        created_by,
    } = row;

    let status = ApprovalStatus::try_from(external_approval_status.as_str())
        .map_err(TemplateRepositoryError::invalid_persisted_data)?;
    Ok(TemplateVersion::from_persisted(PersistedVersionData {
        id: TemplateVersionId::from_uuid(id),
        template_id: TemplateId::from_uuid(template_id),
        version_number: VersionNumber::try_from(version_number)
            .map_err(TemplateRepositoryError::invalid_persisted_data)?,
        body: body_text,
        variables,
        is_active,
        sync: ExternalSync::new(external_content_id, status, last_synced_at),
        created_at,
        created_by: OwnerId::from_uuid(created_by),
    }))
}

fn to_new_template_row(template: &Template) -> NewTemplateRow {
    NewTemplateRow {
        id: template.id().into_inner(),
        owner_id: template.owner_id().into_inner(),
        name: template.name().as_str().to_owned(),
        template_type: template.template_type().as_str().to_owned(),
        description: template.description().to_owned(),
        archived_at: template.archived_at(),
        created_at: template.created_at(),
        updated_at: template.updated_at(),
    }
}

fn to_new_version_row(version: &TemplateVersion) -> TemplateRepositoryResult<NewTemplateVersionRow> {
    let sync = version.sync();
    Ok(NewTemplateVersionRow {
        id: version.id().into_inner(),
        template_id: version.template_id().into_inner(),
        version_number: i32::try_from(version.version_number().value())
            .map_err(TemplateRepositoryError::persistence)?,
        body_text: version.body().to_owned(),
        is_active: version.is_active(),
        external_content_id: sync.content_id().map(str::to_owned),
        external_approval_status: sync.approval_status().as_str().to_owned(),
        last_synced_at: sync.last_synced_at(),
        created_at: version.created_at(),
        created_by: version.created_by().into_inner(),
    })
}

fn to_variable_rows(version: &TemplateVersion) -> TemplateRepositoryResult<Vec<TemplateVariableRow>> {
    version
        .variables()
        .iter()
        .map(|variable| {
            Ok(TemplateVariableRow {
                template_version_id: version.id().into_inner(),
                catalog_entry_id: variable.entry().id().into_inner(),
                position: i32::try_from(variable.position().value())
                    .map_err(TemplateRepositoryError::persistence)?,
            })
        })
        .collect()
}

fn is_constraint(info: &dyn DatabaseErrorInformation, name: &str) -> bool {
    info.constraint_name().is_some_and(|constraint| constraint == name)
}
