//! `PostgreSQL` repository implementation for assignments.

use super::{
    models::{AssignmentRow, NewAssignmentRow},
    schema::template_assignments,
};
use crate::assignment::{
    domain::{AssignmentId, PersistedAssignmentData, TemplateAssignment},
    ports::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult},
};
use crate::template::domain::{TemplateId, TemplateType};
use crate::tenancy::{AgentId, OwnerId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::upsert::excluded;

/// `PostgreSQL` connection pool type used by assignment adapters.
pub type AssignmentPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed assignment repository.
#[derive(Debug, Clone)]
pub struct PostgresAssignmentRepository {
    pool: AssignmentPgPool,
}

impl PostgresAssignmentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AssignmentPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AssignmentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AssignmentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AssignmentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AssignmentRepositoryError::persistence)?
    }
}

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn upsert(&self, assignment: &TemplateAssignment) -> AssignmentRepositoryResult<()> {
        let row = to_new_row(assignment);
        let agent_id = assignment.agent_id();
        let template_type = assignment.template_type();
        self.run_blocking(move |connection| {
            connection.transaction::<_, AssignmentRepositoryError, _>(|tx| {
                let holder = template_assignments::table
                    .filter(template_assignments::agent_id.eq(row.agent_id))
                    .filter(template_assignments::template_type.eq(&row.template_type))
                    .select(template_assignments::owner_id)
                    .for_update()
                    .first::<uuid::Uuid>(tx)
                    .optional()?;
                if holder.is_some_and(|current| current != row.owner_id) {
                    return Err(AssignmentRepositoryError::ForeignSlot {
                        agent_id,
                        template_type,
                    });
                }

                // The original id, owner, and created_at survive a
                // reassignment. A concurrent insert by another owner cannot
                // be overwritten because owner_id is matched.
                let written = diesel::query_dsl::methods::FilterDsl::filter(
                    diesel::insert_into(template_assignments::table)
                        .values(&row)
                        .on_conflict((
                            template_assignments::agent_id,
                            template_assignments::template_type,
                        ))
                        .do_update()
                        .set((
                            template_assignments::template_id
                                .eq(excluded(template_assignments::template_id)),
                            template_assignments::updated_at
                                .eq(excluded(template_assignments::updated_at)),
                        )),
                    template_assignments::owner_id.eq(row.owner_id),
                )
                .execute(tx)?;
                if written == 0 {
                    return Err(AssignmentRepositoryError::ForeignSlot {
                        agent_id,
                        template_type,
                    });
                }
                Ok(())
            })
        })
        .await
    }

    async fn find(
        &self,
        agent_id: AgentId,
        template_type: TemplateType,
    ) -> AssignmentRepositoryResult<Option<TemplateAssignment>> {
        self.run_blocking(move |connection| {
            template_assignments::table
                .filter(template_assignments::agent_id.eq(agent_id.into_inner()))
                .filter(template_assignments::template_type.eq(template_type.as_str()))
                .select(AssignmentRow::as_select())
                .first::<AssignmentRow>(connection)
                .optional()?
                .map(row_to_assignment)
                .transpose()
        })
        .await
    }

    async fn remove(
        &self,
        agent_id: AgentId,
        template_type: TemplateType,
    ) -> AssignmentRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                template_assignments::table
                    .filter(template_assignments::agent_id.eq(agent_id.into_inner()))
                    .filter(template_assignments::template_type.eq(template_type.as_str())),
            )
            .execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn list_by_agent(
        &self,
        agent_id: AgentId,
    ) -> AssignmentRepositoryResult<Vec<TemplateAssignment>> {
        self.run_blocking(move |connection| {
            let rows = template_assignments::table
                .filter(template_assignments::agent_id.eq(agent_id.into_inner()))
                .select(AssignmentRow::as_select())
                .load::<AssignmentRow>(connection)?;
            let mut assignments = rows
                .into_iter()
                .map(row_to_assignment)
                .collect::<AssignmentRepositoryResult<Vec<_>>>()?;
            assignments.sort_by_key(TemplateAssignment::template_type);
            Ok(assignments)
        })
        .await
    }
}

fn row_to_assignment(row: AssignmentRow) -> AssignmentRepositoryResult<TemplateAssignment> {
    let AssignmentRow {
        id,
        owner_id,
        agent_id,
        template_type,
        template_id,
        created_at,
        updated_at,
    } = row;

    Ok(TemplateAssignment::from_persisted(PersistedAssignmentData {
        id: AssignmentId::from_uuid(id),
        owner_id: OwnerId::from_uuid(owner_id),
        agent_id: AgentId::from_uuid(agent_id),
        template_type: TemplateType::try_from(template_type.as_str())
            .map_err(AssignmentRepositoryError::invalid_persisted_data)?,
        template_id: TemplateId::from_uuid(template_id),
        created_at,
        updated_at,
    }))
}

fn to_new_row(assignment: &TemplateAssignment) -> NewAssignmentRow {
    NewAssignmentRow {
        id: assignment.id().into_inner(),
        owner_id: assignment.owner_id().into_inner(),
        agent_id: assignment.agent_id().into_inner(),
        template_type: assignment.template_type().as_str().to_owned(),
        template_id: assignment.template_id().into_inner(),
        created_at: assignment.created_at(),
        updated_at: assignment.updated_at(),
    }
}
