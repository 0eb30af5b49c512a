use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, Statement, Value,
};
use tracing::instrument;

use super::{Note, NoteStore, NoteSummary, StoreError, UpsertOutcome};
use crate::entity::note;

/// `xmax` is zero only for a row version created by a plain insert, which
/// tells us whether the conflict branch ran.
const UPSERT_SQL: &str = r#"INSERT INTO "notes" ("filename", "markdown_content", "created_at")
VALUES ($1, $2, $3)
ON CONFLICT ("filename") DO UPDATE SET "markdown_content" = EXCLUDED."markdown_content"
RETURNING "id", (xmax = 0) AS "created""#;

/// PostgreSQL-backed note store sharing the application's connection pool.
#[derive(Clone)]
pub struct DbNoteStore {
    db: DatabaseConnection,
}

impl DbNoteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_write_err(err: DbErr, filename: &str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Conflict(filename.to_string()),
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl NoteStore for DbNoteStore {
    #[instrument(skip(self, content), fields(len = content.len()))]
    async fn upsert(&self, filename: &str, content: &str) -> Result<UpsertOutcome, StoreError> {
        let values: [Value; 3] = [filename.into(), content.into(), Utc::now().into()];
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, UPSERT_SQL, values);

        UpsertOutcome::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| map_write_err(e, filename))?
            .ok_or(StoreError::Database(DbErr::RecordNotInserted))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Note>, StoreError> {
        Ok(note::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn get_by_filename(&self, filename: &str) -> Result<Option<Note>, StoreError> {
        Ok(note::Entity::find()
            .filter(note::Column::Filename.eq(filename))
            .one(&self.db)
            .await?)
    }

    async fn list_all(&self) -> Result<Vec<NoteSummary>, StoreError> {
        Ok(note::Entity::find()
            .select_only()
            .column(note::Column::Id)
            .column(note::Column::Filename)
            .column(note::Column::CreatedAt)
            .order_by_desc(note::Column::CreatedAt)
            .order_by_desc(note::Column::Id)
            .into_model::<NoteSummary>()
            .all(&self.db)
            .await?)
    }
}
