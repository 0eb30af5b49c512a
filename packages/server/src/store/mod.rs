//! Persistence for notes.
//!
//! A note is keyed by its filename. Writes go through [`NoteStore::upsert`],
//! which must be a single atomic statement on the backend so that
//! concurrent writers to one filename can never produce two rows.

mod database;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{DbErr, FromQueryResult};
use serde::Serialize;
use thiserror::Error;

use crate::entity::note;

pub use database::DbNoteStore;

pub type Note = note::Model;

/// Result of an upsert: the row id and whether the row was newly inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromQueryResult)]
pub struct UpsertOutcome {
    pub id: i32,
    pub created: bool,
}

/// List projection of a note, without its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct NoteSummary {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "todo.md")]
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected a write on the filename uniqueness constraint.
    #[error("filename '{0}' already exists")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a note, or replace the content of the note with the same filename.
    ///
    /// `created_at` and `id` of an existing note are left untouched.
    async fn upsert(&self, filename: &str, content: &str) -> Result<UpsertOutcome, StoreError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Note>, StoreError>;

    async fn get_by_filename(&self, filename: &str) -> Result<Option<Note>, StoreError>;

    /// All notes, most recently created first. Ties go to the higher id.
    async fn list_all(&self) -> Result<Vec<NoteSummary>, StoreError>;
}
