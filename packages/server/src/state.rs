use std::sync::Arc;

use render::MarkdownRenderer;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::service::NoteService;
use crate::store::DbNoteStore;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub notes: NoteService,
}

impl AppState {
    /// Wire the note service to the shared pool and the configured renderer.
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let renderer = Arc::new(MarkdownRenderer::new(config.markdown.clone()));
        let store = Arc::new(DbNoteStore::new(db));
        Self {
            notes: NoteService::new(store, renderer),
            config,
        }
    }
}
