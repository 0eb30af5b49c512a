//! Note operations: validation, persistence and rendering.

use std::sync::Arc;

use render::MarkdownRenderer;
use thiserror::Error;
use tracing::{info, instrument};

use crate::store::{NoteStore, NoteSummary, StoreError};

/// Domain-level failure of a note operation.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Backend failure. The detail is for logs, not for callers.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<StoreError> for NoteError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(filename) => {
                NoteError::Conflict(format!("Filename '{filename}' already exists."))
            }
            StoreError::Database(e) => NoteError::Infrastructure(e.to_string()),
        }
    }
}

/// A file received by the upload entry point.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// The two ways a note can be written.
#[derive(Debug, Clone)]
pub enum NoteInput {
    Text { filename: String, content: String },
    File(UploadedFile),
}

/// A validated write, identical for every entry point.
struct NoteDraft {
    filename: String,
    content: String,
}

impl NoteInput {
    fn into_draft(self) -> Result<NoteDraft, NoteError> {
        match self {
            NoteInput::Text { filename, content } => {
                require_filename(&filename)?;
                if content.is_empty() {
                    return Err(NoteError::Validation(
                        "markdownContent is required".into(),
                    ));
                }
                reject_nul("markdownContent", &content)?;
                Ok(NoteDraft { filename, content })
            }
            NoteInput::File(file) => {
                require_filename(&file.filename)?;
                let content = String::from_utf8_lossy(&file.bytes).into_owned();
                reject_nul("file content", &content)?;
                Ok(NoteDraft {
                    filename: file.filename,
                    content,
                })
            }
        }
    }
}

fn require_filename(filename: &str) -> Result<(), NoteError> {
    if filename.trim().is_empty() {
        return Err(NoteError::Validation("filename is required".into()));
    }
    reject_nul("filename", filename)
}

/// Text columns cannot hold U+0000.
fn reject_nul(field: &str, value: &str) -> Result<(), NoteError> {
    if value.contains('\0') {
        return Err(NoteError::Validation(format!(
            "{field} must not contain NUL characters"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedNote {
    pub id: i32,
    pub filename: String,
    /// `false` when an existing note's content was replaced.
    pub created: bool,
}

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
    renderer: Arc<MarkdownRenderer>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>, renderer: Arc<MarkdownRenderer>) -> Self {
        Self { store, renderer }
    }

    pub async fn save_text(&self, filename: &str, content: &str) -> Result<SavedNote, NoteError> {
        self.save(NoteInput::Text {
            filename: filename.to_string(),
            content: content.to_string(),
        })
        .await
    }

    /// Store an uploaded file. `None` means the request carried no file.
    pub async fn upload_file(&self, file: Option<UploadedFile>) -> Result<SavedNote, NoteError> {
        let file = file.ok_or_else(|| NoteError::Validation("No file uploaded.".into()))?;
        self.save(NoteInput::File(file)).await
    }

    #[instrument(skip(self, input))]
    pub async fn save(&self, input: NoteInput) -> Result<SavedNote, NoteError> {
        let draft = input.into_draft()?;
        let outcome = self.store.upsert(&draft.filename, &draft.content).await?;

        info!(
            id = outcome.id,
            filename = %draft.filename,
            created = outcome.created,
            "Note saved"
        );

        Ok(SavedNote {
            id: outcome.id,
            filename: draft.filename,
            created: outcome.created,
        })
    }

    pub async fn list(&self) -> Result<Vec<NoteSummary>, NoteError> {
        Ok(self.store.list_all().await?)
    }

    /// Render the note with the given id. Ids that are not integers match nothing.
    pub async fn render_by_id(&self, id: &str) -> Result<String, NoteError> {
        let note = match id.parse::<i32>() {
            Ok(id) => self.store.get_by_id(id).await?,
            Err(_) => None,
        };
        let note = note.ok_or_else(not_found)?;
        Ok(self.renderer.render(&note.markdown_content))
    }

    pub async fn render_by_filename(&self, filename: &str) -> Result<String, NoteError> {
        let note = self
            .store
            .get_by_filename(filename)
            .await?
            .ok_or_else(not_found)?;
        Ok(self.renderer.render(&note.markdown_content))
    }
}

fn not_found() -> NoteError {
    NoteError::NotFound("Note not found.".into())
}
