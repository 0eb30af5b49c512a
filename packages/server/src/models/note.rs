use serde::{Deserialize, Serialize};

use crate::service::SavedNote;

/// Body of `POST /notes`.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as a validation error naming it, not as a parse failure.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveNoteRequest {
    #[schema(example = "todo.md")]
    pub filename: Option<String>,
    #[schema(example = "# Todo\n\n- [ ] write notes")]
    pub markdown_content: Option<String>,
}

impl SaveNoteRequest {
    /// Absent fields collapse to empty strings, which the service rejects.
    pub fn into_parts(self) -> (String, String) {
        (
            self.filename.unwrap_or_default(),
            self.markdown_content.unwrap_or_default(),
        )
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SaveNoteResponse {
    #[schema(example = "Note saved successfully.")]
    pub message: String,
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "todo.md")]
    pub filename: String,
    /// `false` when an existing note with this filename was overwritten.
    pub created: bool,
}

impl SaveNoteResponse {
    pub fn saved(note: SavedNote) -> Self {
        Self::with_message("Note saved successfully.", note)
    }

    pub fn uploaded(note: SavedNote) -> Self {
        Self::with_message("Note uploaded and saved successfully.", note)
    }

    fn with_message(message: &str, note: SavedNote) -> Self {
        Self {
            message: message.to_string(),
            id: note.id,
            filename: note.filename,
            created: note.created,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct WelcomeResponse {
    #[schema(example = "Welcome to the Markdown Notes API v1")]
    pub message: String,
}
