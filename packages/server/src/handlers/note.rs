use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::api_key::ApiKey;
use crate::extractors::json::AppJson;
use crate::models::note::{SaveNoteRequest, SaveNoteResponse, WelcomeResponse};
use crate::service::{SavedNote, UploadedFile};
use crate::state::AppState;
use crate::store::NoteSummary;
use crate::utils::filename::accepts_markdown_upload;

/// Multipart field that carries the uploaded markdown file.
pub const UPLOAD_FIELD: &str = "markdownFile";

/// Room for multipart framing on top of the file itself.
const MULTIPART_OVERHEAD: usize = 16 * 1024;

pub fn upload_body_limit(max_file_size: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_file_size + MULTIPART_OVERHEAD)
}

fn save_status(note: &SavedNote) -> StatusCode {
    if note.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Notes",
    operation_id = "apiRoot",
    summary = "API root",
    responses((status = 200, description = "Welcome message", body = WelcomeResponse)),
)]
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Markdown Notes API v1".into(),
    })
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Notes",
    operation_id = "saveNote",
    summary = "Save markdown text as a note",
    description = "Stores `markdownContent` under `filename`. Saving to an existing filename \
        replaces its content in place and keeps its id and creation time.",
    request_body = SaveNoteRequest,
    responses(
        (status = 201, description = "Note created", body = SaveNoteResponse),
        (status = 200, description = "Existing note replaced", body = SaveNoteResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 409, description = "Filename conflict (CONFLICT)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(_key, state, payload))]
pub async fn save_note(
    _key: ApiKey,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SaveNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (filename, content) = payload.into_parts();
    let saved = state.notes.save_text(&filename, &content).await?;

    Ok((save_status(&saved), Json(SaveNoteResponse::saved(saved))))
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "Notes",
    operation_id = "uploadNote",
    summary = "Upload a markdown file as a note",
    description = "Reads the `markdownFile` multipart field. Only `.md` files or parts declared \
        as `text/markdown` are accepted. The upload's filename becomes the note's key; \
        re-uploading the same filename replaces the stored content.",
    request_body(content_type = "multipart/form-data", description = "Markdown file upload"),
    responses(
        (status = 201, description = "Note created", body = SaveNoteResponse),
        (status = 200, description = "Existing note replaced", body = SaveNoteResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 409, description = "Filename conflict (CONFLICT)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(_key, state, multipart))]
pub async fn upload_note(
    _key: ApiKey,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let file = match multipart {
        Ok(multipart) => {
            read_markdown_file(multipart, state.config.upload.max_file_size).await?
        }
        Err(rejection) => {
            tracing::debug!(%rejection, "Upload request without a multipart body");
            None
        }
    };

    let saved = state.notes.upload_file(file).await?;

    Ok((save_status(&saved), Json(SaveNoteResponse::uploaded(saved))))
}

/// Pull the first `markdownFile` part out of the form, ignoring other fields.
async fn read_markdown_file(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Multipart error"))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !accepts_markdown_upload(&filename, field.content_type()) {
            return Err(AppError::Validation(
                "Only .md markdown files are allowed!".into(),
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "Failed to read file"))?;
        if bytes.len() > max_file_size {
            return Err(file_too_large());
        }

        return Ok(Some(UploadedFile {
            filename,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}

fn multipart_error(err: MultipartError, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        file_too_large()
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}

fn file_too_large() -> AppError {
    AppError::Validation("File is too large".into())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Notes",
    operation_id = "listNotes",
    summary = "List all notes",
    description = "Returns id, filename and creation time of every note, most recent first.",
    responses(
        (status = 200, description = "Note summaries", body = Vec<NoteSummary>),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(_key, state))]
pub async fn list_notes(
    _key: ApiKey,
    State(state): State<AppState>,
) -> Result<Json<Vec<NoteSummary>>, AppError> {
    Ok(Json(state.notes.list().await?))
}

#[utoipa::path(
    get,
    path = "/{id}/html",
    tag = "Notes",
    operation_id = "renderNoteById",
    summary = "Render a note by id",
    description = "Returns the note's markdown rendered as an HTML fragment.",
    params(("id" = String, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Rendered HTML", content_type = "text/html", body = String),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 404, description = "Note not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(_key, state))]
pub async fn render_note_by_id(
    _key: ApiKey,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    Ok(Html(state.notes.render_by_id(&id).await?))
}

#[utoipa::path(
    get,
    path = "/filename/{filename}/html",
    tag = "Notes",
    operation_id = "renderNoteByFilename",
    summary = "Render a note by filename",
    description = "Returns the note's markdown rendered as an HTML fragment.",
    params(("filename" = String, Path, description = "Note filename")),
    responses(
        (status = 200, description = "Rendered HTML", content_type = "text/html", body = String),
        (status = 401, description = "Unauthorized (API_KEY_MISSING, API_KEY_INVALID)", body = ErrorBody),
        (status = 404, description = "Note not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("api_key" = [])),
)]
#[instrument(skip(_key, state))]
pub async fn render_note_by_filename(
    _key: ApiKey,
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Html<String>, AppError> {
    Ok(Html(state.notes.render_by_filename(&filename).await?))
}
