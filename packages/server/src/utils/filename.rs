/// MIME type that marks an upload as markdown regardless of its extension.
pub const MARKDOWN_MIME: &str = "text/markdown";

/// Returns `true` if the filename ends in `.md`. The match is case-sensitive.
pub fn has_markdown_extension(filename: &str) -> bool {
    filename.ends_with(".md")
}

/// Whether an uploaded part may be stored as a note.
///
/// A part is accepted when it is declared as `text/markdown` or its filename
/// ends in `.md`.
pub fn accepts_markdown_upload(filename: &str, content_type: Option<&str>) -> bool {
    let declared_markdown = content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(MARKDOWN_MIME));

    declared_markdown || has_markdown_extension(filename)
}
