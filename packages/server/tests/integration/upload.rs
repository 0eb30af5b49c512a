use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use notes_server::entity::note;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn uploaded_file_is_stored_verbatim_and_renders() {
    let app = TestApp::spawn().await;
    let content = "# Upload Test\n\nBody.";

    let res = app.upload("u.md", content.as_bytes(), "text/markdown").await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["filename"], "u.md");
    assert_eq!(res.body["created"], true);
    assert!(
        res.body["message"]
            .as_str()
            .unwrap()
            .contains("uploaded and saved successfully")
    );

    let stored = note::Entity::find()
        .filter(note::Column::Filename.eq("u.md"))
        .one(&app.db)
        .await
        .unwrap()
        .expect("uploaded note should be stored");
    assert_eq!(stored.markdown_content, content);

    let html = app.get(&routes::note_html_by_filename("u.md")).await;
    assert!(html.text.contains("<h1>Upload Test</h1>"), "{}", html.text);
    assert!(html.text.contains("<p>Body.</p>"), "{}", html.text);
}

#[tokio::test]
async fn md_extension_is_enough_without_markdown_mime() {
    let app = TestApp::spawn().await;

    let res = app
        .upload("notes.md", b"plain", "application/octet-stream")
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
}

#[tokio::test]
async fn markdown_mime_is_enough_without_md_extension() {
    let app = TestApp::spawn().await;

    let res = app.upload("notes.txt", b"plain", "text/markdown").await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["filename"], "notes.txt");
}

#[tokio::test]
async fn non_markdown_files_are_rejected() {
    let app = TestApp::spawn().await;

    let res = app.upload("image.png", b"PNG", "image/png").await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn extension_check_is_case_sensitive() {
    let app = TestApp::spawn().await;

    let res = app
        .upload("README.MD", b"# Shout", "application/octet-stream")
        .await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.body["message"], "Only .md markdown files are allowed!");
}

#[tokio::test]
async fn reuploading_a_filename_replaces_the_note() {
    let app = TestApp::spawn().await;
    let id = app.save_note("same.md", "# Text").await;

    let res = app.upload("same.md", b"# File", "text/markdown").await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["created"], false);
    assert_eq!(res.id(), id);

    let html = app.get(&routes::note_html(id)).await;
    assert!(html.text.contains("<h1>File</h1>"), "{}", html.text);
}

#[tokio::test]
async fn request_without_a_file_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.post_empty(routes::UPLOAD).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert_eq!(res.body["message"], "No file uploaded.");
}

#[tokio::test]
async fn form_without_the_file_field_is_rejected() {
    let app = TestApp::spawn().await;

    let form = reqwest::multipart::Form::new().text("comment", "no file here");
    let res = app.upload_form(form).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["message"], "No file uploaded.");
}

#[tokio::test]
async fn empty_file_is_stored_as_an_empty_note() {
    let app = TestApp::spawn().await;

    let res = app.upload("empty.md", b"", "text/markdown").await;

    assert_eq!(res.status, 201, "{}", res.text);
    let stored = note::Entity::find_by_id(res.id())
        .one(&app.db)
        .await
        .unwrap()
        .expect("empty upload should be stored");
    assert_eq!(stored.markdown_content, "");

    let html = app.get(&routes::note_html(res.id())).await;
    assert_eq!(html.status, 200);
    assert_eq!(html.text, "");
}

#[tokio::test]
async fn file_with_nul_bytes_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.upload("nul.md", b"a\0b", "text/markdown").await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert!(res.body["message"].as_str().unwrap().contains("file content"));
    assert_eq!(note::Entity::find().count(&app.db).await.unwrap(), 0);
}

mod size_limit {
    use super::*;

    const LIMIT: usize = 1024;

    async fn assert_rejected_as_too_large(app: &TestApp, size: usize) {
        let res = app
            .upload("big.md", &vec![b'a'; size], "text/markdown")
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "File is too large");
        assert_eq!(note::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn file_at_the_limit_is_accepted() {
        let app = TestApp::spawn_with_max_file_size(LIMIT).await;

        let res = app
            .upload("fits.md", &vec![b'a'; LIMIT], "text/markdown")
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
    }

    #[tokio::test]
    async fn file_just_over_the_limit_is_rejected() {
        let app = TestApp::spawn_with_max_file_size(LIMIT).await;
        assert_rejected_as_too_large(&app, LIMIT + 1).await;
    }

    #[tokio::test]
    async fn body_over_the_request_limit_is_rejected() {
        let app = TestApp::spawn_with_max_file_size(LIMIT).await;
        assert_rejected_as_too_large(&app, 64 * 1024).await;
    }
}
