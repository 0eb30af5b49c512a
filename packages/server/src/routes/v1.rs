use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::note::welcome))
        .nest("/notes", note_routes(config))
}

fn note_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let read_write = OpenApiRouter::new()
        .routes(routes!(
            handlers::note::list_notes,
            handlers::note::save_note
        ))
        .routes(routes!(handlers::note::render_note_by_id))
        .routes(routes!(handlers::note::render_note_by_filename));

    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::note::upload_note))
        .layer(handlers::note::upload_body_limit(
            config.upload.max_file_size,
        ));

    read_write.merge(upload)
}
