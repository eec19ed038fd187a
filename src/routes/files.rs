use std::path::Path;

use super::*;

pub async fn script(
    State(state): State<AppState>,
    ReqPath(file_name): ReqPath<String>,
) -> Response {
    static_file(&state.static_dir.join("scripts"), &file_name, "text/javascript").await
}

pub async fn style(
    State(state): State<AppState>,
    ReqPath(file_name): ReqPath<String>,
) -> Response {
    static_file(&state.static_dir.join("styles"), &file_name, "text/css").await
}

async fn static_file(dir: &Path, file_name: &str, content_type: &'static str) -> Response {
    if file_name.contains(['/', '\\']) || file_name.starts_with('.') {
        return StatusCode::NOT_FOUND.into_response();
    }

    let disposition = format!("inline; filename=\"{file_name}\"");
    match tokio::fs::read_to_string(dir.join(file_name)).await {
        Ok(content) => (
            [
                (header::CONTENT_TYPE, content_type),
                (header::CONTENT_DISPOSITION, disposition.as_str()),
            ],
            content,
        )
            .into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}
