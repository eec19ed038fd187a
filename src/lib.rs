//! Server-rendered comment threads for the association site.
//!
//! Pages are built with maud from data fetched from the CMS with reqwest.
//! The thread widgets themselves live in [`thread`] as plain state machines.

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;

pub mod api;
pub mod config;
pub mod data;
pub mod html;
pub mod routes;
pub mod thread;

#[derive(Clone)]
pub struct AppState {
    api: api::ApiClient,
    static_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(api: api::ApiClient, static_dir: PathBuf) -> Self {
        AppState {
            api,
            static_dir: Arc::new(static_dir),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/comments/:kind/:id",
            get(routes::pages::thread).post(routes::post::comment),
        )
        .route("/count/:kind/:id", get(routes::components::count))
        .route("/script/:file", get(routes::files::script))
        .route("/style/:file", get(routes::files::style))
        .route("/thread/:kind/:id", get(routes::components::thread))
        .with_state(state)
}
