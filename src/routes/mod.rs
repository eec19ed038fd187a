use axum::extract::{Path as ReqPath, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Form;

use maud::Markup;
use serde::Deserialize;

use crate::data::*;
use crate::html;
use crate::thread::*;
use crate::AppState;

pub mod components;
pub mod files;
pub mod pages;
pub mod post;

/// Resolve the `/:kind/:id` part of a route. Unknown kinds are a 404.
fn subject(kind: &str, id: String) -> Result<Subject, StatusCode> {
    Subject::parse(kind, id).map_err(|e| {
        tracing::debug!("{e}");
        StatusCode::NOT_FOUND
    })
}

#[derive(Deserialize)]
pub struct ThreadQuery {
    /// Comment to open the reply form under. Kept as text so that a
    /// malformed id is ignored instead of failing the page.
    reply: Option<String>,
}

impl ThreadQuery {
    fn reply(&self) -> Option<u64> {
        self.reply.as_deref()?.parse().ok()
    }
}
