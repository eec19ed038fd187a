//! In-process stand-in for the CMS comment endpoints, used by tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::ApiClient;

/// Everything the mock has seen and will answer with.
#[derive(Default)]
pub struct MockState {
    pub threads: HashMap<(String, String), Vec<Value>>,
    pub posts: Vec<Value>,

    /// Requests in arrival order: `"token"`, `"post"` or `"thread"`.
    pub log: Vec<&'static str>,

    pub tokens_issued: u64,
    pub next_id: u64,
    pub fail_tokens: bool,
    pub fail_threads: bool,
    pub reject: Option<(StatusCode, Option<String>)>,
}

pub struct MockBackend {
    pub api: ApiClient,
    pub state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub async fn start() -> MockBackend {
        let state = Arc::new(Mutex::new(MockState {
            next_id: 100,
            ..MockState::default()
        }));

        let routes = Router::new()
            .route("/comments", post(create))
            .route("/comments/form-token", get(token))
            .route("/comments/:kind/:id", get(thread))
            .with_state(state.clone());
        let app = Router::new().nest("/api", routes);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let api = ApiClient::with_client(&format!("http://{addr}/api"), http).unwrap();

        MockBackend { api, state }
    }

    pub fn seed(&self, kind: &str, id: &str, comments: Value) {
        let comments = comments.as_array().cloned().unwrap_or_default();
        let mut state = self.state.lock().unwrap();
        state
            .threads
            .insert((kind.to_owned(), id.to_owned()), comments);
    }

    pub fn reject_posts(&self, status: StatusCode, message: Option<&str>) {
        self.state.lock().unwrap().reject = Some((status, message.map(str::to_owned)));
    }

    pub fn posts(&self) -> Vec<Value> {
        self.state.lock().unwrap().posts.clone()
    }

    pub fn log(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn count(&self, request: &str) -> usize {
        self.log().iter().filter(|r| **r == request).count()
    }
}

type Shared = State<Arc<Mutex<MockState>>>;

async fn token(State(state): Shared) -> Response {
    let mut state = state.lock().unwrap();
    state.log.push("token");
    if state.fail_tokens {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    state.tokens_issued += 1;
    let n = state.tokens_issued;
    Json(json!({ "token": format!("token-{n}"), "timestamp": 1_700_000_000 + n })).into_response()
}

async fn thread(State(state): Shared, Path((kind, id)): Path<(String, String)>) -> Response {
    let mut state = state.lock().unwrap();
    state.log.push("thread");
    if state.fail_threads {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let comments = state.threads.get(&(kind, id)).cloned().unwrap_or_default();
    Json(Value::Array(comments)).into_response()
}

async fn create(State(state): Shared, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    state.log.push("post");
    state.posts.push(body.clone());

    if let Some((status, message)) = state.reject.clone() {
        return match message {
            Some(message) => (status, Json(json!({ "message": message }))).into_response(),
            None => status.into_response(),
        };
    }

    state.next_id += 1;
    let id = state.next_id;
    let node = json!({
        "id": id,
        "authorName": body["authorName"],
        "content": body["content"],
        "createdAt": format!("2030-01-01T00:{:02}:00Z", id % 60),
        "parentCommentId": body["parentCommentId"],
        "replies": [],
    });

    let key = (
        body["commentableType"].as_str().unwrap_or_default().to_owned(),
        body["commentableId"].as_str().unwrap_or_default().to_owned(),
    );
    let thread = state.threads.entry(key).or_default();
    match body["parentCommentId"].as_u64() {
        Some(parent) => {
            insert_reply(thread, parent, &node);
        }
        None => thread.push(node),
    }

    StatusCode::CREATED.into_response()
}

fn insert_reply(comments: &mut [Value], parent: u64, node: &Value) -> bool {
    for comment in comments.iter_mut() {
        if comment["id"].as_u64() == Some(parent) {
            if !comment["replies"].is_array() {
                comment["replies"] = json!([]);
            }
            if let Some(replies) = comment["replies"].as_array_mut() {
                replies.push(node.clone());
            }
            return true;
        }
        if let Some(replies) = comment.get_mut("replies").and_then(Value::as_array_mut) {
            if insert_reply(replies, parent, node) {
                return true;
            }
        }
    }
    false
}
