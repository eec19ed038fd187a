use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::data::{Comment, FormToken, Subject, SubjectKind};

#[cfg(test)]
pub mod mock;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never got a response, or the response body was unreadable.
    #[error("request to the backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status. Wraps the message
    /// from its `{ message }` body, if it sent one.
    #[error("backend returned {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    /// The configured base URL cannot carry path segments.
    #[error("invalid API base URL: {0}")]
    BadBase(String),
}

impl ApiError {
    /// The human-readable message the backend attached to a rejection.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// The body of `POST /comments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub commentable_type: SubjectKind,
    pub commentable_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<u64>,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    pub form_token: String,
    pub form_timestamp: i64,

    /// Honeypot. Sent as-is, empty or not; the backend decides what a
    /// filled one means.
    pub website: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the CMS comment endpoints.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: &str, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Self::with_client(base, http)
    }

    pub fn with_client(base: &str, http: reqwest::Client) -> ApiResult<Self> {
        let base = Url::parse(base.trim_end_matches('/'))
            .map_err(|e| ApiError::BadBase(format!("{base}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::BadBase(base.to_string()));
        }
        Ok(ApiClient { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::BadBase(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /comments/form-token`
    pub async fn form_token(&self) -> ApiResult<FormToken> {
        let url = self.url(&["comments", "form-token"])?;
        let response = self.http.get(url).send().await?;
        let response = check_status(response).await?;
        let token: FormToken = response.json().await?;
        tracing::debug!(timestamp = token.timestamp, "Form token issued");
        Ok(token)
    }

    /// `POST /comments`. The response body is ignored on success.
    pub async fn post_comment(&self, comment: &NewComment) -> ApiResult<()> {
        let url = self.url(&["comments"])?;
        let response = self.http.post(url).json(comment).send().await?;
        check_status(response).await?;
        tracing::info!(
            kind = %comment.commentable_type,
            id = %comment.commentable_id,
            parent = ?comment.parent_comment_id,
            "Comment posted"
        );
        Ok(())
    }

    /// `GET /comments/{type}/{id}`: the nested thread, in backend order.
    pub async fn thread(&self, subject: &Subject) -> ApiResult<Vec<Comment>> {
        let url = self.url(&["comments", subject.kind.as_str(), &subject.id])?;
        let response = self.http.get(url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.trim().is_empty());
    tracing::warn!(%status, ?message, "Backend rejected request");
    Err(ApiError::Status { status, message })
}
