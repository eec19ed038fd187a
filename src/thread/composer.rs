use std::ops::RangeInclusive;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use tokio::time::Instant;

use crate::api::{ApiClient, ApiResult, NewComment};
use crate::data::{FormToken, ReplyTarget, Subject};

/// Allowed author name length, in characters.
pub const NAME_LENGTH: RangeInclusive<usize> = 2..=100;

/// Allowed comment length, in characters.
pub const CONTENT_LENGTH: RangeInclusive<usize> = 10..=2000;

/// How long the success banner stays up after a post.
pub const BANNER_DURATION: Duration = Duration::from_secs(5);

/// Shown when the backend rejects a post without saying why.
pub const GENERIC_FAILURE: &str = "Не удалось отправить комментарий. Попробуйте ещё раз позже.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Имя должно содержать от 2 до 100 символов.")]
    NameLength,

    #[error("Укажите корректный адрес электронной почты.")]
    Email,

    #[error("Комментарий должен содержать от 10 до 2000 символов.")]
    ContentLength,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposerError {
    /// The token request made when the form appeared failed.
    #[error("Не удалось загрузить форму. Пожалуйста, обновите страницу.")]
    TokenUnavailable,

    /// Submit was pressed with no token held.
    #[error("Форма не готова к отправке. Пожалуйста, обновите страницу.")]
    NotReady,

    /// A post from this form is still waiting for an answer.
    #[error("Комментарий уже отправляется.")]
    InFlight,

    /// The backend refused the post. Wraps the message to show.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// What the reader has typed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub author_name: String,
    pub author_email: String,
    pub content: String,

    /// Honeypot. Never shown to people, so a value here came from a bot.
    pub website: String,
}

impl Draft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name = self.author_name.trim().chars().count();
        if !NAME_LENGTH.contains(&name) {
            return Err(ValidationError::NameLength);
        }

        if !email_shape().is_match(self.author_email.trim()) {
            return Err(ValidationError::Email);
        }

        let content = self.content.trim().chars().count();
        if !CONTENT_LENGTH.contains(&content) {
            return Err(ValidationError::ContentLength);
        }

        Ok(())
    }

    /// Empty the fields a person fills in. The honeypot is left alone.
    fn clear(&mut self) {
        self.author_name.clear();
        self.author_email.clear();
        self.content.clear();
    }
}

fn email_shape() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// The form for a new comment, or for a reply when it has a target.
#[derive(Debug, Clone)]
pub struct Composer {
    subject: Subject,
    target: Option<ReplyTarget>,

    pub draft: Draft,

    /// Identity fields are hidden until the body is first focused.
    expanded: bool,

    token: Option<FormToken>,
    submitting: bool,
    error: Option<ComposerError>,
    banner_until: Option<Instant>,
}

impl Composer {
    /// A top-level comment form.
    pub fn new(subject: Subject) -> Self {
        Composer {
            subject,
            target: None,
            draft: Draft::default(),
            expanded: false,
            token: None,
            submitting: false,
            error: None,
            banner_until: None,
        }
    }

    /// A form replying to `target`. It opens expanded.
    pub fn reply(subject: Subject, target: ReplyTarget) -> Self {
        Composer {
            target: Some(target),
            expanded: true,
            ..Composer::new(subject)
        }
    }

    /// Use a token obtained elsewhere, e.g. one echoed back by a browser.
    pub fn with_token(mut self, token: Option<FormToken>) -> Self {
        self.token = token;
        self
    }

    pub fn with_draft(mut self, draft: Draft) -> Self {
        self.draft = draft;
        self
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn target(&self) -> Option<&ReplyTarget> {
        self.target.as_ref()
    }

    pub fn token(&self) -> Option<&FormToken> {
        self.token.as_ref()
    }

    /// Give up the held token, e.g. to hand it to another form.
    pub fn take_token(&mut self) -> Option<FormToken> {
        self.token.take()
    }

    /// Hold `token` unless a token is held already.
    pub fn offer_token(&mut self, token: Option<FormToken>) {
        if self.token.is_none() {
            self.token = token;
        }
    }

    pub fn error(&self) -> Option<&ComposerError> {
        self.error.as_ref()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Rows for the body textarea.
    pub fn body_rows(&self) -> u8 {
        if self.expanded {
            5
        } else {
            3
        }
    }

    /// The body field gained focus. There is no way back to collapsed.
    pub fn focus(&mut self) {
        self.expanded = true;
    }

    /// Ask the backend for a fresh token, replacing any held one.
    pub async fn load_token(&mut self, api: &ApiClient) {
        match api.form_token().await {
            Ok(token) => {
                self.token = Some(token);
                if matches!(
                    self.error,
                    Some(ComposerError::TokenUnavailable | ComposerError::NotReady)
                ) {
                    self.error = None;
                }
            }
            Err(e) => {
                tracing::warn!(subject = %self.subject, "Could not get a form token: {e}");
                self.token = None;
                self.error = Some(ComposerError::TokenUnavailable);
            }
        }
    }

    /// Prepare the form when it first appears.
    pub async fn mount(&mut self, api: &ApiClient) {
        self.load_token(api).await;
    }

    /// Check the draft and the token and build the request to send.
    ///
    /// On success the form is marked as submitting until
    /// [`finish_submit`](Self::finish_submit) is called.
    pub fn begin_submit(&mut self) -> Result<NewComment, ComposerError> {
        if self.submitting {
            return Err(ComposerError::InFlight);
        }

        if let Err(e) = self.draft.validate() {
            return Err(self.fail(e.into()));
        }

        let Some(token) = &self.token else {
            return Err(self.fail(ComposerError::NotReady));
        };

        let request = NewComment {
            commentable_type: self.subject.kind,
            commentable_id: self.subject.id.clone(),
            parent_comment_id: self.target.as_ref().map(|t| t.id),
            author_name: self.draft.author_name.clone(),
            author_email: self.draft.author_email.clone(),
            content: self.draft.content.clone(),
            form_token: token.token.clone(),
            form_timestamp: token.timestamp,
            website: self.draft.website.clone(),
        };

        self.submitting = true;
        self.error = None;
        Ok(request)
    }

    /// Record the backend's answer to a post started by
    /// [`begin_submit`](Self::begin_submit).
    ///
    /// A rejection keeps the draft for another try. Success clears it, drops
    /// the used token and raises the success banner.
    pub fn finish_submit(&mut self, result: ApiResult<()>) -> Result<(), ComposerError> {
        self.submitting = false;

        if let Err(e) = result {
            let message = e.server_message().unwrap_or(GENERIC_FAILURE).to_owned();
            return Err(self.fail(ComposerError::Rejected(message)));
        }

        self.draft.clear();
        self.token = None;
        self.show_banner();
        Ok(())
    }

    /// Validate, post, and on success rotate the token.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<(), ComposerError> {
        let request = self.begin_submit()?;
        let result = api.post_comment(&request).await;
        self.finish_submit(result)?;
        self.load_token(api).await;
        Ok(())
    }

    pub fn show_banner(&mut self) {
        self.banner_until = Some(Instant::now() + BANNER_DURATION);
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_until.is_some_and(|until| Instant::now() < until)
    }

    fn fail(&mut self, error: ComposerError) -> ComposerError {
        self.error = Some(error.clone());
        error
    }
}
