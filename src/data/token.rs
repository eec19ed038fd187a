use serde::Deserialize;

/// A short-lived anti-spam credential required to post a comment.
///
/// The client treats it as single use and never expires it on its own;
/// the backend decides whether a token is still good.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormToken {
    pub token: String,

    /// Issuance time as reported by the backend, sent back untouched.
    pub timestamp: i64,
}
