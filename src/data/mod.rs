use std::fmt::Display;

pub use comments::{count_comments, sort_thread, Comment, ReplyTarget, Thread};
pub use subject::{Subject, SubjectKind};
pub use token::FormToken;

/// Data structures for comment threads.
pub mod comments;

/// Data structures for the resources a thread can be attached to.
pub mod subject;

/// The anti-spam token handed out before each submission.
pub mod token;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// Wraps a subject kind that the site does not know how to comment on.
    #[error("unknown subject kind: {0}")]
    UnknownKind(String),

    /// Wraps a timestamp that could not be read in any supported format.
    #[error("unreadable timestamp: {0}")]
    BadTimestamp(String),
}

pub type DataResult<T> = Result<T, DataError>;

/// Russian month names in the genitive case, as used in "5 марта 2024".
pub const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Format a moment as `{day} {month} {year}` with the genitive Russian month.
pub fn format_date(date: &impl chrono::Datelike) -> String {
    let month = MONTHS_GENITIVE[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Parse a raw API timestamp and format it, see [`format_date`].
pub fn format_timestamp(raw: &str) -> DataResult<String> {
    comments::parse_timestamp(raw).map(|t| format_date(&t))
}

impl Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}
