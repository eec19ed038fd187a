use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::*;

/// The kinds of resource that carry a comment thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubjectKind {
    /// A news article.
    News,

    /// A legislation monitoring digest.
    MonitoringZakon,

    /// A member profile in the directory.
    RarMember,
}

impl SubjectKind {
    /// The kind as it appears in URLs and request bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::News => "news",
            SubjectKind::MonitoringZakon => "monitoring-zakon",
            SubjectKind::RarMember => "rar-member",
        }
    }
}

impl FromStr for SubjectKind {
    type Err = DataError;

    fn from_str(s: &str) -> DataResult<Self> {
        match s {
            "news" => Ok(SubjectKind::News),
            "monitoring-zakon" => Ok(SubjectKind::MonitoringZakon),
            "rar-member" => Ok(SubjectKind::RarMember),
            other => Err(DataError::UnknownKind(other.to_owned())),
        }
    }
}

/// The resource a thread is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject {
    pub kind: SubjectKind,

    /// Opaque to this layer; passed through to the backend as given.
    pub id: String,
}

impl Subject {
    pub fn new(kind: SubjectKind, id: impl Into<String>) -> Self {
        Subject {
            kind,
            id: id.into(),
        }
    }

    /// Build a subject from the two path segments of a route.
    pub fn parse(kind: &str, id: impl Into<String>) -> DataResult<Self> {
        Ok(Subject::new(kind.parse()?, id))
    }
}
