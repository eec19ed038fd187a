//! The comment thread widgets as plain state machines.
//!
//! Page handlers build a [`ThreadCoordinator`] per request, drive it against
//! the backend, and hand it to the renderer. Nothing here knows about HTML.

pub use composer::{Composer, ComposerError, Draft, ValidationError};
pub use coordinator::ThreadCoordinator;
pub use tree::{CommentTree, FetchTicket, TreeState};

pub mod composer;
pub mod coordinator;
pub mod tree;
