use maud::{html, Markup};

use crate::data::*;
use crate::thread::*;

pub mod components;
pub mod pages;
mod wrappers;

/// Site name shown in every page title.
pub const SITE_NAME: &str = "Российская ассоциация";

/// Where the thread page for `subject` lives. Forms post back to it.
pub fn thread_path(subject: &Subject) -> String {
    format!("/comments/{}/{}", subject.kind, subject.id)
}
