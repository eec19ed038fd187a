use crate::api::{ApiClient, ApiResult};
use crate::data::{Comment, ReplyTarget, Subject, Thread};

use super::Composer;

/// Shown in place of the tree when the thread could not be fetched.
pub const FETCH_FAILED: &str = "Не удалось загрузить комментарии. Попробуйте обновить страницу.";

#[derive(Debug, Clone, PartialEq)]
pub enum TreeState {
    Loading,
    Loaded(Thread),

    /// Nothing from an earlier fetch is kept around after a failure.
    Failed,
}

/// Identifies one fetch so that its result can be dropped if the tree
/// moved on while it was outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket {
    generation: u64,
}

/// The fetched thread for one subject plus the single open reply form.
#[derive(Debug)]
pub struct CommentTree {
    subject: Subject,
    state: TreeState,

    /// The one reply form in the whole tree. Its target is the reply target.
    reply: Option<Composer>,

    /// Bumped whenever the subject changes or the tree goes away.
    generation: u64,
}

impl CommentTree {
    pub fn new(subject: Subject) -> Self {
        CommentTree {
            subject,
            state: TreeState::Loading,
            reply: None,
            generation: 0,
        }
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn state(&self) -> &TreeState {
        &self.state
    }

    pub fn thread(&self) -> Option<&Thread> {
        match &self.state {
            TreeState::Loaded(thread) => Some(thread),
            _ => None,
        }
    }

    /// Number of comments at all depths, once loaded.
    pub fn total(&self) -> Option<usize> {
        self.thread().map(|t| t.total)
    }

    /// Point the tree at another subject. Results of fetches for the old
    /// subject will be ignored, and the caller should fetch again.
    pub fn set_subject(&mut self, subject: Subject) {
        if subject == self.subject {
            return;
        }
        self.subject = subject;
        self.generation += 1;
        self.state = TreeState::Loading;
        self.reply = None;
    }

    /// The tree is no longer displayed. Outstanding fetches are ignored.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.reply = None;
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        if self.state == TreeState::Failed {
            self.state = TreeState::Loading;
        }
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Store the result of the fetch behind `ticket`.
    ///
    /// Returns the new total when the result was applied and successful.
    pub fn apply(&mut self, ticket: FetchTicket, result: ApiResult<Vec<Comment>>) -> Option<usize> {
        if ticket.generation != self.generation {
            tracing::debug!(subject = %self.subject, "Dropping a stale thread fetch");
            return None;
        }

        match result {
            Ok(comments) => {
                let thread = Thread::new(comments);
                let total = thread.total;
                tracing::debug!(subject = %self.subject, total, "Thread loaded");
                self.state = TreeState::Loaded(thread);
                Some(total)
            }
            Err(e) => {
                tracing::warn!(subject = %self.subject, "Could not load thread: {e}");
                self.state = TreeState::Failed;
                None
            }
        }
    }

    /// Fetch, sort and count the thread.
    pub async fn fetch(&mut self, api: &ApiClient) -> Option<usize> {
        let ticket = self.begin_fetch();
        let result = api.thread(&self.subject).await;
        self.apply(ticket, result)
    }

    pub fn target(&self) -> Option<&ReplyTarget> {
        self.reply.as_ref().and_then(Composer::target)
    }

    pub fn reply_composer(&self) -> Option<&Composer> {
        self.reply.as_ref()
    }

    pub fn reply_composer_mut(&mut self) -> Option<&mut Composer> {
        self.reply.as_mut()
    }

    /// Open a reply form under `target`, closing any other one.
    pub fn reply_to(&mut self, target: ReplyTarget) -> &mut Composer {
        tracing::debug!(subject = %self.subject, parent = target.id, "Reply target set");
        self.reply
            .insert(Composer::reply(self.subject.clone(), target))
    }

    /// Open a reply form under the loaded comment with `id`, if there is one.
    pub fn reply_to_id(&mut self, id: u64) -> Option<&mut Composer> {
        let target = ReplyTarget::from(self.thread()?.find(id)?);
        Some(self.reply_to(target))
    }

    /// Put back a reply form that was built elsewhere, e.g. one that failed
    /// to post and must be shown again with its draft.
    pub fn restore_reply(&mut self, composer: Composer) {
        if composer.target().is_some() {
            self.reply = Some(composer);
        }
    }

    pub fn cancel_reply(&mut self) {
        self.reply = None;
    }
}
