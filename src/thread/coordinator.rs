use crate::api::ApiClient;
use crate::data::{ReplyTarget, Subject};

use super::{CommentTree, Composer, ComposerError};

type CountListener = Box<dyn FnMut(usize) + Send>;

/// Ties the top-level form and the tree together for one subject.
///
/// Every successful post bumps the refresh counter and re-fetches the tree
/// once the post has been answered. Count changes go to the listener.
pub struct ThreadCoordinator {
    composer: Composer,
    tree: CommentTree,
    refresh: u64,
    count: usize,
    on_count: Option<CountListener>,
}

impl ThreadCoordinator {
    pub fn new(subject: Subject) -> Self {
        ThreadCoordinator {
            composer: Composer::new(subject.clone()),
            tree: CommentTree::new(subject),
            refresh: 0,
            count: 0,
            on_count: None,
        }
    }

    /// Call `listener` with the total every time the tree is (re)loaded.
    pub fn on_count_change(mut self, listener: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_count = Some(Box::new(listener));
        self
    }

    pub fn subject(&self) -> &Subject {
        self.tree.subject()
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    pub fn tree(&self) -> &CommentTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut CommentTree {
        &mut self.tree
    }

    /// How many times the tree has been asked to refresh.
    pub fn refresh_count(&self) -> u64 {
        self.refresh
    }

    /// The last reported total.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Load the form token and the thread. The two requests run side by side.
    pub async fn mount(&mut self, api: &ApiClient) {
        let (_, count) = tokio::join!(self.composer.mount(api), self.tree.fetch(api));
        self.report(count);
    }

    /// Put a form built elsewhere back in its place: a reply goes under its
    /// target in the tree, anything else replaces the top-level form.
    /// Nothing is fetched; see [`recover`](Self::recover).
    pub fn restore(&mut self, composer: Composer) {
        if composer.target().is_some() {
            self.tree.restore_reply(composer);
        } else {
            self.composer = composer;
        }
    }

    /// Load what a restored page still lacks: the thread, plus a token for
    /// every form that holds none. Forms that hold a token keep it.
    pub async fn recover(&mut self, api: &ApiClient) {
        let ThreadCoordinator { composer, tree, .. } = self;
        let needs_token = composer.token().is_none();
        let token = async {
            if needs_token {
                composer.load_token(api).await;
            }
        };
        let (_, count) = tokio::join!(token, tree.fetch(api));
        self.report(count);

        if let Some(reply) = self.tree.reply_composer_mut() {
            if reply.token().is_none() {
                reply.load_token(api).await;
            }
        }
    }

    /// Submit the top-level form.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<(), ComposerError> {
        self.composer.submit(api).await?;
        self.completed(api).await;
        Ok(())
    }

    /// Open a reply form under `target` and get it a token.
    pub async fn reply_to(&mut self, api: &ApiClient, target: ReplyTarget) {
        self.tree.reply_to(target).mount(api).await;
    }

    /// Like [`reply_to`](Self::reply_to), looking the target up by id in the
    /// loaded thread. Returns `false` if there is no such comment.
    pub async fn reply_to_id(&mut self, api: &ApiClient, id: u64) -> bool {
        match self.tree.reply_to_id(id) {
            Some(composer) => {
                composer.mount(api).await;
                true
            }
            None => false,
        }
    }

    pub fn cancel_reply(&mut self) {
        self.tree.cancel_reply();
    }

    /// Submit the open reply form. On success the reply target is cleared
    /// and its fresh token goes to the top-level form if that has none.
    pub async fn submit_reply(&mut self, api: &ApiClient) -> Result<(), ComposerError> {
        let Some(composer) = self.tree.reply_composer_mut() else {
            return Err(ComposerError::NotReady);
        };
        composer.submit(api).await?;
        let token = composer.take_token();
        self.tree.cancel_reply();
        self.composer.offer_token(token);
        self.completed(api).await;
        Ok(())
    }

    /// A post went through: refresh the tree and report the new count.
    async fn completed(&mut self, api: &ApiClient) {
        self.refresh += 1;
        tracing::debug!(subject = %self.tree.subject(), refresh = self.refresh, "Refreshing thread");
        let count = self.tree.fetch(api).await;
        self.report(count);
    }

    fn report(&mut self, count: Option<usize>) {
        let Some(count) = count else {
            return;
        };
        self.count = count;
        if let Some(listener) = &mut self.on_count {
            listener(count);
        }
    }
}
