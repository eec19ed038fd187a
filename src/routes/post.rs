use super::*;

/// The composer form as the browser sends it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentForm {
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    author_email: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    website: String,

    form_token: Option<String>,
    form_timestamp: Option<i64>,

    parent_comment_id: Option<u64>,
    reply_author: Option<String>,
}

impl CommentForm {
    fn into_composer(self, subject: Subject) -> Composer {
        let composer = match self.parent_comment_id {
            Some(id) => {
                let target = ReplyTarget {
                    id,
                    author_name: self.reply_author.unwrap_or_default(),
                };
                Composer::reply(subject, target)
            }
            None => Composer::new(subject),
        };

        let token = self
            .form_token
            .zip(self.form_timestamp)
            .filter(|(token, _)| !token.is_empty())
            .map(|(token, timestamp)| FormToken { token, timestamp });

        let mut composer = composer.with_token(token).with_draft(Draft {
            author_name: self.author_name,
            author_email: self.author_email,
            content: self.content,
            website: self.website,
        });
        // The form could only be filled in after the body was focused.
        composer.focus();
        composer
    }
}

/// Post a comment and answer with the thread page. On success the tree is
/// refreshed and the form is empty with a new token; on failure the form
/// comes back as it was sent, with the error.
pub async fn comment(
    State(state): State<AppState>,
    ReqPath((kind, id)): ReqPath<(String, String)>,
    Form(form): Form<CommentForm>,
) -> Result<Markup, StatusCode> {
    let subject = subject(&kind, id)?;
    let logged = subject.clone();
    let mut coordinator = ThreadCoordinator::new(subject.clone())
        .on_count_change(move |count| tracing::info!(subject = %logged, count, "Thread count"));

    let is_reply = form.parent_comment_id.is_some();
    coordinator.restore(form.into_composer(subject.clone()));

    let result = if is_reply {
        coordinator.submit_reply(&state.api).await
    } else {
        coordinator.submit(&state.api).await
    };

    match result {
        Ok(()) => {
            if is_reply {
                coordinator.composer_mut().show_banner();
            }
        }
        Err(e) => {
            tracing::info!(%subject, "Comment not posted: {e}");
            coordinator.recover(&state.api).await;
        }
    }

    Ok(html::pages::thread(&coordinator))
}
