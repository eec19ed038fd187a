use super::*;

/// Nesting deeper than this is drawn at this depth.
pub const MAX_VISUAL_DEPTH: usize = 3;

/// Shown instead of the list when nobody has commented yet.
pub const EMPTY_THREAD: &str = "Комментариев пока нет. Будьте первым!";

/// Shown for five seconds after a comment went through.
pub const POSTED: &str = "Спасибо! Ваш комментарий опубликован.";

/// The "💬 N" link that jumps to the thread.
pub fn badge(count: usize) -> Markup {
    html! {
        a.comment-badge href="#comments" title="Перейти к комментариям" {
            "💬 " (count)
        }
    }
}

/// A comment form. `page` is the thread page the form posts back to.
pub fn composer(composer: &Composer, page: &str) -> Markup {
    let expanded = composer.is_expanded();
    let disabled = composer.is_submitting() || composer.token().is_none();

    html! {
        form.composer.expanded[expanded] method="post" action=(page) {
            @if let Some(target) = composer.target() {
                p.replying {
                    "Ответ для " b { (target.author_name) }
                    " "
                    a.cancel href={ (page) "#comment-" (target.id) } { "Отмена" }
                }
                input type="hidden" name="parentCommentId" value=(target.id);
                input type="hidden" name="replyAuthor" value=(target.author_name);
            }
            @if let Some(token) = composer.token() {
                input type="hidden" name="formToken" value=(token.token);
                input type="hidden" name="formTimestamp" value=(token.timestamp);
            }
            @if composer.banner_visible() {
                p.success data-hide-after=(BANNER_DURATION_MS) { (POSTED) }
            }
            @if let Some(error) = composer.error() {
                p.error role="alert" { (error.to_string()) }
            }
            textarea
                name="content"
                rows=(composer.body_rows())
                minlength=(CONTENT_MIN)
                maxlength=(CONTENT_MAX)
                required
                placeholder="Ваш комментарий…" { (composer.draft.content) }
            .identity hidden[!expanded] {
                input
                    type="text"
                    name="authorName"
                    minlength=(NAME_MIN)
                    maxlength=(NAME_MAX)
                    required
                    placeholder="Ваше имя"
                    value=(composer.draft.author_name);
                input
                    type="email"
                    name="authorEmail"
                    required
                    placeholder="Электронная почта"
                    value=(composer.draft.author_email);
            }
            (honeypot(&composer.draft.website))
            button type="submit" disabled[disabled] {
                @if composer.is_submitting() { "Отправка…" } @else { "Отправить" }
            }
        }
    }
}

/// Off-screen, out of the tab order and hidden from screen readers.
fn honeypot(value: &str) -> Markup {
    html! {
        .hp aria-hidden="true" style="position: absolute; left: -10000px; width: 1px; height: 1px; overflow: hidden;" {
            label { "Не заполняйте это поле"
                input type="text" name="website" tabindex="-1" autocomplete="off" value=(value);
            }
        }
    }
}

const BANNER_DURATION_MS: u64 = composer::BANNER_DURATION.as_millis() as u64;
const NAME_MIN: usize = *composer::NAME_LENGTH.start();
const NAME_MAX: usize = *composer::NAME_LENGTH.end();
const CONTENT_MIN: usize = *composer::CONTENT_LENGTH.start();
const CONTENT_MAX: usize = *composer::CONTENT_LENGTH.end();

/// The thread, or the message that replaces it.
pub fn tree(tree: &CommentTree, page: &str) -> Markup {
    html! {
        #comments.comment-tree {
            @match tree.state() {
                TreeState::Loading => {
                    p.loading { "Загрузка комментариев…" }
                }
                TreeState::Failed => {
                    p.error role="alert" { (tree::FETCH_FAILED) }
                }
                TreeState::Loaded(thread) => {
                    @if thread.is_empty() {
                        p.empty { (EMPTY_THREAD) }
                    } @else {
                        ul.comments {
                            @for comment in &thread.comments {
                                (node(comment, 0, tree, page))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn node(comment: &Comment, depth: usize, tree: &CommentTree, page: &str) -> Markup {
    let replying_here = tree.target().is_some_and(|t| t.id == comment.id);

    html! {
        li class={ "comment depth-" (depth.min(MAX_VISUAL_DEPTH)) } id={ "comment-" (comment.id) } {
            .info {
                span.author { (comment.author_name) }
                " "
                time.date datetime=(comment.created_at.format("%Y-%m-%dT%H:%M:%SZ").to_string()) {
                    (format_date(&comment.created_at))
                }
            }
            .text { (comment.content) }
            a.reply href={ (page) "?reply=" (comment.id) "#comment-" (comment.id) } { "Ответить" }
            @if replying_here {
                @if let Some(reply) = tree.reply_composer() {
                    (composer(reply, page))
                }
            }
            @if !comment.replies.is_empty() {
                ul.replies {
                    @for reply in &comment.replies {
                        (node(reply, depth + 1, tree, page))
                    }
                }
            }
        }
    }
}
