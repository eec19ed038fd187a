use super::*;

/// The tree alone, for refreshing it in place.
pub async fn thread(
    State(state): State<AppState>,
    ReqPath((kind, id)): ReqPath<(String, String)>,
    Query(query): Query<ThreadQuery>,
) -> Result<Markup, StatusCode> {
    let subject = subject(&kind, id)?;
    let page = html::thread_path(&subject);
    let mut tree = CommentTree::new(subject);
    tree.fetch(&state.api).await;

    if let Some(reply) = query.reply() {
        if let Some(composer) = tree.reply_to_id(reply) {
            composer.mount(&state.api).await;
        }
    }

    Ok(html::components::tree(&tree, &page))
}

/// The "💬 N" badge for pages that link to a thread.
pub async fn count(
    State(state): State<AppState>,
    ReqPath((kind, id)): ReqPath<(String, String)>,
) -> Result<Markup, StatusCode> {
    let subject = subject(&kind, id)?;
    let mut tree = CommentTree::new(subject);
    let count = tree.fetch(&state.api).await.ok_or(StatusCode::BAD_GATEWAY)?;
    Ok(html::components::badge(count))
}
