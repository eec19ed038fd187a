use super::*;

pub async fn thread(
    State(state): State<AppState>,
    ReqPath((kind, id)): ReqPath<(String, String)>,
    Query(query): Query<ThreadQuery>,
) -> Result<Markup, StatusCode> {
    let subject = subject(&kind, id)?;
    let mut coordinator = ThreadCoordinator::new(subject);
    coordinator.mount(&state.api).await;

    if let Some(reply) = query.reply() {
        if !coordinator.reply_to_id(&state.api, reply).await {
            tracing::debug!(reply, "Reply target not in thread");
        }
    }

    Ok(html::pages::thread(&coordinator))
}
