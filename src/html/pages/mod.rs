use super::*;

/// The full page for one thread: count badge, top-level form, tree.
pub fn thread(coordinator: &ThreadCoordinator) -> Markup {
    let page = thread_path(coordinator.subject());

    let body = html! {
        header.thread-header {
            h1 { "Обсуждение" }
            (components::badge(coordinator.count()))
        }
        main.thread {
            h2 { "Комментарии" }
            (components::composer(coordinator.composer(), &page))
            (components::tree(coordinator.tree(), &page))
        }
    };

    wrappers::universal(body, "comments", "Комментарии")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_both_forms_when_replying() {
        let mut coordinator = ThreadCoordinator::new(Subject::new(SubjectKind::RarMember, "15"));
        let tree = coordinator.tree_mut();
        let ticket = tree.begin_fetch();
        let comments = serde_json::from_value(serde_json::json!([
            { "id": 8, "authorName": "Семён", "content": "Привет", "createdAt": "2024-06-01" }
        ]))
        .unwrap();
        tree.apply(ticket, Ok(comments));
        tree.reply_to_id(8);

        let html = thread(&coordinator).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="ru">"#));
        assert_eq!(html.matches("<form").count(), 2);
        assert!(html.contains(r#"action="/comments/rar-member/15""#));
        assert!(html.contains("1 июня 2024"));
    }
}
