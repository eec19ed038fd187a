use maud::DOCTYPE;

use super::*;

pub(super) fn universal(body: Markup, resource: &'static str, title: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="utf-8";
                title { (title) " | " (SITE_NAME) }
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                link type="text/css" rel="stylesheet" href={"/style/" (resource) ".css"};
            }
            body {
                (body)
                script type="module" src={"/script/" (resource) ".js"} {};
            }
        }
    }
}
