//! Blog post page.

use maud::{Markup, html};

use crate::content::types::{Post, parse_day};
use crate::render::{Chrome, base_document, portable};

pub fn render_post(post: &Post, chrome: &Chrome) -> Markup {
    let published = parse_day(&post.published_at)
        .map(|day| day.format("%-d %B %Y").to_string())
        .unwrap_or_else(|| post.published_at.clone());

    let content = html! {
        main.post-page {
            a.back-link href="/" { "← Back to home" }
            @if let Some(url) = post.image_url.as_deref().filter(|u| !u.is_empty()) {
                img.post-image src=(url) alt=(post.title) width="800" height="600";
            }
            h1 { (post.title) }
            @if !published.is_empty() {
                p.published { "Published: " (published) }
            }
            article.post-body {
                (portable::render_blocks(&post.body))
            }
        }
    };
    base_document(&post.title, chrome, content)
}
