//! Error pages.
//!
//! A failed content fetch must never leave the visitor staring at a stuck
//! or half-empty page: it renders an explicit error view with a retry link
//! back to the URL that failed. Missing documents get a plain not-found
//! page with a route home.

use maud::{Markup, html};

use crate::render::{Chrome, base_document, page_header};

/// Retryable fetch-failure page. `retry_href` is the original request URL,
/// so the retry is an exact re-issue of the failed navigation.
pub fn render_fetch_error(retry_href: &str, chrome: &Chrome) -> Markup {
    let content = html! {
        main.error-page {
            (page_header("Something went wrong"))
            p { "The content server could not be reached. This is usually temporary." }
            a.retry-button href=(retry_href) { "Try again" }
        }
    };
    base_document("Error", chrome, content)
}

/// Not-found page for missing documents and unknown routes.
pub fn render_not_found(what: &str, chrome: &Chrome) -> Markup {
    let content = html! {
        main.error-page {
            (page_header("Not found"))
            p { (what) " not found." }
            a.back-link href="/" { "← Back to home" }
        }
    };
    base_document("Not found", chrome, content)
}
