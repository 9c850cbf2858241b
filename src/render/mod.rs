//! HTML rendering.
//!
//! All pages are generated with [maud](https://maud.lambda.xyz/) — templates
//! are type-checked Rust with automatic XSS escaping, and the stylesheet is
//! embedded at compile time so the binary ships everything it needs.
//!
//! | Module | Page |
//! |--------|------|
//! | [`home`] | Hero, intro, featured event/posts, partners |
//! | [`gallery`] | Tag cloud, filtered grid, lightbox overlay |
//! | [`events`] | Upcoming/past split and event detail |
//! | [`blog`] | Blog post |
//! | [`error`] | Retryable fetch-failure page and not-found page |
//! | [`portable`] | Rich-text blocks → HTML |

pub mod blog;
pub mod error;
pub mod events;
pub mod gallery;
pub mod home;
pub mod portable;

use maud::{DOCTYPE, Markup, html};

use crate::config::SiteMeta;
use crate::content::types::SocialLink;

const CSS: &str = include_str!("../../static/style.css");

/// Shared page context: site chrome settings plus the footer's contact and
/// social data (which come from the home document when available).
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    pub site: SiteMeta,
    pub contact_email: String,
    pub social_links: Vec<SocialLink>,
}

impl Chrome {
    pub fn new(site: SiteMeta) -> Self {
        let contact_email = site.contact_email.clone();
        Self {
            site,
            contact_email,
            social_links: Vec::new(),
        }
    }

    /// Effective contact email: home-document value, else config fallback.
    fn effective_contact(&self) -> &str {
        if self.contact_email.is_empty() {
            &self.site.contact_email
        } else {
            &self.contact_email
        }
    }
}

/// Base HTML document: head with embedded styles, header, content, footer.
pub fn base_document(title: &str, chrome: &Chrome, content: Markup) -> Markup {
    let full_title = if title.is_empty() {
        chrome.site.title.clone()
    } else {
        format!("{} — {}", title, chrome.site.title)
    };
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                style { (CSS) }
            }
            body {
                (site_header(chrome))
                (content)
                (site_footer(chrome))
            }
        }
    }
}

/// Site header: title linking home, main navigation.
fn site_header(chrome: &Chrome) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (chrome.site.title) }
            nav.site-nav {
                ul {
                    li { a href="/gallery" { "Gallery" } }
                    li { a href="/events" { "Events" } }
                    li { a href="/blog" { "Blog" } }
                }
            }
        }
    }
}

/// Site footer: contact email and outbound social links.
fn site_footer(chrome: &Chrome) -> Markup {
    let contact = chrome.effective_contact();
    html! {
        footer.site-footer {
            @if !contact.is_empty() {
                p.contact {
                    a href={ "mailto:" (contact) } { (contact) }
                }
            }
            @if !chrome.social_links.is_empty() {
                ul.social-links {
                    @for link in &chrome.social_links {
                        @if !link.url.is_empty() {
                            li {
                                a href=(link.url) target="_blank" rel="noopener" {
                                    (link.kind)
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Shared page heading.
pub fn page_header(title: &str) -> Markup {
    html! {
        header.page-header {
            h1 { (title) }
        }
    }
}
