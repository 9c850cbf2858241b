//! Home page: hero media, intro, featured event and posts, partners.

use maud::{Markup, html};

use crate::config::ContentStoreConfig;
use crate::content::image::file_url;
use crate::content::types::{Event, HomePage, Partner, Post};
use crate::render::{Chrome, base_document, portable};

pub fn render_home(home: &HomePage, store: &ContentStoreConfig, chrome: &Chrome) -> Markup {
    let content = html! {
        main.home-page {
            (hero(home, store))
            @if !home.intro_text.is_empty() {
                section.intro {
                    (portable::render_blocks(&home.intro_text))
                }
            }
            @if let Some(event) = &home.featured_event {
                (featured_event(event, store))
            }
            @if !home.featured_posts.is_empty() {
                section.featured-posts {
                    h2 { "From the blog" }
                    ul.post-list {
                        @for post in &home.featured_posts {
                            (post_card(post))
                        }
                    }
                }
            }
            @if !home.foundation_partners.is_empty() {
                section.partners {
                    h2 { "Partners" }
                    ul.partner-row {
                        @for partner in &home.foundation_partners {
                            (partner_logo(partner, store))
                        }
                    }
                }
            }
        }
    };
    base_document("", chrome, content)
}

fn hero(home: &HomePage, store: &ContentStoreConfig) -> Markup {
    let media = &home.hero_media;
    html! {
        @match media.kind.as_str() {
            "image" => {
                @if let Some(image_ref) = media.image.as_ref().and_then(|s| s.image_ref()) {
                    @let src = image_ref.url_builder(store).width(1200).auto_format().build();
                    // Low-res blurred frame painted behind the real image
                    @let placeholder = image_ref.url_builder(store).width(1200).blur(20).build();
                    section.hero {
                        img src=(src) alt="Hero" width="1200" height="400"
                            loading="eager"
                            style={ "background-image: url('" (placeholder) "')" };
                    }
                }
            }
            "video" => {
                @if let Some(src) = hero_video_url(home, store) {
                    section.hero {
                        video loop muted autoplay playsinline {
                            source src=(src) type="video/mp4";
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

fn hero_video_url(home: &HomePage, store: &ContentStoreConfig) -> Option<String> {
    let asset = home.hero_media.video.as_ref()?.asset.as_ref()?;
    file_url(&asset.reference, asset.url.as_deref(), store)
}

fn featured_event(event: &Event, store: &ContentStoreConfig) -> Markup {
    let cover = event
        .cover_image
        .as_ref()
        .and_then(|s| s.image_ref())
        .map(|r| r.url_builder(store).width(600).height(400).auto_format().build());
    html! {
        section.featured-event {
            h2 { "Featured event" }
            a.event-card href={ "/events/" (event.slug.as_str()) } {
                @if let Some(src) = &cover {
                    img src=(src) alt=(event.name) width="600" height="400" loading="lazy";
                }
                h3 { (event.name) }
            }
        }
    }
}

fn post_card(post: &Post) -> Markup {
    html! {
        li.post-card {
            a href={ "/blog/" (post.slug.as_str()) } {
                h3 { (post.title) }
                @if !post.description.is_empty() {
                    p { (post.description) }
                }
            }
        }
    }
}

fn partner_logo(partner: &Partner, store: &ContentStoreConfig) -> Markup {
    let logo = partner
        .logo
        .as_ref()
        .and_then(|s| s.image_ref())
        .map(|r| r.url_builder(store).width(200).auto_format().build());
    let body = html! {
        @if let Some(src) = &logo {
            img src=(src) alt=(partner.name) width="200" loading="lazy";
        } @else {
            span { (partner.name) }
        }
    };
    html! {
        li.partner {
            @if let Some(link) = partner.link.as_deref().filter(|l| !l.is_empty()) {
                a href=(link) target="_blank" rel="noopener" { (body) }
            } @else {
                (body)
            }
        }
    }
}
