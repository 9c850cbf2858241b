//! Events pages: the upcoming/past listing and the event detail page.

use chrono::NaiveDate;
use maud::{Markup, html};

use crate::config::ContentStoreConfig;
use crate::content::types::Event;
use crate::render::{Chrome, base_document, page_header, portable};

/// Split events around `today` (inclusive: an event ending today is still
/// upcoming). Upcoming events sort soonest-first by start date; past events
/// most-recent-first by end date. Events whose end date does not parse are
/// dropped, matching the store's own behavior for malformed dates.
pub fn split_events(events: Vec<Event>, today: NaiveDate) -> (Vec<Event>, Vec<Event>) {
    let mut upcoming: Vec<Event> = Vec::new();
    let mut past: Vec<Event> = Vec::new();
    for event in events {
        match event.end_day() {
            Some(end) if end >= today => upcoming.push(event),
            Some(_) => past.push(event),
            None => {}
        }
    }
    upcoming.sort_by_key(|e| e.start_day());
    past.sort_by_key(|e| std::cmp::Reverse(e.end_day()));
    (upcoming, past)
}

/// Human display for a store date; falls back to the raw string when the
/// date does not parse.
fn display_date(raw: &str) -> String {
    match crate::content::types::parse_day(raw) {
        Some(day) => day.format("%-d %B %Y").to_string(),
        None => raw.to_string(),
    }
}

pub fn render_events(
    upcoming: &[Event],
    past: &[Event],
    store: &ContentStoreConfig,
    chrome: &Chrome,
) -> Markup {
    let content = html! {
        main.events-page {
            (page_header("Events"))
            section.events-section {
                h2 { "Upcoming Events" }
                (event_list(upcoming, store))
            }
            section.events-section {
                h2 { "Past Events" }
                (event_list(past, store))
            }
        }
    };
    base_document("Events", chrome, content)
}

fn event_list(events: &[Event], store: &ContentStoreConfig) -> Markup {
    if events.is_empty() {
        return html! { p.empty-list { "No events found." } };
    }
    html! {
        ul.event-grid {
            @for event in events {
                li.event-card {
                    a href={ "/events/" (event.slug.as_str()) } {
                        @if let Some(cover) = cover_url(event, store, 600, 400) {
                            img src=(cover) alt=(event.name)
                                width="600" height="400" loading="lazy";
                        }
                        div.event-card-body {
                            h3 { (event.name) }
                            p.event-dates {
                                "Start: " (display_date(&event.start_date))
                            }
                            p.event-dates {
                                "End: " (display_date(&event.end_date))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn cover_url(event: &Event, store: &ContentStoreConfig, w: u32, h: u32) -> Option<String> {
    event
        .cover_image
        .as_ref()
        .and_then(|s| s.image_ref())
        .map(|r| r.url_builder(store).width(w).height(h).auto_format().build())
}

pub fn render_event_detail(event: &Event, store: &ContentStoreConfig, chrome: &Chrome) -> Markup {
    let content = html! {
        main.event-detail {
            a.back-link href="/events" { "← Back to events" }
            @if let Some(cover) = cover_url(event, store, 800, 600) {
                img.event-cover src=(cover) alt=(event.name) width="800" height="600";
            }
            h1 { (event.name) }
            p.event-dates {
                (display_date(&event.start_date)) " – " (display_date(&event.end_date))
            }
            article.event-description {
                (portable::render_blocks(&event.description))
            }
            @if !event.featured_gallery_images.is_empty() {
                section.event-featured {
                    h2 { "From the gallery" }
                    div.thumbnail-grid {
                        @for image in &event.featured_gallery_images {
                            @if let Some(image_ref) = image.image.as_ref().and_then(|s| s.image_ref()) {
                                @let src = image_ref
                                    .url_builder(store)
                                    .width(400)
                                    .height(250)
                                    .auto_format()
                                    .build();
                                figure.featured-image {
                                    img src=(src) alt=(image.caption)
                                        width="400" height="250" loading="lazy";
                                    @if !image.caption.is_empty() {
                                        figcaption { (image.caption) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    base_document(&event.name, chrome, content)
}
