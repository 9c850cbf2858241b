//! Gallery page: tag cloud, filtered thumbnail grid, lightbox overlay.
//!
//! Filter state and lightbox state both live in the URL (`tag` and `photo`
//! parameters), so every control on this page is a plain link whose target
//! is computed from the corresponding state transition: tag buttons link to
//! `selection.toggle(slug)`, the lightbox arrows link to `next`/`prev`, and
//! the close control links to the same filter with no `photo` parameter.
//! The embedded script only upgrades those links — keyboard navigation and
//! history-replace — and is inert when no overlay is on the page.
//!
//! The overlay's backdrop is itself the close link, stretched under the
//! content pane; clicks inside the image pane land on the pane, not the
//! backdrop, so they cannot close the lightbox.

use maud::{Markup, PreEscaped, html};

use crate::config::ContentStoreConfig;
use crate::content::types::{GalleryImage, Tag};
use crate::filter::FilterSelection;
use crate::lightbox::Lightbox;
use crate::render::{Chrome, base_document, page_header};

const LIGHTBOX_JS: &str = include_str!("../../static/lightbox.js");

/// Tags pinned to their own row above the rest of the cloud.
const SPECIAL_TAG_SLUGS: [&str; 2] = ["oldschool", "newschool"];

/// Everything the gallery page needs, already fetched and sorted.
pub struct GalleryView<'a> {
    pub tags: &'a [Tag],
    pub images: &'a [GalleryImage],
    pub selection: &'a FilterSelection,
    pub lightbox: Lightbox,
}

/// Build a gallery URL for a filter selection and optional open photo.
pub fn gallery_href(selection: &FilterSelection, photo: Option<usize>) -> String {
    let mut href = String::from("/gallery");
    let query = selection.to_query_string();
    match (query.is_empty(), photo) {
        (true, None) => {}
        (true, Some(i)) => href.push_str(&format!("?photo={i}")),
        (false, None) => href.push_str(&format!("?{query}")),
        (false, Some(i)) => href.push_str(&format!("?{query}&photo={i}")),
    }
    href
}

pub fn render_gallery(view: &GalleryView, store: &ContentStoreConfig, chrome: &Chrome) -> Markup {
    let content = html! {
        main.gallery-page {
            (page_header("Gallery"))
            (tag_cloud(view))
            (active_filters(view))
            (thumbnail_grid(view, store))
            @if let Some(index) = view.lightbox.index() {
                (lightbox_overlay(view, index, store))
            }
            script { (PreEscaped(LIGHTBOX_JS)) }
        }
    };
    base_document("Gallery", chrome, content)
}

fn tag_button(tag: &Tag, selection: &FilterSelection) -> Markup {
    let slug = tag.slug.as_str();
    let active = selection.contains(slug);
    html! {
        a.tag-button.active-tag[active]
            href=(gallery_href(&selection.toggle(slug), None))
            data-replace {
            (tag.name)
        }
    }
}

fn tag_cloud(view: &GalleryView) -> Markup {
    let special: Vec<&Tag> = view
        .tags
        .iter()
        .filter(|t| SPECIAL_TAG_SLUGS.contains(&t.slug.as_str()))
        .collect();
    let mut other: Vec<&Tag> = view
        .tags
        .iter()
        .filter(|t| !SPECIAL_TAG_SLUGS.contains(&t.slug.as_str()))
        .collect();
    other.sort_by(|a, b| a.name.cmp(&b.name));

    html! {
        div.tag-cloud {
            div.special-tag-row {
                @for tag in &special { (tag_button(tag, view.selection)) }
            }
            div.other-tags {
                @for tag in &other { (tag_button(tag, view.selection)) }
            }
            @if !view.selection.is_empty() {
                a.clear-button href=(gallery_href(&view.selection.clear(), None)) data-replace {
                    "Clear Filters"
                }
            }
        }
    }
}

fn active_filters(view: &GalleryView) -> Markup {
    // Descriptions of the active tags, in selection order, empty ones skipped
    let descriptions: Vec<&str> = view
        .selection
        .slugs()
        .iter()
        .filter_map(|slug| view.tags.iter().find(|t| t.slug.as_str() == slug))
        .map(|t| t.description.as_str())
        .filter(|d| !d.is_empty())
        .collect();

    html! {
        @if !view.selection.is_empty() {
            div.active-filters {
                p { "Filtering by: " strong { (view.selection.slugs().join(" + ")) } }
            }
        }
        @if !descriptions.is_empty() {
            div.filter-descriptions {
                @for description in &descriptions {
                    p.filter-description { (description) }
                }
            }
        }
    }
}

fn thumbnail_grid(view: &GalleryView, store: &ContentStoreConfig) -> Markup {
    html! {
        div.thumbnail-grid {
            @for (index, image) in view.images.iter().enumerate() {
                @if let Some(image_ref) = image.image.as_ref().and_then(|s| s.image_ref()) {
                    @let thumb = image_ref
                        .url_builder(store)
                        .width(400)
                        .height(250)
                        .auto_format()
                        .build();
                    a.thumb-link href=(gallery_href(view.selection, Some(index))) data-replace {
                        img src=(thumb)
                            alt=(alt_text(image))
                            width="400" height="250" loading="lazy";
                    }
                }
            }
        }
    }
}

fn alt_text(image: &GalleryImage) -> &str {
    if image.caption.is_empty() {
        "Gallery Image"
    } else {
        &image.caption
    }
}

fn lightbox_overlay(view: &GalleryView, index: usize, store: &ContentStoreConfig) -> Markup {
    let len = view.images.len();
    let image = &view.images[index];
    let open = Lightbox::Open(index);

    let close_href = gallery_href(view.selection, None);
    let prev_href = gallery_href(view.selection, open.prev(len).index());
    let next_href = gallery_href(view.selection, open.next(len).index());

    let full = image
        .image
        .as_ref()
        .and_then(|s| s.image_ref())
        .map(|r| r.url_builder(store).width(1200).auto_format().build());

    html! {
        div.lightbox-overlay data-prev=(prev_href) data-next=(next_href) data-close=(close_href) {
            a.lightbox-backdrop href=(close_href) data-replace aria-label="Close" {}
            div.lightbox-content {
                @if let Some(src) = &full {
                    img.lightbox-image src=(src) alt=(alt_text(image));
                }
                div.lightbox-caption {
                    @if !image.caption.is_empty() {
                        p.caption { (image.caption) }
                    }
                    @if !image.photo_credit.is_empty() {
                        p.photo-credit { (image.photo_credit) }
                    }
                }
                a.lightbox-prev href=(prev_href) data-replace aria-label="Previous image" { "‹" }
                a.lightbox-next href=(next_href) data-replace aria-label="Next image" { "›" }
                a.lightbox-close href=(close_href) data-replace aria-label="Close" { "×" }
            }
        }
    }
}
