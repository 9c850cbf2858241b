//! End-to-end gallery flow against in-memory fixtures: documents decode at
//! the fetch boundary, the filter selects and orders them, and the rendered
//! page carries the state round trip in its URLs. No network involved.

use foundation_collective::config::{ContentStoreConfig, SiteMeta};
use foundation_collective::content::types::{GalleryImage, Tag};
use foundation_collective::filter::{self, FilterSelection};
use foundation_collective::lightbox::{Key, Lightbox};
use foundation_collective::render::Chrome;
use foundation_collective::render::gallery::{GalleryView, render_gallery};
use serde_json::json;

/// A small store dataset: captions chosen to exercise the sort rules,
/// tags to exercise intersection filtering, and one document with no
/// image reference that must never reach the grid.
fn fixture_images() -> Vec<GalleryImage> {
    serde_json::from_value(json!([
        {
            "_id": "img-banana",
            "image": {"asset": {"_ref": "image-banana1-2000x1500-jpg"}},
            "caption": "Banana",
            "tags": ["oldschool"]
        },
        {
            "_id": "img-uncaptioned",
            "image": {"asset": {"_ref": "image-bare1-2000x1500-jpg"}},
            "tags": ["oldschool", "newschool"]
        },
        {
            "_id": "img-apple",
            "image": {"asset": {"_ref": "image-apple1-2000x1500-jpg"}},
            "caption": "apple",
            "photoCredit": "A. Painter",
            "tags": ["newschool", "oldschool", "portraits"]
        },
        {
            "_id": "img-orphan",
            "caption": "no image reference",
            "tags": ["oldschool"]
        }
    ]))
    .unwrap()
}

fn fixture_tags() -> Vec<Tag> {
    serde_json::from_value(json!([
        {"_id": "t1", "name": "Old School", "slug": {"current": "oldschool"},
         "description": "The early years."},
        {"_id": "t2", "name": "New School", "slug": {"current": "newschool"}},
        {"_id": "t3", "name": "Portraits", "slug": {"current": "portraits"}}
    ]))
    .unwrap()
}

/// The display pipeline applied after every fetch: intersection filter,
/// drop unrenderable entries, caption sort.
fn displayed(selection: &FilterSelection) -> Vec<GalleryImage> {
    let mut images = fixture_images();
    images.retain(|image| selection.matches(&image.tags));
    images.retain(|image| {
        image
            .image
            .as_ref()
            .is_some_and(|source| source.image_ref().is_some())
    });
    filter::sort_by_caption(&mut images, |image| &image.caption);
    images
}

fn captions(images: &[GalleryImage]) -> Vec<&str> {
    images.iter().map(|i| i.caption.as_str()).collect()
}

fn render(images: &[GalleryImage], selection: &FilterSelection, lightbox: Lightbox) -> String {
    let tags = fixture_tags();
    let view = GalleryView {
        tags: &tags,
        images,
        selection,
        lightbox,
    };
    render_gallery(
        &view,
        &ContentStoreConfig::default(),
        &Chrome::new(SiteMeta::default()),
    )
    .into_string()
}

#[test]
fn unfiltered_view_sorts_empty_caption_first() {
    let images = displayed(&FilterSelection::new());
    // Orphan (no image ref) is gone; empty caption leads, then
    // case-insensitive alphabetical
    assert_eq!(captions(&images), ["", "apple", "Banana"]);
}

#[test]
fn single_tag_filter_keeps_supersets() {
    let selection = FilterSelection::new().toggle("newschool");
    let images = displayed(&selection);
    assert_eq!(captions(&images), ["", "apple"]);
}

#[test]
fn two_tag_filter_is_an_intersection() {
    let selection = FilterSelection::new().toggle("oldschool").toggle("newschool");
    let images = displayed(&selection);
    // "Banana" has only oldschool and is excluded; both survivors carry
    // both tags (one with a third tag besides)
    assert_eq!(captions(&images), ["", "apple"]);
    for image in &images {
        assert!(selection.matches(&image.tags));
    }
}

#[test]
fn filter_narrow_then_clear_round_trips_through_urls() {
    let one = FilterSelection::new().toggle("oldschool");
    assert_eq!(one.to_query_string(), "tag=oldschool");
    assert_eq!(captions(&displayed(&one)), ["", "apple", "Banana"]);

    let both = one.toggle("newschool");
    assert_eq!(both.to_query_string(), "tag=oldschool&tag=newschool");
    assert_eq!(captions(&displayed(&both)), ["", "apple"]);

    let cleared = both.clear();
    assert_eq!(cleared.to_query_string(), "");
    assert_eq!(captions(&displayed(&cleared)), ["", "apple", "Banana"]);

    // The rendered page links every state transition
    let doc = render(&displayed(&one), &one, Lightbox::Closed);
    assert!(doc.contains(r#"href="/gallery?tag=oldschool&amp;tag=newschool""#));
}

#[test]
fn lightbox_survives_keyboard_trip_and_renders_wrapped_links() {
    let selection = FilterSelection::new();
    let images = displayed(&selection);
    let len = images.len();
    assert_eq!(len, 3);

    // Open the last image; next wraps to the first
    let open = Lightbox::open(len - 1, len);
    let doc = render(&images, &selection, open);
    assert!(doc.contains(r#"data-next="/gallery?photo=0""#));

    // Keyboard: right, right, left nets one step forward
    let state = open
        .key(Key::ArrowRight, len)
        .key(Key::ArrowRight, len)
        .key(Key::ArrowLeft, len);
    assert_eq!(state, Lightbox::Open(0));

    // Escape closes; the re-rendered page has no overlay left
    let closed = state.key(Key::Escape, len);
    let doc = render(&images, &selection, closed);
    assert!(!doc.contains("lightbox-overlay"));
}

#[test]
fn filter_change_under_open_lightbox_implicitly_closes() {
    // Lightbox open at index 2 of the unfiltered view
    let open = Lightbox::open(2, displayed(&FilterSelection::new()).len());
    assert!(open.is_open());

    // Narrowing the filter shrinks the sequence to 2; index 2 is out of
    // range and the state folds back to closed
    let narrowed = FilterSelection::new().toggle("newschool");
    let shrunk = displayed(&narrowed);
    assert_eq!(shrunk.len(), 2);
    assert_eq!(open.reconcile(shrunk.len()), Lightbox::Closed);
}

#[test]
fn captionless_image_gets_placeholder_alt_text() {
    let selection = FilterSelection::new();
    let images = displayed(&selection);
    let doc = render(&images, &selection, Lightbox::Closed);
    assert!(doc.contains(r#"alt="Gallery Image""#));
}
