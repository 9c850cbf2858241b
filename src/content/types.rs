//! Typed documents fetched from the content store.
//!
//! The store's documents are loosely shaped: optional fields are omitted,
//! references may dangle, and slugs arrive either as a bare string (when the
//! query projects `slug.current`) or wrapped in a `{current}` object. All of
//! that tolerance lives *here*, at the fetch boundary — every struct in this
//! module deserializes into a fully defaulted value, so page rendering never
//! needs to reason about missing data:
//!
//! - missing caption / photo credit / description → empty string
//! - missing tag list → empty vec
//! - missing image reference → `None`, callers skip rendering
//!
//! Documents are immutable once fetched. Membership in a filtered view is
//! derived at query time, never stored on the document.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::content::image::ImageRef;

/// Accepts both `"slug": "x"` and `"slug": {"current": "x"}`.
///
/// Raw documents wrap slugs in an object; projected queries flatten them.
/// Both shapes appear in this codebase's queries.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawSlug")]
pub struct Slug(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSlug {
    Flat(String),
    Wrapped { current: String },
    Missing,
}

impl From<RawSlug> for Slug {
    fn from(raw: RawSlug) -> Self {
        match raw {
            RawSlug::Flat(s) => Slug(s),
            RawSlug::Wrapped { current } => Slug(current),
            RawSlug::Missing => Slug(String::new()),
        }
    }
}

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A reference to an image asset, as stored on documents:
/// `{"asset": {"_ref": "image-..."}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageSource {
    #[serde(default)]
    pub asset: Option<AssetRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref", default)]
    pub reference: String,
    /// Resolved asset URL, present only when the query dereferences it.
    #[serde(default)]
    pub url: Option<String>,
}

impl ImageSource {
    /// Parse the opaque reference, if there is one worth rendering.
    pub fn image_ref(&self) -> Option<ImageRef> {
        self.asset
            .as_ref()
            .and_then(|a| ImageRef::parse(&a.reference))
    }
}

/// A gallery tag: slug is the unique, URL-safe filter key.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Slug,
    #[serde(default)]
    pub description: String,
}

/// A photo in the gallery.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Absent or dangling references mean "no image to render"; the grid
    /// skips the entry.
    #[serde(default)]
    pub image: Option<ImageSource>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub photo_credit: String,
    /// Tag slugs this image carries. Order follows the store.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// An event with a run of days.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Slug,
    #[serde(default)]
    pub cover_image: Option<ImageSource>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: Vec<Block>,
    /// Curated image strip shown on the event detail page.
    #[serde(default)]
    pub featured_gallery_images: Vec<GalleryImage>,
}

impl Event {
    pub fn start_day(&self) -> Option<NaiveDate> {
        parse_day(&self.start_date)
    }

    pub fn end_day(&self) -> Option<NaiveDate> {
        parse_day(&self.end_date)
    }
}

/// Parse the date part of a store date or datetime string.
///
/// The store emits either `YYYY-MM-DD` or a full RFC 3339 datetime; only
/// the day matters for event grouping, so take the first ten characters.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let day = value.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// A blog post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: Slug,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published_at: String,
    /// Resolved main-image URL, already dereferenced by the query.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub body: Vec<Block>,
}

impl Post {
    pub fn published_day(&self) -> Option<NaiveDate> {
        parse_day(&self.published_at)
    }
}

/// A foundation partner shown on the home page.
#[derive(Debug, Clone, Deserialize)]
pub struct Partner {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: Option<ImageSource>,
    #[serde(default)]
    pub link: Option<String>,
}

/// An outbound social link in the footer.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialLink {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
}

/// Hero media on the home page: an image or a looping video.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroMedia {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub image: Option<ImageSource>,
    #[serde(default)]
    pub video: Option<ImageSource>,
}

/// The singleton home-page document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    #[serde(default)]
    pub hero_media: HeroMedia,
    #[serde(default)]
    pub intro_text: Vec<Block>,
    #[serde(default)]
    pub featured_event: Option<Event>,
    #[serde(default)]
    pub featured_posts: Vec<Post>,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub foundation_partners: Vec<Partner>,
}

/// One rich-text block (the store's portable-text format, reduced to the
/// subset this site's editors actually produce: styled paragraphs, list
/// items, bold/italic spans).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default)]
    pub list_item: Option<String>,
    #[serde(default)]
    pub children: Vec<Span>,
}

fn default_style() -> String {
    "normal".to_string()
}

/// An inline span of text within a block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub marks: Vec<String>,
}

impl Block {
    /// Concatenated plain text of all spans, for summaries and alt text.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }
}
