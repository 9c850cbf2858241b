//! Content store query client.
//!
//! A thin gateway over the store's HTTP query API. Queries are GROQ strings
//! sent as `query` with JSON-encoded `$parameter` values; the response wraps
//! the documents in a `{"result": ...}` envelope. Each page load issues its
//! own fetch — there is no cache layer here, so every filter change sees
//! fresh documents, and because rendering is server-side each request owns
//! its response end to end (no superseding-fetch race to guard against).
//!
//! Failures propagate as [`ContentError`] with no retry; the page layer is
//! responsible for surfacing them as a retryable error view rather than a
//! stuck loading state.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::ContentStoreConfig;
use crate::content::types::{Event, GalleryImage, HomePage, Post, Tag};
use crate::filter::{self, FilterSelection};

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("content store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("content store returned status {0}")]
    Status(u16),
    #[error("could not decode content store response: {0}")]
    Decode(#[from] serde_json::Error),
}

// GROQ queries. Projections rename store fields into the shapes
// `content::types` deserializes: slugs flattened where convenient, tag
// references dereferenced to their slugs, main images to their URLs.

const GALLERY_ALL_QUERY: &str = r#"*[_type == "galleryImage"]{
  _id, image, caption, photoCredit, "tags": tags[]->slug.current
}"#;

// Intersection filter: count the image's tag slugs that appear in the
// selection and require the count to equal the selection size.
const GALLERY_FILTERED_QUERY: &str = r#"*[_type == "galleryImage" && count((tags[]->slug.current)[@ in $tagSlugs]) == $tagCount]{
  _id, image, caption, photoCredit, "tags": tags[]->slug.current
}"#;

const TAGS_QUERY: &str = r#"*[_type == "tag"]{ _id, name, slug, description }"#;

const EVENTS_QUERY: &str = r#"*[_type == "event"]{
  _id, name, slug, coverImage, startDate, endDate
}"#;

const EVENT_QUERY: &str = r#"*[_type == "event" && slug.current == $slug][0]{
  _id, name, slug, coverImage, startDate, endDate, description,
  featuredGalleryImages[]->{
    _id, image, caption, photoCredit, "tags": tags[]->slug.current
  }
}"#;

const POST_QUERY: &str = r#"*[_type == "post" && slug.current == $slug][0]{
  _id, title, slug, description, body, publishedAt,
  "imageUrl": mainImage.asset->url
}"#;

const HOME_QUERY: &str = r#"*[_type == "homePage"][0]{
  heroMedia, introText, contactEmail, socialLinks,
  foundationPartners[]->{ _id, name, logo, link },
  featuredEvent->{ _id, name, slug, coverImage, startDate, endDate, description },
  featuredPosts[]->{
    _id, title, slug, description, publishedAt,
    "imageUrl": mainImage.asset->url
  }
}"#;

/// Envelope every query response arrives in.
#[derive(serde::Deserialize)]
struct QueryResponse<T> {
    result: Option<T>,
}

/// Client for one content store project/dataset.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ContentClient {
    pub fn new(store: &ContentStoreConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            http,
            endpoint: query_endpoint(store),
        }
    }

    /// Run a GROQ query with JSON-encoded parameters and decode the
    /// envelope's `result`. A null result decodes as `None`.
    async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, Value)],
    ) -> Result<Option<T>, ContentError> {
        let pairs = encode_params(groq, params);
        debug!(endpoint = %self.endpoint, params = params.len(), "content query");

        let response = self.http.get(&self.endpoint).query(&pairs).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        let envelope: QueryResponse<T> = serde_json::from_slice(&body)?;
        Ok(envelope.result)
    }

    /// Fetch the gallery images matching a filter selection, sorted by
    /// caption (case-insensitive, captionless first).
    ///
    /// The store query already applies intersection semantics; the local
    /// [`FilterSelection::matches`] pass re-asserts the superset invariant
    /// so a misbehaving store can only ever under-show, never leak
    /// non-matching images into a filtered view.
    pub async fn gallery_images(
        &self,
        selection: &FilterSelection,
    ) -> Result<Vec<GalleryImage>, ContentError> {
        let (groq, params) = gallery_query(selection);
        let mut images: Vec<GalleryImage> =
            self.query(groq, &params).await?.unwrap_or_default();
        images.retain(|image| selection.matches(&image.tags));
        // Entries without a resolvable image are dropped here so that grid
        // positions and lightbox indices always refer to the same sequence.
        images.retain(|image| {
            image
                .image
                .as_ref()
                .is_some_and(|source| source.image_ref().is_some())
        });
        filter::sort_by_caption(&mut images, |image| &image.caption);
        Ok(images)
    }

    /// Fetch the full tag vocabulary.
    pub async fn all_tags(&self) -> Result<Vec<Tag>, ContentError> {
        Ok(self.query(TAGS_QUERY, &[]).await?.unwrap_or_default())
    }

    /// Fetch all events (ordering is derived at render time from dates).
    pub async fn events(&self) -> Result<Vec<Event>, ContentError> {
        Ok(self.query(EVENTS_QUERY, &[]).await?.unwrap_or_default())
    }

    /// Fetch a single event by slug, `None` when it does not exist.
    pub async fn event(&self, slug: &str) -> Result<Option<Event>, ContentError> {
        self.query(EVENT_QUERY, &[("slug", json!(slug))]).await
    }

    /// Fetch a single post by slug, `None` when it does not exist.
    pub async fn post(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        self.query(POST_QUERY, &[("slug", json!(slug))]).await
    }

    /// Fetch the singleton home-page document.
    pub async fn home_page(&self) -> Result<HomePage, ContentError> {
        Ok(self.query(HOME_QUERY, &[]).await?.unwrap_or_default())
    }
}

/// Build the query endpoint URL for a store.
fn query_endpoint(store: &ContentStoreConfig) -> String {
    let host = if store.use_cdn { "apicdn" } else { "api" };
    format!(
        "https://{}.{host}.sanity.io/v{}/data/query/{}",
        store.project_id, store.api_version, store.dataset,
    )
}

/// Pick the gallery query and parameters for a selection.
fn gallery_query(selection: &FilterSelection) -> (&'static str, Vec<(&'static str, Value)>) {
    if selection.is_empty() {
        (GALLERY_ALL_QUERY, Vec::new())
    } else {
        (
            GALLERY_FILTERED_QUERY,
            vec![
                ("tagSlugs", json!(selection.slugs())),
                ("tagCount", json!(selection.len())),
            ],
        )
    }
}

/// Encode query-string pairs: the GROQ text plus `$name=<json>` parameters.
fn encode_params(groq: &str, params: &[(&str, Value)]) -> Vec<(String, String)> {
    let mut pairs = vec![("query".to_string(), groq.to_string())];
    for (name, value) in params {
        pairs.push((format!("${name}"), value.to_string()));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_uses_live_api_by_default() {
        let endpoint = query_endpoint(&ContentStoreConfig::default());
        assert_eq!(
            endpoint,
            "https://4qydhzw9.api.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn endpoint_switches_to_cdn_host() {
        let store = ContentStoreConfig {
            use_cdn: true,
            ..Default::default()
        };
        assert!(query_endpoint(&store).starts_with("https://4qydhzw9.apicdn.sanity.io/"));
    }

    #[test]
    fn empty_selection_uses_unfiltered_query() {
        let (groq, params) = gallery_query(&FilterSelection::new());
        assert_eq!(groq, GALLERY_ALL_QUERY);
        assert!(params.is_empty());
    }

    #[test]
    fn filtered_query_carries_slugs_and_count() {
        let selection = FilterSelection::new()
            .toggle("oldschool")
            .toggle("newschool");
        let (groq, params) = gallery_query(&selection);
        assert_eq!(groq, GALLERY_FILTERED_QUERY);

        let pairs = encode_params(groq, &params);
        assert_eq!(pairs[0].0, "query");
        assert_eq!(
            pairs[1],
            (
                "$tagSlugs".to_string(),
                r#"["oldschool","newschool"]"#.to_string()
            )
        );
        assert_eq!(pairs[2], ("$tagCount".to_string(), "2".to_string()));
    }

    #[test]
    fn envelope_with_null_result_decodes_to_none() {
        let envelope: QueryResponse<Vec<Tag>> =
            serde_json::from_str(r#"{"result": null}"#).unwrap();
        assert!(envelope.result.is_none());
    }

    #[test]
    fn envelope_with_documents_decodes() {
        let envelope: QueryResponse<Vec<Tag>> = serde_json::from_str(
            r#"{"result": [{"_id": "t1", "name": "Old School", "slug": {"current": "oldschool"}}]}"#,
        )
        .unwrap();
        let tags = envelope.result.unwrap();
        assert_eq!(tags[0].slug.as_str(), "oldschool");
    }
}
