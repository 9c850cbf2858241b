//! Image reference resolution.
//!
//! Documents carry opaque asset references rather than URLs:
//!
//! ```text
//! image-<id>-<width>x<height>-<ext>     e.g. image-a1b2c3-2000x1500-jpg
//! file-<id>-<ext>                       e.g. file-d4e5f6-mp4
//! ```
//!
//! This module parses those references and builds renderable CDN URLs with
//! the desired output dimensions, format negotiation, and blur radius. A
//! reference that does not parse yields `None`; calling code treats that as
//! "no image to render" and skips the element entirely — a broken reference
//! never produces a broken `<img>`.

use std::fmt::Write as _;

use crate::config::ContentStoreConfig;

const CDN_HOST: &str = "https://cdn.sanity.io";

/// A parsed image asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub ext: String,
}

impl ImageRef {
    /// Parse an `image-<id>-<WxH>-<ext>` reference. Anything else is `None`.
    pub fn parse(reference: &str) -> Option<Self> {
        let rest = reference.strip_prefix("image-")?;
        let mut parts = rest.rsplitn(3, '-');
        let ext = parts.next()?;
        let dims = parts.next()?;
        let id = parts.next()?;
        let (w, h) = dims.split_once('x')?;
        let width = w.parse().ok()?;
        let height = h.parse().ok()?;
        if id.is_empty() || ext.is_empty() {
            return None;
        }
        Some(Self {
            id: id.to_string(),
            width,
            height,
            ext: ext.to_string(),
        })
    }

    /// Start building a CDN URL for this asset.
    pub fn url_builder<'a>(&'a self, store: &'a ContentStoreConfig) -> ImageUrlBuilder<'a> {
        ImageUrlBuilder {
            image: self,
            store,
            width: None,
            height: None,
            blur: None,
            auto_format: false,
        }
    }
}

/// Builder for image CDN URLs: `{width, height, format, blur}` per the
/// resolver contract.
#[derive(Debug)]
pub struct ImageUrlBuilder<'a> {
    image: &'a ImageRef,
    store: &'a ContentStoreConfig,
    width: Option<u32>,
    height: Option<u32>,
    blur: Option<u32>,
    auto_format: bool,
}

impl ImageUrlBuilder<'_> {
    pub fn width(mut self, w: u32) -> Self {
        self.width = Some(w);
        self
    }

    pub fn height(mut self, h: u32) -> Self {
        self.height = Some(h);
        self
    }

    /// Gaussian blur radius, used for low-res placeholder frames.
    pub fn blur(mut self, radius: u32) -> Self {
        self.blur = Some(radius);
        self
    }

    /// Let the CDN negotiate the delivery format from the Accept header.
    pub fn auto_format(mut self) -> Self {
        self.auto_format = true;
        self
    }

    pub fn build(self) -> String {
        let ImageRef {
            id,
            width,
            height,
            ext,
        } = self.image;
        let mut url = format!(
            "{CDN_HOST}/images/{}/{}/{id}-{width}x{height}.{ext}",
            self.store.project_id, self.store.dataset,
        );

        let mut sep = '?';
        let mut push = |url: &mut String, key: &str, value: u32| {
            // write! to String is infallible
            let _ = write!(url, "{sep}{key}={value}");
            sep = '&';
        };
        if let Some(w) = self.width {
            push(&mut url, "w", w);
        }
        if let Some(h) = self.height {
            push(&mut url, "h", h);
            // Cropping keeps the requested aspect when both dims are set
            let _ = write!(url, "&fit=crop");
        }
        if let Some(b) = self.blur {
            push(&mut url, "blur", b);
        }
        if self.auto_format {
            let _ = write!(url, "{sep}auto=format");
        }
        url
    }
}

/// Resolve a file asset reference (`file-<id>-<ext>`) to its CDN URL.
///
/// Used for the home-page hero video. Prefers an already-resolved asset
/// URL when the query dereferenced one.
pub fn file_url(reference: &str, resolved: Option<&str>, store: &ContentStoreConfig) -> Option<String> {
    if let Some(url) = resolved {
        if !url.is_empty() {
            return Some(url.to_string());
        }
    }
    let rest = reference.strip_prefix("file-")?;
    let (id, ext) = rest.rsplit_once('-')?;
    if id.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!(
        "{CDN_HOST}/files/{}/{}/{id}.{ext}",
        store.project_id, store.dataset,
    ))
}
