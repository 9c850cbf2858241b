//! Content store access: typed documents, the query client, and image
//! reference resolution.
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Document structs with all defaulting applied at the fetch boundary |
//! | [`client`] | GROQ query gateway over the store's HTTP API |
//! | [`image`] | Opaque asset references → renderable CDN URLs |

pub mod client;
pub mod image;
pub mod types;

pub use client::{ContentClient, ContentError};
pub use image::ImageRef;
