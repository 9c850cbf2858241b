//! # Foundation Collective
//!
//! Server-rendered website for the Foundation Collective. Pages are built
//! from typed documents fetched at request time from a hosted headless
//! content store; nothing is persisted locally, so published edits appear
//! on the next page load.
//!
//! # Architecture: URL as the only state
//!
//! All user-visible view state lives in the URL. The gallery's filter is
//! zero to two repeated `tag` query parameters, the lightbox an optional
//! `photo` index — reloading or sharing a link reproduces the exact view.
//! Each request fetches fresh documents, renders, and returns; no view
//! state survives a request, so there is no superseding-fetch race between
//! rapid filter changes: every navigation renders exactly what it fetched.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.toml` loading and validation |
//! | [`content`] | Content store gateway: typed documents, GROQ client, image URL resolution |
//! | [`filter`] | Tag filter selection — toggle/clear, URL round trip, intersection semantics |
//! | [`lightbox`] | Lightbox state machine — open/next/prev/close with modular wraparound |
//! | [`render`] | Maud page templates, embedded CSS/JS |
//! | [`server`] | axum routes and handlers, error surfacing, graceful shutdown |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed HTML is a build error, template variables
//! are Rust expressions, interpolation is auto-escaped, and there is no
//! template directory to ship or get out of sync.
//!
//! ## Defaulting at the Fetch Boundary
//!
//! The store's documents are loosely shaped. Every tolerance rule —
//! missing captions become empty strings, dangling image references become
//! "nothing to render", slugs unwrap from either shape — is applied once,
//! in [`content::types`], so templates never touch an `Option` they could
//! render incorrectly.
//!
//! ## Links as State Transitions
//!
//! Filter toggles and lightbox navigation are pure functions on value
//! types ([`filter::FilterSelection`], [`lightbox::Lightbox`]); the page
//! renders each control's `href` by applying the transition and
//! serializing the result. The ~30 lines of embedded JavaScript only
//! upgrade those links (keyboard navigation, history-replace) and the site
//! works in full without them.

pub mod config;
pub mod content;
pub mod filter;
pub mod lightbox;
pub mod render;
pub mod server;
