//! HTTP server: routes, handlers, and error surfacing.
//!
//! Every page handler follows the same shape: read state from the URL,
//! fetch the documents it needs, render with Maud. Handlers own their
//! request end to end — no shared mutable view state exists between
//! requests, so rapid filter toggling cannot interleave responses: each
//! navigation renders exactly the documents fetched for it.
//!
//! Fetch failures become a retryable error page pointing back at the URL
//! that failed (never a stuck loading view); missing documents become 404s.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use maud::Markup;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tracing::{error, info};

use crate::config::SiteConfig;
use crate::content::{ContentClient, ContentError};
use crate::filter::FilterSelection;
use crate::lightbox::Lightbox;
use crate::render::{
    self, Chrome,
    gallery::{GalleryView, render_gallery},
};

pub struct AppState {
    pub client: ContentClient,
    pub config: SiteConfig,
}

type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: SiteConfig) -> Arc<Self> {
        let client = ContentClient::new(&config.content);
        Arc::new(Self { client, config })
    }

    fn chrome(&self) -> Chrome {
        Chrome::new(self.config.site.clone())
    }

    /// A content fetch failed: log it and render the retryable error page
    /// for the URL that failed.
    fn fetch_error(&self, err: ContentError, retry_href: &str) -> PageError {
        error!(%retry_href, "content fetch failed: {err}");
        PageError {
            status: StatusCode::BAD_GATEWAY,
            markup: render::error::render_fetch_error(retry_href, &self.chrome()),
        }
    }

    fn not_found(&self, what: &str) -> PageError {
        PageError {
            status: StatusCode::NOT_FOUND,
            markup: render::error::render_not_found(what, &self.chrome()),
        }
    }
}

/// A rendered error page with its status code.
pub struct PageError {
    status: StatusCode,
    markup: Markup,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status, Html(self.markup.into_string())).into_response()
    }
}

type PageResult = Result<Html<String>, PageError>;

fn page(markup: Markup) -> PageResult {
    Ok(Html(markup.into_string()))
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/gallery", get(gallery))
        .route("/events", get(events))
        .route("/events/{slug}", get(event_detail))
        .route("/blog/{slug}", get(blog_post))
        .fallback(fallback)
        .with_state(state)
}

/// Run the site server until ctrl-c or SIGTERM.
pub async fn serve(config: SiteConfig) -> Result<(), Box<dyn std::error::Error>> {
    let bind = config.server.bind.clone();
    let state = AppState::new(config);
    let app = router(state);

    let listener = TcpListener::bind(&bind).await?;
    info!("serving on http://{bind}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        if ctrl_c().await.is_ok() {
            info!("received ctrl-c, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {}
        _ = terminate => {}
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn home(State(state): State<SharedState>, uri: Uri) -> PageResult {
    let home = state
        .client
        .home_page()
        .await
        .map_err(|e| state.fetch_error(e, uri.path()))?;

    // The footer's contact and social links come from the home document
    let mut chrome = state.chrome();
    chrome.contact_email = home.contact_email.clone();
    chrome.social_links = home.social_links.clone();

    page(render::home::render_home(
        &home,
        &state.config.content,
        &chrome,
    ))
}

async fn gallery(
    State(state): State<SharedState>,
    Query(params): Query<Vec<(String, String)>>,
    uri: Uri,
) -> PageResult {
    let retry_href = full_path(&uri);
    let selection =
        FilterSelection::from_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let images = state
        .client
        .gallery_images(&selection)
        .await
        .map_err(|e| state.fetch_error(e, &retry_href))?;
    let tags = state
        .client
        .all_tags()
        .await
        .map_err(|e| state.fetch_error(e, &retry_href))?;

    // An out-of-range photo parameter (the filter shrank the sequence, or
    // a stale shared link) folds back to the closed state.
    let photo = params.iter().find(|(k, _)| k == "photo").map(|(_, v)| v.as_str());
    let lightbox = Lightbox::from_query(photo, images.len());

    let view = GalleryView {
        tags: &tags,
        images: &images,
        selection: &selection,
        lightbox,
    };
    page(render_gallery(&view, &state.config.content, &state.chrome()))
}

async fn events(State(state): State<SharedState>, uri: Uri) -> PageResult {
    let all = state
        .client
        .events()
        .await
        .map_err(|e| state.fetch_error(e, uri.path()))?;
    let today = Local::now().date_naive();
    let (upcoming, past) = render::events::split_events(all, today);
    page(render::events::render_events(
        &upcoming,
        &past,
        &state.config.content,
        &state.chrome(),
    ))
}

async fn event_detail(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    uri: Uri,
) -> PageResult {
    let event = state
        .client
        .event(&slug)
        .await
        .map_err(|e| state.fetch_error(e, uri.path()))?
        .ok_or_else(|| state.not_found("Event"))?;
    page(render::events::render_event_detail(
        &event,
        &state.config.content,
        &state.chrome(),
    ))
}

async fn blog_post(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    uri: Uri,
) -> PageResult {
    let post = state
        .client
        .post(&slug)
        .await
        .map_err(|e| state.fetch_error(e, uri.path()))?
        .ok_or_else(|| state.not_found("Post"))?;
    page(render::blog::render_post(&post, &state.chrome()))
}

async fn fallback(State(state): State<SharedState>) -> PageError {
    state.not_found("Page")
}

/// Path plus query string, for exact retry links.
fn full_path(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state() -> SharedState {
        AppState::new(SiteConfig::default())
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn unknown_route_renders_not_found_page() {
        let app = router(test_state());
        let response = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_string(response).await;
        assert!(body.contains("Page not found."));
        assert!(body.contains("Foundation Collective"));
    }

    #[test]
    fn full_path_keeps_query_for_retry() {
        let uri: Uri = "/gallery?tag=oldschool&photo=2".parse().unwrap();
        assert_eq!(full_path(&uri), "/gallery?tag=oldschool&photo=2");
    }
}
