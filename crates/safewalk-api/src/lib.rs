//! JSON API for SafeWalk.
//!
//! Exposes an axum [`Router`] backed by any [`KeyValueStore`]. Every endpoint
//! resolves a [`safewalk_core::session::Session`] from the request and runs it
//! through the session gate before touching the record store.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", safewalk_api::api_router(state))
//! ```

pub mod admin;
pub mod alerts;
pub mod assistant;
pub mod auth;
pub mod challenges;
pub mod community;
pub mod email;
pub mod error;
pub mod extract;
pub mod geocode;
pub mod helplines;
pub mod reports;
pub mod session;
pub mod zones;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use safewalk_core::{records::RecordStore, store::KeyValueStore};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

use auth::IdentityConfig;
use email::EmailClient;
use geocode::GeocodeClient;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub records:  Arc<RecordStore<S>>,
  pub identity: Arc<IdentityConfig>,
  pub notifier: Arc<EmailClient>,
  pub geocoder: Arc<GeocodeClient>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: KeyValueStore + Clone + 'static,
{
  Router::new()
    // Session
    .route("/session", get(session::current).post(session::establish::<S>))
    // Dashboard
    .route("/reports", get(reports::list::<S>).post(reports::submit::<S>))
    .route("/reports/banner", delete(reports::dismiss_banner::<S>))
    .route("/alerts", post(alerts::activate::<S>))
    .route("/community", get(community::list::<S>).post(community::create::<S>))
    .route("/assistant", post(assistant::turn))
    .route("/assistant/features", get(assistant::features))
    .route(
      "/challenges",
      get(challenges::progress::<S>).post(challenges::acknowledge::<S>),
    )
    .route("/zones", get(zones::survey::<S>))
    .route("/helplines", get(helplines::list))
    .route("/helplines/{name}", get(helplines::get))
    // Admin console
    .route("/admin/overview", get(admin::overview::<S>))
    .route("/admin/reports/{id}/status", post(admin::set_status::<S>))
    .route("/admin/community", get(admin::community::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
