//! JSON REST API for the OKR tracker.
//!
//! Exposes an axum [`Router`] backed by any [`okr_core::store::ObjectiveStore`].
//! Every read runs the progress engine over freshly loaded data; nothing
//! derived is cached. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", okr_api::api_router(store.clone(), chrono_tz::UTC))
//! ```

pub mod error;
pub mod key_results;
pub mod objectives;
pub mod summary;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use chrono_tz::Tz;
use okr_core::store::ObjectiveStore;

pub use error::ApiError;

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct ApiState<S: ObjectiveStore> {
  pub store:    Arc<S>,
  /// Calendar days for deadlines are counted in this zone.
  pub timezone: Tz,
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, timezone: Tz) -> Router<()>
where
  S: ObjectiveStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Life Objective trees
    .route(
      "/objectives",
      get(objectives::list::<S>).post(objectives::create::<S>),
    )
    .route(
      "/objectives/{id}",
      get(objectives::get_one::<S>)
        .put(objectives::update::<S>)
        .delete(objectives::delete::<S>),
    )
    .route("/objectives/{id}/progress", get(summary::life_progress::<S>))
    .route("/areas/{id}/progress", get(summary::area_progress::<S>))
    // Key Results
    .route("/key-results/{id}", get(key_results::get_one::<S>))
    .route("/key-results/{id}/value", put(key_results::set_value::<S>))
    // Dashboard
    .route("/summary", get(summary::dashboard::<S>))
    .with_state(ApiState { store, timezone })
}
