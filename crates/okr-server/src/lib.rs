//! HTTP server for the OKR tracker.
//!
//! Wires an [`okr_store_sqlite::SqliteStore`] into the [`okr_api`] router,
//! adds request tracing, and optionally seeds an empty store with example
//! objectives.

pub mod error;
pub mod seed;

pub use error::{Error, Result};

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use chrono_tz::Tz;
use okr_core::store::ObjectiveStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `OKR_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub store_path:    PathBuf,
  /// IANA name, e.g. `"Europe/Madrid"`. Decides where calendar days start.
  pub timezone:      String,
  /// Insert example objectives when the store is empty.
  pub seed_examples: bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "127.0.0.1".to_string(),
      port:          8080,
      store_path:    PathBuf::from("okr.db"),
      timezone:      "UTC".to_string(),
      seed_examples: false,
    }
  }
}

impl ServerConfig {
  pub fn timezone(&self) -> Result<Tz> {
    self
      .timezone
      .parse::<Tz>()
      .map_err(|_| Error::UnknownTimezone(self.timezone.clone()))
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: the JSON API under `/api`, with every request
/// traced.
pub fn router<S>(store: Arc<S>, timezone: Tz) -> Router
where
  S: ObjectiveStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .nest("/api", okr_api::api_router(store, timezone))
    .layer(TraceLayer::new_for_http())
}
