//! Read-only rollups: the dashboard and per-objective progress.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/summary` | Optional `?now=<RFC 3339>`; defaults to the current instant |
//! | `GET`  | `/objectives/:id/progress` | `{"id":..,"progress":..}` |
//! | `GET`  | `/areas/:id/progress` | `{"id":..,"progress":..}` |

use axum::{
  Json,
  extract::{Path, Query, State},
  response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use okr_core::{
  progress::{area_objective_progress, life_objective_progress},
  store::ObjectiveStore,
  summary::summarize,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError, objectives::require};

// ─── Dashboard ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
  /// Evaluate as of this instant instead of now.
  pub now: Option<DateTime<Utc>>,
}

/// `GET /summary[?now=<rfc3339>]`
pub async fn dashboard<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<SummaryParams>,
) -> Result<Response, ApiError>
where
  S: ObjectiveStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let lives = state
    .store
    .list_life_objectives()
    .await
    .map_err(ApiError::store)?;

  let now = params
    .now
    .unwrap_or_else(Utc::now)
    .with_timezone(&state.timezone);
  Ok(Json(summarize(&lives, &now)).into_response())
}

// ─── Progress ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Progress {
  pub id:       Uuid,
  pub progress: f64,
}

/// `GET /objectives/:id/progress`
pub async fn life_progress<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Progress>, ApiError>
where
  S: ObjectiveStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let life = require(&state, id).await?;
  Ok(Json(Progress { id, progress: life_objective_progress(&life) }))
}

/// `GET /areas/:id/progress`
pub async fn area_progress<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Progress>, ApiError>
where
  S: ObjectiveStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let area = state
    .store
    .get_area_objective(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("area objective {id} not found")))?;
  Ok(Json(Progress { id, progress: area_objective_progress(&area) }))
}
