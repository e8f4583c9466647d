//! Handlers for `/key-results` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/key-results/:id` | The Key Result plus its progress report |
//! | `PUT`  | `/key-results/:id/value` | Body: `{"current_value": 12.5}` |

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::Utc;
use okr_core::{
  model::KeyResult,
  store::ObjectiveStore,
  summary::KeyResultReport,
  validate,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// A Key Result together with how it stands right now.
#[derive(Debug, Serialize)]
pub struct KeyResultView {
  pub key_result: KeyResult,
  pub report:     KeyResultReport,
}

impl KeyResultView {
  fn new<S: ObjectiveStore>(state: &ApiState<S>, key_result: KeyResult) -> Self {
    let now = Utc::now().with_timezone(&state.timezone);
    let report = KeyResultReport::new(&key_result, &now);
    Self { key_result, report }
  }
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /key-results/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<KeyResultView>, ApiError>
where
  S: ObjectiveStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let kr = require(&state, id).await?;
  Ok(Json(KeyResultView::new(&state, kr)))
}

// ─── Update value ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetValueBody {
  pub current_value: f64,
}

/// `PUT /key-results/:id/value`
pub async fn set_value<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<SetValueBody>,
) -> Result<Json<KeyResultView>, ApiError>
where
  S: ObjectiveStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  validate::current_value(body.current_value)?;
  require(&state, id).await?;

  let kr = state
    .store
    .set_key_result_value(id, body.current_value)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(%id, value = body.current_value, "key result value recorded");
  Ok(Json(KeyResultView::new(&state, kr)))
}

async fn require<S>(state: &ApiState<S>, id: Uuid) -> Result<KeyResult, ApiError>
where
  S: ObjectiveStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .get_key_result(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("key result {id} not found")))
}
