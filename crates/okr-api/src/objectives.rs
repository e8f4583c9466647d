//! Handlers for `/objectives` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/objectives` | Whole forest, newest first |
//! | `POST`   | `/objectives` | Body: [`LifeObjectiveDraft`]; returns 201 + stored tree |
//! | `GET`    | `/objectives/:id` | 404 if not found |
//! | `PUT`    | `/objectives/:id` | Body: [`LifeObjectiveDraft`]; merges onto the stored tree |
//! | `DELETE` | `/objectives/:id` | 204; removes the whole tree |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use okr_core::{draft::LifeObjectiveDraft, model::LifeObjective, store::ObjectiveStore, validate};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /objectives`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<LifeObjective>>, ApiError>
where
  S: ObjectiveStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let lives = state
    .store
    .list_life_objectives()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(lives))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /objectives`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(draft): Json<LifeObjectiveDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ObjectiveStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  validate::life_objective_draft(&draft)?;

  let life = state
    .store
    .create_life_objective(draft)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = %life.id, title = %life.title, "life objective created");
  Ok((StatusCode::CREATED, Json(life)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /objectives/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<LifeObjective>, ApiError>
where
  S: ObjectiveStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(require(&state, id).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /objectives/:id`
///
/// Children carrying an `id` already in the tree keep it, along with their
/// recorded progress. Children missing from the body are deleted.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(draft): Json<LifeObjectiveDraft>,
) -> Result<Json<LifeObjective>, ApiError>
where
  S: ObjectiveStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  validate::life_objective_draft(&draft)?;
  require(&state, id).await?;

  let life = state
    .store
    .update_life_objective(id, draft)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(%id, "life objective updated");
  Ok(Json(life))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /objectives/:id`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ObjectiveStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require(&state, id).await?;
  state
    .store
    .delete_life_objective(id)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(%id, "life objective deleted");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

pub(crate) async fn require<S>(state: &ApiState<S>, id: Uuid) -> Result<LifeObjective, ApiError>
where
  S: ObjectiveStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .get_life_objective(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("life objective {id} not found")))
}
