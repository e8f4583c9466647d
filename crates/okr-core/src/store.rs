//! The `ObjectiveStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `okr-store-sqlite`).
//! Higher layers (`okr-api`, `okr-server`) depend on this abstraction, not on
//! any concrete backend. The progress engine itself never touches a store:
//! callers load the tree, then hand it to [`crate::summary::summarize`].

use std::future::Future;

use uuid::Uuid;

use crate::{
  draft::LifeObjectiveDraft,
  model::{AreaObjective, KeyResult, LifeObjective},
};

/// Abstraction over a goal-tree storage backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ObjectiveStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Life Objectives ───────────────────────────────────────────────────

  /// Validate and persist a new tree built from `draft`.
  fn create_life_objective(
    &self,
    draft: LifeObjectiveDraft,
  ) -> impl Future<Output = Result<LifeObjective, Self::Error>> + Send + '_;

  /// Replace the tree rooted at `id` with `draft` merged onto it.
  ///
  /// Children missing from the draft are deleted along with their
  /// descendants.
  fn update_life_objective(
    &self,
    id: Uuid,
    draft: LifeObjectiveDraft,
  ) -> impl Future<Output = Result<LifeObjective, Self::Error>> + Send + '_;

  /// Delete a Life Objective and everything beneath it.
  fn delete_life_objective(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a single tree. Returns `None` if not found.
  fn get_life_objective(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<LifeObjective>, Self::Error>> + Send + '_;

  /// The whole forest, most recently created first.
  fn list_life_objectives(
    &self,
  ) -> impl Future<Output = Result<Vec<LifeObjective>, Self::Error>> + Send + '_;

  // ── Children ──────────────────────────────────────────────────────────

  fn get_area_objective(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<AreaObjective>, Self::Error>> + Send + '_;

  fn get_key_result(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<KeyResult>, Self::Error>> + Send + '_;

  /// Record a new current value and refresh `last_updated`.
  fn set_key_result_value(
    &self,
    id: Uuid,
    current_value: f64,
  ) -> impl Future<Output = Result<KeyResult, Self::Error>> + Send + '_;
}
