//! Progress roll-up from Key Results to Area and Life Objectives.
//!
//! The roll-up is a two-level unweighted mean: each Key Result counts equally
//! within its Area Objective, and each non-empty Area Objective counts equally
//! within its Life Objective, regardless of how many Key Results it holds.

use crate::model::{AreaObjective, KeyResult, LifeObjective};

/// Completion percentage of a single Key Result, always within `[0, 100]`.
///
/// A zero (or negative) target is all-or-nothing: any positive current value
/// counts as fully achieved.
pub fn key_result_progress(kr: &KeyResult) -> f64 {
  let pct = if kr.target_value > 0.0 {
    kr.current_value / kr.target_value * 100.0
  } else if kr.current_value > 0.0 {
    100.0
  } else {
    0.0
  };

  if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 100.0) }
}

/// Mean progress of an Area Objective's Key Results; `0` when it has none.
pub fn area_objective_progress(area: &AreaObjective) -> f64 {
  mean(area.key_results.iter().map(key_result_progress)).unwrap_or(0.0)
}

/// Mean progress of the Area Objectives that have at least one Key Result.
///
/// Empty Area Objectives are left out of the average entirely.
pub fn life_objective_progress(life: &LifeObjective) -> f64 {
  mean(
    life
      .area_objectives
      .iter()
      .filter(|area| !area.key_results.is_empty())
      .map(area_objective_progress),
  )
  .unwrap_or(0.0)
}

/// Arithmetic mean, or `None` for an empty sequence.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
  let (sum, count) = values
    .into_iter()
    .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
  (count > 0).then(|| sum / count as f64)
}
