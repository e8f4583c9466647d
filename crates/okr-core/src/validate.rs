//! Input and tree validation.
//!
//! The progress engine assumes a well-formed tree and never checks it. These
//! functions are for the layers that accept user input or read persisted
//! data, so bad values are rejected before they reach the engine.

use std::collections::HashSet;

use crate::{
  Error, Result,
  draft::{AreaObjectiveDraft, KeyResultDraft, LifeObjectiveDraft},
  model::LifeObjective,
};

/// Check a create/edit draft: required titles and units are present, all
/// numbers are finite and non-negative, and no child id is given twice.
pub fn life_objective_draft(draft: &LifeObjectiveDraft) -> Result<()> {
  required("life objective title", &draft.title)?;
  for area in &draft.area_objectives {
    area_objective_draft(area)?;
  }

  let mut seen = HashSet::new();
  let ids = draft.area_objectives.iter().flat_map(|area| {
    std::iter::once(area.id).chain(area.key_results.iter().map(|kr| kr.id))
  });
  for id in ids.flatten() {
    if !seen.insert(id) {
      return Err(Error::DuplicateId(id));
    }
  }
  Ok(())
}

fn area_objective_draft(draft: &AreaObjectiveDraft) -> Result<()> {
  required("area objective title", &draft.title)?;
  for kr in &draft.key_results {
    key_result_draft(kr)?;
  }
  Ok(())
}

fn key_result_draft(draft: &KeyResultDraft) -> Result<()> {
  required("key result title", &draft.title)?;
  required("key result unit", &draft.unit)?;
  non_negative("target_value", draft.target_value)?;
  if let Some(current) = draft.current_value {
    non_negative("current_value", current)?;
  }
  Ok(())
}

/// Check a new current value for a Key Result.
pub fn current_value(value: f64) -> Result<()> { non_negative("current_value", value) }

/// Check a whole forest: every id is unique across all three levels and all
/// Key Result values are finite and non-negative.
pub fn forest(lives: &[LifeObjective]) -> Result<()> {
  let mut seen = HashSet::new();
  let mut unique = |id| {
    if seen.insert(id) { Ok(()) } else { Err(Error::DuplicateId(id)) }
  };

  for life in lives {
    unique(life.id)?;
    for area in &life.area_objectives {
      unique(area.id)?;
      for kr in &area.key_results {
        unique(kr.id)?;
        non_negative("current_value", kr.current_value)?;
        non_negative("target_value", kr.target_value)?;
      }
    }
  }
  Ok(())
}

fn required(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::invalid(field, "must not be empty"));
  }
  Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<()> {
  if !value.is_finite() {
    return Err(Error::invalid(field, "must be a finite number"));
  }
  if value < 0.0 {
    return Err(Error::invalid(field, "must not be negative"));
  }
  Ok(())
}
