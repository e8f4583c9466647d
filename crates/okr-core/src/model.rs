//! The goal tree: Life Objectives own Area Objectives, which own Key Results.
//!
//! Only Key Results carry numbers. Everything the dashboard shows about the
//! upper levels is derived from them on read (see [`crate::progress`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use uuid::Uuid;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// How often the owner intends to check in on a Key Result.
///
/// Purely descriptive; it never changes how progress is computed.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrackingFrequency {
  #[default]
  Once,
  Daily,
  Weekly,
  Monthly,
  Quarterly,
  Annually,
}

/// The scope an Area Objective is pursued at. Display-only.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AreaLevel {
  Company,
  Team,
  Individual,
  #[default]
  Personal,
}

// ─── Key Result ──────────────────────────────────────────────────────────────

/// Checklist counters attached to a Key Result for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubTasks {
  pub completed: u32,
  pub total:     u32,
}

/// A measurable metric tracked against a target value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResult {
  pub id:                 Uuid,
  pub title:              String,
  pub current_value:      f64,
  /// May be zero; see [`crate::progress::key_result_progress`].
  pub target_value:       f64,
  /// Free-text label such as `"minutes"` or `"%"`.
  pub unit:               String,
  pub tracking_frequency: TrackingFrequency,
  /// Refreshed whenever `current_value` changes.
  pub last_updated:       DateTime<Utc>,
  /// Key Results without a target date never show up in deadline views.
  pub target_date:        Option<DateTime<Utc>>,
  #[serde(default)]
  pub tags:               Vec<String>,
  #[serde(default)]
  pub assignees:          Vec<String>,
  #[serde(default)]
  pub sub_tasks:          Option<SubTasks>,
}

// ─── Area Objective ──────────────────────────────────────────────────────────

/// A sub-goal within a Life Objective, e.g. "Physical Fitness".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaObjective {
  pub id:          Uuid,
  pub title:       String,
  pub description: Option<String>,
  pub level:       AreaLevel,
  pub icon:        Option<String>,
  /// Insertion order.
  #[serde(default)]
  pub key_results: Vec<KeyResult>,
}

// ─── Life Objective ──────────────────────────────────────────────────────────

/// A top-level personal goal domain, e.g. "Health".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeObjective {
  pub id:              Uuid,
  pub title:           String,
  pub description:     Option<String>,
  pub icon:            Option<String>,
  #[serde(default)]
  pub area_objectives: Vec<AreaObjective>,
}

impl LifeObjective {
  /// Every Key Result under this objective, paired with its Area Objective.
  pub fn key_results(&self) -> impl Iterator<Item = (&AreaObjective, &KeyResult)> {
    self
      .area_objectives
      .iter()
      .flat_map(|area| area.key_results.iter().map(move |kr| (area, kr)))
  }
}

// ─── Flattened view ──────────────────────────────────────────────────────────

/// A Key Result lifted out of the tree, annotated with its parents' titles.
///
/// Produced for flat listings such as the per-day deadline columns. The
/// parent titles are context only and are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyResultInContext<'a> {
  #[serde(flatten)]
  pub key_result:                  &'a KeyResult,
  pub parent_area_objective_title: &'a str,
  pub parent_life_objective_title: &'a str,
}

impl<'a> KeyResultInContext<'a> {
  pub fn new(
    life: &'a LifeObjective,
    area: &'a AreaObjective,
    key_result: &'a KeyResult,
  ) -> Self {
    Self {
      key_result,
      parent_area_objective_title: &area.title,
      parent_life_objective_title: &life.title,
    }
  }
}

/// Walk the whole forest, yielding each Key Result with its parent context.
pub fn flatten(
  lives: &[LifeObjective],
) -> impl Iterator<Item = KeyResultInContext<'_>> {
  lives.iter().flat_map(|life| {
    life
      .key_results()
      .map(move |(area, kr)| KeyResultInContext::new(life, area, kr))
  })
}
