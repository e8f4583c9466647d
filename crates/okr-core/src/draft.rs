//! Create/edit inputs for a Life Objective tree.
//!
//! A draft is what a form submits: titles, targets and metadata, but no
//! server-assigned state. Turning a draft into entities is where ids are
//! minted, `last_updated` is stamped and, on edit, existing ids and progress
//! are carried over.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{
  AreaLevel, AreaObjective, KeyResult, LifeObjective, SubTasks, TrackingFrequency,
};

/// Icon assigned when a draft leaves it out.
pub const DEFAULT_ICON: &str = "target";

// ─── Draft types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResultDraft {
  /// Set when editing an existing Key Result.
  #[serde(default)]
  pub id:                 Option<Uuid>,
  pub title:              String,
  pub target_value:       f64,
  pub unit:               String,
  #[serde(default)]
  pub tracking_frequency: TrackingFrequency,
  #[serde(default)]
  pub target_date:        Option<DateTime<Utc>>,
  /// Ignored on create. On edit, `None` keeps the stored value.
  #[serde(default)]
  pub current_value:      Option<f64>,
  #[serde(default)]
  pub tags:               Vec<String>,
  #[serde(default)]
  pub assignees:          Vec<String>,
  #[serde(default)]
  pub sub_tasks:          Option<SubTasks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaObjectiveDraft {
  #[serde(default)]
  pub id:          Option<Uuid>,
  pub title:       String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub level:       AreaLevel,
  #[serde(default)]
  pub icon:        Option<String>,
  #[serde(default)]
  pub key_results: Vec<KeyResultDraft>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeObjectiveDraft {
  pub title:           String,
  #[serde(default)]
  pub description:     Option<String>,
  #[serde(default)]
  pub icon:            Option<String>,
  #[serde(default)]
  pub area_objectives: Vec<AreaObjectiveDraft>,
}

// ─── Create ──────────────────────────────────────────────────────────────────

impl LifeObjectiveDraft {
  /// Build a brand-new tree. Every entity gets a fresh id and every Key
  /// Result starts at zero progress.
  pub fn into_new(self, now: DateTime<Utc>) -> LifeObjective {
    LifeObjective {
      id:              Uuid::new_v4(),
      title:           self.title,
      description:     self.description,
      icon:            Some(self.icon.unwrap_or_else(default_icon)),
      area_objectives: self
        .area_objectives
        .into_iter()
        .map(|area| area.build(Uuid::new_v4(), |kr| kr.build(Uuid::new_v4(), 0.0, now)))
        .collect(),
    }
  }

  /// Apply an edit on top of `existing`.
  ///
  /// The Life Objective keeps its id. Area Objectives and Key Results whose
  /// draft id matches one already in `existing` keep that id; any other
  /// child is treated as new. Key Results keep their stored current value
  /// unless the draft supplies one, and all of them are stamped with `now`.
  pub fn merge_into(self, existing: &LifeObjective, now: DateTime<Utc>) -> LifeObjective {
    let known_areas: Vec<Uuid> =
      existing.area_objectives.iter().map(|a| a.id).collect();
    let known_krs: HashMap<Uuid, f64> = existing
      .key_results()
      .map(|(_, kr)| (kr.id, kr.current_value))
      .collect();

    LifeObjective {
      id:              existing.id,
      title:           self.title,
      description:     self.description,
      icon:            Some(self.icon.unwrap_or_else(default_icon)),
      area_objectives: self
        .area_objectives
        .into_iter()
        .map(|area| {
          let area_id = area
            .id
            .filter(|id| known_areas.contains(id))
            .unwrap_or_else(Uuid::new_v4);
          area.build(area_id, |kr| {
            let stored = kr.id.and_then(|id| known_krs.get(&id).map(|v| (id, *v)));
            let (kr_id, stored_value) = match stored {
              Some((id, value)) => (id, value),
              None => (Uuid::new_v4(), 0.0),
            };
            let current = kr.current_value.unwrap_or(stored_value);
            kr.build(kr_id, current, now)
          })
        })
        .collect(),
    }
  }
}

impl AreaObjectiveDraft {
  fn build(
    self,
    id: Uuid,
    mut key_result: impl FnMut(KeyResultDraft) -> KeyResult,
  ) -> AreaObjective {
    AreaObjective {
      id,
      title: self.title,
      description: self.description,
      level: self.level,
      icon: Some(self.icon.unwrap_or_else(default_icon)),
      key_results: self.key_results.into_iter().map(&mut key_result).collect(),
    }
  }
}

impl KeyResultDraft {
  fn build(self, id: Uuid, current_value: f64, now: DateTime<Utc>) -> KeyResult {
    KeyResult {
      id,
      title: self.title,
      current_value,
      target_value: self.target_value,
      unit: self.unit,
      tracking_frequency: self.tracking_frequency,
      last_updated: now,
      target_date: self.target_date,
      tags: self.tags,
      assignees: self.assignees,
      sub_tasks: self.sub_tasks,
    }
  }
}

fn default_icon() -> String { DEFAULT_ICON.to_owned() }
