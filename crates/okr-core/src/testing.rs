//! Builders shared by the unit tests in this crate.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::{
  draft::{AreaObjectiveDraft, KeyResultDraft, LifeObjectiveDraft},
  model::{AreaLevel, AreaObjective, KeyResult, LifeObjective, TrackingFrequency},
};

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn kr(current_value: f64, target_value: f64) -> KeyResult {
  KeyResult {
    id: Uuid::new_v4(),
    title: format!("{current_value}/{target_value}"),
    current_value,
    target_value,
    unit: "units".into(),
    tracking_frequency: TrackingFrequency::Weekly,
    last_updated: utc(2024, 1, 1, 0, 0),
    target_date: None,
    tags: Vec::new(),
    assignees: Vec::new(),
    sub_tasks: None,
  }
}

pub fn kr_due(
  current_value: f64,
  target_value: f64,
  target_date: DateTime<Utc>,
) -> KeyResult {
  KeyResult { target_date: Some(target_date), ..kr(current_value, target_value) }
}

pub fn area(key_results: Vec<KeyResult>) -> AreaObjective {
  AreaObjective {
    id: Uuid::new_v4(),
    title: "Area".into(),
    description: None,
    level: AreaLevel::Personal,
    icon: None,
    key_results,
  }
}

pub fn life(area_objectives: Vec<AreaObjective>) -> LifeObjective {
  LifeObjective {
    id: Uuid::new_v4(),
    title: "Life".into(),
    description: None,
    icon: None,
    area_objectives,
  }
}

pub fn kr_draft(title: &str, target_value: f64) -> KeyResultDraft {
  KeyResultDraft {
    id: None,
    title: title.into(),
    target_value,
    unit: "sessions".into(),
    tracking_frequency: TrackingFrequency::Weekly,
    target_date: None,
    current_value: None,
    tags: vec!["health".into()],
    assignees: Vec::new(),
    sub_tasks: None,
  }
}

/// "Health" → "Fitness" → { "Run" (12), "Swim" (4) }.
pub fn life_draft() -> LifeObjectiveDraft {
  LifeObjectiveDraft {
    title: "Health".into(),
    description: None,
    icon: None,
    area_objectives: vec![AreaObjectiveDraft {
      id: None,
      title: "Fitness".into(),
      description: Some("Move more".into()),
      level: AreaLevel::Personal,
      icon: Some("activity".into()),
      key_results: vec![kr_draft("Run", 12.0), kr_draft("Swim", 4.0)],
    }],
  }
}
