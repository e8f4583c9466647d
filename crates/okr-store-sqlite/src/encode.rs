//! Encoding and decoding helpers between the goal tree and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Enumerations use their
//! lowercase strum names. Tags, assignees and sub-task counters are stored as
//! compact JSON. UUIDs are stored as hyphenated lowercase strings.

use std::{collections::HashMap, str::FromStr};

use chrono::{DateTime, Utc};
use okr_core::model::{AreaObjective, KeyResult, LifeObjective, SubTasks};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enumerations ────────────────────────────────────────────────────────────

pub fn encode_enum<T: Into<&'static str>>(value: T) -> &'static str { value.into() }

pub fn decode_enum<T: FromStr>(kind: &'static str, s: &str) -> Result<T> {
  s.parse().map_err(|_| Error::UnknownVariant {
    kind,
    value: s.to_owned(),
  })
}

// ─── JSON columns ────────────────────────────────────────────────────────────

pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
  Ok(serde_json::to_string(value)?)
}

pub fn decode_json<T: DeserializeOwned>(s: &str) -> Result<T> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings for a `life_objectives` row.
pub struct RawLifeObjective {
  pub id:          String,
  pub title:       String,
  pub description: Option<String>,
  pub icon:        Option<String>,
}

impl RawLifeObjective {
  pub const COLUMNS: &'static str = "life_objective_id, title, description, icon";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      title:       row.get(1)?,
      description: row.get(2)?,
      icon:        row.get(3)?,
    })
  }

  pub fn encode(life: &LifeObjective) -> Self {
    Self {
      id:          encode_uuid(life.id),
      title:       life.title.clone(),
      description: life.description.clone(),
      icon:        life.icon.clone(),
    }
  }
}

/// Raw strings for an `area_objectives` row.
pub struct RawAreaObjective {
  pub id:          String,
  pub life_id:     String,
  pub position:    i64,
  pub title:       String,
  pub description: Option<String>,
  pub level:       String,
  pub icon:        Option<String>,
}

impl RawAreaObjective {
  pub const COLUMNS: &'static str =
    "area_objective_id, life_objective_id, position, title, description, level, icon";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      life_id:     row.get(1)?,
      position:    row.get(2)?,
      title:       row.get(3)?,
      description: row.get(4)?,
      level:       row.get(5)?,
      icon:        row.get(6)?,
    })
  }

  pub fn encode(area: &AreaObjective, life_id: Uuid, position: usize) -> Self {
    Self {
      id:          encode_uuid(area.id),
      life_id:     encode_uuid(life_id),
      position:    position as i64,
      title:       area.title.clone(),
      description: area.description.clone(),
      level:       encode_enum(area.level).to_owned(),
      icon:        area.icon.clone(),
    }
  }

  /// Decode the row; Key Results are attached by [`assemble`].
  pub fn into_area_objective(self) -> Result<AreaObjective> {
    Ok(AreaObjective {
      id:          decode_uuid(&self.id)?,
      title:       self.title,
      description: self.description,
      level:       decode_enum("area level", &self.level)?,
      icon:        self.icon,
      key_results: Vec::new(),
    })
  }
}

/// Raw strings for a `key_results` row.
pub struct RawKeyResult {
  pub id:                 String,
  pub area_id:            String,
  pub position:           i64,
  pub title:              String,
  pub current_value:      f64,
  pub target_value:       f64,
  pub unit:               String,
  pub tracking_frequency: String,
  pub last_updated:       String,
  pub target_date:        Option<String>,
  pub tags:               String,
  pub assignees:          String,
  pub sub_tasks:          Option<String>,
}

impl RawKeyResult {
  pub const COLUMNS: &'static str = "key_result_id, area_objective_id, position, \
     title, current_value, target_value, unit, tracking_frequency, \
     last_updated, target_date, tags, assignees, sub_tasks";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                 row.get(0)?,
      area_id:            row.get(1)?,
      position:           row.get(2)?,
      title:              row.get(3)?,
      current_value:      row.get(4)?,
      target_value:       row.get(5)?,
      unit:               row.get(6)?,
      tracking_frequency: row.get(7)?,
      last_updated:       row.get(8)?,
      target_date:        row.get(9)?,
      tags:               row.get(10)?,
      assignees:          row.get(11)?,
      sub_tasks:          row.get(12)?,
    })
  }

  pub fn encode(kr: &KeyResult, area_id: Uuid, position: usize) -> Result<Self> {
    Ok(Self {
      id:                 encode_uuid(kr.id),
      area_id:            encode_uuid(area_id),
      position:           position as i64,
      title:              kr.title.clone(),
      current_value:      kr.current_value,
      target_value:       kr.target_value,
      unit:               kr.unit.clone(),
      tracking_frequency: encode_enum(kr.tracking_frequency).to_owned(),
      last_updated:       encode_dt(kr.last_updated),
      target_date:        kr.target_date.map(encode_dt),
      tags:               encode_json(&kr.tags)?,
      assignees:          encode_json(&kr.assignees)?,
      sub_tasks:          kr.sub_tasks.as_ref().map(encode_json).transpose()?,
    })
  }

  pub fn into_key_result(self) -> Result<KeyResult> {
    Ok(KeyResult {
      id:                 decode_uuid(&self.id)?,
      title:              self.title,
      current_value:      self.current_value,
      target_value:       self.target_value,
      unit:               self.unit,
      tracking_frequency: decode_enum("tracking frequency", &self.tracking_frequency)?,
      last_updated:       decode_dt(&self.last_updated)?,
      target_date:        self.target_date.as_deref().map(decode_dt).transpose()?,
      tags:               decode_json(&self.tags)?,
      assignees:          decode_json(&self.assignees)?,
      sub_tasks:          self
        .sub_tasks
        .as_deref()
        .map(decode_json::<SubTasks>)
        .transpose()?,
    })
  }
}

// ─── Trees ───────────────────────────────────────────────────────────────────

/// Every row needed to persist one Life Objective tree.
pub struct RawTree {
  pub life:            RawLifeObjective,
  pub area_objectives: Vec<RawAreaObjective>,
  pub key_results:     Vec<RawKeyResult>,
}

impl RawTree {
  pub fn encode(life: &LifeObjective) -> Result<Self> {
    let mut area_objectives = Vec::with_capacity(life.area_objectives.len());
    let mut key_results = Vec::new();
    for (a, area) in life.area_objectives.iter().enumerate() {
      area_objectives.push(RawAreaObjective::encode(area, life.id, a));
      for (k, kr) in area.key_results.iter().enumerate() {
        key_results.push(RawKeyResult::encode(kr, area.id, k)?);
      }
    }
    Ok(Self {
      life: RawLifeObjective::encode(life),
      area_objectives,
      key_results,
    })
  }
}

/// Rebuild trees from flat rows.
///
/// `lives` keeps its order. Children must already be sorted by `position`;
/// rows whose parent is absent from the input are dropped.
pub fn assemble(
  lives: Vec<RawLifeObjective>,
  areas: Vec<RawAreaObjective>,
  key_results: Vec<RawKeyResult>,
) -> Result<Vec<LifeObjective>> {
  let mut krs_by_area: HashMap<String, Vec<KeyResult>> = HashMap::new();
  for raw in key_results {
    let area_id = raw.area_id.clone();
    krs_by_area
      .entry(area_id)
      .or_default()
      .push(raw.into_key_result()?);
  }

  let mut areas_by_life: HashMap<String, Vec<AreaObjective>> = HashMap::new();
  for raw in areas {
    let life_id = raw.life_id.clone();
    let area_id = raw.id.clone();
    let mut area = raw.into_area_objective()?;
    area.key_results = krs_by_area.remove(&area_id).unwrap_or_default();
    areas_by_life.entry(life_id).or_default().push(area);
  }

  lives
    .into_iter()
    .map(|raw| -> Result<LifeObjective> {
      Ok(LifeObjective {
        id:              decode_uuid(&raw.id)?,
        area_objectives: areas_by_life.remove(&raw.id).unwrap_or_default(),
        title:           raw.title,
        description:     raw.description,
        icon:            raw.icon,
      })
    })
    .collect()
}
