//! Example objectives for a fresh store.
//!
//! Target dates are placed relative to the moment of seeding so the dashboard
//! has something in each of its day columns right away.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use okr_core::{
  draft::{AreaObjectiveDraft, KeyResultDraft, LifeObjectiveDraft},
  model::{AreaLevel, SubTasks, TrackingFrequency},
  store::ObjectiveStore,
};
use okr_store_sqlite::SqliteStore;

use crate::{Error, Result};

// ─── Relative dates ───────────────────────────────────────────────────────────

/// Target dates derived from the seeding instant, in the configured zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedDates {
  pub today:              DateTime<Utc>,
  pub tomorrow:           DateTime<Utc>,
  pub day_after_tomorrow: DateTime<Utc>,
  pub end_of_week:        DateTime<Utc>,
  pub end_of_month:       DateTime<Utc>,
  pub end_of_quarter:     DateTime<Utc>,
  pub end_of_year:        DateTime<Utc>,
}

impl SeedDates {
  pub fn new<Tz: TimeZone>(now: &DateTime<Tz>) -> Result<Self> {
    let tz = now.timezone();
    let today = now.date_naive();
    let out_of_range = || Error::SeedDate(today);

    let start_of = |day: NaiveDate| local(&tz, day, NaiveTime::default());
    let end_of = |day: NaiveDate| {
      let time = NaiveTime::from_hms_opt(23, 59, 59).ok_or_else(out_of_range)?;
      Ok::<_, Error>(local(&tz, day, time))
    };
    let add_days = |n: u64| today.checked_add_days(Days::new(n)).ok_or_else(out_of_range);

    // Weeks end on Sunday; on a Sunday that is today.
    let to_sunday = u64::from(6 - today.weekday().num_days_from_monday());
    let month_index = today.month0();
    let to_quarter_end = 2 - month_index % 3;

    Ok(Self {
      today:              start_of(today),
      tomorrow:           start_of(add_days(1)?),
      day_after_tomorrow: start_of(add_days(2)?),
      end_of_week:        end_of(add_days(to_sunday)?)?,
      end_of_month:       end_of(last_day_of_month(today, 0).ok_or_else(out_of_range)?)?,
      end_of_quarter:     end_of(
        last_day_of_month(today, to_quarter_end).ok_or_else(out_of_range)?,
      )?,
      end_of_year:        end_of(
        NaiveDate::from_ymd_opt(today.year(), 12, 31).ok_or_else(out_of_range)?,
      )?,
    })
  }
}

/// Last day of the month `months_ahead` months after the one `day` is in.
fn last_day_of_month(day: NaiveDate, months_ahead: u32) -> Option<NaiveDate> {
  day
    .with_day(1)?
    .checked_add_months(Months::new(months_ahead + 1))?
    .pred_opt()
}

/// Resolve a wall-clock time in `tz` to UTC. Gaps fall back to reading the
/// time as UTC.
fn local<Tz: TimeZone>(tz: &Tz, day: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
  let naive = day.and_time(time);
  tz.from_local_datetime(&naive)
    .earliest()
    .map(|dt| dt.with_timezone(&Utc))
    .unwrap_or_else(|| naive.and_utc())
}

// ─── Drafts ───────────────────────────────────────────────────────────────────

fn kr(
  title: &str,
  current: f64,
  target: f64,
  unit: &str,
  frequency: TrackingFrequency,
  due: DateTime<Utc>,
  tags: &[&str],
) -> KeyResultDraft {
  KeyResultDraft {
    id:                 None,
    title:              title.to_string(),
    target_value:       target,
    unit:               unit.to_string(),
    tracking_frequency: frequency,
    target_date:        Some(due),
    current_value:      Some(current),
    tags:               tags.iter().map(|t| t.to_string()).collect(),
    assignees:          Vec::new(),
    sub_tasks:          None,
  }
}

fn area(
  title: &str,
  level: AreaLevel,
  icon: &str,
  key_results: Vec<KeyResultDraft>,
) -> AreaObjectiveDraft {
  AreaObjectiveDraft {
    id: None,
    title: title.to_string(),
    description: None,
    level,
    icon: Some(icon.to_string()),
    key_results,
  }
}

/// The example forest. Current values are carried on the drafts and applied
/// after creation.
pub fn example_drafts(d: &SeedDates) -> Vec<LifeObjectiveDraft> {
  use TrackingFrequency::*;

  let mut exercise = kr(
    "Exercise 150 minutes a week",
    100.0,
    150.0,
    "minutes",
    Weekly,
    d.end_of_week,
    &["exercise"],
  );
  exercise.sub_tasks = Some(SubTasks { completed: 2, total: 3 });

  vec![
    LifeObjectiveDraft {
      title:           "Holistic wellbeing".to_string(),
      description:     Some("Look after body and mind.".to_string()),
      icon:            Some("heart".to_string()),
      area_objectives: vec![
        area("Physical health", AreaLevel::Personal, "activity", vec![
          exercise,
          kr(
            "Sleep seven hours a night",
            180.0,
            210.0,
            "hours",
            Daily,
            d.end_of_month,
            &["rest"],
          ),
        ]),
        area("Mental health", AreaLevel::Personal, "smile", vec![
          kr(
            "Meditate ten minutes",
            15.0,
            20.0,
            "sessions",
            Daily,
            d.end_of_month,
            &["mindfulness"],
          ),
          kr(
            "Limit news to 30 minutes",
            1.0,
            1.0,
            "day",
            Daily,
            d.today,
            &["digital"],
          ),
        ]),
      ],
    },
    LifeObjectiveDraft {
      title:           "Career growth".to_string(),
      description:     Some("Keep learning and meeting people.".to_string()),
      icon:            Some("briefcase".to_string()),
      area_objectives: vec![
        area("Applied machine learning", AreaLevel::Individual, "zap", vec![
          kr(
            "Finish the advanced course",
            7.0,
            10.0,
            "modules",
            Monthly,
            d.end_of_quarter,
            &["training"],
          ),
          kr(
            "Ship one practical project",
            0.0,
            1.0,
            "project",
            Quarterly,
            d.end_of_quarter,
            &["practice"],
          ),
        ]),
        area("Professional network", AreaLevel::Individual, "users", vec![
          kr(
            "Call two friends in the field",
            0.0,
            1.0,
            "weekly goal",
            Weekly,
            d.tomorrow,
            &["network"],
          ),
        ]),
      ],
    },
    LifeObjectiveDraft {
      title:           "Solid personal finances".to_string(),
      description:     None,
      icon:            Some("landmark".to_string()),
      area_objectives: vec![
        area("Savings and investment", AreaLevel::Personal, "dollar-sign", vec![
          kr(
            "Save 20% of net income",
            18.0,
            20.0,
            "%",
            Monthly,
            d.end_of_month,
            &["savings"],
          ),
          kr(
            "Grow the portfolio 10%",
            3.0,
            10.0,
            "%",
            Annually,
            d.end_of_year,
            &["investment"],
          ),
          kr(
            "Three-month emergency fund",
            2.5,
            3.0,
            "months",
            Once,
            d.today,
            &["emergency"],
          ),
        ]),
        area("Budget", AreaLevel::Personal, "home", vec![
          kr(
            "Weekly budget review",
            0.0,
            1.0,
            "review",
            Weekly,
            d.day_after_tomorrow,
            &["control"],
          ),
        ]),
      ],
    },
  ]
}

// ─── Seeding ──────────────────────────────────────────────────────────────────

/// Insert the example forest if `store` holds nothing yet.
///
/// Returns the number of Life Objectives inserted.
pub async fn seed_if_empty<Tz: TimeZone>(
  store: &SqliteStore,
  now: &DateTime<Tz>,
) -> Result<usize> {
  if !store.is_empty().await? {
    return Ok(0);
  }

  let drafts = example_drafts(&SeedDates::new(now)?);
  let count = drafts.len();
  for draft in drafts {
    let values: Vec<Option<f64>> = draft
      .area_objectives
      .iter()
      .flat_map(|a| a.key_results.iter().map(|kr| kr.current_value))
      .collect();

    let life = store.create_life_objective(draft).await?;
    let ids: Vec<_> = life.key_results().map(|(_, kr)| kr.id).collect();
    for (id, value) in ids.into_iter().zip(values) {
      if let Some(value) = value.filter(|v| *v > 0.0) {
        store.set_key_result_value(id, value).await?;
      }
    }
    tracing::info!(title = %life.title, "seeded example objective");
  }
  Ok(count)
}

#[cfg(test)]
mod tests {
  use chrono::Weekday;
  use okr_core::summary::summarize;

  use super::*;

  fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
  }

  fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

  #[test]
  fn dates_midweek() {
    // Wednesday 15 May 2024.
    let d = SeedDates::new(&utc(2024, 5, 15, 9)).unwrap();
    assert_eq!(d.today, utc(2024, 5, 15, 0));
    assert_eq!(d.tomorrow.date_naive(), date(2024, 5, 16));
    assert_eq!(d.day_after_tomorrow.date_naive(), date(2024, 5, 17));
    assert_eq!(d.end_of_week.date_naive(), date(2024, 5, 19));
    assert_eq!(d.end_of_week.weekday(), Weekday::Sun);
    assert_eq!(d.end_of_month.date_naive(), date(2024, 5, 31));
    assert_eq!(d.end_of_quarter.date_naive(), date(2024, 6, 30));
    assert_eq!(d.end_of_year.date_naive(), date(2024, 12, 31));
  }

  #[test]
  fn dates_at_period_ends() {
    // Sunday 31 March 2024: week, month and quarter all end today.
    let d = SeedDates::new(&utc(2024, 3, 31, 9)).unwrap();
    assert_eq!(d.end_of_week.date_naive(), date(2024, 3, 31));
    assert_eq!(d.end_of_month.date_naive(), date(2024, 3, 31));
    assert_eq!(d.end_of_quarter.date_naive(), date(2024, 3, 31));
    assert_eq!(d.tomorrow.date_naive(), date(2024, 4, 1));
  }

  #[test]
  fn dates_follow_the_zone() {
    // 23:00 UTC on 15 May is already 16 May in Madrid.
    let now = utc(2024, 5, 15, 23).with_timezone(&chrono_tz::Europe::Madrid);
    let d = SeedDates::new(&now).unwrap();
    assert_eq!(d.today, utc(2024, 5, 15, 22));
  }

  #[tokio::test]
  async fn seeds_once_and_fills_day_columns() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let now = utc(2024, 5, 15, 9);

    assert_eq!(seed_if_empty(&store, &now).await.unwrap(), 3);
    assert_eq!(seed_if_empty(&store, &now).await.unwrap(), 0);

    let lives = store.list_life_objectives().await.unwrap();
    assert_eq!(lives.len(), 3);

    let dashboard = summarize(&lives, &now);
    // "Limit news" is due today but already complete.
    assert_eq!(dashboard.deadlines.today.len(), 1);
    assert_eq!(dashboard.deadlines.today[0].key_result.title, "Three-month emergency fund");
    assert_eq!(dashboard.deadlines.tomorrow.len(), 1);
    assert_eq!(dashboard.deadlines.day_after_tomorrow.len(), 1);
    assert_eq!(dashboard.summary.total_key_results, 11);
    assert_eq!(dashboard.summary.completed_count, 1);
    assert_eq!(dashboard.summary.next_deadline_days, Some(0));
  }
}
