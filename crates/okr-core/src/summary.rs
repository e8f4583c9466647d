//! Dashboard statistics computed from a whole forest of Life Objectives.
//!
//! [`summarize`] walks the tree exactly once and feeds every Key Result
//! through the progress calculator, the status classifier and the deadline
//! bucketizer. The day columns and the due-soon count come from the same
//! [`classify_deadline`] call, so they can never disagree.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;

use crate::{
  deadline::{Deadline, DayBucket, DeadlineUrgency, classify_deadline, is_overdue},
  model::{KeyResult, KeyResultInContext, LifeObjective, flatten},
  progress::key_result_progress,
  status::{Status, classify_status},
};

// ─── Output types ────────────────────────────────────────────────────────────

/// Aggregate counts and averages over the full tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
  pub total_key_results:           usize,
  pub completed_count:             usize,
  /// Progress in `[70, 100)`.
  pub on_track_count:              usize,
  /// Progress below 40.
  pub at_risk_count:               usize,
  /// Mean Key Result progress, skipping Key Results whose target and current
  /// values are both zero.
  pub overall_average_progress:    f64,
  pub active_life_objective_count: usize,
  pub active_area_objective_count: usize,
  /// Signed distance in days to the earliest incomplete target date.
  pub next_deadline_days:          Option<i64>,
  pub due_soon_count:              usize,
}

impl Summary {
  pub fn next_deadline_urgency(&self) -> Option<DeadlineUrgency> {
    self.next_deadline_days.map(DeadlineUrgency::from_days)
  }
}

/// Incomplete Key Results due in each of the next three days, in tree order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeadlineLists<'a> {
  pub today:              Vec<KeyResultInContext<'a>>,
  pub tomorrow:           Vec<KeyResultInContext<'a>>,
  pub day_after_tomorrow: Vec<KeyResultInContext<'a>>,
}

impl<'a> DeadlineLists<'a> {
  fn push(&mut self, bucket: DayBucket, item: KeyResultInContext<'a>) {
    match bucket {
      DayBucket::Today => self.today.push(item),
      DayBucket::Tomorrow => self.tomorrow.push(item),
      DayBucket::DayAfterTomorrow => self.day_after_tomorrow.push(item),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.today.is_empty()
      && self.tomorrow.is_empty()
      && self.day_after_tomorrow.is_empty()
  }
}

/// Everything the dashboard needs, computed against a single instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard<'a> {
  /// The calendar day every day-relative figure is measured from.
  pub today:     NaiveDate,
  pub summary:   Summary,
  pub deadlines: DeadlineLists<'a>,
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

/// Summarise `lives` as seen at `now`.
///
/// Never fails; an empty forest yields a zeroed summary with no next
/// deadline and empty day lists.
pub fn summarize<'a, Tz: TimeZone>(
  lives: &'a [LifeObjective],
  now: &DateTime<Tz>,
) -> Dashboard<'a> {
  let mut summary = Summary {
    active_life_objective_count: lives.len(),
    active_area_objective_count: lives
      .iter()
      .map(|life| life.area_objectives.len())
      .sum(),
    ..Summary::default()
  };
  let mut deadlines = DeadlineLists::default();

  let mut progress_sum = 0.0;
  let mut progress_count = 0usize;

  for item in flatten(lives) {
    let kr = item.key_result;
    let progress = key_result_progress(kr);

    summary.total_key_results += 1;
    match classify_status(progress) {
      Status::Completed => summary.completed_count += 1,
      Status::OnTrack => summary.on_track_count += 1,
      Status::AtRisk => summary.at_risk_count += 1,
      Status::Neutral => {}
    }

    if kr.target_value > 0.0 || kr.current_value > 0.0 {
      progress_sum += progress;
      progress_count += 1;
    }

    let Some(deadline) = classify_deadline(kr, now) else {
      continue;
    };

    summary.next_deadline_days = Some(match summary.next_deadline_days {
      Some(days) => days.min(deadline.days_until),
      None => deadline.days_until,
    });
    if deadline.due_soon {
      summary.due_soon_count += 1;
    }
    if let Some(bucket) = deadline.bucket {
      deadlines.push(bucket, item);
    }
  }

  if progress_count > 0 {
    summary.overall_average_progress = progress_sum / progress_count as f64;
  }

  Dashboard { today: now.date_naive(), summary, deadlines }
}

// ─── Per-item report ─────────────────────────────────────────────────────────

/// Progress, status and deadline standing of a single Key Result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyResultReport {
  pub progress: f64,
  pub status:   Status,
  pub overdue:  bool,
  pub deadline: Option<Deadline>,
}

impl KeyResultReport {
  pub fn new<Tz: TimeZone>(kr: &KeyResult, now: &DateTime<Tz>) -> Self {
    let progress = key_result_progress(kr);
    Self {
      progress,
      status: classify_status(progress),
      overdue: is_overdue(kr, now),
      deadline: classify_deadline(kr, now),
    }
  }
}
