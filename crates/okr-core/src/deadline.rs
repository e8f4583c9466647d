//! Time-relative bucketing of Key Result target dates.
//!
//! Every function takes the caller's notion of "now" and never reads the
//! clock. Day arithmetic happens on calendar dates in `now`'s own timezone:
//! a target instant is first converted into that zone, then truncated to its
//! date. Completed Key Results are never due, overdue, or the next deadline.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::{
  model::{KeyResult, LifeObjective, flatten},
  progress::key_result_progress,
};

/// Width of the "due soon" window in days, inclusive at both ends.
pub const DUE_SOON_DAYS: i64 = 7;

// ─── Buckets ─────────────────────────────────────────────────────────────────

/// The three near-term day columns.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DayBucket {
  Today,
  Tomorrow,
  DayAfterTomorrow,
}

impl DayBucket {
  pub fn from_days(days_until: i64) -> Option<Self> {
    match days_until {
      0 => Some(Self::Today),
      1 => Some(Self::Tomorrow),
      2 => Some(Self::DayAfterTomorrow),
      _ => None,
    }
  }
}

/// How pressing the next deadline is, as shown on the dashboard.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeadlineUrgency {
  Overdue,
  DueToday,
  /// One to six days out.
  Soon,
  Later,
}

impl DeadlineUrgency {
  pub fn from_days(days_until: i64) -> Self {
    match days_until {
      d if d < 0 => Self::Overdue,
      0 => Self::DueToday,
      d if d < DUE_SOON_DAYS => Self::Soon,
      _ => Self::Later,
    }
  }
}

// ─── Per-item classification ─────────────────────────────────────────────────

/// Where an incomplete Key Result's target date falls relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deadline {
  /// Target date truncated to a calendar day in `now`'s timezone.
  pub day:        NaiveDate,
  /// `day - today`; negative when overdue.
  pub days_until: i64,
  pub bucket:     Option<DayBucket>,
  /// `0 <= days_until <= 7`.
  pub due_soon:   bool,
}

/// Classify a Key Result's deadline against `now`.
///
/// Returns `None` when the Key Result has no target date or is already at
/// 100%.
pub fn classify_deadline<Tz: TimeZone>(
  kr: &KeyResult,
  now: &DateTime<Tz>,
) -> Option<Deadline> {
  let target = kr.target_date?;
  if key_result_progress(kr) >= 100.0 {
    return None;
  }

  let today = now.date_naive();
  let day = target.with_timezone(&now.timezone()).date_naive();
  let days_until = (day - today).num_days();

  Some(Deadline {
    day,
    days_until,
    bucket: DayBucket::from_days(days_until),
    due_soon: (0..=DUE_SOON_DAYS).contains(&days_until),
  })
}

/// The earliest target day among all incomplete Key Results in the forest.
pub fn earliest_deadline<Tz: TimeZone>(
  lives: &[LifeObjective],
  now: &DateTime<Tz>,
) -> Option<NaiveDate> {
  flatten(lives)
    .filter_map(|item| classify_deadline(item.key_result, now))
    .map(|deadline| deadline.day)
    .min()
}

/// Whether the target instant has strictly passed and the Key Result is
/// still incomplete.
///
/// Unlike the day buckets this compares instants, so a Key Result due
/// earlier today is already overdue.
pub fn is_overdue<Tz: TimeZone>(kr: &KeyResult, now: &DateTime<Tz>) -> bool {
  let now_utc = now.with_timezone(&Utc);
  kr.target_date.is_some_and(|target| target < now_utc)
    && key_result_progress(kr) < 100.0
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};
  use chrono_tz::Europe::Madrid;

  use super::*;
  use crate::testing::{area, kr, kr_due, life, utc};

  #[test]
  fn due_later_today_lands_in_today_bucket() {
    let now = utc(2024, 3, 10, 0, 0);
    let item = kr_due(1.0, 10.0, utc(2024, 3, 10, 23, 59));

    let d = classify_deadline(&item, &now).unwrap();
    assert_eq!(d.bucket, Some(DayBucket::Today));
    assert_eq!(d.days_until, 0);
    assert!(d.due_soon);
  }

  #[test]
  fn completed_item_is_never_bucketed() {
    let now = utc(2024, 3, 10, 0, 0);
    let item = kr_due(10.0, 10.0, utc(2024, 3, 10, 23, 59));
    assert_eq!(classify_deadline(&item, &now), None);
  }

  #[test]
  fn item_without_target_date_is_never_bucketed() {
    let now = utc(2024, 3, 10, 0, 0);
    assert_eq!(classify_deadline(&kr(0.0, 10.0), &now), None);
  }

  #[test]
  fn tomorrow_and_day_after() {
    let now = utc(2024, 3, 10, 18, 0);
    let tomorrow = kr_due(0.0, 1.0, utc(2024, 3, 11, 0, 0));
    let after = kr_due(0.0, 1.0, utc(2024, 3, 12, 23, 59));
    let later = kr_due(0.0, 1.0, utc(2024, 3, 13, 0, 0));

    assert_eq!(
      classify_deadline(&tomorrow, &now).unwrap().bucket,
      Some(DayBucket::Tomorrow)
    );
    assert_eq!(
      classify_deadline(&after, &now).unwrap().bucket,
      Some(DayBucket::DayAfterTomorrow)
    );
    let later = classify_deadline(&later, &now).unwrap();
    assert_eq!(later.bucket, None);
    assert!(later.due_soon);
  }

  #[test]
  fn due_soon_window_is_inclusive_of_day_seven() {
    let now = utc(2024, 3, 10, 12, 0);
    let day_seven = kr_due(0.0, 1.0, utc(2024, 3, 17, 23, 0));
    let day_eight = kr_due(0.0, 1.0, utc(2024, 3, 18, 0, 0));

    assert!(classify_deadline(&day_seven, &now).unwrap().due_soon);
    let eight = classify_deadline(&day_eight, &now).unwrap();
    assert!(!eight.due_soon);
    assert_eq!(eight.days_until, 8);
  }

  #[test]
  fn past_dates_are_negative_and_not_due_soon() {
    let now = utc(2024, 3, 10, 12, 0);
    let item = kr_due(0.0, 1.0, utc(2024, 3, 7, 9, 0));

    let d = classify_deadline(&item, &now).unwrap();
    assert_eq!(d.days_until, -3);
    assert_eq!(d.bucket, None);
    assert!(!d.due_soon);
  }

  #[test]
  fn days_are_computed_in_nows_timezone() {
    // 00:30 on the 10th in Madrid is 23:30 UTC on the 9th.
    let now = Madrid.with_ymd_and_hms(2024, 3, 10, 0, 30, 0).unwrap();
    let item = kr_due(0.0, 1.0, utc(2024, 3, 10, 12, 0));

    let local = classify_deadline(&item, &now).unwrap();
    assert_eq!(local.bucket, Some(DayBucket::Today));

    let as_utc = classify_deadline(&item, &now.with_timezone(&Utc)).unwrap();
    assert_eq!(as_utc.bucket, Some(DayBucket::Tomorrow));
  }

  #[test]
  fn earliest_deadline_skips_completed_items() {
    let now = utc(2024, 3, 10, 12, 0);
    let forest = vec![life(vec![area(vec![
      kr_due(5.0, 5.0, utc(2024, 3, 1, 0, 0)),
      kr_due(1.0, 5.0, utc(2024, 3, 14, 0, 0)),
      kr_due(1.0, 5.0, utc(2024, 3, 12, 0, 0)),
      kr(0.0, 5.0),
    ])])];

    assert_eq!(
      earliest_deadline(&forest, &now),
      NaiveDate::from_ymd_opt(2024, 3, 12)
    );
  }

  #[test]
  fn earliest_deadline_of_nothing_is_none() {
    let now = utc(2024, 3, 10, 12, 0);
    assert_eq!(earliest_deadline(&[], &now), None);
  }

  #[test]
  fn overdue_compares_instants() {
    let now = utc(2024, 3, 10, 12, 0);
    let earlier_today = kr_due(0.0, 1.0, now - Duration::hours(1));
    let later_today = kr_due(0.0, 1.0, now + Duration::hours(1));
    let done = kr_due(1.0, 1.0, now - Duration::days(3));

    assert!(is_overdue(&earlier_today, &now));
    assert!(!is_overdue(&later_today, &now));
    assert!(!is_overdue(&done, &now));
    assert!(!is_overdue(&kr(0.0, 1.0), &now));
  }

  #[test]
  fn urgency_bands() {
    assert_eq!(DeadlineUrgency::from_days(-2), DeadlineUrgency::Overdue);
    assert_eq!(DeadlineUrgency::from_days(0), DeadlineUrgency::DueToday);
    assert_eq!(DeadlineUrgency::from_days(1), DeadlineUrgency::Soon);
    assert_eq!(DeadlineUrgency::from_days(6), DeadlineUrgency::Soon);
    assert_eq!(DeadlineUrgency::from_days(7), DeadlineUrgency::Later);
  }
}
