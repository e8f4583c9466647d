//! Fixed-band status classification of a progress percentage.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Lower bound (inclusive) of the on-track band.
pub const ON_TRACK_THRESHOLD: f64 = 70.0;

/// Upper bound (exclusive) of the at-risk band.
pub const AT_RISK_THRESHOLD: f64 = 40.0;

/// Status band of a Key Result.
///
/// `Neutral` covers `[40, 70)`. It is counted in totals but reported in
/// neither the on-track nor the at-risk count.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Status {
  Completed,
  OnTrack,
  Neutral,
  AtRisk,
}

/// Map a percentage to its status band.
pub fn classify_status(percent: f64) -> Status {
  if percent >= 100.0 {
    Status::Completed
  } else if percent >= ON_TRACK_THRESHOLD {
    Status::OnTrack
  } else if percent < AT_RISK_THRESHOLD {
    Status::AtRisk
  } else {
    Status::Neutral
  }
}
