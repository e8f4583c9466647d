//! Error type for server setup and seeding.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown timezone: {0:?}")]
  UnknownTimezone(String),

  #[error("seed date out of range near {0}")]
  SeedDate(chrono::NaiveDate),

  #[error("store error: {0}")]
  Store(#[from] okr_store_sqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
