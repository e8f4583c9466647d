//! Error types for `okr-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("life objective not found: {0}")]
  LifeObjectiveNotFound(Uuid),

  #[error("key result not found: {0}")]
  KeyResultNotFound(Uuid),

  #[error("invalid {field}: {reason}")]
  Invalid { field: String, reason: String },

  #[error("id {0} appears more than once in the tree")]
  DuplicateId(Uuid),
}

impl Error {
  pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::Invalid { field: field.into(), reason: reason.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
