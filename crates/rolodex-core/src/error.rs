//! Error types for `rolodex-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::contact::ContactKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("contact not found: {0}")]
  ContactNotFound(Uuid),

  #[error("location not found: {0}")]
  LocationNotFound(Uuid),

  #[error("group not found: {0}")]
  GroupNotFound(Uuid),

  #[error("{record} is missing required field {field:?}")]
  MissingRequiredField {
    record: &'static str,
    field:  &'static str,
  },

  #[error("validation failed: {0}")]
  Validation(String),

  /// A detail record referenced a location whose facets exclude it, e.g. a
  /// phone number at a location with `is_street_address` set.
  #[error("location {location} cannot be used for a {detail}")]
  LocationNotUsable {
    location: Uuid,
    detail:   &'static str,
  },

  /// A group-membership operation was given a contact of the wrong kind.
  #[error("contact {contact} is not a {expected}")]
  KindMismatch {
    contact:  Uuid,
    expected: ContactKind,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
