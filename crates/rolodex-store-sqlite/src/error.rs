//! Error type for `rolodex-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

use rolodex_core::contact::ContactKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] rolodex_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("contact not found: {0}")]
  ContactNotFound(Uuid),

  #[error("location not found: {0}")]
  LocationNotFound(Uuid),

  #[error("group not found: {0}")]
  GroupNotFound(Uuid),

  /// A detail insert referenced a location whose facets exclude that detail
  /// type.
  #[error("location {location} cannot be used for a {detail}")]
  LocationNotUsable {
    location: Uuid,
    detail:   &'static str,
  },

  /// A group-membership insert was given a contact of the wrong kind.
  #[error("contact {contact} is not a {expected}")]
  KindMismatch {
    contact:  Uuid,
    expected: ContactKind,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
