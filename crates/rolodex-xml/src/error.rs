//! Error types for the Rolodex XML hydrator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed input XML; raised before any field assignment.
  #[error("xml error: {0}")]
  Xml(String),

  /// A child tag that maps to no known field of the target record.
  #[error("unknown tag <{tag}> in {record}")]
  UnknownTag {
    record: &'static str,
    tag:    String,
  },

  #[error("{record} is missing required field {field:?}")]
  MissingRequiredField {
    record: &'static str,
    field:  &'static str,
  },

  #[error("invalid value for {field}: {value:?}")]
  InvalidValue {
    field: &'static str,
    value: String,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
