//! Group — a named collection of people and companies.
//!
//! Membership is kept in two sets (people and companies) managed by the
//! store; the store rejects a person added to the company set and vice
//! versa.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
  pub group_id:      Uuid,
  pub name:          String,
  pub slug:          String,
  pub about:         String,
  pub date_added:    DateTime<Utc>,
  pub date_modified: DateTime<Utc>,
}

/// Input to [`crate::store::ContactStore::add_group`]. The id, `slug`
/// fallback, and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewGroup {
  pub name:  String,
  /// Derived from `name` when `None`.
  pub slug:  Option<String>,
  pub about: String,
}

impl NewGroup {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:  name.into(),
      slug:  None,
      about: String::new(),
    }
  }
}
