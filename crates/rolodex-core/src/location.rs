//! Location — the category tag attached to most detail records.
//!
//! A location is a reusable label such as "Work", "Home", or "Fax". Its two
//! facets restrict which detail types may reference it; the store enforces
//! those restrictions at detail-insert time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, slug::slugify, validation};

/// Maximum allowed sort weight (inclusive).
pub const MAX_WEIGHT: u8 = 10;

// ─── Location ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
  pub location_id:       Uuid,
  pub name:              String,
  pub slug:              String,
  /// Set on locations reserved for phone numbers.
  pub is_phone:          bool,
  /// Set on locations reserved for street addresses.
  pub is_street_address: bool,
  /// Sort weight, 0–10. `list_locations` orders by this.
  pub weight:            u8,
  pub date_added:        DateTime<Utc>,
  pub date_modified:     DateTime<Utc>,
}

impl Location {
  /// Whether a phone number may reference this location.
  pub fn usable_for_phone(&self) -> bool { !self.is_street_address }

  /// Whether a street address may reference this location.
  pub fn usable_for_street_address(&self) -> bool { !self.is_phone }

  /// Whether an email address, instant messenger, or web site may reference
  /// this location.
  pub fn usable_for_plain_detail(&self) -> bool {
    !self.is_phone && !self.is_street_address
  }
}

// ─── NewLocation ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::ContactStore::add_location`]. The id and
/// timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewLocation {
  pub name:              String,
  /// Derived from `name` when `None`.
  pub slug:              Option<String>,
  pub is_phone:          bool,
  pub is_street_address: bool,
  pub weight:            u8,
}

impl NewLocation {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:              name.into(),
      slug:              None,
      is_phone:          false,
      is_street_address: false,
      weight:            0,
    }
  }

  /// Validate and resolve the draft into a full record with a fresh id.
  pub fn build(self) -> Result<Location> {
    let name = validation::non_blank(&self.name, "name")?;
    let weight = validation::weight_in_range(self.weight)?;
    let slug = match self.slug {
      Some(s) if !s.trim().is_empty() => s,
      _ => slugify(&name),
    };
    let now = Utc::now();
    Ok(Location {
      location_id: Uuid::new_v4(),
      name,
      slug,
      is_phone: self.is_phone,
      is_street_address: self.is_street_address,
      weight,
      date_added: now,
      date_modified: now,
    })
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn build_derives_slug_from_name() {
    let loc = NewLocation::new("Head Office").build().unwrap();
    assert_eq!(loc.slug, "head-office");
    assert_eq!(loc.weight, 0);
    assert!(!loc.is_phone);
  }

  #[test]
  fn build_keeps_explicit_slug() {
    let mut draft = NewLocation::new("Work");
    draft.slug = Some("work-hq".to_string());
    assert_eq!(draft.build().unwrap().slug, "work-hq");
  }

  #[test]
  fn build_rejects_out_of_range_weight() {
    let mut draft = NewLocation::new("Work");
    draft.weight = 11;
    assert!(draft.build().is_err());
  }

  #[test]
  fn build_rejects_blank_name() {
    assert!(NewLocation::new("   ").build().is_err());
  }

  #[test]
  fn facet_accessors() {
    let mut loc = NewLocation::new("Fax").build().unwrap();
    loc.is_phone = true;
    assert!(loc.usable_for_phone());
    assert!(!loc.usable_for_street_address());
    assert!(!loc.usable_for_plain_detail());
  }
}
