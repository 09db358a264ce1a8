//! Contact — the unified person-or-company record.
//!
//! People and companies share one table and one struct, discriminated by
//! `is_company`. The former class-per-kind design is replaced by two
//! constructor paths on [`NewContact`] and by [`ContactKind`]-filtered
//! queries; there is no inheritance and no constructor side effect beyond
//! setting the discriminant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The discriminated views over [`Contact`]. Maps to the `is_company` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
  Person,
  Company,
}

impl ContactKind {
  pub fn is_company(self) -> bool { matches!(self, Self::Company) }

  pub fn from_flag(is_company: bool) -> Self {
    if is_company { Self::Company } else { Self::Person }
  }
}

impl std::fmt::Display for ContactKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Person => write!(f, "person"),
      Self::Company => write!(f, "company"),
    }
  }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A person or a company. Exactly one interpretation applies at a time,
/// governed by `is_company`: companies carry a meaningful `name`, people
/// carry the `first_name`/`last_name` field group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
  pub contact_id:    Uuid,
  /// Company display name. Blank for people.
  pub name:          Option<String>,
  pub first_name:    Option<String>,
  pub last_name:     Option<String>,
  pub middle_name:   Option<String>,
  pub suffix:        Option<String>,
  pub prefix:        Option<String>,
  pub title:         Option<String>,
  pub nickname:      Option<String>,
  pub slug:          String,
  pub about:         String,
  pub is_company:    bool,
  /// Employer — a self-reference to a company contact. Dangling ids are
  /// tolerated on read (the employer may have been deleted).
  pub company_id:    Option<Uuid>,
  pub date_added:    DateTime<Utc>,
  pub date_modified: DateTime<Utc>,
}

impl Contact {
  pub fn kind(&self) -> ContactKind { ContactKind::from_flag(self.is_company) }

  /// The default display name: companies render their `name` verbatim,
  /// people render `"first last"`. Missing segments render as empty strings.
  pub fn fullname(&self) -> String {
    if self.is_company {
      self.name.clone().unwrap_or_default()
    } else {
      format!(
        "{} {}",
        self.first_name.as_deref().unwrap_or(""),
        self.last_name.as_deref().unwrap_or("")
      )
    }
  }

  /// The person-view display name: `"first middle last suffix"` with
  /// single-space separators. Segments are never omitted — blank segments
  /// yield doubled spaces, and that literal form is the contract.
  pub fn person_fullname(&self) -> String {
    format!(
      "{} {} {} {}",
      self.first_name.as_deref().unwrap_or(""),
      self.middle_name.as_deref().unwrap_or(""),
      self.last_name.as_deref().unwrap_or(""),
      self.suffix.as_deref().unwrap_or("")
    )
  }
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::ContactStore::add_contact`]. The id, `slug`
/// fallback, and both timestamps are assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
  pub name:        Option<String>,
  pub first_name:  Option<String>,
  pub last_name:   Option<String>,
  pub middle_name: Option<String>,
  pub suffix:      Option<String>,
  pub prefix:      Option<String>,
  pub title:       Option<String>,
  pub nickname:    Option<String>,
  /// Derived from the display name when `None`.
  pub slug:        Option<String>,
  pub about:       String,
  pub is_company:  bool,
  pub company_id:  Option<Uuid>,
}

impl NewContact {
  /// A blank person draft. The discriminant stays false.
  pub fn person() -> Self { Self::default() }

  /// A company draft. Sets the discriminant before any other assignment.
  pub fn company(name: impl Into<String>) -> Self {
    Self {
      is_company: true,
      name: Some(name.into()),
      ..Self::default()
    }
  }

  pub fn kind(&self) -> ContactKind { ContactKind::from_flag(self.is_company) }

  /// The display name a freshly-built record would have; used by the store
  /// for slug derivation.
  pub fn display_name(&self) -> String {
    if self.is_company {
      self.name.clone().unwrap_or_default()
    } else {
      format!(
        "{} {}",
        self.first_name.as_deref().unwrap_or(""),
        self.last_name.as_deref().unwrap_or("")
      )
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn person(first: &str, middle: &str, last: &str, suffix: &str) -> Contact {
    Contact {
      contact_id:    Uuid::new_v4(),
      name:          None,
      first_name:    Some(first.to_string()),
      last_name:     Some(last.to_string()),
      middle_name:   Some(middle.to_string()),
      suffix:        Some(suffix.to_string()),
      prefix:        None,
      title:         None,
      nickname:      None,
      slug:          String::new(),
      about:         String::new(),
      is_company:    false,
      company_id:    None,
      date_added:    Utc::now(),
      date_modified: Utc::now(),
    }
  }

  #[test]
  fn company_constructor_sets_discriminant() {
    let draft = NewContact::company("Initech");
    assert!(draft.is_company);
    assert_eq!(draft.kind(), ContactKind::Company);
  }

  #[test]
  fn person_constructor_leaves_discriminant_false() {
    let draft = NewContact::person();
    assert!(!draft.is_company);
    assert_eq!(draft.kind(), ContactKind::Person);
  }

  #[test]
  fn fullname_for_company_is_name_verbatim() {
    let mut c = person("", "", "", "");
    c.is_company = true;
    c.name = Some("Initech".to_string());
    assert_eq!(c.fullname(), "Initech");
  }

  #[test]
  fn fullname_for_person_is_first_last() {
    let c = person("Jane", "Q", "Doe", "Jr");
    assert_eq!(c.fullname(), "Jane Doe");
  }

  #[test]
  fn person_fullname_preserves_blank_segments() {
    // Blank middle/suffix stay in as empty segments; the doubled and
    // trailing spaces are part of the contract.
    let c = person("Jane", "", "Doe", "");
    assert_eq!(c.person_fullname(), "Jane  Doe ");
  }

  #[test]
  fn person_fullname_with_all_segments() {
    let c = person("Jane", "Quincy", "Doe", "III");
    assert_eq!(c.person_fullname(), "Jane Quincy Doe III");
  }
}
