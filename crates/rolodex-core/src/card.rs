//! ContactCard — the materialized read model for a contact.
//!
//! Never stored, always derived: the contact row, its employer row (when
//! present), and every detail collection with its location joined in, each
//! in insertion order.

use serde::{Deserialize, Serialize};

use crate::{
  contact::Contact,
  detail::{
    EmailAddress, InstantMessenger, PhoneNumber, SpecialDate, StreetAddress,
    WebSite,
  },
  location::Location,
  primary::resolve_primary,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactCard {
  pub contact:            Contact,
  /// The employer's contact row, when `company_id` is set and still
  /// resolvable.
  pub employer:           Option<Contact>,
  pub phone_numbers:      Vec<(PhoneNumber, Location)>,
  pub email_addresses:    Vec<(EmailAddress, Location)>,
  pub instant_messengers: Vec<(InstantMessenger, Location)>,
  pub web_sites:          Vec<(WebSite, Location)>,
  pub street_addresses:   Vec<(StreetAddress, Location)>,
  pub special_dates:      Vec<SpecialDate>,
}

impl ContactCard {
  /// A card with no details, for a freshly-created contact.
  pub fn bare(contact: Contact) -> Self {
    Self {
      contact,
      employer: None,
      phone_numbers: Vec::new(),
      email_addresses: Vec::new(),
      instant_messengers: Vec::new(),
      web_sites: Vec::new(),
      street_addresses: Vec::new(),
      special_dates: Vec::new(),
    }
  }

  // ── Primary resolution ────────────────────────────────────────────────

  pub fn primary_phone_number(&self) -> Option<&PhoneNumber> {
    resolve_primary(&self.phone_numbers).map(|entry| &entry.0)
  }

  pub fn primary_email_address(&self) -> Option<&EmailAddress> {
    resolve_primary(&self.email_addresses).map(|entry| &entry.0)
  }

  pub fn primary_street_address(&self) -> Option<&StreetAddress> {
    resolve_primary(&self.street_addresses).map(|entry| &entry.0)
  }

  pub fn primary_web_site(&self) -> Option<&WebSite> {
    resolve_primary(&self.web_sites).map(|entry| &entry.0)
  }
}
