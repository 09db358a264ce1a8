//! Contact-detail records — phone numbers, email addresses, instant
//! messengers, web sites, street addresses, and special dates.
//!
//! Every detail belongs to exactly one contact and (except [`SpecialDate`])
//! references exactly one [`crate::location::Location`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Instant-messenger services ──────────────────────────────────────────────

/// The IM network a handle belongs to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ImService {
  Aim,
  Msn,
  Icq,
  Jabber,
  Yahoo,
  Skype,
  Qq,
  Sametime,
  GaduGadu,
  GoogleTalk,
  #[default]
  Other,
}

impl ImService {
  /// The wire string stored in the `service` column.
  /// Must match the `rename_all = "kebab-case"` serde tags above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Aim => "aim",
      Self::Msn => "msn",
      Self::Icq => "icq",
      Self::Jabber => "jabber",
      Self::Yahoo => "yahoo",
      Self::Skype => "skype",
      Self::Qq => "qq",
      Self::Sametime => "sametime",
      Self::GaduGadu => "gadu-gadu",
      Self::GoogleTalk => "google-talk",
      Self::Other => "other",
    }
  }

  /// Inverse of [`ImService::as_str`]. `None` for unrecognized strings.
  pub fn parse(s: &str) -> Option<Self> {
    Some(match s {
      "aim" => Self::Aim,
      "msn" => Self::Msn,
      "icq" => Self::Icq,
      "jabber" => Self::Jabber,
      "yahoo" => Self::Yahoo,
      "skype" => Self::Skype,
      "qq" => Self::Qq,
      "sametime" => Self::Sametime,
      "gadu-gadu" => Self::GaduGadu,
      "google-talk" => Self::GoogleTalk,
      "other" => Self::Other,
      _ => return None,
    })
  }
}

// ─── Detail records ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneNumber {
  pub phone_number_id: Uuid,
  pub contact_id:      Uuid,
  pub phone_number:    String,
  pub location_id:     Uuid,
  pub date_added:      DateTime<Utc>,
  pub date_modified:   DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAddress {
  pub email_address_id: Uuid,
  pub contact_id:       Uuid,
  pub email_address:    String,
  pub location_id:      Uuid,
  pub date_added:       DateTime<Utc>,
  pub date_modified:    DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstantMessenger {
  pub instant_messenger_id: Uuid,
  pub contact_id:           Uuid,
  pub im_account:           String,
  pub service:              ImService,
  pub location_id:          Uuid,
  pub date_added:           DateTime<Utc>,
  pub date_modified:        DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSite {
  pub web_site_id:   Uuid,
  pub contact_id:    Uuid,
  pub url:           String,
  pub location_id:   Uuid,
  pub date_added:    DateTime<Utc>,
  pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreetAddress {
  pub street_address_id: Uuid,
  pub contact_id:        Uuid,
  pub street:            String,
  pub street2:           String,
  pub city:              String,
  pub province:          String,
  pub postal_code:       String,
  /// The only required address component.
  pub country:           String,
  pub location_id:       Uuid,
  pub date_added:        DateTime<Utc>,
  pub date_modified:     DateTime<Utc>,
}

/// A birthday, anniversary, or other recurring occasion. The only detail
/// type without a location reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialDate {
  pub special_date_id: Uuid,
  pub contact_id:      Uuid,
  pub occasion:        String,
  pub date:            NaiveDate,
  pub every_year:      bool,
  pub date_added:      DateTime<Utc>,
  pub date_modified:   DateTime<Utc>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewPhoneNumber {
  pub contact_id:   Uuid,
  pub phone_number: String,
  pub location_id:  Uuid,
}

#[derive(Debug, Clone)]
pub struct NewEmailAddress {
  pub contact_id:    Uuid,
  pub email_address: String,
  pub location_id:   Uuid,
}

#[derive(Debug, Clone)]
pub struct NewInstantMessenger {
  pub contact_id:  Uuid,
  pub im_account:  String,
  pub service:     ImService,
  pub location_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewWebSite {
  pub contact_id:  Uuid,
  pub url:         String,
  pub location_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewStreetAddress {
  pub contact_id:  Uuid,
  pub street:      String,
  pub street2:     String,
  pub city:        String,
  pub province:    String,
  pub postal_code: String,
  pub country:     String,
  pub location_id: Uuid,
}

impl NewStreetAddress {
  /// A draft with every optional component blank.
  pub fn new(contact_id: Uuid, country: impl Into<String>, location_id: Uuid) -> Self {
    Self {
      contact_id,
      street: String::new(),
      street2: String::new(),
      city: String::new(),
      province: String::new(),
      postal_code: String::new(),
      country: country.into(),
      location_id,
    }
  }
}

#[derive(Debug, Clone)]
pub struct NewSpecialDate {
  pub contact_id: Uuid,
  pub occasion:   String,
  pub date:       NaiveDate,
  pub every_year: bool,
}

impl NewSpecialDate {
  pub fn new(contact_id: Uuid, occasion: impl Into<String>, date: NaiveDate) -> Self {
    Self {
      contact_id,
      occasion: occasion.into(),
      date,
      every_year: true,
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn im_service_wire_strings_round_trip() {
    for svc in [
      ImService::Aim,
      ImService::Msn,
      ImService::Icq,
      ImService::Jabber,
      ImService::Yahoo,
      ImService::Skype,
      ImService::Qq,
      ImService::Sametime,
      ImService::GaduGadu,
      ImService::GoogleTalk,
      ImService::Other,
    ] {
      assert_eq!(ImService::parse(svc.as_str()), Some(svc));
    }
  }

  #[test]
  fn im_service_rejects_unknown() {
    assert_eq!(ImService::parse("irc"), None);
  }

  #[test]
  fn im_service_default_is_other() {
    assert_eq!(ImService::default(), ImService::Other);
  }

  #[test]
  fn special_date_defaults_to_every_year() {
    let d = NewSpecialDate::new(
      Uuid::new_v4(),
      "birthday",
      NaiveDate::from_ymd_opt(1990, 4, 1).unwrap(),
    );
    assert!(d.every_year);
  }
}
