//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as
//! `YYYY-MM-DD`, UUIDs as hyphenated lowercase strings, booleans as 0/1
//! integers, and IM services as their wire strings.

use chrono::{DateTime, NaiveDate, Utc};
use rolodex_core::{
  contact::Contact,
  detail::{
    EmailAddress, ImService, InstantMessenger, PhoneNumber, SpecialDate,
    StreetAddress, WebSite,
  },
  group::Group,
  location::Location,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_opt_uuid(id: Option<Uuid>) -> Option<String> {
  id.map(encode_uuid)
}

pub fn decode_opt_uuid(s: Option<&str>) -> Result<Option<Uuid>> {
  s.map(decode_uuid).transpose()
}

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn decode_weight(w: i64) -> Result<u8> {
  u8::try_from(w)
    .ok()
    .filter(|w| *w <= rolodex_core::location::MAX_WEIGHT)
    .ok_or_else(|| Error::DateParse(format!("weight out of range: {w}")))
}

pub fn encode_im_service(s: ImService) -> &'static str { s.as_str() }

pub fn decode_im_service(s: &str) -> Result<ImService> {
  ImService::parse(s)
    .ok_or_else(|| Error::DateParse(format!("unknown im service: {s:?}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw column values read directly from a `contacts` row.
pub struct RawContact {
  pub contact_id:    String,
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
  pub company_id:    Option<String>,
  pub date_added:    String,
  pub date_modified: String,
}

impl RawContact {
  /// Column list matching the field order above; shared by every contact
  /// SELECT.
  pub const COLUMNS: &'static str = "contact_id, name, first_name, \
     last_name, middle_name, suffix, prefix, title, nickname, slug, about, \
     is_company, company_id, date_added, date_modified";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      contact_id:    row.get(0)?,
      name:          row.get(1)?,
      first_name:    row.get(2)?,
      last_name:     row.get(3)?,
      middle_name:   row.get(4)?,
      suffix:        row.get(5)?,
      prefix:        row.get(6)?,
      title:         row.get(7)?,
      nickname:      row.get(8)?,
      slug:          row.get(9)?,
      about:         row.get(10)?,
      is_company:    row.get(11)?,
      company_id:    row.get(12)?,
      date_added:    row.get(13)?,
      date_modified: row.get(14)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      contact_id:    decode_uuid(&self.contact_id)?,
      name:          self.name,
      first_name:    self.first_name,
      last_name:     self.last_name,
      middle_name:   self.middle_name,
      suffix:        self.suffix,
      prefix:        self.prefix,
      title:         self.title,
      nickname:      self.nickname,
      slug:          self.slug,
      about:         self.about,
      is_company:    self.is_company,
      company_id:    decode_opt_uuid(self.company_id.as_deref())?,
      date_added:    decode_dt(&self.date_added)?,
      date_modified: decode_dt(&self.date_modified)?,
    })
  }
}

/// Raw column values read directly from a `locations` row.
pub struct RawLocation {
  pub location_id:       String,
  pub name:              String,
  pub slug:              String,
  pub is_phone:          bool,
  pub is_street_address: bool,
  pub weight:            i64,
  pub date_added:        String,
  pub date_modified:     String,
}

impl RawLocation {
  pub const COLUMNS: &'static str = "location_id, name, slug, is_phone, \
     is_street_address, weight, date_added, date_modified";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      location_id:       row.get(0)?,
      name:              row.get(1)?,
      slug:              row.get(2)?,
      is_phone:          row.get(3)?,
      is_street_address: row.get(4)?,
      weight:            row.get(5)?,
      date_added:        row.get(6)?,
      date_modified:     row.get(7)?,
    })
  }

  pub fn into_location(self) -> Result<Location> {
    Ok(Location {
      location_id:       decode_uuid(&self.location_id)?,
      name:              self.name,
      slug:              self.slug,
      is_phone:          self.is_phone,
      is_street_address: self.is_street_address,
      weight:            decode_weight(self.weight)?,
      date_added:        decode_dt(&self.date_added)?,
      date_modified:     decode_dt(&self.date_modified)?,
    })
  }
}

/// Raw column values shared by the four single-payload detail tables
/// (phone numbers, email addresses, web sites) and, with `service`, instant
/// messengers.
pub struct RawDetail {
  pub detail_id:     String,
  pub contact_id:    String,
  pub payload:       String,
  pub service:       Option<String>,
  pub location_id:   String,
  pub date_added:    String,
  pub date_modified: String,
}

impl RawDetail {
  /// Shared row shape: every detail SELECT projects
  /// `(id, contact_id, payload, service-or-NULL, location_id, date_added,
  /// date_modified)` in this order.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      detail_id:     row.get(0)?,
      contact_id:    row.get(1)?,
      payload:       row.get(2)?,
      service:       row.get(3)?,
      location_id:   row.get(4)?,
      date_added:    row.get(5)?,
      date_modified: row.get(6)?,
    })
  }

  pub fn into_phone_number(self) -> Result<PhoneNumber> {
    Ok(PhoneNumber {
      phone_number_id: decode_uuid(&self.detail_id)?,
      contact_id:      decode_uuid(&self.contact_id)?,
      phone_number:    self.payload,
      location_id:     decode_uuid(&self.location_id)?,
      date_added:      decode_dt(&self.date_added)?,
      date_modified:   decode_dt(&self.date_modified)?,
    })
  }

  pub fn into_email_address(self) -> Result<EmailAddress> {
    Ok(EmailAddress {
      email_address_id: decode_uuid(&self.detail_id)?,
      contact_id:       decode_uuid(&self.contact_id)?,
      email_address:    self.payload,
      location_id:      decode_uuid(&self.location_id)?,
      date_added:       decode_dt(&self.date_added)?,
      date_modified:    decode_dt(&self.date_modified)?,
    })
  }

  pub fn into_instant_messenger(self) -> Result<InstantMessenger> {
    let service = match self.service.as_deref() {
      Some(s) => decode_im_service(s)?,
      None => ImService::Other,
    };
    Ok(InstantMessenger {
      instant_messenger_id: decode_uuid(&self.detail_id)?,
      contact_id:           decode_uuid(&self.contact_id)?,
      im_account:           self.payload,
      service,
      location_id:          decode_uuid(&self.location_id)?,
      date_added:           decode_dt(&self.date_added)?,
      date_modified:        decode_dt(&self.date_modified)?,
    })
  }

  pub fn into_web_site(self) -> Result<WebSite> {
    Ok(WebSite {
      web_site_id:   decode_uuid(&self.detail_id)?,
      contact_id:    decode_uuid(&self.contact_id)?,
      url:           self.payload,
      location_id:   decode_uuid(&self.location_id)?,
      date_added:    decode_dt(&self.date_added)?,
      date_modified: decode_dt(&self.date_modified)?,
    })
  }
}

/// Raw column values read directly from a `street_addresses` row.
pub struct RawStreetAddress {
  pub street_address_id: String,
  pub contact_id:        String,
  pub street:            String,
  pub street2:           String,
  pub city:              String,
  pub province:          String,
  pub postal_code:       String,
  pub country:           String,
  pub location_id:       String,
  pub date_added:        String,
  pub date_modified:     String,
}

impl RawStreetAddress {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      street_address_id: row.get(0)?,
      contact_id:        row.get(1)?,
      street:            row.get(2)?,
      street2:           row.get(3)?,
      city:              row.get(4)?,
      province:          row.get(5)?,
      postal_code:       row.get(6)?,
      country:           row.get(7)?,
      location_id:       row.get(8)?,
      date_added:        row.get(9)?,
      date_modified:     row.get(10)?,
    })
  }

  pub fn into_street_address(self) -> Result<StreetAddress> {
    Ok(StreetAddress {
      street_address_id: decode_uuid(&self.street_address_id)?,
      contact_id:        decode_uuid(&self.contact_id)?,
      street:            self.street,
      street2:           self.street2,
      city:              self.city,
      province:          self.province,
      postal_code:       self.postal_code,
      country:           self.country,
      location_id:       decode_uuid(&self.location_id)?,
      date_added:        decode_dt(&self.date_added)?,
      date_modified:     decode_dt(&self.date_modified)?,
    })
  }
}

/// Raw column values read directly from a `special_dates` row.
pub struct RawSpecialDate {
  pub special_date_id: String,
  pub contact_id:      String,
  pub occasion:        String,
  pub date:            String,
  pub every_year:      bool,
  pub date_added:      String,
  pub date_modified:   String,
}

impl RawSpecialDate {
  pub const COLUMNS: &'static str =
    "special_date_id, contact_id, occasion, date, every_year, date_added, \
     date_modified";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      special_date_id: row.get(0)?,
      contact_id:      row.get(1)?,
      occasion:        row.get(2)?,
      date:            row.get(3)?,
      every_year:      row.get(4)?,
      date_added:      row.get(5)?,
      date_modified:   row.get(6)?,
    })
  }

  pub fn into_special_date(self) -> Result<SpecialDate> {
    Ok(SpecialDate {
      special_date_id: decode_uuid(&self.special_date_id)?,
      contact_id:      decode_uuid(&self.contact_id)?,
      occasion:        self.occasion,
      date:            decode_date(&self.date)?,
      every_year:      self.every_year,
      date_added:      decode_dt(&self.date_added)?,
      date_modified:   decode_dt(&self.date_modified)?,
    })
  }
}

/// Raw column values read directly from a `groups` row.
pub struct RawGroup {
  pub group_id:      String,
  pub name:          String,
  pub slug:          String,
  pub about:         String,
  pub date_added:    String,
  pub date_modified: String,
}

impl RawGroup {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      group_id:      row.get(0)?,
      name:          row.get(1)?,
      slug:          row.get(2)?,
      about:         row.get(3)?,
      date_added:    row.get(4)?,
      date_modified: row.get(5)?,
    })
  }

  pub fn into_group(self) -> Result<Group> {
    Ok(Group {
      group_id:      decode_uuid(&self.group_id)?,
      name:          self.name,
      slug:          self.slug,
      about:         self.about,
      date_added:    decode_dt(&self.date_added)?,
      date_modified: decode_dt(&self.date_modified)?,
    })
  }
}
