//! `simplify()` projections — plain, framework-independent snapshots of the
//! domain records, suitable for serialization or templating.
//!
//! These are read-only deep copies with no caching. Timestamps serialize as
//! RFC 3339, calendar dates as `YYYY-MM-DD` (serde's chrono defaults).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  card::ContactCard,
  contact::Contact,
  detail::{
    EmailAddress, ImService, InstantMessenger, PhoneNumber, SpecialDate,
    StreetAddress, WebSite,
  },
  location::Location,
};

// ─── Snapshot types ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleLocation {
  pub name:              String,
  pub slug:              String,
  pub is_phone:          bool,
  pub is_street_address: bool,
  pub weight:            u8,
  pub date_added:        DateTime<Utc>,
  pub date_modified:     DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplePhoneNumber {
  pub phone_number:  String,
  pub location:      SimpleLocation,
  pub date_added:    DateTime<Utc>,
  pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleEmailAddress {
  pub email_address: String,
  pub location:      SimpleLocation,
  pub date_added:    DateTime<Utc>,
  pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInstantMessenger {
  pub im_account:    String,
  pub service:       ImService,
  pub location:      SimpleLocation,
  pub date_added:    DateTime<Utc>,
  pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleWebSite {
  pub url:           String,
  pub location:      SimpleLocation,
  pub date_added:    DateTime<Utc>,
  pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleStreetAddress {
  pub street:        String,
  pub street2:       String,
  pub city:          String,
  pub province:      String,
  pub postal_code:   String,
  pub country:       String,
  pub location:      SimpleLocation,
  pub date_added:    DateTime<Utc>,
  pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleSpecialDate {
  pub occasion:      String,
  pub date:          NaiveDate,
  pub every_year:    bool,
  pub date_added:    DateTime<Utc>,
  pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleContact {
  pub name:               Option<String>,
  pub first_name:         Option<String>,
  pub last_name:          Option<String>,
  pub middle_name:        Option<String>,
  pub suffix:             Option<String>,
  pub prefix:             Option<String>,
  pub title:              Option<String>,
  pub nickname:           Option<String>,
  pub slug:               String,
  pub about:              String,
  pub is_company:         bool,
  /// Employer snapshot, one level deep: scalar fields only, empty detail
  /// lists.
  pub company:            Option<Box<SimpleContact>>,
  pub phone_numbers:      Vec<SimplePhoneNumber>,
  pub email_addresses:    Vec<SimpleEmailAddress>,
  pub instant_messengers: Vec<SimpleInstantMessenger>,
  pub web_sites:          Vec<SimpleWebSite>,
  pub street_addresses:   Vec<SimpleStreetAddress>,
  pub special_dates:      Vec<SimpleSpecialDate>,
  pub date_added:         DateTime<Utc>,
  pub date_modified:      DateTime<Utc>,
}

// ─── Builders ────────────────────────────────────────────────────────────────

impl Location {
  pub fn simplify(&self) -> SimpleLocation {
    SimpleLocation {
      name:              self.name.clone(),
      slug:              self.slug.clone(),
      is_phone:          self.is_phone,
      is_street_address: self.is_street_address,
      weight:            self.weight,
      date_added:        self.date_added,
      date_modified:     self.date_modified,
    }
  }
}

impl PhoneNumber {
  pub fn simplify(&self, location: &Location) -> SimplePhoneNumber {
    SimplePhoneNumber {
      phone_number:  self.phone_number.clone(),
      location:      location.simplify(),
      date_added:    self.date_added,
      date_modified: self.date_modified,
    }
  }
}

impl EmailAddress {
  pub fn simplify(&self, location: &Location) -> SimpleEmailAddress {
    SimpleEmailAddress {
      email_address: self.email_address.clone(),
      location:      location.simplify(),
      date_added:    self.date_added,
      date_modified: self.date_modified,
    }
  }
}

impl InstantMessenger {
  pub fn simplify(&self, location: &Location) -> SimpleInstantMessenger {
    SimpleInstantMessenger {
      im_account:    self.im_account.clone(),
      service:       self.service,
      location:      location.simplify(),
      date_added:    self.date_added,
      date_modified: self.date_modified,
    }
  }
}

impl WebSite {
  pub fn simplify(&self, location: &Location) -> SimpleWebSite {
    SimpleWebSite {
      url:           self.url.clone(),
      location:      location.simplify(),
      date_added:    self.date_added,
      date_modified: self.date_modified,
    }
  }
}

impl StreetAddress {
  pub fn simplify(&self, location: &Location) -> SimpleStreetAddress {
    SimpleStreetAddress {
      street:        self.street.clone(),
      street2:       self.street2.clone(),
      city:          self.city.clone(),
      province:      self.province.clone(),
      postal_code:   self.postal_code.clone(),
      country:       self.country.clone(),
      location:      location.simplify(),
      date_added:    self.date_added,
      date_modified: self.date_modified,
    }
  }
}

impl SpecialDate {
  pub fn simplify(&self) -> SimpleSpecialDate {
    SimpleSpecialDate {
      occasion:      self.occasion.clone(),
      date:          self.date,
      every_year:    self.every_year,
      date_added:    self.date_added,
      date_modified: self.date_modified,
    }
  }
}

impl Contact {
  /// Scalar-only snapshot: no employer, empty detail lists. Used for the
  /// one-level employer nesting in [`ContactCard::simplify`].
  pub fn simplify(&self) -> SimpleContact {
    SimpleContact {
      name:               self.name.clone(),
      first_name:         self.first_name.clone(),
      last_name:          self.last_name.clone(),
      middle_name:        self.middle_name.clone(),
      suffix:             self.suffix.clone(),
      prefix:             self.prefix.clone(),
      title:              self.title.clone(),
      nickname:           self.nickname.clone(),
      slug:               self.slug.clone(),
      about:              self.about.clone(),
      is_company:         self.is_company,
      company:            None,
      phone_numbers:      Vec::new(),
      email_addresses:    Vec::new(),
      instant_messengers: Vec::new(),
      web_sites:          Vec::new(),
      street_addresses:   Vec::new(),
      special_dates:      Vec::new(),
      date_added:         self.date_added,
      date_modified:      self.date_modified,
    }
  }
}

impl ContactCard {
  /// Deep snapshot: every detail collection materialized with its nested
  /// location, employer one level deep.
  pub fn simplify(&self) -> SimpleContact {
    let mut simple = self.contact.simplify();
    simple.company = self
      .employer
      .as_ref()
      .map(|employer| Box::new(employer.simplify()));
    simple.phone_numbers = self
      .phone_numbers
      .iter()
      .map(|(number, location)| number.simplify(location))
      .collect();
    simple.email_addresses = self
      .email_addresses
      .iter()
      .map(|(email, location)| email.simplify(location))
      .collect();
    simple.instant_messengers = self
      .instant_messengers
      .iter()
      .map(|(im, location)| im.simplify(location))
      .collect();
    simple.web_sites = self
      .web_sites
      .iter()
      .map(|(site, location)| site.simplify(location))
      .collect();
    simple.street_addresses = self
      .street_addresses
      .iter()
      .map(|(address, location)| address.simplify(location))
      .collect();
    simple.special_dates = self
      .special_dates
      .iter()
      .map(SpecialDate::simplify)
      .collect();
    simple
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;
  use crate::{card::ContactCard, location::NewLocation};

  #[test]
  fn card_snapshot_materializes_details() {
    let now = Utc::now();
    let contact = Contact {
      contact_id:    Uuid::new_v4(),
      name:          None,
      first_name:    Some("Jane".into()),
      last_name:     Some("Doe".into()),
      middle_name:   None,
      suffix:        None,
      prefix:        None,
      title:         None,
      nickname:      None,
      slug:          "jane-doe".into(),
      about:         String::new(),
      is_company:    false,
      company_id:    None,
      date_added:    now,
      date_modified: now,
    };
    let location = NewLocation::new("Work").build().unwrap();
    let number = PhoneNumber {
      phone_number_id: Uuid::new_v4(),
      contact_id:      contact.contact_id,
      phone_number:    "555-0100".into(),
      location_id:     location.location_id,
      date_added:      now,
      date_modified:   now,
    };

    let mut card = ContactCard::bare(contact);
    card.phone_numbers.push((number, location));

    let simple = card.simplify();
    assert_eq!(simple.phone_numbers.len(), 1);
    assert_eq!(simple.phone_numbers[0].phone_number, "555-0100");
    assert_eq!(simple.phone_numbers[0].location.name, "Work");
    assert!(simple.company.is_none());
  }

  #[test]
  fn employer_nests_one_level_scalar_only() {
    let now = Utc::now();
    let company = Contact {
      contact_id:    Uuid::new_v4(),
      name:          Some("Initech".into()),
      first_name:    None,
      last_name:     None,
      middle_name:   None,
      suffix:        None,
      prefix:        None,
      title:         None,
      nickname:      None,
      slug:          "initech".into(),
      about:         String::new(),
      is_company:    true,
      company_id:    None,
      date_added:    now,
      date_modified: now,
    };
    let mut person = company.clone();
    person.contact_id = Uuid::new_v4();
    person.name = None;
    person.is_company = false;
    person.first_name = Some("Jane".into());
    person.company_id = Some(company.contact_id);

    let mut card = ContactCard::bare(person);
    card.employer = Some(company);

    let simple = card.simplify();
    let employer = simple.company.expect("employer snapshot");
    assert_eq!(employer.name.as_deref(), Some("Initech"));
    assert!(employer.company.is_none());
    assert!(employer.phone_numbers.is_empty());
  }

  #[test]
  fn special_date_serializes_calendar_date() {
    let now = Utc::now();
    let special = SpecialDate {
      special_date_id: Uuid::new_v4(),
      contact_id:      Uuid::new_v4(),
      occasion:        "birthday".into(),
      date:            NaiveDate::from_ymd_opt(1990, 4, 1).unwrap(),
      every_year:      true,
      date_added:      now,
      date_modified:   now,
    };
    let json = serde_json::to_value(special.simplify()).unwrap();
    assert_eq!(json["date"], "1990-04-01");
    assert_eq!(json["every_year"], true);
  }
}
