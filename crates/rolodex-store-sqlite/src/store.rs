//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::{collections::HashMap, path::Path};

use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use rolodex_core::{
  card::ContactCard,
  contact::{Contact, ContactKind, NewContact},
  detail::{
    EmailAddress, InstantMessenger, NewEmailAddress, NewInstantMessenger,
    NewPhoneNumber, NewSpecialDate, NewStreetAddress, NewWebSite, PhoneNumber,
    SpecialDate, StreetAddress, WebSite,
  },
  group::{Group, NewGroup},
  location::{Location, NewLocation},
  slug::slugify,
  store::ContactStore,
  validation,
};

use crate::{
  Error, Result,
  encode::{
    RawContact, RawDetail, RawGroup, RawLocation, RawSpecialDate,
    RawStreetAddress, encode_date, encode_dt, encode_im_service,
    encode_opt_uuid, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rolodex contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Internal helpers ──────────────────────────────────────────────────────

  async fn require_contact(&self, id: Uuid) -> Result<Contact> {
    self
      .get_contact(id)
      .await?
      .ok_or(Error::ContactNotFound(id))
  }

  /// Fetch a location and check it against a detail type's facet rule.
  async fn location_for_detail(
    &self,
    id: Uuid,
    detail: &'static str,
    usable: fn(&Location) -> bool,
  ) -> Result<Location> {
    let location = self
      .get_location(id)
      .await?
      .ok_or(Error::LocationNotFound(id))?;
    if !usable(&location) {
      return Err(Error::LocationNotUsable { location: id, detail });
    }
    Ok(location)
  }

  /// Upsert a contact row exactly as given.
  ///
  /// `ON CONFLICT DO UPDATE` rather than `INSERT OR REPLACE`: REPLACE
  /// deletes the conflicting row first, which would cascade away the
  /// contact's detail records.
  async fn persist_contact(&self, contact: &Contact) -> Result<()> {
    let id_str       = encode_uuid(contact.contact_id);
    let name         = contact.name.clone();
    let first_name   = contact.first_name.clone();
    let last_name    = contact.last_name.clone();
    let middle_name  = contact.middle_name.clone();
    let suffix       = contact.suffix.clone();
    let prefix       = contact.prefix.clone();
    let title        = contact.title.clone();
    let nickname     = contact.nickname.clone();
    let slug         = contact.slug.clone();
    let about        = contact.about.clone();
    let is_company   = contact.is_company;
    let company_str  = encode_opt_uuid(contact.company_id);
    let added_str    = encode_dt(contact.date_added);
    let modified_str = encode_dt(contact.date_modified);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (
             contact_id, name, first_name, last_name, middle_name, suffix,
             prefix, title, nickname, slug, about, is_company, company_id,
             date_added, date_modified
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
           ON CONFLICT(contact_id) DO UPDATE SET
             name = ?2, first_name = ?3, last_name = ?4, middle_name = ?5,
             suffix = ?6, prefix = ?7, title = ?8, nickname = ?9, slug = ?10,
             about = ?11, is_company = ?12, company_id = ?13,
             date_added = ?14, date_modified = ?15",
          rusqlite::params![
            id_str,
            name,
            first_name,
            last_name,
            middle_name,
            suffix,
            prefix,
            title,
            nickname,
            slug,
            about,
            is_company,
            company_str,
            added_str,
            modified_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn persist_location(&self, location: &Location) -> Result<()> {
    let id_str            = encode_uuid(location.location_id);
    let name              = location.name.clone();
    let slug              = location.slug.clone();
    let is_phone          = location.is_phone;
    let is_street_address = location.is_street_address;
    let weight            = i64::from(location.weight);
    let added_str         = encode_dt(location.date_added);
    let modified_str      = encode_dt(location.date_modified);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO locations (
             location_id, name, slug, is_phone, is_street_address, weight,
             date_added, date_modified
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
           ON CONFLICT(location_id) DO UPDATE SET
             name = ?2, slug = ?3, is_phone = ?4, is_street_address = ?5,
             weight = ?6, date_added = ?7, date_modified = ?8",
          rusqlite::params![
            id_str,
            name,
            slug,
            is_phone,
            is_street_address,
            weight,
            added_str,
            modified_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// List one of the four uniform detail tables in insertion order.
  /// `sql` must project the [`RawDetail`] column shape.
  async fn list_details(
    &self,
    sql: &'static str,
    contact_id: Uuid,
  ) -> Result<Vec<RawDetail>> {
    let id_str = encode_uuid(contact_id);
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawDetail::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(raws)
  }

  async fn list_special_dates(
    &self,
    where_clause: &'static str,
    params: Vec<String>,
  ) -> Result<Vec<SpecialDate>> {
    let raws = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM special_dates WHERE {where_clause} ORDER BY date",
          RawSpecialDate::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(params.iter()),
            RawSpecialDate::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws
      .into_iter()
      .map(RawSpecialDate::into_special_date)
      .collect()
  }

  /// Membership insert shared by the two group member kinds.
  async fn add_group_member(
    &self,
    table: &'static str,
    group_id: Uuid,
    contact_id: Uuid,
    expected: ContactKind,
  ) -> Result<()> {
    self
      .get_group(group_id)
      .await?
      .ok_or(Error::GroupNotFound(group_id))?;
    let contact = self.require_contact(contact_id).await?;
    if contact.kind() != expected {
      return Err(Error::KindMismatch {
        contact: contact_id,
        expected,
      });
    }

    let group_str   = encode_uuid(group_id);
    let contact_str = encode_uuid(contact_id);
    self
      .conn
      .call(move |conn| {
        let sql = format!(
          "INSERT OR IGNORE INTO {table} (group_id, contact_id) VALUES (?1, ?2)"
        );
        conn.execute(&sql, rusqlite::params![group_str, contact_str])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_group_members(
    &self,
    sql: &'static str,
    group_id: Uuid,
  ) -> Result<Vec<Contact>> {
    let id_str = encode_uuid(group_id);
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawContact::into_contact).collect()
  }

  /// Resolve the locations referenced by a batch of detail records.
  async fn locations_by_id(
    &self,
    ids: impl IntoIterator<Item = Uuid>,
  ) -> Result<HashMap<Uuid, Location>> {
    let mut map = HashMap::new();
    for id in ids {
      if map.contains_key(&id) {
        continue;
      }
      let location = self
        .get_location(id)
        .await?
        .ok_or(Error::LocationNotFound(id))?;
      map.insert(id, location);
    }
    Ok(map)
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn add_contact(&self, input: NewContact) -> Result<Contact> {
    let now = Utc::now();
    let slug = match input.slug {
      Some(ref s) if !s.trim().is_empty() => s.clone(),
      _ => slugify(&input.display_name()),
    };
    let contact = Contact {
      contact_id:    Uuid::new_v4(),
      name:          input.name,
      first_name:    input.first_name,
      last_name:     input.last_name,
      middle_name:   input.middle_name,
      suffix:        input.suffix,
      prefix:        input.prefix,
      title:         input.title,
      nickname:      input.nickname,
      slug,
      about:         input.about,
      is_company:    input.is_company,
      company_id:    input.company_id,
      date_added:    now,
      date_modified: now,
    };
    self.persist_contact(&contact).await?;
    Ok(contact)
  }

  async fn save_contact(&self, mut contact: Contact) -> Result<Contact> {
    contact.date_modified = Utc::now();
    self.persist_contact(&contact).await?;
    Ok(contact)
  }

  async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM contacts WHERE contact_id = ?1",
          RawContact::COLUMNS
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], RawContact::from_row)
            .optional()?,
        )
      })
      .await?;
    raw.map(RawContact::into_contact).transpose()
  }

  async fn list_contacts(&self, kind: Option<ContactKind>) -> Result<Vec<Contact>> {
    // Each view keeps its own default ordering.
    let sql = match kind {
      None => "ORDER BY date_added",
      Some(ContactKind::Person) => {
        "WHERE is_company = 0 ORDER BY last_name, first_name"
      }
      Some(ContactKind::Company) => "WHERE is_company = 1 ORDER BY name",
    };
    let raws = self
      .conn
      .call(move |conn| {
        let full = format!("SELECT {} FROM contacts {sql}", RawContact::COLUMNS);
        let mut stmt = conn.prepare(&full)?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawContact::into_contact).collect()
  }

  // ── Locations ─────────────────────────────────────────────────────────────

  async fn add_location(&self, input: NewLocation) -> Result<Location> {
    let location = input.build().map_err(Error::Core)?;
    self.persist_location(&location).await?;
    Ok(location)
  }

  async fn save_location(&self, location: Location) -> Result<Location> {
    validation::weight_in_range(location.weight).map_err(Error::Core)?;
    self.persist_location(&location).await?;
    Ok(location)
  }

  async fn get_location(&self, id: Uuid) -> Result<Option<Location>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawLocation> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM locations WHERE location_id = ?1",
          RawLocation::COLUMNS
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], RawLocation::from_row)
            .optional()?,
        )
      })
      .await?;
    raw.map(RawLocation::into_location).transpose()
  }

  async fn list_locations(&self) -> Result<Vec<Location>> {
    let raws = self
      .conn
      .call(|conn| {
        let sql = format!(
          "SELECT {} FROM locations ORDER BY weight",
          RawLocation::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawLocation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawLocation::into_location).collect()
  }

  // ── Details ───────────────────────────────────────────────────────────────

  async fn add_phone_number(&self, input: NewPhoneNumber) -> Result<PhoneNumber> {
    let phone_number = validation::non_blank(&input.phone_number, "phone_number")
      .map_err(Error::Core)?;
    self.require_contact(input.contact_id).await?;
    self
      .location_for_detail(input.location_id, "phone number", Location::usable_for_phone)
      .await?;

    let now = Utc::now();
    let record = PhoneNumber {
      phone_number_id: Uuid::new_v4(),
      contact_id:      input.contact_id,
      phone_number,
      location_id:     input.location_id,
      date_added:      now,
      date_modified:   now,
    };

    let id_str       = encode_uuid(record.phone_number_id);
    let contact_str  = encode_uuid(record.contact_id);
    let payload      = record.phone_number.clone();
    let location_str = encode_uuid(record.location_id);
    let at_str       = encode_dt(now);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO phone_numbers (
             phone_number_id, contact_id, phone_number, location_id,
             date_added, date_modified
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![id_str, contact_str, payload, location_str, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(record)
  }

  async fn phone_numbers_for(&self, contact_id: Uuid) -> Result<Vec<PhoneNumber>> {
    let raws = self
      .list_details(
        "SELECT phone_number_id, contact_id, phone_number, NULL, location_id,
                date_added, date_modified
         FROM phone_numbers WHERE contact_id = ?1 ORDER BY rowid",
        contact_id,
      )
      .await?;
    raws.into_iter().map(RawDetail::into_phone_number).collect()
  }

  async fn add_email_address(&self, input: NewEmailAddress) -> Result<EmailAddress> {
    let email_address =
      validation::email_shape(&input.email_address).map_err(Error::Core)?;
    self.require_contact(input.contact_id).await?;
    self
      .location_for_detail(
        input.location_id,
        "email address",
        Location::usable_for_plain_detail,
      )
      .await?;

    let now = Utc::now();
    let record = EmailAddress {
      email_address_id: Uuid::new_v4(),
      contact_id:       input.contact_id,
      email_address,
      location_id:      input.location_id,
      date_added:       now,
      date_modified:    now,
    };

    let id_str       = encode_uuid(record.email_address_id);
    let contact_str  = encode_uuid(record.contact_id);
    let payload      = record.email_address.clone();
    let location_str = encode_uuid(record.location_id);
    let at_str       = encode_dt(now);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO email_addresses (
             email_address_id, contact_id, email_address, location_id,
             date_added, date_modified
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![id_str, contact_str, payload, location_str, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(record)
  }

  async fn email_addresses_for(&self, contact_id: Uuid) -> Result<Vec<EmailAddress>> {
    let raws = self
      .list_details(
        "SELECT email_address_id, contact_id, email_address, NULL, location_id,
                date_added, date_modified
         FROM email_addresses WHERE contact_id = ?1 ORDER BY rowid",
        contact_id,
      )
      .await?;
    raws
      .into_iter()
      .map(RawDetail::into_email_address)
      .collect()
  }

  async fn add_instant_messenger(
    &self,
    input: NewInstantMessenger,
  ) -> Result<InstantMessenger> {
    let im_account =
      validation::non_blank(&input.im_account, "im_account").map_err(Error::Core)?;
    self.require_contact(input.contact_id).await?;
    self
      .location_for_detail(
        input.location_id,
        "instant messenger",
        Location::usable_for_plain_detail,
      )
      .await?;

    let now = Utc::now();
    let record = InstantMessenger {
      instant_messenger_id: Uuid::new_v4(),
      contact_id:           input.contact_id,
      im_account,
      service:              input.service,
      location_id:          input.location_id,
      date_added:           now,
      date_modified:        now,
    };

    let id_str       = encode_uuid(record.instant_messenger_id);
    let contact_str  = encode_uuid(record.contact_id);
    let payload      = record.im_account.clone();
    let service_str  = encode_im_service(record.service);
    let location_str = encode_uuid(record.location_id);
    let at_str       = encode_dt(now);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO instant_messengers (
             instant_messenger_id, contact_id, im_account, service,
             location_id, date_added, date_modified
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
          rusqlite::params![
            id_str,
            contact_str,
            payload,
            service_str,
            location_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(record)
  }

  async fn instant_messengers_for(
    &self,
    contact_id: Uuid,
  ) -> Result<Vec<InstantMessenger>> {
    let raws = self
      .list_details(
        "SELECT instant_messenger_id, contact_id, im_account, service,
                location_id, date_added, date_modified
         FROM instant_messengers WHERE contact_id = ?1 ORDER BY rowid",
        contact_id,
      )
      .await?;
    raws
      .into_iter()
      .map(RawDetail::into_instant_messenger)
      .collect()
  }

  async fn add_web_site(&self, input: NewWebSite) -> Result<WebSite> {
    let url = validation::url_shape(&input.url).map_err(Error::Core)?;
    self.require_contact(input.contact_id).await?;
    self
      .location_for_detail(
        input.location_id,
        "web site",
        Location::usable_for_plain_detail,
      )
      .await?;

    let now = Utc::now();
    let record = WebSite {
      web_site_id:   Uuid::new_v4(),
      contact_id:    input.contact_id,
      url,
      location_id:   input.location_id,
      date_added:    now,
      date_modified: now,
    };

    let id_str       = encode_uuid(record.web_site_id);
    let contact_str  = encode_uuid(record.contact_id);
    let payload      = record.url.clone();
    let location_str = encode_uuid(record.location_id);
    let at_str       = encode_dt(now);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO web_sites (
             web_site_id, contact_id, url, location_id, date_added,
             date_modified
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![id_str, contact_str, payload, location_str, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(record)
  }

  async fn web_sites_for(&self, contact_id: Uuid) -> Result<Vec<WebSite>> {
    let raws = self
      .list_details(
        "SELECT web_site_id, contact_id, url, NULL, location_id, date_added,
                date_modified
         FROM web_sites WHERE contact_id = ?1 ORDER BY rowid",
        contact_id,
      )
      .await?;
    raws.into_iter().map(RawDetail::into_web_site).collect()
  }

  async fn add_street_address(
    &self,
    input: NewStreetAddress,
  ) -> Result<StreetAddress> {
    let country =
      validation::non_blank(&input.country, "country").map_err(Error::Core)?;
    self.require_contact(input.contact_id).await?;
    self
      .location_for_detail(
        input.location_id,
        "street address",
        Location::usable_for_street_address,
      )
      .await?;

    let now = Utc::now();
    let record = StreetAddress {
      street_address_id: Uuid::new_v4(),
      contact_id:        input.contact_id,
      street:            input.street,
      street2:           input.street2,
      city:              input.city,
      province:          input.province,
      postal_code:       input.postal_code,
      country,
      location_id:       input.location_id,
      date_added:        now,
      date_modified:     now,
    };

    let id_str       = encode_uuid(record.street_address_id);
    let contact_str  = encode_uuid(record.contact_id);
    let street       = record.street.clone();
    let street2      = record.street2.clone();
    let city         = record.city.clone();
    let province     = record.province.clone();
    let postal_code  = record.postal_code.clone();
    let country_str  = record.country.clone();
    let location_str = encode_uuid(record.location_id);
    let at_str       = encode_dt(now);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO street_addresses (
             street_address_id, contact_id, street, street2, city, province,
             postal_code, country, location_id, date_added, date_modified
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
          rusqlite::params![
            id_str,
            contact_str,
            street,
            street2,
            city,
            province,
            postal_code,
            country_str,
            location_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(record)
  }

  async fn street_addresses_for(
    &self,
    contact_id: Uuid,
  ) -> Result<Vec<StreetAddress>> {
    let id_str = encode_uuid(contact_id);
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT street_address_id, contact_id, street, street2, city,
                  province, postal_code, country, location_id, date_added,
                  date_modified
           FROM street_addresses WHERE contact_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawStreetAddress::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws
      .into_iter()
      .map(RawStreetAddress::into_street_address)
      .collect()
  }

  async fn add_special_date(&self, input: NewSpecialDate) -> Result<SpecialDate> {
    let occasion =
      validation::non_blank(&input.occasion, "occasion").map_err(Error::Core)?;
    self.require_contact(input.contact_id).await?;

    let now = Utc::now();
    let record = SpecialDate {
      special_date_id: Uuid::new_v4(),
      contact_id:      input.contact_id,
      occasion,
      date:            input.date,
      every_year:      input.every_year,
      date_added:      now,
      date_modified:   now,
    };

    let id_str      = encode_uuid(record.special_date_id);
    let contact_str = encode_uuid(record.contact_id);
    let occ         = record.occasion.clone();
    let date_str    = encode_date(record.date);
    let every_year  = record.every_year;
    let at_str      = encode_dt(now);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO special_dates (
             special_date_id, contact_id, occasion, date, every_year,
             date_added, date_modified
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
          rusqlite::params![id_str, contact_str, occ, date_str, every_year, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(record)
  }

  async fn special_dates_for(&self, contact_id: Uuid) -> Result<Vec<SpecialDate>> {
    let id_str = encode_uuid(contact_id);
    let raws = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM special_dates WHERE contact_id = ?1 ORDER BY rowid",
          RawSpecialDate::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawSpecialDate::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws
      .into_iter()
      .map(RawSpecialDate::into_special_date)
      .collect()
  }

  // ── Special-date calendar queries ─────────────────────────────────────────

  async fn special_dates_on(&self, date: NaiveDate) -> Result<Vec<SpecialDate>> {
    self
      .list_special_dates(
        "date = ?1 OR (every_year = 1 AND substr(date, 6) = ?2)",
        vec![encode_date(date), date.format("%m-%d").to_string()],
      )
      .await
  }

  async fn special_dates_in_month(&self, date: NaiveDate) -> Result<Vec<SpecialDate>> {
    self
      .list_special_dates(
        "substr(date, 1, 7) = ?1 OR (every_year = 1 AND substr(date, 6, 2) = ?2)",
        vec![date.format("%Y-%m").to_string(), date.format("%m").to_string()],
      )
      .await
  }

  async fn special_dates_in_year(&self, date: NaiveDate) -> Result<Vec<SpecialDate>> {
    self
      .list_special_dates(
        "substr(date, 1, 4) = ?1 OR every_year = 1",
        vec![date.format("%Y").to_string()],
      )
      .await
  }

  // ── Groups ────────────────────────────────────────────────────────────────

  async fn add_group(&self, input: NewGroup) -> Result<Group> {
    let name = validation::non_blank(&input.name, "name").map_err(Error::Core)?;
    let slug = match input.slug {
      Some(ref s) if !s.trim().is_empty() => s.clone(),
      _ => slugify(&name),
    };
    let now = Utc::now();
    let group = Group {
      group_id:      Uuid::new_v4(),
      name,
      slug,
      about:         input.about,
      date_added:    now,
      date_modified: now,
    };

    let id_str    = encode_uuid(group.group_id);
    let name_str  = group.name.clone();
    let slug_str  = group.slug.clone();
    let about_str = group.about.clone();
    let at_str    = encode_dt(now);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO groups (group_id, name, slug, about, date_added, date_modified)
           VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![id_str, name_str, slug_str, about_str, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(group)
  }

  async fn get_group(&self, id: Uuid) -> Result<Option<Group>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawGroup> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT group_id, name, slug, about, date_added, date_modified
               FROM groups WHERE group_id = ?1",
              rusqlite::params![id_str],
              RawGroup::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawGroup::into_group).transpose()
  }

  async fn list_groups(&self) -> Result<Vec<Group>> {
    let raws = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT group_id, name, slug, about, date_added, date_modified
           FROM groups ORDER BY name",
        )?;
        let rows = stmt
          .query_map([], RawGroup::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawGroup::into_group).collect()
  }

  async fn add_person_to_group(&self, group_id: Uuid, contact_id: Uuid) -> Result<()> {
    self
      .add_group_member("group_people", group_id, contact_id, ContactKind::Person)
      .await
  }

  async fn add_company_to_group(&self, group_id: Uuid, contact_id: Uuid) -> Result<()> {
    self
      .add_group_member(
        "group_companies",
        group_id,
        contact_id,
        ContactKind::Company,
      )
      .await
  }

  async fn group_people(&self, group_id: Uuid) -> Result<Vec<Contact>> {
    self
      .list_group_members(
        "SELECT c.contact_id, c.name, c.first_name, c.last_name,
                c.middle_name, c.suffix, c.prefix, c.title, c.nickname,
                c.slug, c.about, c.is_company, c.company_id, c.date_added,
                c.date_modified
         FROM contacts c
         JOIN group_people gp ON gp.contact_id = c.contact_id
         WHERE gp.group_id = ?1
         ORDER BY c.last_name, c.first_name",
        group_id,
      )
      .await
  }

  async fn group_companies(&self, group_id: Uuid) -> Result<Vec<Contact>> {
    self
      .list_group_members(
        "SELECT c.contact_id, c.name, c.first_name, c.last_name,
                c.middle_name, c.suffix, c.prefix, c.title, c.nickname,
                c.slug, c.about, c.is_company, c.company_id, c.date_added,
                c.date_modified
         FROM contacts c
         JOIN group_companies gc ON gc.contact_id = c.contact_id
         WHERE gc.group_id = ?1
         ORDER BY c.name",
        group_id,
      )
      .await
  }

  // ── Read model ────────────────────────────────────────────────────────────

  async fn materialize(&self, contact_id: Uuid) -> Result<Option<ContactCard>> {
    let contact = match self.get_contact(contact_id).await? {
      Some(c) => c,
      None => return Ok(None),
    };

    // Dangling employer ids materialise as no employer.
    let employer = match contact.company_id {
      Some(id) => self.get_contact(id).await?,
      None => None,
    };

    let phone_numbers = self.phone_numbers_for(contact_id).await?;
    let email_addresses = self.email_addresses_for(contact_id).await?;
    let instant_messengers = self.instant_messengers_for(contact_id).await?;
    let web_sites = self.web_sites_for(contact_id).await?;
    let street_addresses = self.street_addresses_for(contact_id).await?;
    let special_dates = self.special_dates_for(contact_id).await?;

    let location_ids: Vec<Uuid> = phone_numbers
      .iter()
      .map(|d| d.location_id)
      .chain(email_addresses.iter().map(|d| d.location_id))
      .chain(instant_messengers.iter().map(|d| d.location_id))
      .chain(web_sites.iter().map(|d| d.location_id))
      .chain(street_addresses.iter().map(|d| d.location_id))
      .collect();
    let locations = self.locations_by_id(location_ids).await?;
    let location = |id: Uuid| -> Result<Location> {
      locations
        .get(&id)
        .cloned()
        .ok_or(Error::LocationNotFound(id))
    };

    let mut card = ContactCard::bare(contact);
    card.employer = employer;
    for number in phone_numbers {
      let loc = location(number.location_id)?;
      card.phone_numbers.push((number, loc));
    }
    for email in email_addresses {
      let loc = location(email.location_id)?;
      card.email_addresses.push((email, loc));
    }
    for im in instant_messengers {
      let loc = location(im.location_id)?;
      card.instant_messengers.push((im, loc));
    }
    for site in web_sites {
      let loc = location(site.location_id)?;
      card.web_sites.push((site, loc));
    }
    for address in street_addresses {
      let loc = location(address.location_id)?;
      card.street_addresses.push((address, loc));
    }
    card.special_dates = special_dates;

    Ok(Some(card))
  }
}
