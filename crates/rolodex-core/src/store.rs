//! The `ContactStore` trait.
//!
//! Implemented by storage backends (e.g. `rolodex-store-sqlite`). Higher
//! layers (`rolodex-xml`) depend on this abstraction, not on any concrete
//! backend.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  card::ContactCard,
  contact::{Contact, ContactKind, NewContact},
  detail::{
    EmailAddress, InstantMessenger, NewEmailAddress, NewInstantMessenger,
    NewPhoneNumber, NewSpecialDate, NewStreetAddress, NewWebSite, PhoneNumber,
    SpecialDate, StreetAddress, WebSite,
  },
  group::{Group, NewGroup},
  location::{Location, NewLocation},
};

/// Abstraction over a Rolodex storage backend.
///
/// Identity and timestamps are assigned by the store: `add_*` returns the
/// persisted record with a fresh id and both timestamps set; `save_*` is an
/// upsert-by-identity that bumps `date_modified`. The returned identity is
/// durable and immediately usable for foreign references — the XML
/// hydrator's two-phase write depends on this guarantee.
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Contacts ──────────────────────────────────────────────────────────

  /// Create and persist a new contact. The slug falls back to a slugified
  /// display name when the draft leaves it unset.
  fn add_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Upsert a contact by id, bumping `date_modified`. Returns the stored
  /// record.
  fn save_contact(
    &self,
    contact: Contact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get_contact(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// List contacts, optionally restricted to one discriminated view.
  ///
  /// A `Person` filter must never return companies and vice versa.
  /// Ordering: people by (`last_name`, `first_name`), companies by `name`,
  /// unfiltered by `date_added`.
  fn list_contacts(
    &self,
    kind: Option<ContactKind>,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  // ── Locations ─────────────────────────────────────────────────────────

  fn add_location(
    &self,
    input: NewLocation,
  ) -> impl Future<Output = Result<Location, Self::Error>> + Send + '_;

  /// Upsert a pre-built location (used by XML hydration, where the record
  /// carries field values parsed from the source document).
  fn save_location(
    &self,
    location: Location,
  ) -> impl Future<Output = Result<Location, Self::Error>> + Send + '_;

  fn get_location(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Location>, Self::Error>> + Send + '_;

  /// All locations, ordered by `weight`.
  fn list_locations(
    &self,
  ) -> impl Future<Output = Result<Vec<Location>, Self::Error>> + Send + '_;

  // ── Details ───────────────────────────────────────────────────────────
  //
  // Each insert validates the payload shape and the referenced location's
  // facets; `*_for` listings are in insertion order (the natural order the
  // primary resolver falls back on).

  fn add_phone_number(
    &self,
    input: NewPhoneNumber,
  ) -> impl Future<Output = Result<PhoneNumber, Self::Error>> + Send + '_;

  fn phone_numbers_for(
    &self,
    contact_id: Uuid,
  ) -> impl Future<Output = Result<Vec<PhoneNumber>, Self::Error>> + Send + '_;

  fn add_email_address(
    &self,
    input: NewEmailAddress,
  ) -> impl Future<Output = Result<EmailAddress, Self::Error>> + Send + '_;

  fn email_addresses_for(
    &self,
    contact_id: Uuid,
  ) -> impl Future<Output = Result<Vec<EmailAddress>, Self::Error>> + Send + '_;

  fn add_instant_messenger(
    &self,
    input: NewInstantMessenger,
  ) -> impl Future<Output = Result<InstantMessenger, Self::Error>> + Send + '_;

  fn instant_messengers_for(
    &self,
    contact_id: Uuid,
  ) -> impl Future<Output = Result<Vec<InstantMessenger>, Self::Error>> + Send + '_;

  fn add_web_site(
    &self,
    input: NewWebSite,
  ) -> impl Future<Output = Result<WebSite, Self::Error>> + Send + '_;

  fn web_sites_for(
    &self,
    contact_id: Uuid,
  ) -> impl Future<Output = Result<Vec<WebSite>, Self::Error>> + Send + '_;

  fn add_street_address(
    &self,
    input: NewStreetAddress,
  ) -> impl Future<Output = Result<StreetAddress, Self::Error>> + Send + '_;

  fn street_addresses_for(
    &self,
    contact_id: Uuid,
  ) -> impl Future<Output = Result<Vec<StreetAddress>, Self::Error>> + Send + '_;

  fn add_special_date(
    &self,
    input: NewSpecialDate,
  ) -> impl Future<Output = Result<SpecialDate, Self::Error>> + Send + '_;

  fn special_dates_for(
    &self,
    contact_id: Uuid,
  ) -> impl Future<Output = Result<Vec<SpecialDate>, Self::Error>> + Send + '_;

  // ── Special-date calendar queries ─────────────────────────────────────

  /// Dates falling on `date`: an exact match, or an `every_year` recurrence
  /// with the same month and day.
  fn special_dates_on(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<SpecialDate>, Self::Error>> + Send + '_;

  /// Dates falling in `date`'s month: same month and year, or an
  /// `every_year` recurrence in the same month.
  fn special_dates_in_month(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<SpecialDate>, Self::Error>> + Send + '_;

  /// Dates falling in `date`'s year: same year, or any `every_year`
  /// recurrence.
  fn special_dates_in_year(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<SpecialDate>, Self::Error>> + Send + '_;

  // ── Groups ────────────────────────────────────────────────────────────

  fn add_group(
    &self,
    input: NewGroup,
  ) -> impl Future<Output = Result<Group, Self::Error>> + Send + '_;

  fn get_group(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Group>, Self::Error>> + Send + '_;

  /// All groups, ordered by `name`.
  fn list_groups(
    &self,
  ) -> impl Future<Output = Result<Vec<Group>, Self::Error>> + Send + '_;

  /// Add a person to a group. Rejects company contacts. Idempotent.
  fn add_person_to_group(
    &self,
    group_id: Uuid,
    contact_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Add a company to a group. Rejects person contacts. Idempotent.
  fn add_company_to_group(
    &self,
    group_id: Uuid,
    contact_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Group members from the person set, ordered like the Person view.
  fn group_people(
    &self,
    group_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Group members from the company set, ordered like the Company view.
  fn group_companies(
    &self,
    group_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  // ── Read model ────────────────────────────────────────────────────────

  /// Materialise a [`ContactCard`] — the computed read model for a contact.
  /// Returns `None` if the contact does not exist. A dangling employer
  /// reference materialises as no employer.
  fn materialize(
    &self,
    contact_id: Uuid,
  ) -> impl Future<Output = Result<Option<ContactCard>, Self::Error>> + Send + '_;
}
