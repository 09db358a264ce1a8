//! Two-phase hydration — XML fragments into persisted records.
//!
//! The ordering contract is explicit: the parent contact is persisted first
//! (phase one assigns its identity), then each deferred detail child is
//! built, pointed at the parent, and persisted in source order (phase two),
//! then the parent is saved once more to flush. There is no transaction
//! around the phases; a child failure aborts hydration with the parent
//! already durable, matching the layer this replaces. Callers owning a
//! transactional store can wrap the call.

use tracing::debug;
use uuid::Uuid;

use rolodex_core::{
  contact::Contact,
  detail::{
    EmailAddress, NewEmailAddress, NewPhoneNumber, NewStreetAddress,
    NewWebSite, PhoneNumber, StreetAddress, WebSite,
  },
  store::ContactStore,
};

use crate::{
  error::{Error, Result},
  parse::{
    ContactDraft, DetailKind, Element, EmailAddressDraft, LocationDraft,
    PhoneNumberDraft, StreetAddressDraft, WebSiteDraft, parse_element,
  },
};

fn store_err<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}

// ─── Contact hydration ───────────────────────────────────────────────────────

/// Hydrate a `<Contact>` document: scalar fields, then each deferred detail
/// child against the persisted parent. Returns the re-saved contact.
pub async fn hydrate_contact<S>(store: &S, xml: &str) -> Result<Contact>
where
  S: ContactStore,
{
  // Stage 1: parse scalar fields and collect the deferred worklist.
  let ContactDraft { fields, deferred } = ContactDraft::parse(xml)?;

  // Stage 2: persist the parent; its identity becomes usable for children.
  let contact = store.add_contact(fields).await.map_err(store_err)?;
  debug!(
    contact_id = %contact.contact_id,
    deferred = deferred.len(),
    "hydrated contact scalars"
  );

  // Stage 3: build and persist the children, in source order.
  for item in deferred {
    match item.kind {
      DetailKind::PhoneNumber => {
        hydrate_phone_element(store, &item.element, contact.contact_id)
          .await?;
      }
      DetailKind::EmailAddress => {
        hydrate_email_element(store, &item.element, contact.contact_id)
          .await?;
      }
      DetailKind::StreetAddress => {
        hydrate_street_element(store, &item.element, contact.contact_id)
          .await?;
      }
      DetailKind::WebSite => {
        hydrate_web_site_element(store, &item.element, contact.contact_id)
          .await?;
      }
    }
  }

  // Stage 4: flush the parent.
  let contact = store.save_contact(contact).await.map_err(store_err)?;
  debug!(contact_id = %contact.contact_id, "hydration complete");
  Ok(contact)
}

// ─── Detail hydration ────────────────────────────────────────────────────────

/// Persist the detail's nested `<Location>` block and return its identity.
/// The location must come first: the detail row needs the reference.
async fn hydrate_location<S>(
  store: &S,
  draft: Option<LocationDraft>,
  record: &'static str,
) -> Result<Uuid>
where
  S: ContactStore,
{
  let draft = draft.ok_or(Error::MissingRequiredField {
    record,
    field: "Location",
  })?;
  let location = draft.build()?;
  let location = store.save_location(location).await.map_err(store_err)?;
  debug!(location_id = %location.location_id, name = %location.name, "hydrated location");
  Ok(location.location_id)
}

async fn hydrate_phone_element<S>(
  store: &S,
  element: &Element,
  contact_id: Uuid,
) -> Result<PhoneNumber>
where
  S: ContactStore,
{
  let draft = PhoneNumberDraft::parse(element)?;
  let location_id =
    hydrate_location(store, draft.location, "PhoneNumber").await?;
  let phone_number = draft.phone_number.ok_or(Error::MissingRequiredField {
    record: "PhoneNumber",
    field:  "phone_number",
  })?;
  store
    .add_phone_number(NewPhoneNumber {
      contact_id,
      phone_number,
      location_id,
    })
    .await
    .map_err(store_err)
}

async fn hydrate_email_element<S>(
  store: &S,
  element: &Element,
  contact_id: Uuid,
) -> Result<EmailAddress>
where
  S: ContactStore,
{
  let draft = EmailAddressDraft::parse(element)?;
  let location_id =
    hydrate_location(store, draft.location, "EmailAddress").await?;
  let email_address = draft.email_address.ok_or(Error::MissingRequiredField {
    record: "EmailAddress",
    field:  "email_address",
  })?;
  store
    .add_email_address(NewEmailAddress {
      contact_id,
      email_address,
      location_id,
    })
    .await
    .map_err(store_err)
}

async fn hydrate_web_site_element<S>(
  store: &S,
  element: &Element,
  contact_id: Uuid,
) -> Result<WebSite>
where
  S: ContactStore,
{
  let draft = WebSiteDraft::parse(element)?;
  let location_id = hydrate_location(store, draft.location, "WebSite").await?;
  let url = draft.url.ok_or(Error::MissingRequiredField {
    record: "WebSite",
    field:  "url",
  })?;
  store
    .add_web_site(NewWebSite {
      contact_id,
      url,
      location_id,
    })
    .await
    .map_err(store_err)
}

async fn hydrate_street_element<S>(
  store: &S,
  element: &Element,
  contact_id: Uuid,
) -> Result<StreetAddress>
where
  S: ContactStore,
{
  let draft = StreetAddressDraft::parse(element)?;
  let location_id =
    hydrate_location(store, draft.location, "StreetAddress").await?;
  let country = draft.country.ok_or(Error::MissingRequiredField {
    record: "StreetAddress",
    field:  "country",
  })?;
  store
    .add_street_address(NewStreetAddress {
      contact_id,
      street: draft.street.unwrap_or_default(),
      street2: draft.street2.unwrap_or_default(),
      city: draft.city.unwrap_or_default(),
      province: draft.province.unwrap_or_default(),
      postal_code: draft.postal_code.unwrap_or_default(),
      country,
      location_id,
    })
    .await
    .map_err(store_err)
}

// ─── Standalone entry points ─────────────────────────────────────────────────
//
// Mirror the per-record import paths: a single detail fragment hydrated
// against an already-persisted contact.

pub async fn hydrate_phone_number<S>(
  store: &S,
  xml: &str,
  contact_id: Uuid,
) -> Result<PhoneNumber>
where
  S: ContactStore,
{
  let element = parse_element(xml)?;
  hydrate_phone_element(store, &element, contact_id).await
}

pub async fn hydrate_email_address<S>(
  store: &S,
  xml: &str,
  contact_id: Uuid,
) -> Result<EmailAddress>
where
  S: ContactStore,
{
  let element = parse_element(xml)?;
  hydrate_email_element(store, &element, contact_id).await
}

pub async fn hydrate_web_site<S>(
  store: &S,
  xml: &str,
  contact_id: Uuid,
) -> Result<WebSite>
where
  S: ContactStore,
{
  let element = parse_element(xml)?;
  hydrate_web_site_element(store, &element, contact_id).await
}

pub async fn hydrate_street_address<S>(
  store: &S,
  xml: &str,
  contact_id: Uuid,
) -> Result<StreetAddress>
where
  S: ContactStore,
{
  let element = parse_element(xml)?;
  hydrate_street_element(store, &element, contact_id).await
}
