//! End-to-end hydration tests against an in-memory SQLite store.

use rolodex_core::{contact::NewContact, store::ContactStore};
use rolodex_store_sqlite::SqliteStore;
use rolodex_xml::{Error, hydrate_contact, hydrate_phone_number};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

const CONTACT_XML: &str = "<Contact>
  <first_name>Jane</first_name>
  <last_name>Doe</last_name>
  <about>Met at the spring conference.</about>
  <PhoneNumber>
    <phone_number>555-0100</phone_number>
    <Location><name>Work</name></Location>
  </PhoneNumber>
  <PhoneNumber>
    <phone_number>555-0199</phone_number>
    <Location><name>Fax</name></Location>
  </PhoneNumber>
  <EmailAddress>
    <email_address>jane@example.com</email_address>
    <Location><name>Home</name></Location>
  </EmailAddress>
  <WebSite>
    <url>https://example.com</url>
    <Location><name>Work</name></Location>
  </WebSite>
</Contact>";

#[tokio::test]
async fn hydrates_parent_and_all_deferred_children() {
  let s = store().await;
  let contact = hydrate_contact(&s, CONTACT_XML).await.unwrap();

  assert_eq!(contact.first_name.as_deref(), Some("Jane"));
  assert_eq!(contact.about, "Met at the spring conference.");

  // One parent row.
  let all = s.list_contacts(None).await.unwrap();
  assert_eq!(all.len(), 1);

  // Every deferred child landed, pointing back at the parent.
  let numbers = s.phone_numbers_for(contact.contact_id).await.unwrap();
  assert_eq!(numbers.len(), 2);
  assert!(numbers.iter().all(|n| n.contact_id == contact.contact_id));
  // Source order is preserved.
  assert_eq!(numbers[0].phone_number, "555-0100");
  assert_eq!(numbers[1].phone_number, "555-0199");

  let emails = s.email_addresses_for(contact.contact_id).await.unwrap();
  assert_eq!(emails.len(), 1);
  assert_eq!(emails[0].email_address, "jane@example.com");

  let sites = s.web_sites_for(contact.contact_id).await.unwrap();
  assert_eq!(sites.len(), 1);
  assert_eq!(sites[0].contact_id, contact.contact_id);
}

#[tokio::test]
async fn nested_location_blocks_become_location_rows() {
  let s = store().await;
  let contact = hydrate_contact(&s, CONTACT_XML).await.unwrap();

  let card = s.materialize(contact.contact_id).await.unwrap().unwrap();
  let (number, location) = &card.phone_numbers[0];
  assert_eq!(number.phone_number, "555-0100");
  assert_eq!(location.name, "Work");
  assert_eq!(location.slug, "work");

  // Each nested block produced its own row; nothing was deduplicated.
  let locations = s.list_locations().await.unwrap();
  assert_eq!(locations.len(), 4);
}

#[tokio::test]
async fn primary_resolution_over_hydrated_card() {
  let s = store().await;
  let contact = hydrate_contact(&s, CONTACT_XML).await.unwrap();

  let card = s.materialize(contact.contact_id).await.unwrap().unwrap();
  // Fax is excluded; the lone Work number wins.
  let primary = card.primary_phone_number().unwrap();
  assert_eq!(primary.phone_number, "555-0100");
}

#[tokio::test]
async fn hydrates_company_via_discriminant_tag() {
  let s = store().await;
  let contact = hydrate_contact(
    &s,
    "<Contact><name>Initech</name><is_company>True</is_company></Contact>",
  )
  .await
  .unwrap();
  assert!(contact.is_company);
  assert_eq!(contact.fullname(), "Initech");
}

#[tokio::test]
async fn detail_without_location_fails_after_parent_write() {
  let s = store().await;
  let err = hydrate_contact(
    &s,
    "<Contact>
       <first_name>Jane</first_name>
       <PhoneNumber><phone_number>555-0100</phone_number></PhoneNumber>
     </Contact>",
  )
  .await
  .unwrap_err();
  assert!(matches!(
    err,
    Error::MissingRequiredField { record: "PhoneNumber", field: "Location" }
  ));

  // The two-phase write has no rollback: the parent is already durable.
  let all = s.list_contacts(None).await.unwrap();
  assert_eq!(all.len(), 1);
  assert!(
    s.phone_numbers_for(all[0].contact_id)
      .await
      .unwrap()
      .is_empty()
  );
}

#[tokio::test]
async fn malformed_document_writes_nothing() {
  let s = store().await;
  let err = hydrate_contact(&s, "<Contact><first_name>Jane</Contact>")
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Xml(_)));
  assert!(s.list_contacts(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_tag_aborts_before_any_write() {
  let s = store().await;
  let err = hydrate_contact(
    &s,
    "<Contact><first_name>Jane</first_name><shoe_size>12</shoe_size></Contact>",
  )
  .await
  .unwrap_err();
  assert!(matches!(err, Error::UnknownTag { .. }));
  assert!(s.list_contacts(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn standalone_phone_number_hydration() {
  let s = store().await;
  let contact = s
    .add_contact(NewContact {
      first_name: Some("Jane".into()),
      last_name: Some("Doe".into()),
      ..NewContact::person()
    })
    .await
    .unwrap();

  let number = hydrate_phone_number(
    &s,
    "<PhoneNumber>
       <phone_number>555-0123</phone_number>
       <Location><name>Mobile</name><is_phone>true</is_phone></Location>
     </PhoneNumber>",
    contact.contact_id,
  )
  .await
  .unwrap();

  assert_eq!(number.contact_id, contact.contact_id);
  let location = s
    .get_location(number.location_id)
    .await
    .unwrap()
    .expect("hydrated location row");
  assert_eq!(location.name, "Mobile");
  assert!(location.is_phone);
}

#[tokio::test]
async fn invalid_email_payload_surfaces_store_error() {
  let s = store().await;
  let err = hydrate_contact(
    &s,
    "<Contact>
       <first_name>Jane</first_name>
       <EmailAddress>
         <email_address>not-an-email</email_address>
         <Location><name>Home</name></Location>
       </EmailAddress>
     </Contact>",
  )
  .await
  .unwrap_err();
  assert!(matches!(err, Error::Store(_)));
}
