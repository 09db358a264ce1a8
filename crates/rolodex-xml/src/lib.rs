//! XML hydration for Rolodex.
//!
//! Converts the contact-import XML vocabulary into persisted
//! [`rolodex_core`] records, and serializes locations back out. Parsing is
//! pure; hydration drives any [`rolodex_core::store::ContactStore`].
//!
//! # Quick start
//!
//! ```no_run
//! # async fn demo<S: rolodex_core::store::ContactStore>(store: &S) {
//! let xml = "<Contact>
//!   <first_name>Jane</first_name>
//!   <last_name>Doe</last_name>
//!   <PhoneNumber>
//!     <phone_number>555-0100</phone_number>
//!     <Location><name>Work</name></Location>
//!   </PhoneNumber>
//! </Contact>";
//! let contact = rolodex_xml::hydrate_contact(store, xml).await.unwrap();
//! println!("imported {}", contact.fullname());
//! # }
//! ```

pub mod error;
pub mod hydrate;
pub mod parse;
pub mod serialize;

pub use error::{Error, Result};
pub use hydrate::{
  hydrate_contact, hydrate_email_address, hydrate_phone_number,
  hydrate_street_address, hydrate_web_site,
};
pub use serialize::location_to_xml;
