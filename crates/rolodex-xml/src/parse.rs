//! XML parsing — a small element tree plus typed drafts.
//!
//! Pipeline:
//!   raw &str
//!     └─ parse_element()       → Element tree
//!          └─ *Draft::parse()  → staged field extraction
//!               └─ hydrate::*  → persisted records
//!
//! Uses a hand-written loop over `quick-xml` events. Tag-to-field mapping is
//! strict: a child tag naming no known field is rejected rather than
//! assigned permissively.

use chrono::NaiveDate;

use rolodex_core::{contact::NewContact, location::MAX_WEIGHT};

use crate::error::{Error, Result};

// ─── Element tree ────────────────────────────────────────────────────────────

/// One XML element: its tag, accumulated text content, and child elements.
#[derive(Debug, Clone)]
pub struct Element {
  pub tag:      String,
  pub text:     String,
  pub children: Vec<Element>,
}

impl Element {
  fn new(tag: String) -> Self {
    Self {
      tag,
      text: String::new(),
      children: Vec::new(),
    }
  }
}

/// Parse a document into its root element. Fails on malformed input before
/// any field assignment happens downstream.
pub fn parse_element(xml: &str) -> Result<Element> {
  let mut reader = quick_xml::Reader::from_reader(xml.as_bytes());
  reader.config_mut().trim_text(true);

  let mut stack: Vec<Element> = Vec::new();
  let mut root: Option<Element> = None;
  let mut buf = Vec::new();

  loop {
    match reader.read_event_into(&mut buf) {
      Ok(quick_xml::events::Event::Start(ref e)) => {
        let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        stack.push(Element::new(tag));
      }
      Ok(quick_xml::events::Event::Empty(ref e)) => {
        let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let element = Element::new(tag);
        match stack.last_mut() {
          Some(parent) => parent.children.push(element),
          None if root.is_none() => root = Some(element),
          None => return Err(Error::Xml("multiple root elements".into())),
        }
      }
      Ok(quick_xml::events::Event::Text(ref t)) => {
        if let Some(top) = stack.last_mut() {
          let text = t.unescape().map_err(|e| Error::Xml(e.to_string()))?;
          top.text.push_str(&text);
        }
      }
      Ok(quick_xml::events::Event::End(_)) => {
        // Mismatched end tags are already rejected by the reader.
        let element = match stack.pop() {
          Some(el) => el,
          None => return Err(Error::Xml("unexpected end tag".into())),
        };
        match stack.last_mut() {
          Some(parent) => parent.children.push(element),
          None if root.is_none() => root = Some(element),
          None => return Err(Error::Xml("multiple root elements".into())),
        }
      }
      Ok(quick_xml::events::Event::Eof) => break,
      Err(e) => return Err(Error::Xml(e.to_string())),
      _ => {}
    }
    buf.clear();
  }

  if !stack.is_empty() {
    return Err(Error::Xml("unclosed element".into()));
  }
  root.ok_or_else(|| Error::Xml("no root element".into()))
}

// ─── Value lexers ────────────────────────────────────────────────────────────

fn parse_bool(field: &'static str, value: &str) -> Result<bool> {
  match value.trim() {
    "true" | "True" | "1" => Ok(true),
    "false" | "False" | "0" => Ok(false),
    other => Err(Error::InvalidValue {
      field,
      value: other.to_string(),
    }),
  }
}

fn parse_weight(value: &str) -> Result<u8> {
  value
    .trim()
    .parse::<u8>()
    .ok()
    .filter(|w| *w <= MAX_WEIGHT)
    .ok_or_else(|| Error::InvalidValue {
      field: "weight",
      value: value.to_string(),
    })
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
    Error::InvalidValue {
      field,
      value: value.to_string(),
    }
  })
}

// ─── Contact draft ───────────────────────────────────────────────────────────

/// The detail types deferred at the Contact level. Other detail types are
/// not part of the import vocabulary's top-level deferral set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
  PhoneNumber,
  EmailAddress,
  StreetAddress,
  WebSite,
}

impl DetailKind {
  fn from_tag(tag: &str) -> Option<Self> {
    Some(match tag {
      "PhoneNumber" => Self::PhoneNumber,
      "EmailAddress" => Self::EmailAddress,
      "StreetAddress" => Self::StreetAddress,
      "WebSite" => Self::WebSite,
      _ => return None,
    })
  }
}

/// A detail child held back until the parent contact has an identity.
#[derive(Debug, Clone)]
pub struct DeferredDetail {
  pub kind:    DetailKind,
  pub element: Element,
}

/// Stage 1 of contact hydration: scalar fields extracted, detail children
/// deferred in source order.
#[derive(Debug)]
pub struct ContactDraft {
  pub fields:   NewContact,
  pub deferred: Vec<DeferredDetail>,
}

impl ContactDraft {
  pub fn parse(xml: &str) -> Result<Self> {
    let root = parse_element(xml)?;
    Self::from_element(root)
  }

  fn from_element(root: Element) -> Result<Self> {
    let mut fields = NewContact::person();
    let mut deferred = Vec::new();

    for child in root.children {
      if let Some(kind) = DetailKind::from_tag(&child.tag) {
        deferred.push(DeferredDetail {
          kind,
          element: child,
        });
        continue;
      }
      match child.tag.as_str() {
        "name" => fields.name = Some(child.text),
        "first_name" => fields.first_name = Some(child.text),
        "last_name" => fields.last_name = Some(child.text),
        "middle_name" => fields.middle_name = Some(child.text),
        "suffix" => fields.suffix = Some(child.text),
        "prefix" => fields.prefix = Some(child.text),
        "title" => fields.title = Some(child.text),
        "nickname" => fields.nickname = Some(child.text),
        "slug" => fields.slug = Some(child.text),
        "about" => fields.about = child.text,
        "is_company" => {
          fields.is_company = parse_bool("is_company", &child.text)?;
        }
        _ => {
          return Err(Error::UnknownTag {
            record: "Contact",
            tag:    child.tag,
          });
        }
      }
    }

    Ok(Self { fields, deferred })
  }
}

// ─── Location draft ──────────────────────────────────────────────────────────

/// Field values extracted from a `<Location>` block. Dates from the source
/// document survive into the built record; absent fields take defaults.
#[derive(Debug, Default)]
pub struct LocationDraft {
  pub name:              Option<String>,
  pub slug:              Option<String>,
  pub is_phone:          Option<bool>,
  pub is_street_address: Option<bool>,
  pub weight:            Option<u8>,
  pub date_added:        Option<NaiveDate>,
  pub date_modified:     Option<NaiveDate>,
}

impl LocationDraft {
  pub fn parse_str(xml: &str) -> Result<Self> {
    let root = parse_element(xml)?;
    Self::parse(&root)
  }

  pub fn parse(element: &Element) -> Result<Self> {
    let mut draft = Self::default();
    for child in &element.children {
      match child.tag.as_str() {
        "name" => draft.name = Some(child.text.clone()),
        "slug" => draft.slug = Some(child.text.clone()),
        "is_phone" => {
          draft.is_phone = Some(parse_bool("is_phone", &child.text)?);
        }
        "is_street_address" => {
          draft.is_street_address =
            Some(parse_bool("is_street_address", &child.text)?);
        }
        "weight" => draft.weight = Some(parse_weight(&child.text)?),
        "date_added" => {
          draft.date_added = Some(parse_date("date_added", &child.text)?);
        }
        "date_modified" => {
          draft.date_modified = Some(parse_date("date_modified", &child.text)?);
        }
        _ => {
          return Err(Error::UnknownTag {
            record: "Location",
            tag:    child.tag.clone(),
          });
        }
      }
    }
    Ok(draft)
  }

  /// Resolve the draft into a full record with a fresh identity. `name` is
  /// required; the slug falls back to a slugified name; drafted dates are
  /// kept (midnight UTC), absent ones default to now.
  pub fn build(self) -> Result<rolodex_core::location::Location> {
    use chrono::{NaiveTime, Utc};
    use rolodex_core::slug::slugify;
    use uuid::Uuid;

    let name = match self.name {
      Some(ref n) if !n.trim().is_empty() => n.clone(),
      _ => {
        return Err(Error::MissingRequiredField {
          record: "Location",
          field:  "name",
        });
      }
    };
    let slug = match self.slug {
      Some(ref s) if !s.trim().is_empty() => s.clone(),
      _ => slugify(&name),
    };
    let now = Utc::now();
    let midnight =
      |d: NaiveDate| d.and_time(NaiveTime::MIN).and_utc();
    Ok(rolodex_core::location::Location {
      location_id:       Uuid::new_v4(),
      name,
      slug,
      is_phone:          self.is_phone.unwrap_or(false),
      is_street_address: self.is_street_address.unwrap_or(false),
      weight:            self.weight.unwrap_or(0),
      date_added:        self.date_added.map(midnight).unwrap_or(now),
      date_modified:     self.date_modified.map(midnight).unwrap_or(now),
    })
  }
}

// ─── Detail drafts ───────────────────────────────────────────────────────────

/// Shared shape for the deferred detail types: a payload field set plus the
/// recursively-parsed `<Location>` child.
#[derive(Debug, Default)]
pub struct PhoneNumberDraft {
  pub phone_number: Option<String>,
  pub location:     Option<LocationDraft>,
}

impl PhoneNumberDraft {
  pub fn parse(element: &Element) -> Result<Self> {
    let mut draft = Self::default();
    for child in &element.children {
      match child.tag.as_str() {
        "phone_number" => draft.phone_number = Some(child.text.clone()),
        "Location" => draft.location = Some(LocationDraft::parse(child)?),
        _ => {
          return Err(Error::UnknownTag {
            record: "PhoneNumber",
            tag:    child.tag.clone(),
          });
        }
      }
    }
    Ok(draft)
  }
}

#[derive(Debug, Default)]
pub struct EmailAddressDraft {
  pub email_address: Option<String>,
  pub location:      Option<LocationDraft>,
}

impl EmailAddressDraft {
  pub fn parse(element: &Element) -> Result<Self> {
    let mut draft = Self::default();
    for child in &element.children {
      match child.tag.as_str() {
        "email_address" => draft.email_address = Some(child.text.clone()),
        "Location" => draft.location = Some(LocationDraft::parse(child)?),
        _ => {
          return Err(Error::UnknownTag {
            record: "EmailAddress",
            tag:    child.tag.clone(),
          });
        }
      }
    }
    Ok(draft)
  }
}

#[derive(Debug, Default)]
pub struct WebSiteDraft {
  pub url:      Option<String>,
  pub location: Option<LocationDraft>,
}

impl WebSiteDraft {
  pub fn parse(element: &Element) -> Result<Self> {
    let mut draft = Self::default();
    for child in &element.children {
      match child.tag.as_str() {
        "url" => draft.url = Some(child.text.clone()),
        "Location" => draft.location = Some(LocationDraft::parse(child)?),
        _ => {
          return Err(Error::UnknownTag {
            record: "WebSite",
            tag:    child.tag.clone(),
          });
        }
      }
    }
    Ok(draft)
  }
}

#[derive(Debug, Default)]
pub struct StreetAddressDraft {
  pub street:      Option<String>,
  pub street2:     Option<String>,
  pub city:        Option<String>,
  pub province:    Option<String>,
  pub postal_code: Option<String>,
  pub country:     Option<String>,
  pub location:    Option<LocationDraft>,
}

impl StreetAddressDraft {
  pub fn parse(element: &Element) -> Result<Self> {
    let mut draft = Self::default();
    for child in &element.children {
      match child.tag.as_str() {
        "street" => draft.street = Some(child.text.clone()),
        "street2" => draft.street2 = Some(child.text.clone()),
        "city" => draft.city = Some(child.text.clone()),
        "province" => draft.province = Some(child.text.clone()),
        "postal_code" => draft.postal_code = Some(child.text.clone()),
        "country" => draft.country = Some(child.text.clone()),
        "Location" => draft.location = Some(LocationDraft::parse(child)?),
        _ => {
          return Err(Error::UnknownTag {
            record: "StreetAddress",
            tag:    child.tag.clone(),
          });
        }
      }
    }
    Ok(draft)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_element_builds_tree() {
    let root = parse_element(
      "<Contact><first_name>Jane</first_name>\
       <PhoneNumber><phone_number>555</phone_number></PhoneNumber></Contact>",
    )
    .unwrap();
    assert_eq!(root.tag, "Contact");
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].tag, "first_name");
    assert_eq!(root.children[0].text, "Jane");
    assert_eq!(root.children[1].children[0].text, "555");
  }

  #[test]
  fn parse_element_unescapes_text() {
    let root = parse_element("<name>Smith &amp; Sons</name>").unwrap();
    assert_eq!(root.text, "Smith & Sons");
  }

  #[test]
  fn malformed_xml_is_a_parse_error() {
    let err = parse_element("<Contact><name>Jane</Contact>").unwrap_err();
    assert!(matches!(err, Error::Xml(_)));
  }

  #[test]
  fn unclosed_element_is_a_parse_error() {
    let err = parse_element("<Contact><name>Jane</name>").unwrap_err();
    assert!(matches!(err, Error::Xml(_)));
  }

  #[test]
  fn contact_draft_splits_scalars_and_deferred() {
    let draft = ContactDraft::parse(
      "<Contact>
         <first_name>Jane</first_name>
         <last_name>Doe</last_name>
         <PhoneNumber><phone_number>555-0100</phone_number></PhoneNumber>
         <nickname>JD</nickname>
         <WebSite><url>https://example.com</url></WebSite>
       </Contact>",
    )
    .unwrap();

    assert_eq!(draft.fields.first_name.as_deref(), Some("Jane"));
    assert_eq!(draft.fields.nickname.as_deref(), Some("JD"));
    assert!(!draft.fields.is_company);

    // Deferred items keep their source order.
    assert_eq!(draft.deferred.len(), 2);
    assert_eq!(draft.deferred[0].kind, DetailKind::PhoneNumber);
    assert_eq!(draft.deferred[1].kind, DetailKind::WebSite);
  }

  #[test]
  fn contact_draft_accepts_is_company_flag() {
    let draft = ContactDraft::parse(
      "<Contact><name>Initech</name><is_company>True</is_company></Contact>",
    )
    .unwrap();
    assert!(draft.fields.is_company);
    assert_eq!(draft.fields.name.as_deref(), Some("Initech"));
  }

  #[test]
  fn contact_draft_rejects_unknown_tag() {
    let err =
      ContactDraft::parse("<Contact><shoe_size>12</shoe_size></Contact>")
        .unwrap_err();
    assert!(
      matches!(err, Error::UnknownTag { record: "Contact", ref tag } if tag == "shoe_size")
    );
  }

  #[test]
  fn instant_messenger_is_not_deferred_vocabulary() {
    // IM blocks were never part of the top-level import vocabulary; with
    // strict tags they are rejected rather than silently absorbed.
    let err = ContactDraft::parse(
      "<Contact><InstantMessenger><im_account>x</im_account></InstantMessenger></Contact>",
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnknownTag { .. }));
  }

  #[test]
  fn location_draft_parses_all_fields() {
    let draft = LocationDraft::parse_str(
      "<Location>
         <name>Work</name>
         <slug>work</slug>
         <is_phone>False</is_phone>
         <is_street_address>True</is_street_address>
         <weight>3</weight>
         <date_added>2020-01-02</date_added>
       </Location>",
    )
    .unwrap();
    assert_eq!(draft.name.as_deref(), Some("Work"));
    assert_eq!(draft.is_phone, Some(false));
    assert_eq!(draft.is_street_address, Some(true));
    assert_eq!(draft.weight, Some(3));
    assert_eq!(
      draft.date_added,
      NaiveDate::from_ymd_opt(2020, 1, 2)
    );
  }

  #[test]
  fn location_draft_rejects_bad_values() {
    assert!(matches!(
      LocationDraft::parse_str("<Location><is_phone>maybe</is_phone></Location>")
        .unwrap_err(),
      Error::InvalidValue { field: "is_phone", .. }
    ));
    assert!(matches!(
      LocationDraft::parse_str("<Location><weight>11</weight></Location>")
        .unwrap_err(),
      Error::InvalidValue { field: "weight", .. }
    ));
    assert!(matches!(
      LocationDraft::parse_str(
        "<Location><date_added>01/02/2020</date_added></Location>"
      )
      .unwrap_err(),
      Error::InvalidValue { field: "date_added", .. }
    ));
  }

  #[test]
  fn location_build_requires_name() {
    let err = LocationDraft::default().build().unwrap_err();
    assert!(matches!(
      err,
      Error::MissingRequiredField { record: "Location", field: "name" }
    ));
  }

  #[test]
  fn location_build_defaults_and_drafted_dates() {
    let mut draft = LocationDraft::default();
    draft.name = Some("Head Office".into());
    draft.date_added = NaiveDate::from_ymd_opt(2019, 6, 1);
    let location = draft.build().unwrap();
    assert_eq!(location.slug, "head-office");
    assert!(!location.is_phone);
    assert_eq!(location.weight, 0);
    assert_eq!(
      location.date_added.date_naive(),
      NaiveDate::from_ymd_opt(2019, 6, 1).unwrap()
    );
  }

  #[test]
  fn street_address_draft_parses_components() {
    let root = parse_element(
      "<StreetAddress>
         <street>1 Main St</street>
         <city>Springfield</city>
         <country>Canada</country>
         <Location><name>Home</name></Location>
       </StreetAddress>",
    )
    .unwrap();
    let draft = StreetAddressDraft::parse(&root).unwrap();
    assert_eq!(draft.street.as_deref(), Some("1 Main St"));
    assert_eq!(draft.country.as_deref(), Some("Canada"));
    assert_eq!(
      draft.location.as_ref().and_then(|l| l.name.as_deref()),
      Some("Home")
    );
  }

  #[test]
  fn detail_draft_rejects_unknown_tag() {
    let root =
      parse_element("<PhoneNumber><extension>12</extension></PhoneNumber>")
        .unwrap();
    let err = PhoneNumberDraft::parse(&root).unwrap_err();
    assert!(
      matches!(err, Error::UnknownTag { record: "PhoneNumber", ref tag } if tag == "extension")
    );
  }
}
