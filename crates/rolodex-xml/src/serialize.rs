//! XML generation for locations, using `quick-xml`'s writer API.

use std::io::Cursor;

use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};

use rolodex_core::location::Location;

/// Serialize a location as a `<location>` document. Booleans render as
/// lowercase `true`/`false`, timestamps as `YYYY-MM-DD` calendar dates.
/// Feeding the output back through [`crate::parse::LocationDraft::parse_str`]
/// reproduces equivalent field values.
pub fn location_to_xml(location: &Location) -> String {
  let cursor = Cursor::new(Vec::new());
  let mut writer = Writer::new(cursor);

  write_start(&mut writer, "location");
  write_text_elem(&mut writer, "name", &location.name);
  write_text_elem(&mut writer, "slug", &location.slug);
  write_text_elem(&mut writer, "is_phone", bool_str(location.is_phone));
  write_text_elem(
    &mut writer,
    "is_street_address",
    bool_str(location.is_street_address),
  );
  write_text_elem(
    &mut writer,
    "date_added",
    &location.date_added.format("%Y-%m-%d").to_string(),
  );
  write_text_elem(
    &mut writer,
    "date_modified",
    &location.date_modified.format("%Y-%m-%d").to_string(),
  );
  write_end(&mut writer, "location");

  let bytes = writer.into_inner().into_inner();
  String::from_utf8(bytes).expect("writer emits UTF-8")
}

fn bool_str(b: bool) -> &'static str {
  if b { "true" } else { "false" }
}

// Writing into an in-memory cursor cannot fail.

fn write_start(w: &mut Writer<Cursor<Vec<u8>>>, tag: &str) {
  w.write_event(Event::Start(BytesStart::new(tag))).unwrap();
}

fn write_end(w: &mut Writer<Cursor<Vec<u8>>>, tag: &str) {
  w.write_event(Event::End(BytesEnd::new(tag))).unwrap();
}

fn write_text_elem(w: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) {
  write_start(w, tag);
  w.write_event(Event::Text(BytesText::new(text))).unwrap();
  write_end(w, tag);
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use rolodex_core::location::NewLocation;

  use super::*;
  use crate::parse::LocationDraft;

  #[test]
  fn serializes_expected_elements() {
    let mut location = NewLocation::new("Work").build().unwrap();
    location.is_phone = true;
    let xml = location_to_xml(&location);

    assert!(xml.starts_with("<location>"));
    assert!(xml.contains("<name>Work</name>"));
    assert!(xml.contains("<slug>work</slug>"));
    assert!(xml.contains("<is_phone>true</is_phone>"));
    assert!(xml.contains("<is_street_address>false</is_street_address>"));
    assert!(xml.ends_with("</location>"));
  }

  #[test]
  fn escapes_reserved_characters() {
    let location = NewLocation::new("R&D <lab>").build().unwrap();
    let xml = location_to_xml(&location);
    assert!(xml.contains("<name>R&amp;D &lt;lab&gt;</name>"));
  }

  #[test]
  fn round_trips_through_the_draft_parser() {
    let mut location = NewLocation::new("Head Office").build().unwrap();
    location.is_street_address = true;

    let xml = location_to_xml(&location);
    let draft = LocationDraft::parse_str(&xml).unwrap();
    let rebuilt = draft.build().unwrap();

    assert_eq!(rebuilt.name, location.name);
    assert_eq!(rebuilt.slug, location.slug);
    assert_eq!(rebuilt.is_phone, location.is_phone);
    assert_eq!(rebuilt.is_street_address, location.is_street_address);
    // Dates survive at calendar-day precision, the serialized granularity.
    assert_eq!(
      rebuilt.date_added.date_naive(),
      location.date_added.date_naive()
    );
    assert_eq!(
      rebuilt.date_modified.date_naive(),
      location.date_modified.date_naive()
    );
  }
}
