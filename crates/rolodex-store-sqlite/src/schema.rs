//! SQL schema for the Rolodex SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS contacts (
    contact_id    TEXT PRIMARY KEY,
    name          TEXT,            -- company display name; NULL for people
    first_name    TEXT,
    last_name     TEXT,
    middle_name   TEXT,
    suffix        TEXT,
    prefix        TEXT,
    title         TEXT,
    nickname      TEXT,
    slug          TEXT NOT NULL DEFAULT '',
    about         TEXT NOT NULL DEFAULT '',
    is_company    INTEGER NOT NULL DEFAULT 0,
    company_id    TEXT,            -- employer; no FK, dangling ids tolerated
    date_added    TEXT NOT NULL,   -- ISO 8601 UTC
    date_modified TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS locations (
    location_id       TEXT PRIMARY KEY,
    name              TEXT NOT NULL,
    slug              TEXT NOT NULL,
    is_phone          INTEGER NOT NULL DEFAULT 0,
    is_street_address INTEGER NOT NULL DEFAULT 0,
    weight            INTEGER NOT NULL DEFAULT 0,   -- 0..=10
    date_added        TEXT NOT NULL,
    date_modified     TEXT NOT NULL
);

-- Detail tables. Contacts own their details (cascade); locations are
-- referenced, never owned.

CREATE TABLE IF NOT EXISTS phone_numbers (
    phone_number_id TEXT PRIMARY KEY,
    contact_id      TEXT NOT NULL REFERENCES contacts(contact_id) ON DELETE CASCADE,
    phone_number    TEXT NOT NULL,
    location_id     TEXT NOT NULL REFERENCES locations(location_id),
    date_added      TEXT NOT NULL,
    date_modified   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS email_addresses (
    email_address_id TEXT PRIMARY KEY,
    contact_id       TEXT NOT NULL REFERENCES contacts(contact_id) ON DELETE CASCADE,
    email_address    TEXT NOT NULL,
    location_id      TEXT NOT NULL REFERENCES locations(location_id),
    date_added       TEXT NOT NULL,
    date_modified    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS instant_messengers (
    instant_messenger_id TEXT PRIMARY KEY,
    contact_id           TEXT NOT NULL REFERENCES contacts(contact_id) ON DELETE CASCADE,
    im_account           TEXT NOT NULL,
    service              TEXT NOT NULL DEFAULT 'other',
    location_id          TEXT NOT NULL REFERENCES locations(location_id),
    date_added           TEXT NOT NULL,
    date_modified        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS web_sites (
    web_site_id   TEXT PRIMARY KEY,
    contact_id    TEXT NOT NULL REFERENCES contacts(contact_id) ON DELETE CASCADE,
    url           TEXT NOT NULL,
    location_id   TEXT NOT NULL REFERENCES locations(location_id),
    date_added    TEXT NOT NULL,
    date_modified TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS street_addresses (
    street_address_id TEXT PRIMARY KEY,
    contact_id        TEXT NOT NULL REFERENCES contacts(contact_id) ON DELETE CASCADE,
    street            TEXT NOT NULL DEFAULT '',
    street2           TEXT NOT NULL DEFAULT '',
    city              TEXT NOT NULL DEFAULT '',
    province          TEXT NOT NULL DEFAULT '',
    postal_code       TEXT NOT NULL DEFAULT '',
    country           TEXT NOT NULL,
    location_id       TEXT NOT NULL REFERENCES locations(location_id),
    date_added        TEXT NOT NULL,
    date_modified     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS special_dates (
    special_date_id TEXT PRIMARY KEY,
    contact_id      TEXT NOT NULL REFERENCES contacts(contact_id) ON DELETE CASCADE,
    occasion        TEXT NOT NULL,
    date            TEXT NOT NULL,   -- YYYY-MM-DD
    every_year      INTEGER NOT NULL DEFAULT 1,
    date_added      TEXT NOT NULL,
    date_modified   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS groups (
    group_id      TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    slug          TEXT NOT NULL,
    about         TEXT NOT NULL DEFAULT '',
    date_added    TEXT NOT NULL,
    date_modified TEXT NOT NULL
);

-- Group membership, one table per member kind.
CREATE TABLE IF NOT EXISTS group_people (
    group_id   TEXT NOT NULL REFERENCES groups(group_id) ON DELETE CASCADE,
    contact_id TEXT NOT NULL REFERENCES contacts(contact_id) ON DELETE CASCADE,
    PRIMARY KEY (group_id, contact_id)
);

CREATE TABLE IF NOT EXISTS group_companies (
    group_id   TEXT NOT NULL REFERENCES groups(group_id) ON DELETE CASCADE,
    contact_id TEXT NOT NULL REFERENCES contacts(contact_id) ON DELETE CASCADE,
    PRIMARY KEY (group_id, contact_id)
);

CREATE INDEX IF NOT EXISTS phone_numbers_contact_idx      ON phone_numbers(contact_id);
CREATE INDEX IF NOT EXISTS email_addresses_contact_idx    ON email_addresses(contact_id);
CREATE INDEX IF NOT EXISTS instant_messengers_contact_idx ON instant_messengers(contact_id);
CREATE INDEX IF NOT EXISTS web_sites_contact_idx          ON web_sites(contact_id);
CREATE INDEX IF NOT EXISTS street_addresses_contact_idx   ON street_addresses(contact_id);
CREATE INDEX IF NOT EXISTS special_dates_contact_idx      ON special_dates(contact_id);
CREATE INDEX IF NOT EXISTS special_dates_date_idx         ON special_dates(date);

PRAGMA user_version = 1;
";
