//! Core types and trait definitions for the Rolodex contact data layer.
//!
//! This crate is deliberately free of XML and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod card;
pub mod contact;
pub mod detail;
pub mod error;
pub mod group;
pub mod location;
pub mod primary;
pub mod simplify;
pub mod slug;
pub mod store;
pub mod validation;

pub use error::{Error, Result};
