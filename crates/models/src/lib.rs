//! Domain types and naming rules for the photo store.
//! - `photo` holds the wire-level record returned by the API.
//! - `filename` holds the extension allow-list and sanitization rules
//!   shared by upload validation and the listing scan.

pub mod filename;
pub mod photo;
