//! Service layer for the photo store.
//! - Owns every filesystem operation against the upload directory.
//! - Keeps validation rules in `models` and error types in `errors`.

pub mod errors;
pub mod photo_store;
