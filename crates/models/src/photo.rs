use serde::{Deserialize, Serialize};

/// Category reported for every listed photo. Upload-time categories are not
/// persisted anywhere, so relisting always falls back to this value.
pub const DEFAULT_CATEGORY: &str = "Abstract";

/// Wire-level photo record. Derived live from the stored filename and the
/// file's filesystem metadata; never written to disk as a structured record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Stored filename minus its final extension.
    pub id: String,
    /// Absolute URL under `/uploads/`, built from the request host.
    pub url: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// File mtime in epoch milliseconds.
    pub date_added: i64,
}
