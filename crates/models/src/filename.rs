/// Extensions accepted for upload and surfaced by the listing scan.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "gif"];

/// Whether a filename carries an allowed image extension. A name without a
/// `.` has no extension and is rejected; the check is case-insensitive.
pub fn is_allowed(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Filename minus its final extension; the photo id.
pub fn file_stem(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    }
}

/// Collapse an uploader-supplied filename to a filesystem-safe basename.
/// ASCII alphanumerics, `.`, `-` and `_` survive; every other character
/// (including path separators) becomes `_`, and leading dots are stripped so
/// the stored file can never be hidden or an alias for the parent directory.
pub fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}
