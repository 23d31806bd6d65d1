use axum::body::Bytes;
use axum::extract::{Host, Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use models::filename;
use models::photo::{Photo, DEFAULT_CATEGORY};
use service::errors::ServiceError;

use crate::errors::ApiError;
use crate::routes::AppState;

/// GET /api/photos — every stored photo, newest first. Title falls back to
/// the stored filename and description/category to their defaults because
/// upload-time metadata is never persisted.
pub async fn list_photos(
    State(state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
) -> Result<Json<Vec<Photo>>, ApiError> {
    let scheme = request_scheme(&headers);
    let entries = state.store.list().await?;
    let photos = entries
        .into_iter()
        .map(|entry| Photo {
            id: filename::file_stem(&entry.stored_name).to_string(),
            url: photo_url(scheme, &host, &entry.stored_name),
            title: entry.stored_name,
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            date_added: entry.date_added,
        })
        .collect();
    Ok(Json(photos))
}

/// POST /api/upload — multipart form with a required `file` part and
/// optional `title`/`description`/`category` text fields. The whole form is
/// drained before validation so field order does not matter.
pub async fn upload_photo(
    State(state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Photo>), ApiError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut category: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::Validation(e.to_string()))?
    {
        match field.name() {
            Some("file") => {
                let original = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ServiceError::Validation(e.to_string()))?;
                file = Some((original, data));
            }
            Some("title") => title = read_text(field).await?,
            Some("description") => description = read_text(field).await?,
            Some("category") => category = read_text(field).await?,
            _ => {}
        }
    }

    let (original, data) = match file {
        Some((name, data)) if !name.is_empty() => (name, data),
        _ => return Err(ServiceError::Validation("file required".into()).into()),
    };

    let saved = state.store.save(&original, &data).await?;
    info!(stored = %saved.stored_name, bytes = data.len(), "photo uploaded");

    let photo = Photo {
        id: filename::file_stem(&saved.stored_name).to_string(),
        url: photo_url(request_scheme(&headers), &host, &saved.stored_name),
        title: title.unwrap_or_else(|| saved.sanitized_name.clone()),
        description: description.unwrap_or_default(),
        category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        date_added: saved.date_added,
    };
    Ok((StatusCode::CREATED, Json(photo)))
}

/// GET /uploads/{filename} — raw bytes of one stored file. The store layer
/// rejects anything that is not a plain filename inside the upload
/// directory, so traversal attempts come back as 404.
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = state.store.read(&name).await?;
    Ok(([(header::CONTENT_TYPE, content_type_for(&name))], bytes).into_response())
}

/// Read an optional text field; empty strings count as absent, matching the
/// original `form.get(..) or default` fallback behavior.
async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<Option<String>, ApiError> {
    let text = field
        .text()
        .await
        .map_err(|e| ServiceError::Validation(e.to_string()))?;
    Ok(if text.is_empty() { None } else { Some(text) })
}

/// Scheme for absolute URLs. Behind TLS termination the proxy announces the
/// outer scheme via `X-Forwarded-Proto`; direct connections are plain http.
fn request_scheme(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http")
}

fn photo_url(scheme: &str, host: &str, stored_name: &str) -> String {
    format!("{scheme}://{host}/uploads/{stored_name}")
}

/// Content type from the stored extension. The store only ever holds the
/// allow-listed image types; anything else is served opaquely.
fn content_type_for(name: &str) -> &'static str {
    match name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_covers_the_allow_list() {
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.webp"), "image/webp");
        assert_eq!(content_type_for("a.gif"), "image/gif");
        assert_eq!(content_type_for("mystery"), "application/octet-stream");
    }

    #[test]
    fn photo_url_is_absolute_under_uploads() {
        assert_eq!(
            photo_url("http", "localhost:5000", "x.png"),
            "http://localhost:5000/uploads/x.png"
        );
        assert_eq!(
            photo_url("https", "photos.example.com", "x.png"),
            "https://photos.example.com/uploads/x.png"
        );
    }

    #[test]
    fn scheme_follows_the_forwarded_proto_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_scheme(&headers), "http");
        headers.insert("x-forwarded-proto", "https".parse().unwrap());
        assert_eq!(request_scheme(&headers), "https");
    }
}
