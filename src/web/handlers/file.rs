//! File handlers.

use axum::{
    body::Body,
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};

use crate::web::dto::{FileResponse, FilenameQuery, ListQuery, RenameRequest};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// Generate a safe Content-Disposition header value for downloads.
///
/// Control characters are stripped and quotes and backslashes replaced so
/// a filename can never inject additional header content.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    format!("attachment; filename=\"{}\"", sanitized)
}

/// POST /file?filename= - Upload a file.
///
/// The content arrives as the `file` part of a multipart form. An empty
/// or missing part is rejected with 400.
pub async fn upload_file(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<FilenameQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let mut payload: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("failed to read file part: {e}")))?;
            payload = Some(bytes.to_vec());
        }
    }

    let payload = payload.ok_or_else(|| ApiError::bad_request("missing 'file' part"))?;

    let record = state
        .files
        .upload(user.id, &query.filename, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /file?filename= - Download a file's content.
pub async fn download_file(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<FilenameQuery>,
) -> Result<Response, ApiError> {
    let content = state.files.download(user.id, &query.filename).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&query.filename),
        )
        .body(Body::from(content))
        .map_err(|e| ApiError::internal(format!("failed to build response: {e}")))?;

    Ok(response)
}

/// GET /list?limit= - List the caller's files in upload order.
pub async fn list_files(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let records = state.files.list(user.id, query.limit).await?;

    Ok(Json(records.into_iter().map(FileResponse::from).collect()))
}

/// PUT /file?filename= - Rename a file.
pub async fn rename_file(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<FilenameQuery>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<FileResponse>, ApiError> {
    let record = state
        .files
        .rename(user.id, &query.filename, &req.filename)
        .await?;

    Ok(Json(record.into()))
}

/// DELETE /file?filename= - Delete a file.
pub async fn delete_file(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<FilenameQuery>,
) -> Result<StatusCode, ApiError> {
    state.files.delete(user.id, &query.filename).await?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_plain() {
        assert_eq!(
            content_disposition_header("a.txt"),
            "attachment; filename=\"a.txt\""
        );
    }

    #[test]
    fn test_content_disposition_strips_injection() {
        let value = content_disposition_header("evil\r\nSet-Cookie: x\"");
        assert!(!value.contains('\r'));
        assert!(!value.contains('\n'));
        assert!(!value.contains("\"\""));
    }
}
