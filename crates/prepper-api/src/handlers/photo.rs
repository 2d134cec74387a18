//! Photo upload, download and delete handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use uuid::Uuid;

use prepper_core::error::AppError;
use prepper_service::item::{PhotoUpload, PhotoView};

use crate::dto::response::SuccessResponse;
use crate::error::ApiError;
use crate::extractors::{ApiPath, AuthUser};
use crate::state::AppState;

/// Photos never change once stored.
const PHOTO_CACHE_CONTROL: &str = "public, max-age=31536000";

/// POST /api/photos/upload: multipart `file` + `itemId`
pub async fn upload_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<PhotoView>), ApiError> {
    let mut multipart = multipart
        .map_err(|e| AppError::validation(format!("Multipart error: {}", e.body_text())))?;
    let mut item_id: Option<Uuid> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        match field.name().unwrap_or("") {
            "itemId" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                item_id = Some(
                    Uuid::parse_str(text.trim())
                        .map_err(|_| AppError::validation("Invalid itemId"))?,
                );
            }
            "file" => {
                file_name = field.file_name().map(String::from);
                content_type = field.content_type().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let item_id = item_id.ok_or_else(|| AppError::validation("Missing itemId"))?;
    let data = data.ok_or_else(|| AppError::validation("Missing file"))?;

    let photo = state
        .photo_service
        .upload(
            &auth,
            PhotoUpload {
                item_id,
                file_name,
                content_type,
                data,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PhotoView::from(photo))))
}

/// GET /api/photos/{id}
pub async fn get_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, ApiError> {
    let (photo, object) = state.photo_service.fetch(&auth, id).await?;
    let content_type = object.content_type.unwrap_or(photo.mime_type);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, object.data.len())
        .header(header::CACHE_CONTROL, PHOTO_CACHE_CONTROL)
        .body(Body::from(object.data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// DELETE /api/photos/{id}
pub async fn delete_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.photo_service.delete(&auth, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
