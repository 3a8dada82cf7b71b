//! Multipart picture extraction shared by the upload endpoints

use axum::extract::Multipart;
use shared::error::{AppError, ErrorCode};

use crate::media::{MAX_FILE_SIZE, UploadedImage};
use crate::state::AppState;

/// Request body limit for upload routes (file plus multipart framing)
pub const UPLOAD_BODY_LIMIT: usize = MAX_FILE_SIZE + 64 * 1024;

/// Read the `file` field, then process and store it under `folder`
pub async fn store_upload(
    state: &AppState,
    folder: &str,
    mut multipart: Multipart,
) -> Result<UploadedImage, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut original_filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
    })? {
        if field.name() == Some("file") {
            original_filename = field.file_name().map(|s| s.to_string());
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::with_message(ErrorCode::InvalidRequest, format!("Read error: {e}"))
                    })?
                    .to_vec(),
            );
            break;
        }
    }

    let data = file_data.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    let filename = original_filename.unwrap_or_default();

    state.images.upload(folder, &data, &filename).await
}
