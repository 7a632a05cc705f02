pub mod assets;
pub mod characters;
pub mod ingestion;
pub mod lines;
pub mod linking;
pub mod project_assets;
pub mod projects;
pub mod readiness;
pub mod recording;

use axum::extract::Multipart;

use crate::error::{AppError, AppResult};

/// Pull the required `file` field (filename + bytes) out of a multipart
/// form, rejecting empty uploads before any side effect happens.
pub(crate) async fn read_file_field(mut multipart: Multipart) -> AppResult<(String, Vec<u8>)> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload.bin").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file = Some((filename, data.to_vec()));
        }
    }

    match file {
        Some((_, data)) if data.is_empty() => Err(AppError::BadRequest(
            "Uploaded file is empty".to_string(),
        )),
        Some(file) => Ok(file),
        None => Err(AppError::BadRequest(
            "Missing required multipart field 'file'".to_string(),
        )),
    }
}
