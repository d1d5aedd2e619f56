//! Profile picture intake: loading a picked file and rendering its preview.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use wavenet_model::ImageFile;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error(
        "Image is too large ({size} bytes); the limit is {limit} bytes"
    )]
    TooLarge { size: u64, limit: u64 },

    #[error("Not a supported image file: {0}")]
    NotAnImage(String),

    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Preview rendering failed: {0}")]
    Preview(String),
}

/// Reject files above `limit` bytes. A file exactly at the limit passes.
pub fn check_size(size: u64, limit: u64) -> Result<(), IntakeError> {
    if size > limit {
        return Err(IntakeError::TooLarge { size, limit });
    }
    Ok(())
}

/// Image content type for a file name, judged by its extension
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        _ => return None,
    };
    Some(content_type)
}

/// Load an image from disk for upload.
///
/// The size is checked from metadata first so oversized files are never
/// read into memory.
pub async fn load_image(
    path: &Path,
    limit: u64,
) -> Result<ImageFile, IntakeError> {
    let display = path.display().to_string();
    let content_type = content_type_for(path)
        .ok_or_else(|| IntakeError::NotAnImage(display.clone()))?;

    let read_error = |err: std::io::Error| IntakeError::Read {
        path: display.clone(),
        reason: err.to_string(),
    };

    let metadata = tokio::fs::metadata(path).await.map_err(read_error)?;
    check_size(metadata.len(), limit)?;

    let data = tokio::fs::read(path).await.map_err(read_error)?;
    // the file may have grown between the two calls
    check_size(data.len() as u64, limit)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(ImageFile::new(file_name, content_type, data))
}

/// Encode a file as a `data:` URL
pub fn encode_data_url(file: &ImageFile) -> String {
    format!(
        "data:{};base64,{}",
        file.content_type,
        STANDARD.encode(&file.data)
    )
}

/// Render the preview off the async executor.
pub async fn render_preview(file: ImageFile) -> Result<String, IntakeError> {
    tokio::task::spawn_blocking(move || encode_data_url(&file))
        .await
        .map_err(|err| IntakeError::Preview(err.to_string()))
}
