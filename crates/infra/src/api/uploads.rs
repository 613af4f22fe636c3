//! File upload endpoints
//!
//! Uploads are the only calls with non-default timeouts: 120 seconds for a
//! single file, 180 for a batch. The transport sets the multipart content
//! type; the client's JSON default does not apply here.

use std::path::Path;

use clubportal_domain::UploadedFile;

use crate::http::{ApiClient, ApiError, CallResult, FilePart, RequestDescriptor};

/// Upload a single file.
pub async fn upload_file(
    client: &ApiClient,
    file_name: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<CallResult<UploadedFile>, ApiError> {
    let request =
        RequestDescriptor::post_multipart("/uploads", vec![FilePart::new("file", file_name, mime, bytes)])
            .with_timeout(client.config().upload_timeout);
    client.send(request).await
}

/// Upload several files in one request.
pub async fn upload_files(
    client: &ApiClient,
    files: Vec<(String, String, Vec<u8>)>,
) -> Result<CallResult<Vec<UploadedFile>>, ApiError> {
    let parts = files
        .into_iter()
        .map(|(file_name, mime, bytes)| FilePart::new("files", file_name, mime, bytes))
        .collect();
    let request = RequestDescriptor::post_multipart("/uploads/batch", parts)
        .with_timeout(client.config().multi_upload_timeout);
    client.send(request).await
}

/// Read a file from disk and upload it, deriving the MIME type from the
/// extension.
pub async fn upload_path(
    client: &ApiClient,
    path: impl AsRef<Path>,
) -> Result<CallResult<UploadedFile>, ApiError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::Storage(format!("failed to read {}: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    upload_file(client, &file_name, mime_for(path), bytes).await
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
