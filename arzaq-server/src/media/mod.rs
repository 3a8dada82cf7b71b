//! Picture hosting on S3
//!
//! upload → validate extension/size → decode → downscale → JPEG → SHA256 → S3
//!
//! Objects are stored at `s3://{bucket}/{folder}/{hash}.jpg` and served from
//! `{public_base_url}/{folder}/{hash}.jpg`. The `public_id` handed back to
//! clients is the key without its extension.

use aws_sdk_s3::Client as S3Client;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io::Cursor;

use shared::error::{AppError, ErrorCode};

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Wider pictures are downscaled to this width
const MAX_WIDTH: u32 = 1920;

const JPEG_QUALITY: u8 = 85;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Folder for food listing pictures
pub const FOODS_FOLDER: &str = "arzaq/foods";
/// Folder for feed pictures
pub const POSTS_FOLDER: &str = "arzaq/posts";

/// Upload response
#[derive(Debug, Clone, Serialize)]
pub struct UploadedImage {
    pub success: bool,
    pub url: String,
    pub public_id: String,
}

/// Re-encoded picture ready for storage
#[derive(Debug)]
pub struct ProcessedImage {
    pub jpeg: Vec<u8>,
    /// Hex SHA256 of `jpeg`
    pub hash: String,
}

/// Validate and re-encode an uploaded picture
pub fn process_image(data: &[u8], filename: &str) -> Result<ProcessedImage, AppError> {
    if filename.is_empty() {
        return Err(AppError::new(ErrorCode::NoFilename));
    }

    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "File type not allowed. Allowed types: {}",
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }

    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!(
                "File size exceeds maximum allowed size of {}MB",
                MAX_FILE_SIZE / 1024 / 1024
            ),
        ));
    }

    let mut img = image::load_from_memory(data).map_err(|e| {
        tracing::debug!(error = %e, "Rejected undecodable upload");
        AppError::new(ErrorCode::InvalidImageFile)
    })?;

    if img.width() > MAX_WIDTH {
        img = img.resize(MAX_WIDTH, img.height(), FilterType::Lanczos3);
    }

    // Compress to JPEG (alpha is dropped)
    let mut jpeg = Vec::new();
    {
        let mut cursor = Cursor::new(&mut jpeg);
        let rgb_img = img.to_rgb8();
        let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img.write_with_encoder(encoder).map_err(|e| {
            tracing::error!(error = %e, "Image compression failed");
            AppError::new(ErrorCode::ImageProcessingFailed)
        })?;
    }

    let mut hasher = Sha256::new();
    hasher.update(&jpeg);
    let hash = hex::encode(hasher.finalize());

    Ok(ProcessedImage { jpeg, hash })
}

/// S3-backed picture store
#[derive(Clone)]
pub struct ImageStore {
    client: S3Client,
    bucket: String,
    public_base_url: String,
}

impl ImageStore {
    pub fn new(client: S3Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url,
        }
    }

    pub fn public_url(&self, public_id: &str) -> String {
        format!("{}/{public_id}.jpg", self.public_base_url)
    }

    /// Recover the `public_id` from a URL produced by [`Self::public_url`]
    pub fn public_id_from_url(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(&self.public_base_url)?.strip_prefix('/')?;
        let id = rest.strip_suffix(".jpg")?;
        (!id.is_empty() && !id.contains("..")).then(|| id.to_string())
    }

    /// Process and store a picture under `folder`
    pub async fn upload(
        &self,
        folder: &str,
        data: &[u8],
        filename: &str,
    ) -> Result<UploadedImage, AppError> {
        let processed = process_image(data, filename)?;
        let public_id = format!("{folder}/{}", processed.hash);
        let key = format!("{public_id}.jpg");

        // Idempotent: same hash = same content
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(processed.jpeg.into())
            .content_type("image/jpeg")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "S3 upload failed");
                AppError::new(ErrorCode::FileStorageFailed)
            })?;

        tracing::info!(public_id = %public_id, "Image uploaded to S3");

        Ok(UploadedImage {
            success: true,
            url: self.public_url(&public_id),
            public_id,
        })
    }

    /// Remove a stored picture. Failures are logged, never returned.
    pub async fn delete_by_url(&self, url: &str) {
        let Some(public_id) = self.public_id_from_url(url) else {
            tracing::debug!(url = %url, "Image URL not hosted here, skipping delete");
            return;
        };
        let key = format!("{public_id}.jpg");
        if let Err(e) = self
            .client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            tracing::warn!(key = %key, error = %e, "S3 delete failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(width, height));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    fn store() -> ImageStore {
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new("us-east-1"))
            .build();
        ImageStore::new(
            S3Client::from_conf(conf),
            "bucket".into(),
            "https://cdn.test".into(),
        )
    }

    #[test]
    fn test_process_png_to_jpeg() {
        let processed = process_image(&png_bytes(4, 3), "photo.PNG").unwrap();
        assert_eq!(processed.hash.len(), 64);
        assert!(processed.jpeg.starts_with(&[0xFF, 0xD8]));

        let again = process_image(&png_bytes(4, 3), "other.png").unwrap();
        assert_eq!(processed.hash, again.hash);
    }

    #[test]
    fn test_wide_image_downscaled() {
        let processed = process_image(&png_bytes(2400, 10), "wide.png").unwrap();
        let decoded = image::load_from_memory(&processed.jpeg).unwrap();
        assert_eq!(decoded.width(), 1920);
        assert_eq!(decoded.height(), 8);
    }

    #[test]
    fn test_rejects_extension() {
        let err = process_image(&png_bytes(2, 2), "doc.pdf").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedFileFormat);
        let err = process_image(&png_bytes(2, 2), "").unwrap_err();
        assert_eq!(err.code, ErrorCode::NoFilename);
    }

    #[test]
    fn test_rejects_size_and_content() {
        let err = process_image(&[], "a.png").unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyFile);

        let big = vec![0u8; MAX_FILE_SIZE + 1];
        let err = process_image(&big, "a.png").unwrap_err();
        assert_eq!(err.code, ErrorCode::FileTooLarge);

        let err = process_image(b"not an image", "a.jpg").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidImageFile);
    }

    #[test]
    fn test_public_id_round_trip() {
        let store = store();
        let url = store.public_url("arzaq/foods/abc123");
        assert_eq!(url, "https://cdn.test/arzaq/foods/abc123.jpg");
        assert_eq!(
            store.public_id_from_url(&url).as_deref(),
            Some("arzaq/foods/abc123")
        );
        assert_eq!(store.public_id_from_url("https://elsewhere/x.jpg"), None);
        assert_eq!(store.public_id_from_url("https://cdn.test/../x.jpg"), None);
    }
}
