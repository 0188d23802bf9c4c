use axum::extract::multipart::Field;
use uuid::Uuid;

use crate::errors::{AppError, Result};

/// Matches the 1 MB cap the upload pipeline has always enforced.
pub const MAX_IMAGE_BYTES: usize = 1_000_000;

const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// An image pulled out of a multipart request, ready for the bucket.
pub struct ImageUpload {
    pub key: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Reads one image field: checks the content type, enforces the size cap and
/// derives the object key.
pub async fn read_image(field: Field<'_>) -> Result<ImageUpload> {
    let content_type = field.content_type().unwrap_or_default().to_string();
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::InvalidImageFormat);
    }

    let file_name = field.file_name().unwrap_or("image").to_string();
    let data = field.bytes().await?.to_vec();

    if data.len() > MAX_IMAGE_BYTES {
        return Err(AppError::ImageTooLarge);
    }

    Ok(ImageUpload {
        key: object_key(&file_name),
        content_type,
        data,
    })
}

/// `{uuid}-{filename}` with the filename lowercased and whitespace replaced
/// by hyphens, so every stored object has a unique, readable key.
pub fn object_key(original_name: &str) -> String {
    let cleaned = sanitize_filename::sanitize(original_name)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    format!("{}-{}", Uuid::new_v4(), cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_keeps_the_cleaned_filename() {
        let key = object_key("My Company LOGO.PNG");
        assert!(key.ends_with("-my-company-logo.png"));
        assert!(!key.contains(' '));
    }

    #[test]
    fn object_keys_are_unique_per_call() {
        assert_ne!(object_key("logo.png"), object_key("logo.png"));
    }

    #[test]
    fn path_components_are_sanitized_away() {
        let key = object_key("../../etc/passwd");
        assert!(!key.contains("/"));
    }
}
