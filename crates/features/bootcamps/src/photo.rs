//! Upload validation for bootcamp photos.

use camp_kernel::server::ApiError;
use std::path::Path;

/// Directory under the storage root where photos land; served statically.
pub const UPLOADS_DIR: &str = "uploads";

/// MIME subtypes accepted when the file name carries no usable extension.
const EXTENSION_BY_SUBTYPE: &[(&str, &str)] =
    &[("jpeg", "jpg"), ("jpg", "jpg"), ("png", "png"), ("gif", "gif"), ("webp", "webp")];

/// Validates the upload and derives the stored file name `photo_<id>.<ext>`.
///
/// # Errors
/// Returns [`ApiError::BadRequest`] for non-image MIME types or when no file
/// extension can be derived.
pub fn photo_file_name(
    bootcamp_id: &str,
    original_name: Option<&str>,
    content_type: Option<&str>,
) -> Result<String, ApiError> {
    let Some(content_type) = content_type.filter(|ct| ct.starts_with("image/")) else {
        return Err(ApiError::bad_request("Please upload an image file"));
    };

    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .or_else(|| {
            let subtype = content_type.trim_start_matches("image/");
            EXTENSION_BY_SUBTYPE
                .iter()
                .find(|(known, _)| *known == subtype)
                .map(|(_, ext)| (*ext).to_owned())
        })
        .ok_or_else(|| ApiError::bad_request("Could not determine the image file type"))?;

    Ok(format!("photo_{bootcamp_id}.{extension}"))
}

/// Enforces the configured upload ceiling.
///
/// # Errors
/// Returns [`ApiError::BadRequest`] when the payload is larger than `max`.
pub fn check_size(actual: usize, max: u64) -> Result<(), ApiError> {
    if actual as u64 > max {
        return Err(ApiError::bad_request(format!("Please upload an image less than {max} bytes")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_name_from_original_extension() {
        let name = photo_file_name("abc123", Some("me.JPG"), Some("image/jpeg")).expect("name");
        assert_eq!(name, "photo_abc123.jpg");
    }

    #[test]
    fn falls_back_to_mime_subtype() {
        let name = photo_file_name("abc123", Some("noext"), Some("image/png")).expect("name");
        assert_eq!(name, "photo_abc123.png");

        let name = photo_file_name("abc123", None, Some("image/webp")).expect("name");
        assert_eq!(name, "photo_abc123.webp");
    }

    #[test]
    fn non_images_are_rejected() {
        assert!(photo_file_name("abc123", Some("cv.pdf"), Some("application/pdf")).is_err());
        assert!(photo_file_name("abc123", Some("cv.pdf"), None).is_err());
    }

    #[test]
    fn size_ceiling_is_enforced() {
        assert!(check_size(1_000, 1_000_000).is_ok());
        assert!(check_size(1_000_001, 1_000_000).is_err());
    }
}
