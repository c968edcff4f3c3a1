//! Data-URL ingestion for uploaded images.
//!
//! Avatars, banners and other admin-uploaded pictures are kept inline in the
//! entity as `data:<mime>;base64,<payload>` strings instead of going to a
//! file store.

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{AppError, AppResult};

/// A decoded data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// MIME type, lowercased.
    pub mime_type: String,
    /// Decoded payload.
    pub data: Vec<u8>,
}

/// Limits applied to ingested images.
#[derive(Debug, Clone)]
pub struct ImagePolicy {
    /// Maximum decoded size in bytes.
    pub max_bytes: usize,
    /// Accepted MIME types.
    pub allowed_types: Vec<String>,
}

impl ImagePolicy {
    /// Build a policy from configuration values.
    #[must_use]
    pub const fn new(max_bytes: usize, allowed_types: Vec<String>) -> Self {
        Self {
            max_bytes,
            allowed_types,
        }
    }

    fn allows(&self, mime_type: &str) -> bool {
        self.allowed_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(mime_type))
    }
}

impl From<&crate::config::MediaConfig> for ImagePolicy {
    fn from(config: &crate::config::MediaConfig) -> Self {
        Self::new(config.max_image_bytes, config.allowed_image_types.clone())
    }
}

/// Encode bytes as a base64 data URL.
#[must_use]
pub fn encode(mime_type: &str, data: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(data))
}

/// Parse a base64 data URL.
pub fn parse(data_url: &str) -> AppResult<DataUrl> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| AppError::BadRequest("Not a data URL".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AppError::BadRequest("Data URL has no payload".to_string()))?;

    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| AppError::BadRequest("Only base64 data URLs are accepted".to_string()))?
        .to_ascii_lowercase();

    if mime_type.is_empty() {
        return Err(AppError::BadRequest("Data URL has no MIME type".to_string()));
    }

    let data = STANDARD
        .decode(payload)
        .map_err(|e| AppError::BadRequest(format!("Invalid base64 payload: {e}")))?;

    Ok(DataUrl { mime_type, data })
}

/// Parse and check an image data URL against the policy.
pub fn validate_image(data_url: &str, policy: &ImagePolicy) -> AppResult<DataUrl> {
    let parsed = parse(data_url)?;

    if !policy.allows(&parsed.mime_type) {
        return Err(AppError::Validation(format!(
            "Unsupported image type: {}",
            parsed.mime_type
        )));
    }

    if parsed.data.len() > policy.max_bytes {
        return Err(AppError::Validation(format!(
            "Image too large: {} bytes (max {})",
            parsed.data.len(),
            policy.max_bytes
        )));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ImagePolicy {
        ImagePolicy::new(16, vec!["image/png".to_string(), "image/jpeg".to_string()])
    }

    #[test]
    fn test_parse_encoded() {
        let url = encode("image/png", b"\x89PNG");
        let parsed = parse(&url).unwrap();

        assert_eq!(parsed.mime_type, "image/png");
        assert_eq!(parsed.data, b"\x89PNG");
    }

    #[test]
    fn test_parse_rejects_plain_url() {
        assert!(parse("https://i.pravatar.cc/150?u=1").is_err());
    }

    #[test]
    fn test_parse_rejects_non_base64() {
        assert!(parse("data:text/plain,hello").is_err());
    }

    #[test]
    fn test_validate_rejects_disallowed_type() {
        let url = encode("image/svg+xml", b"<svg/>");
        let err = validate_image(&url, &policy()).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_validate_rejects_oversized() {
        let url = encode("image/png", &[0u8; 17]);
        assert!(validate_image(&url, &policy()).is_err());
    }

    #[test]
    fn test_validate_is_case_insensitive_on_type() {
        let url = encode("IMAGE/JPEG", &[1, 2, 3]);
        let parsed = validate_image(&url, &policy()).unwrap();
        assert_eq!(parsed.mime_type, "image/jpeg");
    }
}
