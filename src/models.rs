//! Data models and structures
//!
//! Defines the values that flow through the submission pipeline (the
//! selected image, its transport encoding, and the edit outcome) along with
//! environment-backed configuration.

use crate::ai::gemini::DEFAULT_BASE_URL;
use crate::error::RequestError;
use crate::{mime, Error, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// A user-selected image file. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResource {
    bytes: Arc<[u8]>,
    media_type: String,
    name: String,
}

impl ImageResource {
    pub fn new(
        bytes: impl Into<Arc<[u8]>>,
        media_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
            name: name.into(),
        }
    }

    /// Read a file from disk, declaring its media type from the extension.
    ///
    /// Unknown extensions get an empty media type rather than a guess.
    pub async fn load(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidPath(path.display().to_string()))?
            .to_string();
        let media_type = mime::media_type_for_path(path).unwrap_or_default();
        let bytes = tokio::fs::read(path).await?;

        tracing::debug!(
            "Loaded {} ({} bytes, declared type '{}')",
            name,
            bytes.len(),
            media_type
        );

        Ok(Self::new(bytes, media_type, name))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_image(&self) -> bool {
        mime::is_image_media_type(&self.media_type)
    }
}

/// Transport-ready form of an [`ImageResource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub media_type: String,
    pub data: String,
}

/// Outcome of one edit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditResult {
    /// Base64 image payload returned by the model.
    Success { image_data: String },
    Failure { message: String },
}

impl EditResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<RequestError> for EditResult {
    fn from(err: RequestError) -> Self {
        Self::failure(err.to_string())
    }
}

// Configuration
const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";

#[derive(Debug, Clone)]
pub struct Config {
    /// Absent keys are reported by the client, not at load time.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let request_timeout = match non_empty("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!("REQUEST_TIMEOUT_SECS must be an integer, got '{}'", raw))
                })?;
                if secs == 0 {
                    return Err(Error::Config(
                        "REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            model: non_empty("GEMINI_IMAGE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_empty("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_config_prefers_gemini_api_key() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "primary"),
            ("API_KEY", "fallback"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("primary"));

        let config = Config::from_lookup(lookup_from(&[("API_KEY", "fallback")])).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("fallback"));
    }

    #[test]
    fn test_config_blank_key_counts_as_missing() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_timeout() {
        let config =
            Config::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "45")])).unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(45)));

        let err = Config::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err =
            Config::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_config_base_url_trailing_slash_trimmed() {
        let config =
            Config::from_lookup(lookup_from(&[("GEMINI_BASE_URL", "http://localhost:9000/")]))
                .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_image_resource_is_image() {
        let png = ImageResource::new(vec![1u8, 2, 3], "image/png", "a.png");
        assert!(png.is_image());
        assert_eq!(png.bytes(), &[1u8, 2, 3]);

        let text = ImageResource::new(vec![1u8], "text/plain", "notes.txt");
        assert!(!text.is_image());
    }

    #[tokio::test]
    async fn test_load_declares_type_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        tokio::fs::write(&path, [0x89u8, 0x50, 0x4E, 0x47]).await.unwrap();

        let resource = ImageResource::load(&path).await.unwrap();
        assert_eq!(resource.name(), "frame.png");
        assert_eq!(resource.media_type(), "image/png");
        assert_eq!(resource.bytes(), &[0x89u8, 0x50, 0x4E, 0x47]);
    }

    #[tokio::test]
    async fn test_load_unknown_extension_has_empty_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let resource = ImageResource::load(&path).await.unwrap();
        assert_eq!(resource.media_type(), "");
        assert!(!resource.is_image());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_load_rejects_non_utf8_file_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"frame-\xFF.png"));
        let err = ImageResource::load(path).await.unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageResource::load(&dir.path().join("gone.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_edit_result_from_request_error() {
        let result: EditResult =
            RequestError::Transport(Some("quota exceeded".to_string())).into();
        assert_eq!(
            result,
            EditResult::failure("Failed to process image: quota exceeded")
        );
        assert!(!result.is_success());
    }
}
