use image::ImageFormat;
use std::path::Path;

/// Image types the `image` crate cannot decode but the remote model may still
/// accept.
const EXTRA_IMAGE_TYPES: &[(&str, &str)] = &[
    ("svg", "image/svg+xml"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
];

/// Declared media type for a file, taken from its extension.
///
/// Returns `None` for extensions that are not a known image format. File
/// contents are never sniffed.
pub fn media_type_for_path(path: &Path) -> Option<String> {
    match ImageFormat::from_path(path) {
        Ok(format) => Some(format.to_mime_type().to_string()),
        Err(_) => {
            let ext = path.extension().and_then(|ext| ext.to_str())?.to_ascii_lowercase();
            if let Some((_, media_type)) = EXTRA_IMAGE_TYPES.iter().find(|(e, _)| *e == ext) {
                return Some(media_type.to_string());
            }
            tracing::debug!("No image media type for extension of {}", path.display());
            None
        }
    }
}

pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_extension() {
        assert_eq!(
            media_type_for_path(Path::new("frame.png")).as_deref(),
            Some("image/png")
        );
    }

    #[test]
    fn test_jpeg_extensions() {
        assert_eq!(
            media_type_for_path(Path::new("frame.jpg")).as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(
            media_type_for_path(Path::new("FRAME.JPEG")).as_deref(),
            Some("image/jpeg")
        );
    }

    #[test]
    fn test_webp_extension() {
        assert_eq!(
            media_type_for_path(Path::new("shot.webp")).as_deref(),
            Some("image/webp")
        );
    }

    #[test]
    fn test_extensions_outside_image_crate() {
        assert_eq!(
            media_type_for_path(Path::new("logo.svg")).as_deref(),
            Some("image/svg+xml")
        );
        assert_eq!(
            media_type_for_path(Path::new("IMG_0042.HEIC")).as_deref(),
            Some("image/heic")
        );
    }

    #[test]
    fn test_unknown_extension_is_none() {
        assert_eq!(media_type_for_path(Path::new("notes.txt")), None);
        assert_eq!(media_type_for_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_is_image_media_type() {
        assert!(is_image_media_type("image/png"));
        assert!(is_image_media_type("image/svg+xml"));
        assert!(!is_image_media_type("application/pdf"));
        assert!(!is_image_media_type(""));
    }
}
