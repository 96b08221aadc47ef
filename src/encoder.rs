//! Image encoding for transport
//!
//! Turns a selected image into its self-describing `data:` URL form and
//! splits that back into the media type and base64 payload the remote model
//! expects.

use crate::error::EncodeError;
use crate::models::{EncodedImage, ImageResource};
use base64::Engine as _;

/// Render a resource as `data:<media type>;base64,<payload>`.
pub fn to_data_url(resource: &ImageResource) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(resource.bytes());
    format!("data:{};base64,{}", resource.media_type(), payload)
}

/// Split a `data:` URL into its media type and payload.
pub fn parse_data_url(data_url: &str) -> Result<EncodedImage, EncodeError> {
    let (header, payload) = data_url.split_once(',').ok_or_else(|| {
        EncodeError::UnreadableFormat("missing payload separator".to_string())
    })?;

    let media_type = header
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| EncodeError::UnreadableFormat("missing media type".to_string()))?;

    Ok(EncodedImage {
        media_type: media_type.to_string(),
        data: payload.to_string(),
    })
}

/// Encode a resource for submission.
pub async fn encode(resource: &ImageResource) -> Result<EncodedImage, EncodeError> {
    // A comma would end the data URL header early.
    if resource.media_type().contains(',') {
        tracing::warn!(
            "Could not encode {}: media type '{}' contains a comma",
            resource.name(),
            resource.media_type()
        );
        return Err(EncodeError::UnreadableFormat(format!(
            "invalid media type '{}'",
            resource.media_type()
        )));
    }

    let data_url = to_data_url(resource);
    let encoded = parse_data_url(&data_url).map_err(|e| {
        tracing::warn!("Could not encode {}: {}", resource.name(), e);
        e
    })?;

    tracing::debug!(
        "Encoded {} as {} ({} base64 chars)",
        resource.name(),
        encoded.media_type,
        encoded.data.len()
    );

    Ok(encoded)
}
