//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror,
//! plus the two pipeline-stage error types surfaced to the user.

use thiserror::Error;

/// Shown when a remote failure carries no usable description.
pub const UNKNOWN_FAILURE_MESSAGE: &str = "An unknown error occurred while processing the image.";

/// Failure to turn an [`ImageResource`](crate::models::ImageResource) into an
/// [`EncodedImage`](crate::models::EncodedImage).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Unreadable image format: {0}")]
    UnreadableFormat(String),
}

/// Failure of a single edit request against the remote model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("API key is not configured. Set GEMINI_API_KEY before submitting an image.")]
    MissingCredential,

    #[error("{}", no_image_message(.explanation))]
    NoImageReturned { explanation: Option<String> },

    #[error("{}", transport_message(.0))]
    Transport(Option<String>),
}

fn no_image_message(explanation: &Option<String>) -> String {
    match explanation {
        Some(text) => format!("The model did not return an image. Response: \"{}\"", text),
        None => "The model did not return an image.".to_string(),
    }
}

fn transport_message(description: &Option<String>) -> String {
    match description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(description) => format!("Failed to process image: {}", description),
        None => UNKNOWN_FAILURE_MESSAGE.to_string(),
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid image path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid workflow state: {0}")]
    InvalidState(String),
}

pub type Result<T> = std::result::Result<T, Error>;
