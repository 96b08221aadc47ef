//! AI service integration for subtitle removal
//!
//! Provides the edit-request seam and its Gemini implementation, which sends
//! an encoded image plus the removal instruction to a generative image model.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiEditClient;
pub use mock::MockEditClient;

use crate::error::RequestError;
use crate::models::{EditResult, EncodedImage};
use async_trait::async_trait;

#[async_trait]
pub trait EditService: Send + Sync {
    /// Send one edit request. Only a missing credential is an `Err`; every
    /// other failure comes back as [`EditResult::Failure`].
    async fn submit_edit_request(
        &self,
        image: EncodedImage,
        instruction: &str,
    ) -> Result<EditResult, RequestError>;
}
