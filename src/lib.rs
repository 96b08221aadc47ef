//! Subtitle eraser - removes burned-in subtitles and captions from images
//!
//! An uploaded image is encoded, sent to a generative image-editing model with
//! a fixed removal instruction, and the edited image is handed back for
//! display or saving. The [`workflow`] module models the front end's states.

pub mod ai;
pub mod app;
pub mod encoder;
pub mod error;
pub mod mime;
pub mod models;
pub mod prompts;
pub mod workflow;

pub use error::{EncodeError, Error, RequestError, Result};
