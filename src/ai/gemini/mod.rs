pub mod client;
pub mod edit;
pub mod types;

pub use client::{GeminiHttpClient, DEFAULT_BASE_URL};
pub use edit::GeminiEditClient;
