//! AI layer: Gemini `generateContent` client and the bill retitle request with retries.

pub mod gemini;
pub mod prompt;
pub mod retitle;

pub use gemini::{DEFAULT_MODEL, GeminiClient, ModelError, TextModel};
pub use retitle::{RetitleOptions, request_retitle};
