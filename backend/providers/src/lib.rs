//! Generative model providers.
//!
//! [`GeminiProvider`] talks to Google's hosted models; [`MockProvider`] is the
//! in-process stand-in used by tests.

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiProvider, GEMINI_20_FLASH_LITE};
pub use mock::MockProvider;
