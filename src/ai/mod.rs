//! Text generation for daily fortunes.
//!
//! # Module Structure
//!
//! - `gemini`: HTTP client for the Gemini API
//! - `prompts`: Persona and prompt builders
//!
//! # Example
//!
//! ```no_run
//! use uranai_bot::ai::GeminiClient;
//!
//! let client = GeminiClient::new("https://generativelanguage.googleapis.com", "api-key");
//! let text = client.generate("gemini-1.5-pro-latest", "今日の運勢を教えて")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod gemini;
pub mod prompts;

// Re-export commonly used types
pub use gemini::GeminiClient;
pub use prompts::{fortune_prompt, DEFAULT_PERSONA};
