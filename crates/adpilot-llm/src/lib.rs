mod client;
mod gemini;
mod openai;
pub mod parser;

pub use client::{build_backend, LlmClient, Outcome};
pub use gemini::{GeminiBackend, DEFAULT_GEMINI_BASE};
pub use openai::OpenAiBackend;
pub use parser::{parse_response, strip_code_fence};
