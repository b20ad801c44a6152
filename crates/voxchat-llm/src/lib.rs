pub mod model_trait;
mod ndjson;
pub mod ollama;

pub use model_trait::LanguageModel;
pub use ollama::{OllamaClient, UNREACHABLE_REPLY};
