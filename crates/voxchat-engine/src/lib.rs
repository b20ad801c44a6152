pub mod engine_trait;
pub mod listener;
pub mod null_engine;
pub mod registry;
#[cfg(feature = "vosk")]
pub mod vosk_engine;

pub use engine_trait::RecognizerEngine;
pub use listener::Listener;
pub use null_engine::NullEngine;
pub use registry::EngineRegistry;
#[cfg(feature = "vosk")]
pub use vosk_engine::VoskEngine;
