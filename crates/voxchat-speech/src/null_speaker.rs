use crate::speaker_trait::Speaker;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use voxchat_core::SpeechError;

/// Records what would have been spoken instead of producing audio.
/// Used by tests and by deployments without a synthesis backend.
pub struct NullSpeaker {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl NullSpeaker {
    pub fn new() -> Self {
        Self {
            spoken: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to everything spoken so far; stays valid after
    /// the speaker is boxed into the conversation loop.
    pub fn transcript(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.spoken)
    }
}

impl Default for NullSpeaker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Speaker for NullSpeaker {
    fn name(&self) -> &str {
        "null"
    }

    fn initialize(&mut self, _config: toml::Value) -> Result<(), SpeechError> {
        Ok(())
    }

    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        tracing::debug!("NullSpeaker: {}", text);
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
