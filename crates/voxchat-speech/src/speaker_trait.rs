use async_trait::async_trait;
use voxchat_core::SpeechError;

/// Text-to-speech output.
///
/// `speak` completes only when playback has finished; the conversation
/// loop relies on that to sequence speaking against listening. There
/// is no queueing: one utterance at a time.
#[async_trait]
pub trait Speaker: Send + Sync {
    fn name(&self) -> &str;
    fn initialize(&mut self, config: toml::Value) -> Result<(), SpeechError>;
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;
}
