use async_trait::async_trait;
use voxchat_core::LlmError;

/// A reply generator for one conversation turn.
///
/// Implementations receive the bare utterance; any fixed system
/// instruction is the implementation's own concern. No conversation
/// state is carried between calls.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    fn name(&self) -> &str;
    async fn generate(&self, utterance: &str) -> Result<String, LlmError>;
}
