use voxchat_core::{AudioFrame, RecognitionOutcome, RecognizerError};

/// Incremental speech decoder.
///
/// `accept` feeds one frame of acoustic evidence and reports whether
/// the current utterance has finalized. After a `Final` outcome the
/// engine starts a fresh utterance; `reset` discards mid-utterance
/// evidence explicitly (the listen loop resets before each utterance).
pub trait RecognizerEngine: Send {
    fn name(&self) -> &str;
    fn initialize(&mut self, config: toml::Value) -> Result<(), RecognizerError>;
    fn accept(&mut self, frame: &AudioFrame) -> Result<RecognitionOutcome, RecognizerError>;
    fn reset(&mut self);
}
