use crate::engine_trait::RecognizerEngine;
use voxchat_core::{AudioFrame, RecognitionOutcome, RecognizerError};

/// Deterministic engine for exercising the pipeline without a native
/// decoder: finalizes every `frames_per_final` frames with a fixed
/// hypothesis. The default hypothesis is empty, which the listen loop
/// treats as "no utterance".
pub struct NullEngine {
    frames_per_final: usize,
    text: String,
    frames_seen: usize,
}

const DEFAULT_FRAMES_PER_FINAL: usize = 4;

impl NullEngine {
    pub fn new() -> Self {
        Self {
            frames_per_final: DEFAULT_FRAMES_PER_FINAL,
            text: String::new(),
            frames_seen: 0,
        }
    }

    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }
}

impl Default for NullEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecognizerEngine for NullEngine {
    fn name(&self) -> &str {
        "null"
    }

    fn initialize(&mut self, config: toml::Value) -> Result<(), RecognizerError> {
        if let Some(n) = config.get("frames_per_final").and_then(|v| v.as_integer()) {
            if n < 1 {
                return Err(RecognizerError::InitializationFailed(
                    "'frames_per_final' must be at least 1".to_string(),
                ));
            }
            self.frames_per_final = n as usize;
        }
        if let Some(text) = config.get("text").and_then(|v| v.as_str()) {
            self.text = text.to_string();
        }
        Ok(())
    }

    fn accept(&mut self, frame: &AudioFrame) -> Result<RecognitionOutcome, RecognizerError> {
        self.frames_seen += 1;
        tracing::trace!(
            "NullEngine frame #{}, {} samples",
            self.frames_seen,
            frame.samples.len()
        );
        if self.frames_seen % self.frames_per_final == 0 {
            Ok(RecognitionOutcome::Final(self.text.clone()))
        } else {
            Ok(RecognitionOutcome::Partial)
        }
    }

    fn reset(&mut self) {
        self.frames_seen = 0;
    }
}
