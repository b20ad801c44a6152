use crate::engine_trait::RecognizerEngine;
use tokio::sync::mpsc;
use voxchat_core::{AudioFrame, RecognitionOutcome, RecognizerError};

/// Drives frames through a recognizer engine until an utterance
/// finalizes.
pub struct Listener {
    engine: Box<dyn RecognizerEngine>,
}

impl Listener {
    pub fn new(engine: Box<dyn RecognizerEngine>) -> Self {
        Self { engine }
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Consume frames until the engine finalizes a non-empty utterance.
    ///
    /// Partial outcomes and empty hypotheses keep the loop reading;
    /// there is deliberately no timeout, so indefinite silence blocks
    /// here until the capture side produces speech. The engine is reset
    /// first so no evidence leaks in from a previous listening phase.
    pub async fn listen(
        &mut self,
        frames: &mut mpsc::UnboundedReceiver<AudioFrame>,
    ) -> Result<String, RecognizerError> {
        self.engine.reset();
        loop {
            let frame = frames.recv().await.ok_or_else(|| {
                RecognizerError::ProcessingFailed("frame channel closed".to_string())
            })?;
            match self.engine.accept(&frame)? {
                RecognitionOutcome::Partial => {}
                RecognitionOutcome::Final(text) => {
                    if text.is_empty() {
                        tracing::debug!("empty hypothesis, still listening");
                        continue;
                    }
                    return Ok(text);
                }
            }
        }
    }
}
