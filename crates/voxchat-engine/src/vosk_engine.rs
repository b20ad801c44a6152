use crate::engine_trait::RecognizerEngine;
use std::path::Path;
use vosk::{DecodingState, Model, Recognizer};
use voxchat_core::{AudioFrame, RecognitionOutcome, RecognizerError};

/// Vosk-backed streaming decoder.
///
/// The model directory is loaded once at initialize; provisioning it
/// (download + unpack) happens before the pipeline starts. The
/// recognizer itself is created lazily from the first frame's sample
/// rate. Endpointing is the decoder's own: a frame that completes an
/// utterance yields `Final` with the best hypothesis, after which the
/// decoder is already listening for the next utterance.
pub struct VoskEngine {
    model: Option<Model>,
    recognizer: Option<Recognizer>,
}

impl VoskEngine {
    pub fn new() -> Self {
        Self {
            model: None,
            recognizer: None,
        }
    }
}

impl Default for VoskEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecognizerEngine for VoskEngine {
    fn name(&self) -> &str {
        "vosk"
    }

    fn initialize(&mut self, config: toml::Value) -> Result<(), RecognizerError> {
        let model_path = config
            .get("model_path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                RecognizerError::InitializationFailed(
                    "missing 'model_path' in vosk config".to_string(),
                )
            })?;

        if !Path::new(model_path).is_dir() {
            return Err(RecognizerError::InitializationFailed(format!(
                "model directory not found: {} (fetch and unpack a model before starting)",
                model_path
            )));
        }

        let model = Model::new(model_path).ok_or_else(|| {
            RecognizerError::InitializationFailed(format!(
                "failed to load vosk model at {}",
                model_path
            ))
        })?;
        self.model = Some(model);
        self.recognizer = None;

        tracing::info!(model_path = %model_path, "vosk model loaded");
        Ok(())
    }

    fn accept(&mut self, frame: &AudioFrame) -> Result<RecognitionOutcome, RecognizerError> {
        if self.recognizer.is_none() {
            let model = self.model.as_ref().ok_or_else(|| {
                RecognizerError::ProcessingFailed("engine not initialized".to_string())
            })?;
            let recognizer =
                Recognizer::new(model, frame.sample_rate as f32).ok_or_else(|| {
                    RecognizerError::ProcessingFailed(
                        "failed to create vosk recognizer".to_string(),
                    )
                })?;
            self.recognizer = Some(recognizer);
        }
        let recognizer = self.recognizer.as_mut().expect("recognizer just created");

        match recognizer.accept_waveform(&frame.samples) {
            Ok(DecodingState::Finalized) => {
                let text = recognizer
                    .result()
                    .single()
                    .map(|hypothesis| hypothesis.text.to_string())
                    .unwrap_or_default();
                Ok(RecognitionOutcome::Final(text))
            }
            Ok(DecodingState::Running) => Ok(RecognitionOutcome::Partial),
            Ok(DecodingState::Failed) => Err(RecognizerError::ProcessingFailed(
                "decoder failed on frame".to_string(),
            )),
            Err(e) => Err(RecognizerError::ProcessingFailed(e.to_string())),
        }
    }

    fn reset(&mut self) {
        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.reset();
        }
    }
}
