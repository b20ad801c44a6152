pub mod config;
pub mod error;
pub mod types;

pub use config::{
    AppConfig, CommandSpeechConfig, GeneralConfig, InputConfig, LlmConfig, RecognizerConfig,
    SpeechConfig, VoskModelConfig,
};
pub use error::{AudioError, ConfigError, LlmError, RecognizerError, SpeechError, TurnError};
pub use types::{AudioFrame, RecognitionOutcome};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_frame_creation() {
        let frame = AudioFrame {
            samples: vec![0, 128, -128, 32767],
            sample_rate: 16000,
            channels: 1,
        };
        assert_eq!(frame.samples.len(), 4);
        assert_eq!(frame.sample_rate, 16000);
        assert_eq!(frame.channels, 1);
    }

    #[test]
    fn test_audio_frame_duration() {
        let frame = AudioFrame {
            samples: vec![0; 8000],
            sample_rate: 16000,
            channels: 1,
        };
        assert!((frame.duration_secs() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_audio_frame_duration_zero_rate() {
        let frame = AudioFrame {
            samples: vec![0; 100],
            sample_rate: 0,
            channels: 1,
        };
        assert_eq!(frame.duration_secs(), 0.0);
    }

    #[test]
    fn test_recognition_outcome_variants() {
        assert!(!RecognitionOutcome::Partial.is_final());
        assert!(RecognitionOutcome::Final("hello".to_string()).is_final());
        assert!(RecognitionOutcome::Final(String::new()).is_final());
    }

    #[test]
    fn test_recognition_outcome_equality() {
        assert_eq!(
            RecognitionOutcome::Final("hi".to_string()),
            RecognitionOutcome::Final("hi".to_string()),
        );
        assert_ne!(
            RecognitionOutcome::Partial,
            RecognitionOutcome::Final(String::new()),
        );
    }
}
