use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("failed to enumerate devices: {0}")]
    DeviceEnumeration(String),

    #[error("failed to build capture stream: {0}")]
    StreamBuild(String),

    #[error("capture stream closed: {0}")]
    StreamClosed(String),
}

#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error("recognizer initialization failed: {0}")]
    InitializationFailed(String),

    #[error("recognizer processing failed: {0}")]
    ProcessingFailed(String),

    #[error("recognizer engine not found: {0}")]
    EngineNotFound(String),
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("language model unreachable: {0}")]
    Unreachable(String),
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speaker initialization failed: {0}")]
    InitializationFailed(String),

    #[error("speech synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("speaker engine not found: {0}")]
    EngineNotFound(String),
}

/// Failures that abort a conversation turn.
///
/// Backend and synthesis failures are recovered inside the loop and
/// never surface here; only a dead audio path or a broken recognizer
/// ends the conversation.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Recognizer(#[from] RecognizerError),
}
