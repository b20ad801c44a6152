use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub recognizer: RecognizerConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub speech: SpeechConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Capture sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Samples per frame handed to the recognizer (8000 at 16 kHz is
    /// half a second of audio).
    #[serde(default = "default_block_size")]
    pub block_size: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            sample_rate: default_sample_rate(),
            block_size: default_block_size(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default = "default_device_name")]
    pub device_name: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecognizerConfig {
    #[serde(default = "default_recognizer_engine")]
    pub engine: String,

    #[serde(default)]
    pub vosk: Option<VoskModelConfig>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            engine: default_recognizer_engine(),
            vosk: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VoskModelConfig {
    /// Directory holding the pretrained model bundle. Provisioning it
    /// (download + unpack) happens before the pipeline starts; the
    /// engine only requires the directory to exist and be loadable.
    #[serde(default = "default_model_path")]
    pub model_path: String,
}

impl Default for VoskModelConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Fixed instruction prepended to every prompt. The backend keeps
    /// no memory of prior turns; each prompt stands alone.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            system_prompt: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_engine")]
    pub engine: String,

    #[serde(default)]
    pub command: Option<CommandSpeechConfig>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            engine: default_speech_engine(),
            command: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CommandSpeechConfig {
    pub program: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_block_size() -> u32 {
    8000
}

fn default_device_name() -> String {
    "default".to_string()
}

fn default_recognizer_engine() -> String {
    "vosk".to_string()
}

fn default_model_path() -> String {
    "vosk-model-small-en-us-0.15".to_string()
}

fn default_llm_endpoint() -> String {
    "http://localhost:11434/api/generate".to_string()
}

fn default_llm_model() -> String {
    "llama2".to_string()
}

fn default_speech_engine() -> String {
    "command".to_string()
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = input.to_string();
    let mut missing = Vec::new();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                missing.push(var_name.to_string());
            }
        }
    }

    if let Some(first_missing) = missing.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound(first_missing));
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let interpolated = interpolate_env_vars(&content)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string (for testing).
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_valid_toml() {
        let toml_str = r#"
[general]
log_level = "debug"
sample_rate = 8000
block_size = 4000

[input]
device_name = "USB Microphone"

[recognizer]
engine = "vosk"

[recognizer.vosk]
model_path = "./models/vosk-small"

[llm]
endpoint = "http://127.0.0.1:11434/api/generate"
model = "mistral"
system_prompt = "You are terse."

[speech]
engine = "command"

[speech.command]
program = "espeak-ng"
args = ["-s", "150"]
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.sample_rate, 8000);
        assert_eq!(config.general.block_size, 4000);
        assert_eq!(config.input.device_name, "USB Microphone");
        assert_eq!(config.recognizer.engine, "vosk");
        assert_eq!(
            config.recognizer.vosk.unwrap().model_path,
            "./models/vosk-small"
        );
        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.llm.system_prompt.as_deref(), Some("You are terse."));
        assert_eq!(config.speech.engine, "command");
        let cmd = config.speech.command.unwrap();
        assert_eq!(cmd.program.as_deref(), Some("espeak-ng"));
        assert_eq!(cmd.args, vec!["-s", "150"]);
    }

    #[test]
    fn test_config_default_values() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.sample_rate, 16000);
        assert_eq!(config.general.block_size, 8000);
        assert_eq!(config.input.device_name, "default");
        assert_eq!(config.recognizer.engine, "vosk");
        assert!(config.recognizer.vosk.is_none());
        assert_eq!(config.llm.endpoint, "http://localhost:11434/api/generate");
        assert_eq!(config.llm.model, "llama2");
        assert!(config.llm.system_prompt.is_none());
        assert_eq!(config.speech.engine, "command");
    }

    #[test]
    fn test_config_half_second_block_at_default_rate() {
        let config = AppConfig::from_toml_str("").unwrap();
        let secs = config.general.block_size as f64 / config.general.sample_rate as f64;
        assert!((secs - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_vosk_model_path_default() {
        let toml_str = r#"
[recognizer]
engine = "vosk"

[recognizer.vosk]
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(
            config.recognizer.vosk.unwrap().model_path,
            "vosk-model-small-en-us-0.15"
        );
    }

    #[test]
    fn test_config_env_var_interpolation() {
        std::env::set_var("VOXCHAT_TEST_MODEL", "phi3");
        let toml_str = r#"
[llm]
model = "${VOXCHAT_TEST_MODEL}"
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.llm.model, "phi3");
        std::env::remove_var("VOXCHAT_TEST_MODEL");
    }

    #[test]
    fn test_config_missing_env_var_error() {
        let toml_str = r#"
[llm]
model = "${DEFINITELY_DOES_NOT_EXIST_54321}"
"#;
        let result = AppConfig::from_toml_str(toml_str);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("DEFINITELY_DOES_NOT_EXIST_54321"));
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let toml_str = "this is not valid toml [[[";
        let result = AppConfig::from_toml_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = std::env::temp_dir().join("voxchat_test_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.toml");
        std::fs::write(
            &path,
            r#"
[general]
log_level = "warn"

[llm]
model = "gemma"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.llm.model, "gemma");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_config_load_from_file_not_found() {
        let result = AppConfig::load_from_file(Path::new("/nonexistent/path.toml"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("failed to read config file"));
    }

    #[test]
    fn test_config_speech_command_roundtrips_to_toml_value() {
        let toml_str = r#"
[speech.command]
program = "say"
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        let value = toml::Value::try_from(config.speech.command.unwrap()).unwrap();
        assert_eq!(value.get("program").unwrap().as_str(), Some("say"));
    }
}
