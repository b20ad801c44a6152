use crate::speaker_trait::Speaker;
use async_trait::async_trait;
use std::process::Stdio;
use voxchat_core::SpeechError;

/// Speaks through the platform's text-to-speech command: `say` on
/// macOS, `espeak-ng` elsewhere, unless configured otherwise. The
/// child process exits when playback finishes, which gives the
/// blocking speak-and-wait contract for free.
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
}

fn default_program() -> String {
    if cfg!(target_os = "macos") {
        "say".to_string()
    } else {
        "espeak-ng".to_string()
    }
}

impl CommandSpeaker {
    pub fn new() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandSpeaker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Speaker for CommandSpeaker {
    fn name(&self) -> &str {
        "command"
    }

    fn initialize(&mut self, config: toml::Value) -> Result<(), SpeechError> {
        if let Some(program) = config.get("program").and_then(|v| v.as_str()) {
            if program.is_empty() {
                return Err(SpeechError::InitializationFailed(
                    "'program' must not be empty".to_string(),
                ));
            }
            self.program = program.to_string();
        }
        if let Some(args) = config.get("args").and_then(|v| v.as_array()) {
            self.args = args
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
        }
        Ok(())
    }

    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        if text.is_empty() {
            return Ok(());
        }

        let status = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                SpeechError::SynthesisFailed(format!("failed to run {}: {}", self.program, e))
            })?;

        if !status.success() {
            return Err(SpeechError::SynthesisFailed(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}
