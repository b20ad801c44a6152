use voxchat_audio::AudioSource;
use voxchat_core::{LlmError, TurnError};
use voxchat_engine::Listener;
use voxchat_llm::{LanguageModel, UNREACHABLE_REPLY};
use voxchat_speech::Speaker;

/// One completed listen → infer → speak cycle. Dropped as soon as the
/// next turn begins; nothing is persisted across turns.
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub utterance: String,
    pub reply: String,
}

/// Drives the indefinite conversation cycle: wait for an utterance,
/// fetch a reply, speak it, repeat. Termination comes only from
/// outside (process signal) or from a dead audio/recognizer path.
pub struct ConversationLoop {
    source: Box<dyn AudioSource>,
    listener: Listener,
    model: Box<dyn LanguageModel>,
    speaker: Box<dyn Speaker>,
}

impl ConversationLoop {
    pub fn new(
        source: Box<dyn AudioSource>,
        listener: Listener,
        model: Box<dyn LanguageModel>,
        speaker: Box<dyn Speaker>,
    ) -> Self {
        Self {
            source,
            listener,
            model,
            speaker,
        }
    }

    pub async fn run(&mut self) -> Result<(), TurnError> {
        loop {
            self.next_turn().await?;
        }
    }

    /// Run one full turn.
    ///
    /// An unreachable backend is recovered here with a fixed spoken
    /// apology; a synthesis failure is logged and the turn still
    /// completes. Only audio/recognizer failures propagate.
    pub async fn next_turn(&mut self) -> Result<ConversationTurn, TurnError> {
        let utterance = self.capture_utterance().await?;
        tracing::info!("you said: {}", utterance);

        let reply = match self.model.generate(&utterance).await {
            Ok(reply) => reply,
            Err(LlmError::Unreachable(reason)) => {
                tracing::warn!("backend unreachable: {}", reason);
                UNREACHABLE_REPLY.to_string()
            }
        };
        tracing::info!("{} said: {}", self.model.name(), reply);

        if let Err(e) = self.speaker.speak(&reply).await {
            tracing::error!("speech synthesis failed: {}", e);
        }

        Ok(ConversationTurn { utterance, reply })
    }

    /// Capture scoped to this listening phase: the microphone is open
    /// only between `start` and `stop`, and `stop` runs on the error
    /// path too.
    async fn capture_utterance(&mut self) -> Result<String, TurnError> {
        let mut frames = self.source.start()?;
        tracing::info!("listening");
        let result = self.listener.listen(&mut frames).await;
        self.source.stop();
        Ok(result?)
    }
}
