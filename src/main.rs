use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "voxchat", about = "Hands-free voice chat with a local language model")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = voxchat_core::AppConfig::load_from_file(&cli.config)
        .with_context(|| format!("failed to load config from {:?}", cli.config))?;

    let env_filter =
        EnvFilter::try_new(&config.general.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false),
    );

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    tracing::info!("voxchat starting");

    // No microphone, no conversation: fail here rather than on the
    // first listening phase.
    let device_manager = voxchat_audio::DeviceManager::new();
    device_manager
        .get_input_device(&config.input.device_name)
        .with_context(|| format!("failed to get input device: {}", config.input.device_name))?;
    tracing::info!("using input device: {}", config.input.device_name);

    let registry = voxchat_engine::EngineRegistry::new();
    let mut engine = registry.create(&config.recognizer.engine).with_context(|| {
        format!(
            "recognizer engine '{}' unavailable (available: {:?})",
            config.recognizer.engine,
            registry.list_engines()
        )
    })?;

    let engine_config = match config.recognizer.engine.as_str() {
        "vosk" => {
            let vosk_cfg = config.recognizer.vosk.clone().unwrap_or_default();
            toml::Value::try_from(vosk_cfg).context("failed to serialize vosk config")?
        }
        _ => toml::Value::Table(Default::default()),
    };
    engine
        .initialize(engine_config)
        .with_context(|| format!("failed to initialize engine '{}'", config.recognizer.engine))?;
    let listener = voxchat_engine::Listener::new(engine);

    let source = voxchat_audio::MicSource::new(
        &config.input.device_name,
        config.general.sample_rate,
        config.general.block_size as usize,
    );

    let model = voxchat_llm::OllamaClient::new(&config.llm);
    tracing::info!(
        endpoint = %config.llm.endpoint,
        model = %config.llm.model,
        "language model backend configured"
    );

    let speaker_registry = voxchat_speech::SpeakerRegistry::new();
    let mut speaker = speaker_registry.create(&config.speech.engine).with_context(|| {
        format!(
            "speaker engine '{}' unavailable (available: {:?})",
            config.speech.engine,
            speaker_registry.list_speakers()
        )
    })?;

    let speaker_config = match config.speech.command.clone() {
        Some(cmd_cfg) => {
            toml::Value::try_from(cmd_cfg).context("failed to serialize speech config")?
        }
        None => toml::Value::Table(Default::default()),
    };
    speaker
        .initialize(speaker_config)
        .with_context(|| format!("failed to initialize speaker '{}'", config.speech.engine))?;

    tracing::info!(
        recognizer = %config.recognizer.engine,
        speaker = %config.speech.engine,
        "conversation loop starting"
    );

    let mut conversation = voxchat_turn::ConversationLoop::new(
        Box::new(source),
        listener,
        Box::new(model),
        speaker,
    );

    // Runs until the process is signalled or the audio path dies.
    conversation.run().await.context("conversation loop failed")
}
