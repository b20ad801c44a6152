pub mod command_speaker;
pub mod null_speaker;
pub mod registry;
pub mod speaker_trait;

pub use command_speaker::CommandSpeaker;
pub use null_speaker::NullSpeaker;
pub use registry::SpeakerRegistry;
pub use speaker_trait::Speaker;
