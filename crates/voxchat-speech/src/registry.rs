use crate::speaker_trait::Speaker;
use std::collections::HashMap;
use voxchat_core::SpeechError;

pub struct SpeakerRegistry {
    factories: HashMap<String, fn() -> Box<dyn Speaker>>,
}

impl SpeakerRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("command", || {
            Box::new(crate::command_speaker::CommandSpeaker::new())
        });
        registry.register("null", || Box::new(crate::null_speaker::NullSpeaker::new()));
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn Speaker>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Speaker>, SpeechError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| SpeechError::EngineNotFound(name.to_string()))
    }

    pub fn list_speakers(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for SpeakerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_new_has_command_speaker() {
        let registry = SpeakerRegistry::new();
        let speaker = registry.create("command").unwrap();
        assert_eq!(speaker.name(), "command");
    }

    #[test]
    fn test_registry_new_has_null_speaker() {
        let registry = SpeakerRegistry::new();
        let speaker = registry.create("null").unwrap();
        assert_eq!(speaker.name(), "null");
    }

    #[test]
    fn test_registry_create_unknown_returns_error() {
        let registry = SpeakerRegistry::new();
        match registry.create("nope") {
            Err(SpeechError::EngineNotFound(name)) => assert_eq!(name, "nope"),
            _ => panic!("expected EngineNotFound"),
        }
    }

    #[test]
    fn test_registry_list_speakers() {
        let registry = SpeakerRegistry::new();
        let speakers = registry.list_speakers();
        assert!(speakers.contains(&"command"));
        assert!(speakers.contains(&"null"));
    }
}
