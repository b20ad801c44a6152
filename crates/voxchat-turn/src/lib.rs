pub mod conversation;

pub use conversation::{ConversationLoop, ConversationTurn};
