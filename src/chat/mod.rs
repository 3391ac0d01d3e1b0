mod assistant;
mod gemini;
mod message;
mod session;

pub use assistant::{
    from_channel, spawn_reply, system_instruction, Assistant, EMPTY_REPLY, GREETING,
    MISSING_KEY_REPLY, UNAVAILABLE_REPLY,
};
pub use gemini::GeminiAssistant;
pub use message::{ChatMessage, LibertyPart, Role};
pub use session::ChatSession;
