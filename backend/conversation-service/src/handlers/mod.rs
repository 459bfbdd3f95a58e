/// Conversation handlers - HTTP endpoints
pub mod conversations;

pub use conversations::list_conversations;
