/// Business logic layer
pub mod conversation_service;

pub use conversation_service::{ConversationService, PAGE_SIZE};
