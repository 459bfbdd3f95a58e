/// Conversation Service Library
///
/// Turns the append-only store of directed messages between contacts into a
/// paginated, searchable list of conversations: one row per unordered contact
/// pair, represented by its most recent matching message.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers for the conversations endpoint
/// - `services`: Business logic layer (validation, pagination, search terms)
/// - `db`: Database access layer, embedded migrations and the core query
/// - `models`: Row and DTO types for contacts, messages and conversations
/// - `jobs`: Background integrity sweep over the message store
/// - `metrics`: Prometheus collectors and the `/metrics` handler
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
/// - `logging`: Tracing subscriber setup
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
