/// Data models for conversation-service
///
/// - `Contact` / `Message`: persistent rows, loaded in bulk by the dataset
///   tooling and read by the integrity sweep
/// - `ConversationRow`: derived output of the conversation query; never
///   persisted
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub from_contact_id: i64,
    pub to_contact_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One conversation: an unordered contact pair represented by its most
/// recent message that matched the active search filter.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ConversationRow {
    pub from_contact_id: i64,
    pub to_contact_id: i64,
    pub from_contact_name: String,
    pub to_contact_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Canonical unordered-pair key for a directed message.
///
/// A message A→B and a message B→A collapse onto the same key. Equal ids are
/// corrupt data outside the engine's contract and are rejected here rather
/// than silently merged.
pub fn canonical_pair(a: i64, b: i64) -> Option<(i64, i64)> {
    if a == b {
        return None;
    }
    Some((a.min(b), a.max(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_pair_is_symmetric() {
        assert_eq!(canonical_pair(7, 3), canonical_pair(3, 7));
        assert_eq!(canonical_pair(3, 7), Some((3, 7)));
    }

    #[test]
    fn canonical_pair_rejects_self_messages() {
        assert_eq!(canonical_pair(5, 5), None);
    }
}
