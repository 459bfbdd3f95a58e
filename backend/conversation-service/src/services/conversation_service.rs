use crate::db::conversation_repo;
use crate::error::{AppError, AppResult};
use crate::models::ConversationRow;
use sqlx::PgPool;

/// Fixed page size for the conversations listing.
pub const PAGE_SIZE: i64 = 50;

/// Conversation service - the stateless read path over the message store.
///
/// Identical inputs against an identical data snapshot always produce
/// identical output; the service holds no state between calls beyond the
/// injected pool handle.
pub struct ConversationService {
    pool: PgPool,
}

impl ConversationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List one page of conversations matching `search_value`.
    ///
    /// `page` is 1-based; values below 1 are rejected before any query is
    /// issued. An offset past the last matching conversation yields an empty
    /// page, not an error.
    pub async fn list(&self, page: i64, search_value: &str) -> AppResult<Vec<ConversationRow>> {
        let offset = page_offset(page)?;

        let rows =
            conversation_repo::search_conversations(&self.pool, search_value, PAGE_SIZE, offset)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, page, "conversation query failed");
                    AppError::from(e)
                })?;

        crate::metrics::conversations::record_query(search_value.is_empty(), rows.len());

        Ok(rows)
    }
}

fn page_offset(page: i64) -> AppResult<i64> {
    if page < 1 {
        return Err(AppError::InvalidPage(page));
    }
    (page - 1)
        .checked_mul(PAGE_SIZE)
        .ok_or(AppError::InvalidPage(page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(page_offset(1).unwrap(), 0);
    }

    #[test]
    fn pages_advance_by_page_size() {
        assert_eq!(page_offset(2).unwrap(), 50);
        assert_eq!(page_offset(7).unwrap(), 300);
    }

    #[test]
    fn zero_and_negative_pages_are_rejected() {
        assert!(matches!(page_offset(0), Err(AppError::InvalidPage(0))));
        assert!(matches!(page_offset(-4), Err(AppError::InvalidPage(-4))));
    }

    #[test]
    fn absurd_pages_do_not_overflow() {
        assert!(page_offset(i64::MAX).is_err());
    }
}
