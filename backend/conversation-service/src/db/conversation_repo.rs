use crate::models::ConversationRow;
use sqlx::PgPool;

/// The conversation query.
///
/// Inner select: deduplicate directed messages into unordered pairs with
/// `DISTINCT ON` over the canonical key `(LEAST, GREATEST)`, keeping the
/// newest message per pair (message id breaks exact timestamp ties within a
/// pair). The grouped top-1 runs inside PostgreSQL; directed rows are never
/// materialized in the service.
///
/// Outer select: order representatives by recency with the deterministic
/// pair tie-break, then slice one page. Dedup must happen before the
/// LIMIT/OFFSET or page boundaries would be computed over directed rows.
///
/// Inner joins drop messages with dangling contact references, and the
/// `from <> to` predicate drops self-messages; both are loader contract
/// breaches that must not fail the whole page (the integrity sweep reports
/// them).
const CONVERSATIONS_SQL: &str = r#"
SELECT from_contact_id, to_contact_id, from_contact_name, to_contact_name, content, created_at
FROM (
    SELECT DISTINCT ON (
            LEAST(m.from_contact_id, m.to_contact_id),
            GREATEST(m.from_contact_id, m.to_contact_id))
        m.from_contact_id,
        m.to_contact_id,
        c1.name AS from_contact_name,
        c2.name AS to_contact_name,
        m.content,
        m.created_at,
        LEAST(m.from_contact_id, m.to_contact_id) AS pair_lo,
        GREATEST(m.from_contact_id, m.to_contact_id) AS pair_hi
    FROM messages m
    JOIN contacts c1 ON c1.id = m.from_contact_id
    JOIN contacts c2 ON c2.id = m.to_contact_id
    WHERE m.from_contact_id <> m.to_contact_id
      AND (c1.name ILIKE $1
        OR c2.name ILIKE $1
        OR c1.phone_number ILIKE $1
        OR c2.phone_number ILIKE $1
        OR m.content ILIKE $1)
    ORDER BY
        LEAST(m.from_contact_id, m.to_contact_id),
        GREATEST(m.from_contact_id, m.to_contact_id),
        m.created_at DESC,
        m.id DESC
) latest
ORDER BY created_at DESC, pair_hi DESC, pair_lo ASC
LIMIT $2 OFFSET $3
"#;

/// Fetch one page of conversations matching `search_value`.
///
/// `search_value` is treated as a literal substring: LIKE metacharacters are
/// escaped before the term is bound, so user input can never widen the
/// pattern. An empty term matches everything.
pub async fn search_conversations(
    pool: &PgPool,
    search_value: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<ConversationRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ConversationRow>(CONVERSATIONS_SQL)
        .bind(like_pattern(search_value))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Wrap a search term into a substring LIKE pattern.
pub fn like_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// Escape LIKE metacharacters so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_term_matches_everything() {
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn plain_terms_pass_through() {
        assert_eq!(like_pattern("Bob"), "%Bob%");
        assert_eq!(like_pattern("+65 8123"), "%+65 8123%");
    }

    #[test]
    fn like_metacharacters_are_literalized() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }

    #[test]
    fn query_dedups_before_paginating() {
        // The LIMIT/OFFSET must apply to the deduplicated subquery, not to
        // directed rows.
        let distinct = CONVERSATIONS_SQL
            .find("DISTINCT ON")
            .expect("grouped top-1 selection");
        let limit = CONVERSATIONS_SQL
            .find("LIMIT $2 OFFSET $3")
            .expect("bound pagination");
        assert!(distinct < limit);
    }

    #[test]
    fn query_binds_rather_than_concatenates() {
        assert!(CONVERSATIONS_SQL.contains("ILIKE $1"));
        assert!(!CONVERSATIONS_SQL.contains('\''));
    }

    #[test]
    fn ordering_is_total() {
        assert!(CONVERSATIONS_SQL.contains("ORDER BY created_at DESC, pair_hi DESC, pair_lo ASC"));
    }
}
