/// Conversation handlers - HTTP endpoints for the conversation listing
use crate::error::AppResult;
use crate::models::ConversationRow;
use crate::services::ConversationService;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Deserialize)]
pub struct ConversationListParams {
    pub page: Option<i64>,
    #[serde(rename = "searchValue")]
    pub search_value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub from_contact_id: i64,
    pub to_contact_id: i64,
    pub from_contact_name: String,
    pub to_contact_name: String,
    pub content: String,
    pub created_at: String,
}

impl From<ConversationRow> for ConversationResponse {
    fn from(row: ConversationRow) -> Self {
        Self {
            from_contact_id: row.from_contact_id,
            to_contact_id: row.to_contact_id,
            from_contact_name: row.from_contact_name,
            to_contact_name: row.to_contact_name,
            content: row.content,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// List conversations, newest first.
///
/// `page` defaults to 1; `searchValue` defaults to match-all. Responds with
/// a JSON array; an empty array is a valid, successful response.
pub async fn list_conversations(
    pool: web::Data<PgPool>,
    query: web::Query<ConversationListParams>,
) -> AppResult<HttpResponse> {
    let page = query.page.unwrap_or(1);
    let search_value = query.search_value.as_deref().unwrap_or("");

    let service = ConversationService::new((**pool).clone());
    let rows = service.list(page, search_value).await?;

    let body: Vec<ConversationResponse> = rows.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn response_serializes_timestamp_as_rfc3339() {
        let row = ConversationRow {
            from_contact_id: 1,
            to_contact_id: 2,
            from_contact_name: "Alice".into(),
            to_contact_name: "Bob".into(),
            content: "hey".into(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
        };

        let resp = ConversationResponse::from(row);
        assert_eq!(resp.created_at, "2025-03-14T09:26:53+00:00");

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["from_contact_name"], "Alice");
        assert_eq!(json["created_at"], "2025-03-14T09:26:53+00:00");
    }

    #[test]
    fn query_params_accept_camel_case_search_value() {
        let params: ConversationListParams =
            serde_urlencoded::from_str("page=2&searchValue=Bob").unwrap();
        assert_eq!(params.page, Some(2));
        assert_eq!(params.search_value.as_deref(), Some("Bob"));

        let params: ConversationListParams = serde_urlencoded::from_str("").unwrap();
        assert_eq!(params.page, None);
        assert_eq!(params.search_value, None);
    }
}
