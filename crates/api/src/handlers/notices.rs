//! Notice CRUD endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use noticeboard_core::notice_ports::CreateNotice;
use noticeboard_domain::envelope::{ApiSuccess, Paginated};
use noticeboard_domain::errors::AppError;
use noticeboard_domain::types::{AuditEvent, AuditEventType, NewNotice, Notice};

use crate::context::AppContext;
use crate::extract::{Json, Path, Query};
use crate::middleware::{HandlerError, RequestId};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// `GET /api/notices` — a page of notices, newest first.
pub async fn list_notices(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiSuccess<Paginated<Notice>>>, HandlerError> {
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    let notices = ctx
        .metrics
        .measure_execution_time("notices.list", ctx.notices.list())
        .await?;

    let total_items = notices.len() as u64;
    let start = (page - 1) as usize * page_size as usize;
    let items: Vec<Notice> =
        notices.into_iter().skip(start).take(page_size as usize).collect();

    Ok(Json(ApiSuccess::new(
        Paginated::new(items, page, page_size, total_items),
        Some(request_id.0),
    )))
}

/// `POST /api/notices` — validate, persist, audit.
pub async fn create_notice(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<NewNotice>,
) -> Result<(StatusCode, Json<ApiSuccess<Notice>>), HandlerError> {
    let notice = validate_new_notice(body)?;
    let created = ctx
        .metrics
        .measure_execution_time("notices.create", ctx.notices.create(notice))
        .await?;

    let mut details = Map::new();
    details.insert("title".to_string(), Value::from(created.title.clone()));
    ctx.audit.record(
        AuditEvent::new(AuditEventType::DataCreate, "공지 생성")
            .with_resource("공지", created.id.to_string())
            .with_details(details),
    );

    Ok((StatusCode::CREATED, Json(ApiSuccess::new(created, Some(request_id.0)))))
}

/// `GET /api/notices/{id}`.
pub async fn get_notice(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiSuccess<Notice>>, HandlerError> {
    let notice = ctx
        .metrics
        .measure_execution_time("notices.get", ctx.notices.get(id))
        .await?;
    Ok(Json(ApiSuccess::new(notice, Some(request_id.0))))
}

/// `DELETE /api/notices/{id}`.
pub async fn delete_notice(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiSuccess<Value>>, HandlerError> {
    ctx.metrics
        .measure_execution_time("notices.delete", ctx.notices.delete(id))
        .await?;

    ctx.audit.record(
        AuditEvent::new(AuditEventType::DataDelete, "공지 삭제")
            .with_resource("공지", id.to_string()),
    );

    Ok(Json(ApiSuccess::new(json!({ "deleted": true, "id": id }), Some(request_id.0))))
}

/// Reject blank or missing required fields; fill optional fields with
/// their documented defaults.
fn validate_new_notice(body: NewNotice) -> Result<CreateNotice, AppError> {
    let title = non_blank(body.title);
    let content = non_blank(body.content);

    let mut missing = Vec::new();
    if title.is_none() {
        missing.push("title");
    }
    if content.is_none() {
        missing.push("content");
    }
    if !missing.is_empty() {
        let mut metadata = Map::new();
        metadata.insert(
            "missing".to_string(),
            Value::Array(missing.into_iter().map(Value::from).collect()),
        );
        return Err(AppError::validation("필수 항목이 누락되었습니다", Some(metadata)));
    }

    Ok(CreateNotice {
        // Checked non-empty above.
        title: title.unwrap_or_default(),
        content: content.unwrap_or_default(),
        category: non_blank(body.category).unwrap_or_else(|| "general".to_string()),
        author: non_blank(body.author).unwrap_or_else(|| "관리자".to_string()),
        date: non_blank(body.date)
            .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string()),
        visibility: non_blank(body.visibility).unwrap_or_else(|| "public".to_string()),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use noticeboard_domain::types::NewNotice;
    use serde_json::json;

    use super::validate_new_notice;

    #[test]
    fn blank_required_fields_are_rejected_with_the_field_list() {
        let body = NewNotice { title: Some("  ".into()), ..NewNotice::default() };
        let err = validate_new_notice(body).unwrap_err();

        assert_eq!(err.status, 400);
        let metadata = err.metadata.unwrap();
        assert_eq!(metadata["missing"], json!(["title", "content"]));
    }

    #[test]
    fn optional_fields_get_defaults() {
        let body = NewNotice {
            title: Some("점검 안내".into()),
            content: Some("본문".into()),
            ..NewNotice::default()
        };
        let notice = validate_new_notice(body).unwrap();

        assert_eq!(notice.category, "general");
        assert_eq!(notice.author, "관리자");
        assert_eq!(notice.visibility, "public");
        assert_eq!(notice.date.len(), 10);
    }
}
