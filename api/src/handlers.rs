use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use shared::{ContactPage, PageMeta};

use crate::{
    error::{ApiError, ApiResult},
    filter::ContactFilter,
    pagination::{PageRequest, SortSpec},
    response::ApiResponse,
    state::AppState,
    validation::{self, CreateContactBody, ListContactsQuery, UpdateContactBody},
};

fn map_json_rejection(err: JsonRejection) -> ApiError {
    ApiError::bad_request(format!("Invalid JSON payload: {}", err.body_text()))
}

fn map_query_rejection(err: QueryRejection) -> ApiError {
    ApiError::bad_request(format!("Invalid query parameters: {}", err.body_text()))
}

/// GET /api/contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    params: Result<Query<ListContactsQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(raw) = params.map_err(map_query_rejection)?;
    let params = raw.validate().map_err(ApiError::validation)?;

    let page = PageRequest::resolve(params.page, params.limit);
    let sort = SortSpec::resolve(params.sort_by, params.order);
    let filter = ContactFilter::from_params(
        params.search.as_deref(),
        params.tags.as_deref(),
        params.is_favorite.as_deref(),
    );

    let (contacts, total) = state.contacts.list(&filter, page, sort).await?;
    let body = ContactPage {
        contacts,
        pagination: PageMeta::new(total, page.page, page.limit),
    };
    Ok(ApiResponse::ok("Contacts retrieved successfully", Some(body)))
}

/// GET /api/contacts/:id
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = validation::parse_id(&id).map_err(ApiError::validation)?;
    let contact = state
        .contacts
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact not found"))?;
    Ok(ApiResponse::ok("Contact retrieved successfully", Some(contact)))
}

/// POST /api/contacts
pub async fn create_contact(
    State(state): State<AppState>,
    body: Result<Json<CreateContactBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body.map_err(map_json_rejection)?;
    let new_contact = body.validate().map_err(ApiError::validation)?;
    // A duplicate phone trips the unique index and normalizes to 409.
    let contact = state.contacts.create(new_contact).await?;
    Ok(ApiResponse::created("Contact created successfully", Some(contact)))
}

/// PUT /api/contacts/:id
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateContactBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = validation::parse_id(&id).map_err(ApiError::validation)?;
    let Json(body) = body.map_err(map_json_rejection)?;
    let patch = body.validate().map_err(ApiError::validation)?;

    state
        .contacts
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact not found"))?;
    // A delete racing past the check above surfaces as RowNotFound and
    // still comes back as the same 404.
    let contact = state.contacts.update(id, patch).await?;
    Ok(ApiResponse::ok("Contact updated successfully", Some(contact)))
}

/// DELETE /api/contacts/:id
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = validation::parse_id(&id).map_err(ApiError::validation)?;
    state
        .contacts
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact not found"))?;
    state.contacts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/contacts/:id/favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = validation::parse_id(&id).map_err(ApiError::validation)?;
    state
        .contacts
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact not found"))?;
    let contact = state.contacts.toggle_favorite(id).await?;
    Ok(ApiResponse::ok(
        "Contact favorite status updated successfully",
        Some(contact),
    ))
}

/// GET /
pub async fn index() -> &'static str {
    "Contacts API is running"
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let uptime = state.started_at.elapsed().as_secs();
    let now = chrono::Utc::now().to_rfc3339();

    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
        .is_ok();

    if db_ok {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "uptime_secs": uptime
            })),
        )
    } else {
        tracing::warn!(uptime_secs = uptime, "health check degraded — db unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "uptime_secs": uptime
            })),
        )
    }
}

pub async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
