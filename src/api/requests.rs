//! Item request endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::request::{CreateItemRequest, ItemRequest, ItemRequestDetails},
};

use super::SharerId;

/// Create an item request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Request created", body = ItemRequest),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Json(request): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<ItemRequest>)> {
    let created = state
        .services
        .requests
        .create_request(user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List the caller's item requests with answering items
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Caller's requests", body = Vec<ItemRequestDetails>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let requests = state.services.requests.get_all_requests(user_id).await?;
    Ok(Json(requests))
}

/// Get an item request with answering items
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("id" = i64, Path, description = "Request ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Request details", body = ItemRequestDetails),
        (status = 404, description = "Request or user not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> AppResult<Json<ItemRequestDetails>> {
    let request = state.services.requests.get_request(id, user_id).await?;
    Ok(Json(request))
}
