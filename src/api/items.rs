//! Item endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::{
        comment::{CommentDetails, CreateComment},
        item::{CreateItem, Item, ItemDetails, UpdateItem},
    },
};

use super::SharerId;

/// Item search query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Text to match against item descriptions
    pub text: Option<String>,
}

/// List the caller's items with booking info and comments
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Caller's items", body = Vec<ItemDetails>)
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
) -> AppResult<Json<Vec<ItemDetails>>> {
    let items = state.services.items.get_all_items(user_id).await?;
    Ok(Json(items))
}

/// Get item details by ID. Booking info is included for the owner only.
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Item details", body = ItemDetails),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
) -> AppResult<Json<ItemDetails>> {
    let item = state.services.items.get_item(id, user_id).await?;
    Ok(Json(item))
}

/// Create a new item owned by the caller
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Json(item): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let created = state.services.items.add_item(user_id, item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an item (merge-patch, owner only)
#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 404, description = "Item not found or caller is not the owner")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Json(update): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    let updated = state.services.items.edit_item(user_id, id, update).await?;
    Ok(Json(updated))
}

/// Search available items by description text
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching available items", body = Vec<Item>)
    )
)]
pub async fn search_items(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let text = query.text.unwrap_or_default();
    let items = state.services.items.search_items(&text).await?;
    Ok(Json(items))
}

/// Comment on an item after a completed booking
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    tag = "items",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i64, Header, description = "Caller user ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 200, description = "Comment created", body = CommentDetails),
        (status = 400, description = "Caller has no completed booking on the item"),
        (status = 404, description = "Item or user not found")
    )
)]
pub async fn create_comment(
    State(state): State<crate::AppState>,
    SharerId(user_id): SharerId,
    Path(id): Path<i64>,
    Json(comment): Json<CreateComment>,
) -> AppResult<Json<CommentDetails>> {
    let created = state
        .services
        .items
        .create_comment(user_id, id, comment)
        .await?;
    Ok(Json(created))
}
