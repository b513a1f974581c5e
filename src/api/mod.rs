//! API handlers for ShareIt REST endpoints

pub mod bookings;
pub mod health;
pub mod items;
pub mod openapi;
pub mod requests;
pub mod users;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, AppState};

/// Header carrying the caller's user id. There is no session or token
/// layer; the id is trusted as-is.
pub const SHARER_USER_HEADER: &str = "X-Sharer-User-Id";

/// Extractor for the calling user's id from the X-Sharer-User-Id header
pub struct SharerId(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for SharerId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(SHARER_USER_HEADER)
            .ok_or_else(|| {
                AppError::BadRequest(format!("Missing {} header", SHARER_USER_HEADER))
            })?;

        let user_id = header
            .to_str()
            .ok()
            .and_then(|value| value.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                AppError::BadRequest(format!("Invalid {} header", SHARER_USER_HEADER))
            })?;

        Ok(SharerId(user_id))
    }
}
