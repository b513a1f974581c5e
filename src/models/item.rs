//! Item model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::booking::BookingShort;
use super::comment::CommentDetails;

/// Item model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    /// Item request this item was listed in answer to, if any
    pub request_id: Option<i64>,
}

/// Short item representation embedded in booking views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ItemShort {
    pub id: i64,
    pub name: String,
}

/// Item with booking info and comments for detail views.
/// Last/next booking are populated only for the item's owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
    pub last_booking: Option<BookingShort>,
    pub next_booking: Option<BookingShort>,
    pub comments: Vec<CommentDetails>,
}

impl ItemDetails {
    /// Plain item fields with no booking info and no comments yet
    pub fn from_item(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id: item.owner_id,
            request_id: item.request_id,
            last_booking: None,
            next_booking: None,
            comments: Vec::new(),
        }
    }
}

/// Create item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "Name must not be blank"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

/// Update item request (merge-patch: only supplied fields overwrite)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1, message = "Name must not be blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl UpdateItem {
    /// Apply the non-null fields onto an existing item
    pub fn apply(&self, item: &mut Item) {
        if let Some(ref name) = self.name {
            item.name = name.clone();
        }
        if let Some(ref description) = self.description {
            item.description = description.clone();
        }
        if let Some(available) = self.available {
            item.available = available;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        Item {
            id: 1,
            name: "Drill".to_string(),
            description: "Cordless drill".to_string(),
            available: true,
            owner_id: 1,
            request_id: None,
        }
    }

    #[test]
    fn update_overwrites_only_supplied_fields() {
        let mut item = item();
        UpdateItem {
            name: None,
            description: Some("Cordless drill, two batteries".to_string()),
            available: Some(false),
        }
        .apply(&mut item);
        assert_eq!(item.name, "Drill");
        assert_eq!(item.description, "Cordless drill, two batteries");
        assert!(!item.available);
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let mut patched = item();
        UpdateItem {
            name: None,
            description: None,
            available: None,
        }
        .apply(&mut patched);
        assert_eq!(patched.name, item().name);
        assert_eq!(patched.description, item().description);
        assert_eq!(patched.available, item().available);
    }

    #[test]
    fn details_start_without_booking_info() {
        let details = ItemDetails::from_item(item());
        assert!(details.last_booking.is_none());
        assert!(details.next_booking.is_none());
        assert!(details.comments.is_empty());
    }
}
