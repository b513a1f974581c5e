//! Item management service: aggregation, search and comments

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        comment::{CommentDetails, CreateComment},
        item::{CreateItem, Item, ItemDetails, UpdateItem},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get an item with comments. Last/next booking info is visible to the
    /// owner only.
    pub async fn get_item(&self, item_id: i64, caller_id: i64) -> AppResult<ItemDetails> {
        let item = self.repository.items.get_by_id(item_id).await?;
        let is_owner = item.owner_id == caller_id;

        let mut details = ItemDetails::from_item(item);
        if is_owner {
            self.add_bookings(&mut details).await?;
        }
        details.comments = self.repository.comments.find_all_by_item(item_id).await?;
        Ok(details)
    }

    /// All items owned by the caller, enriched with booking info and
    /// comments, ordered by item id
    pub async fn get_all_items(&self, owner_id: i64) -> AppResult<Vec<ItemDetails>> {
        let items = self.repository.items.find_all_by_owner(owner_id).await?;

        let mut result = Vec::with_capacity(items.len());
        for item in items {
            let item_id = item.id;
            let mut details = ItemDetails::from_item(item);
            self.add_bookings(&mut details).await?;
            details.comments = self.repository.comments.find_all_by_item(item_id).await?;
            result.push(details);
        }
        Ok(result)
    }

    /// Create a new item owned by the caller
    pub async fn add_item(&self, owner_id: i64, item: CreateItem) -> AppResult<Item> {
        item.validate()?;

        // Verify owner exists
        self.repository.users.get_by_id(owner_id).await?;

        let created = self.repository.items.create(owner_id, &item).await?;
        tracing::info!("Item created: id={} owner={}", created.id, owner_id);
        Ok(created)
    }

    /// Update an item; only supplied fields overwrite. A caller who is not
    /// the owner gets NotFound, matching how the item is invisible to them
    /// for editing.
    pub async fn edit_item(
        &self,
        owner_id: i64,
        item_id: i64,
        update: UpdateItem,
    ) -> AppResult<Item> {
        update.validate()?;

        let mut item = self.repository.items.get_by_id(item_id).await?;
        if item.owner_id != owner_id {
            return Err(AppError::NotFound(format!(
                "User {} is not the owner of item {}",
                owner_id, item_id
            )));
        }

        update.apply(&mut item);
        let updated = self.repository.items.update(&item).await?;
        tracing::info!("Item updated: id={}", updated.id);
        Ok(updated)
    }

    /// Search available items by description substring. Blank text returns
    /// an empty list without touching storage.
    pub async fn search_items(&self, text: &str) -> AppResult<Vec<Item>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.repository.items.search(text).await
    }

    /// Create a comment on an item. The author must have a booking on the
    /// item that ended before now.
    pub async fn create_comment(
        &self,
        author_id: i64,
        item_id: i64,
        comment: CreateComment,
    ) -> AppResult<CommentDetails> {
        comment.validate()?;

        let now = Utc::now();
        self.repository.users.get_by_id(author_id).await?;
        self.repository.items.get_by_id(item_id).await?;

        let completed = self
            .repository
            .bookings
            .completed_booking_exists(item_id, author_id, now)
            .await?;
        if !completed {
            return Err(AppError::BadRequest(format!(
                "User with id={} has no completed booking for item id={}",
                author_id, item_id
            )));
        }

        let created = self
            .repository
            .comments
            .create(item_id, author_id, &comment.text, now)
            .await?;
        tracing::info!("Comment created: id={} item={}", created.id, item_id);
        self.repository.comments.get_details_by_id(created.id).await
    }

    async fn add_bookings(&self, details: &mut ItemDetails) -> AppResult<()> {
        let now = Utc::now();
        details.last_booking = self
            .repository
            .bookings
            .find_last_for_item(details.id, now)
            .await?;
        details.next_booking = self
            .repository
            .bookings
            .find_next_for_item(details.id, now)
            .await?;
        Ok(())
    }
}
