//! Comments repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::comment::{Comment, CommentDetails},
};

#[derive(Clone)]
pub struct CommentsRepository {
    pool: Pool<Postgres>,
}

impl CommentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a new comment
    pub async fn create(
        &self,
        item_id: i64,
        author_id: i64,
        text: &str,
        created: DateTime<Utc>,
    ) -> AppResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (text, item_id, author_id, created) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, text, item_id, author_id, created",
        )
        .bind(text)
        .bind(item_id)
        .bind(author_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    /// All comments for an item, with author names
    pub async fn find_all_by_item(&self, item_id: i64) -> AppResult<Vec<CommentDetails>> {
        let comments = sqlx::query_as::<_, CommentDetails>(
            "SELECT c.id, c.text, u.name AS author_name, c.created \
             FROM comments c \
             JOIN users u ON c.author_id = u.id \
             WHERE c.item_id = $1",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    /// Comment details by id, with author name
    pub async fn get_details_by_id(&self, id: i64) -> AppResult<CommentDetails> {
        let comment = sqlx::query_as::<_, CommentDetails>(
            "SELECT c.id, c.text, u.name AS author_name, c.created \
             FROM comments c \
             JOIN users u ON c.author_id = u.id \
             WHERE c.id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }
}
