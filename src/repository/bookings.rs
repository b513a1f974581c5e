//! Bookings repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingDetails, BookingShort, BookingStatus, CreateBooking},
        item::ItemShort,
        user::UserShort,
    },
};

/// Internal row structure for booking detail queries
#[derive(Debug, FromRow)]
struct BookingDetailsRow {
    id: i64,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    status: BookingStatus,
    item_id: i64,
    item_name: String,
    booker_id: i64,
    booker_name: String,
}

impl From<BookingDetailsRow> for BookingDetails {
    fn from(row: BookingDetailsRow) -> Self {
        BookingDetails {
            id: row.id,
            start_date: row.start_date,
            end_date: row.end_date,
            status: row.status,
            item: ItemShort {
                id: row.item_id,
                name: row.item_name,
            },
            booker: UserShort {
                id: row.booker_id,
                name: row.booker_name,
            },
        }
    }
}

const DETAILS_SELECT: &str = "SELECT b.id, b.start_date, b.end_date, b.status, \
     b.item_id, i.name AS item_name, b.booker_id, u.name AS booker_name \
     FROM bookings b \
     JOIN items i ON b.item_id = i.id \
     JOIN users u ON b.booker_id = u.id";

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "SELECT id, item_id, booker_id, start_date, end_date, status \
             FROM bookings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Get booking with item and booker details
    pub async fn get_details_by_id(&self, id: i64) -> AppResult<BookingDetails> {
        let row = sqlx::query_as::<_, BookingDetailsRow>(&format!(
            "{} WHERE b.id = $1",
            DETAILS_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;
        Ok(row.into())
    }

    /// All bookings made by a user, newest start first
    pub async fn find_all_by_booker(&self, booker_id: i64) -> AppResult<Vec<BookingDetails>> {
        let rows = sqlx::query_as::<_, BookingDetailsRow>(&format!(
            "{} WHERE b.booker_id = $1 ORDER BY b.start_date DESC",
            DETAILS_SELECT
        ))
        .bind(booker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// All bookings on items owned by a user, newest start first
    pub async fn find_all_by_owner(&self, owner_id: i64) -> AppResult<Vec<BookingDetails>> {
        let rows = sqlx::query_as::<_, BookingDetailsRow>(&format!(
            "{} WHERE i.owner_id = $1 ORDER BY b.start_date DESC",
            DETAILS_SELECT
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a new booking in WAITING status
    pub async fn create(&self, booker_id: i64, booking: &CreateBooking) -> AppResult<Booking> {
        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (item_id, booker_id, start_date, end_date, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, item_id, booker_id, start_date, end_date, status",
        )
        .bind(booking.item_id)
        .bind(booker_id)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(BookingStatus::Waiting)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Set a booking's status
    pub async fn update_status(&self, id: i64, status: BookingStatus) -> AppResult<Booking> {
        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $1 WHERE id = $2 \
             RETURNING id, item_id, booker_id, start_date, end_date, status",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;
        Ok(updated)
    }

    /// Last booking for an item: greatest end strictly before `now`,
    /// rejected bookings excluded
    pub async fn find_last_for_item(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<BookingShort>> {
        let booking = sqlx::query_as::<_, BookingShort>(
            "SELECT id, booker_id, start_date, end_date FROM bookings \
             WHERE item_id = $1 AND end_date < $2 AND status != $3 \
             ORDER BY end_date DESC LIMIT 1",
        )
        .bind(item_id)
        .bind(now)
        .bind(BookingStatus::Rejected)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    /// Next booking for an item: greatest start strictly after `now`.
    /// The latest future booking, not the soonest.
    pub async fn find_next_for_item(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<Option<BookingShort>> {
        let booking = sqlx::query_as::<_, BookingShort>(
            "SELECT id, booker_id, start_date, end_date FROM bookings \
             WHERE item_id = $1 AND start_date > $2 \
             ORDER BY start_date DESC LIMIT 1",
        )
        .bind(item_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    /// Whether a user has a booking on an item that ended before `now`
    pub async fn completed_booking_exists(
        &self,
        item_id: i64,
        booker_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM bookings \
             WHERE item_id = $1 AND booker_id = $2 AND end_date < $3)",
        )
        .bind(item_id)
        .bind(booker_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
