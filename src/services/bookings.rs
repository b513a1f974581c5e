//! Booking management service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::booking::{BookingDetails, BookingState, BookingStatus, CreateBooking},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a booking in WAITING status
    pub async fn create_booking(
        &self,
        booker_id: i64,
        booking: CreateBooking,
    ) -> AppResult<BookingDetails> {
        // Verify booker exists
        self.repository.users.get_by_id(booker_id).await?;

        let item = self.repository.items.get_by_id(booking.item_id).await?;
        if !item.available {
            return Err(AppError::BadRequest(format!(
                "Item with id {} is not available for booking",
                item.id
            )));
        }
        if booking.start_date >= booking.end_date {
            return Err(AppError::BadRequest(
                "Booking start must be before its end".to_string(),
            ));
        }
        if item.owner_id == booker_id {
            return Err(AppError::BadRequest(
                "Owner cannot book their own item".to_string(),
            ));
        }

        let created = self.repository.bookings.create(booker_id, &booking).await?;
        tracing::info!(
            "Booking created: id={} item={} booker={}",
            created.id,
            created.item_id,
            booker_id
        );
        self.repository.bookings.get_details_by_id(created.id).await
    }

    /// Approve or reject a booking. Only the item owner may decide, and
    /// repeating an already-made decision is rejected.
    pub async fn update_booking(
        &self,
        booking_id: i64,
        caller_id: i64,
        approved: bool,
    ) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        let item = self.repository.items.get_by_id(booking.item_id).await?;
        if item.owner_id != caller_id {
            return Err(AppError::NotFound(format!(
                "User {} is not the owner of item {}",
                caller_id, item.id
            )));
        }

        let new_status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        if booking.status == new_status {
            return Err(AppError::BadRequest(format!(
                "Booking with id {} is already {}",
                booking_id, new_status
            )));
        }

        self.repository
            .bookings
            .update_status(booking_id, new_status)
            .await?;
        tracing::info!("Booking {}: id={}", new_status, booking_id);
        self.repository.bookings.get_details_by_id(booking_id).await
    }

    /// Get a booking; visible to the booker and the item owner only
    pub async fn get_booking(&self, booking_id: i64, caller_id: i64) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        let item = self.repository.items.get_by_id(booking.item_id).await?;
        if booking.booker_id != caller_id && item.owner_id != caller_id {
            return Err(AppError::NotFound(format!(
                "Booking with id {} not found",
                booking_id
            )));
        }
        self.repository.bookings.get_details_by_id(booking_id).await
    }

    /// Bookings made by a user, filtered by lifecycle state
    pub async fn get_bookings_by_state(
        &self,
        user_id: i64,
        state: &str,
    ) -> AppResult<Vec<BookingDetails>> {
        let state = Self::parse_state(state)?;
        self.repository.users.get_by_id(user_id).await?;
        let bookings = self.repository.bookings.find_all_by_booker(user_id).await?;
        Ok(Self::filter_by_state(bookings, state))
    }

    /// Bookings on items owned by a user, filtered by lifecycle state
    pub async fn get_owner_bookings_by_state(
        &self,
        user_id: i64,
        state: &str,
    ) -> AppResult<Vec<BookingDetails>> {
        let state = Self::parse_state(state)?;
        self.repository.users.get_by_id(user_id).await?;
        let bookings = self.repository.bookings.find_all_by_owner(user_id).await?;
        Ok(Self::filter_by_state(bookings, state))
    }

    fn parse_state(state: &str) -> AppResult<BookingState> {
        state.parse::<BookingState>().map_err(AppError::BadRequest)
    }

    fn filter_by_state(bookings: Vec<BookingDetails>, state: BookingState) -> Vec<BookingDetails> {
        let now = Utc::now();
        bookings
            .into_iter()
            .filter(|b| state.matches(b.status, b.start_date, b.end_date, now))
            .collect()
    }
}
