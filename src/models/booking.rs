//! Booking model, stored status and derived lifecycle state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use super::item::ItemShort;
use super::user::UserShort;

/// Stored booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            "CANCELED" => Ok(BookingStatus::Canceled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

// SQLx conversion for BookingStatus (stored as TEXT)
impl sqlx::Type<Postgres> for BookingStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for BookingStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookingStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Derived booking lifecycle state, used for list filtering.
///
/// WAITING and REJECTED come straight from the stored status and take
/// precedence over any timestamp comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    /// Classify a booking by stored status and time range relative to `now`.
    /// First match wins.
    pub fn classify(
        status: BookingStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> BookingState {
        match status {
            BookingStatus::Rejected => BookingState::Rejected,
            BookingStatus::Waiting => BookingState::Waiting,
            _ if end < now => BookingState::Past,
            _ if start > now => BookingState::Future,
            _ if start <= now && now <= end => BookingState::Current,
            _ => BookingState::All,
        }
    }

    /// Whether a booking with the given status and range falls under this
    /// state filter. ALL matches every booking.
    pub fn matches(
        &self,
        status: BookingStatus,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> bool {
        match self {
            BookingState::All => true,
            state => Self::classify(status, start, end, now) == *state,
        }
    }
}

impl std::str::FromStr for BookingState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            _ => Err(format!("Unknown state: {}", s)),
        }
    }
}

/// Booking model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub item_id: i64,
    pub booker_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: BookingStatus,
}

impl Booking {
    /// Lifecycle state of this booking at `now`
    pub fn state_at(&self, now: DateTime<Utc>) -> BookingState {
        BookingState::classify(self.status, self.start_date, self.end_date, now)
    }
}

/// Booking with item and booker details for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingDetails {
    pub id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub item: ItemShort,
    pub booker: UserShort,
}

/// Short booking representation embedded in item detail views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingShort {
    pub id: i64,
    pub booker_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub item_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn rejected_status_wins_over_timestamps() {
        let n = now();
        for (start, end) in [
            (n - Duration::days(2), n - Duration::days(1)),
            (n + Duration::days(1), n + Duration::days(2)),
            (n - Duration::hours(1), n + Duration::hours(1)),
        ] {
            assert_eq!(
                BookingState::classify(BookingStatus::Rejected, start, end, n),
                BookingState::Rejected
            );
        }
    }

    #[test]
    fn waiting_status_wins_over_timestamps() {
        let n = now();
        for (start, end) in [
            (n - Duration::days(2), n - Duration::days(1)),
            (n + Duration::days(1), n + Duration::days(2)),
            (n - Duration::hours(1), n + Duration::hours(1)),
        ] {
            assert_eq!(
                BookingState::classify(BookingStatus::Waiting, start, end, n),
                BookingState::Waiting
            );
        }
    }

    #[test]
    fn approved_booking_classifies_by_time() {
        let n = now();
        assert_eq!(
            BookingState::classify(
                BookingStatus::Approved,
                n - Duration::days(2),
                n - Duration::days(1),
                n
            ),
            BookingState::Past
        );
        assert_eq!(
            BookingState::classify(
                BookingStatus::Approved,
                n + Duration::days(1),
                n + Duration::days(2),
                n
            ),
            BookingState::Future
        );
        assert_eq!(
            BookingState::classify(
                BookingStatus::Approved,
                n - Duration::hours(1),
                n + Duration::hours(1),
                n
            ),
            BookingState::Current
        );
    }

    #[test]
    fn range_boundaries_are_inclusive_for_current() {
        let n = now();
        // start == now
        assert_eq!(
            BookingState::classify(BookingStatus::Approved, n, n + Duration::hours(1), n),
            BookingState::Current
        );
        // end == now
        assert_eq!(
            BookingState::classify(BookingStatus::Approved, n - Duration::hours(1), n, n),
            BookingState::Current
        );
    }

    #[test]
    fn state_parsing_is_case_insensitive() {
        assert_eq!("current".parse::<BookingState>(), Ok(BookingState::Current));
        assert_eq!("Past".parse::<BookingState>(), Ok(BookingState::Past));
        assert_eq!("FUTURE".parse::<BookingState>(), Ok(BookingState::Future));
        assert_eq!("waiting".parse::<BookingState>(), Ok(BookingState::Waiting));
        assert_eq!("rejected".parse::<BookingState>(), Ok(BookingState::Rejected));
        assert_eq!("all".parse::<BookingState>(), Ok(BookingState::All));
    }

    #[test]
    fn unknown_state_is_an_error() {
        let err = "UNSUPPORTED_STATUS".parse::<BookingState>().unwrap_err();
        assert_eq!(err, "Unknown state: UNSUPPORTED_STATUS");
    }

    #[test]
    fn all_filter_matches_everything() {
        let n = now();
        assert!(BookingState::All.matches(
            BookingStatus::Rejected,
            n - Duration::days(2),
            n - Duration::days(1),
            n
        ));
        assert!(BookingState::All.matches(
            BookingStatus::Approved,
            n + Duration::days(1),
            n + Duration::days(2),
            n
        ));
    }

    #[test]
    fn state_filter_matches_only_its_state() {
        let n = now();
        let start = n - Duration::days(2);
        let end = n - Duration::days(1);
        assert!(BookingState::Past.matches(BookingStatus::Approved, start, end, n));
        assert!(!BookingState::Future.matches(BookingStatus::Approved, start, end, n));
        // waiting booking in the past is WAITING, not PAST
        assert!(!BookingState::Past.matches(BookingStatus::Waiting, start, end, n));
    }

    #[test]
    fn canceled_booking_classifies_by_time() {
        let n = now();
        assert_eq!(
            BookingState::classify(
                BookingStatus::Canceled,
                n - Duration::days(2),
                n - Duration::days(1),
                n
            ),
            BookingState::Past
        );
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            BookingStatus::Waiting,
            BookingStatus::Approved,
            BookingStatus::Rejected,
            BookingStatus::Canceled,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>(), Ok(status));
        }
    }
}
