use contracts::domain::a001_booking::aggregate::{Booking, BookingStatus};
use contracts::domain::a001_booking::requests::BookingStatusUpdate;

use crate::shared::api_utils::{get_json, put_json, segment, ApiError};

/// Fetch all bookings
pub async fn fetch_bookings() -> Result<Vec<Booking>, ApiError> {
    get_json("/booking").await
}

/// Set the status of one booking
pub async fn update_booking_status(booking_id: &str, status: BookingStatus) -> Result<(), ApiError> {
    put_json(
        &format!("/booking/{}/status", segment(booking_id)),
        &BookingStatusUpdate { status },
    )
    .await
}
