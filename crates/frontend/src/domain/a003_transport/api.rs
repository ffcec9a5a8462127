use contracts::domain::a001_booking::requests::AssignTransportRequest;
use contracts::domain::a003_transport::aggregate::Transport;

use crate::shared::api_utils::{get_json, put_json, segment, ApiError};

/// Fetch all vehicles
pub async fn fetch_transports() -> Result<Vec<Transport>, ApiError> {
    get_json("/transport").await
}

/// Attach a vehicle to a booking
pub async fn assign_transport(booking_id: &str, transport_id: &str) -> Result<(), ApiError> {
    put_json(
        &format!("/transport/{}/assigntransport", segment(booking_id)),
        &AssignTransportRequest {
            transport_id: transport_id.to_string(),
        },
    )
    .await
}
