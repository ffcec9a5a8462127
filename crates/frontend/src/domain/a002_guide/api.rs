use contracts::domain::a001_booking::requests::AssignGuideRequest;
use contracts::domain::a002_guide::aggregate::Guide;

use crate::shared::api_utils::{get_json, put_json, segment, ApiError};

/// Fetch all guides
pub async fn fetch_guides() -> Result<Vec<Guide>, ApiError> {
    get_json("/guide").await
}

/// Attach a guide to a booking
pub async fn assign_guide(booking_id: &str, guide_id: &str) -> Result<(), ApiError> {
    put_json(
        &format!("/guide/{}/assignguide", segment(booking_id)),
        &AssignGuideRequest {
            guide_id: guide_id.to_string(),
        },
    )
    .await
}
