use serde::{Deserialize, Serialize};

use super::aggregate::BookingStatus;
use crate::domain::a004_invoice::aggregate::InvoiceStatus;

/// Body of `PUT /guide/{booking_id}/assignguide`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignGuideRequest {
    pub guide_id: String,
}

/// Body of `PUT /transport/{booking_id}/assigntransport`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignTransportRequest {
    pub transport_id: String,
}

/// Body of `PUT /booking/{booking_id}/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

/// Body of `PUT /invoice/{invoice_id}/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceStatusUpdate {
    pub status: InvoiceStatus,
}

/// Query of `GET /invoice?booking_id=...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceQuery {
    pub booking_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bodies_use_lowercase_codes() {
        let body = serde_json::to_string(&BookingStatusUpdate {
            status: BookingStatus::Completed,
        })
        .unwrap();
        assert_eq!(body, r#"{"status":"completed"}"#);

        let body = serde_json::to_string(&InvoiceStatusUpdate {
            status: InvoiceStatus::Sent,
        })
        .unwrap();
        assert_eq!(body, r#"{"status":"sent"}"#);
    }
}
