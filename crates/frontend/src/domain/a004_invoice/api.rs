use contracts::domain::a001_booking::requests::{InvoiceQuery, InvoiceStatusUpdate};
use contracts::domain::a004_invoice::aggregate::{Invoice, InvoiceStatus};

use crate::shared::api_utils::{get_json, put_json, segment, ApiError};

/// Fetch all invoices
pub async fn fetch_invoices() -> Result<Vec<Invoice>, ApiError> {
    get_json("/invoice").await
}

/// Invoices raised for one booking (usually zero or one)
pub async fn find_invoices_for_booking(booking_id: &str) -> Result<Vec<Invoice>, ApiError> {
    let query = serde_qs::to_string(&InvoiceQuery {
        booking_id: booking_id.to_string(),
    })
    .map_err(|e| ApiError::Encode(e.to_string()))?;
    get_json(&format!("/invoice?{}", query)).await
}

pub async fn update_invoice_status(invoice_id: &str, status: InvoiceStatus) -> Result<(), ApiError> {
    put_json(
        &format!("/invoice/{}/status", segment(invoice_id)),
        &InvoiceStatusUpdate { status },
    )
    .await
}
