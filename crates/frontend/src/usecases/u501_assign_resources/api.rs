use contracts::domain::a001_booking::aggregate::{Booking, BookingStatus};
use contracts::domain::a002_guide::aggregate::Guide;
use contracts::domain::a003_transport::aggregate::Transport;
use contracts::domain::a004_invoice::aggregate::{Invoice, InvoiceStatus};

use crate::domain::{a001_booking, a002_guide, a003_transport, a004_invoice};
use crate::shared::api_utils::ApiError;

/// Remote calls the assignment workflow depends on.
///
/// The browser build uses [`HttpAssignmentApi`]; tests drive the workflow
/// with an in-memory implementation.
#[allow(async_fn_in_trait)]
pub trait AssignmentApi {
    async fn assign_guide(&self, booking_id: &str, guide_id: &str) -> Result<(), ApiError>;

    async fn assign_transport(&self, booking_id: &str, transport_id: &str)
        -> Result<(), ApiError>;

    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> Result<(), ApiError>;

    async fn find_invoices(&self, booking_id: &str) -> Result<Vec<Invoice>, ApiError>;

    async fn update_invoice_status(
        &self,
        invoice_id: &str,
        status: InvoiceStatus,
    ) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpAssignmentApi;

impl AssignmentApi for HttpAssignmentApi {
    async fn assign_guide(&self, booking_id: &str, guide_id: &str) -> Result<(), ApiError> {
        a002_guide::api::assign_guide(booking_id, guide_id).await
    }

    async fn assign_transport(
        &self,
        booking_id: &str,
        transport_id: &str,
    ) -> Result<(), ApiError> {
        a003_transport::api::assign_transport(booking_id, transport_id).await
    }

    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> Result<(), ApiError> {
        a001_booking::api::update_booking_status(booking_id, status).await
    }

    async fn find_invoices(&self, booking_id: &str) -> Result<Vec<Invoice>, ApiError> {
        a004_invoice::api::find_invoices_for_booking(booking_id).await
    }

    async fn update_invoice_status(
        &self,
        invoice_id: &str,
        status: InvoiceStatus,
    ) -> Result<(), ApiError> {
        a004_invoice::api::update_invoice_status(invoice_id, status).await
    }
}

/// Everything the assignment screen shows, fetched concurrently
pub struct AssignmentData {
    pub bookings: Vec<Booking>,
    pub guides: Vec<Guide>,
    pub transports: Vec<Transport>,
}

pub async fn load_assignment_data() -> Result<AssignmentData, ApiError> {
    let (bookings, guides, transports) = futures::future::try_join3(
        a001_booking::api::fetch_bookings(),
        a002_guide::api::fetch_guides(),
        a003_transport::api::fetch_transports(),
    )
    .await?;

    log::debug!(
        "assignment data loaded: {} bookings, {} guides, {} transports",
        bookings.len(),
        guides.len(),
        transports.len()
    );

    Ok(AssignmentData {
        bookings,
        guides,
        transports,
    })
}
