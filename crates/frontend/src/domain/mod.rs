pub mod a001_booking;
pub mod a002_guide;
pub mod a003_transport;
pub mod a004_invoice;
