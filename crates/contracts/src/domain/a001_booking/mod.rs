pub mod aggregate;
pub mod requests;
