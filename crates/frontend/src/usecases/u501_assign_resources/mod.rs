//! u501: attach guides and vehicles to confirmed bookings

pub mod api;
pub mod model;
pub mod store;
pub mod view;
pub mod workflow;

pub use view::AssignResourcesPage;
