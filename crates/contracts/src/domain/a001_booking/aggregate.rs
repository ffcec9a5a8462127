use serde::{Deserialize, Serialize};

use crate::domain::common::EntityRef;

// ============================================================================
// Status
// ============================================================================

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    /// Any value this client does not know about
    #[serde(other)]
    Other,
}

impl BookingStatus {
    pub fn code(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Other => "Unknown",
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Booking: a confirmed travel order of a customer for a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub status: BookingStatus,

    #[serde(default)]
    pub guide_id: Option<EntityRef>,
    #[serde(default)]
    pub transport_id: Option<EntityRef>,

    #[serde(default)]
    pub customer_id: Option<EntityRef>,
    #[serde(default)]
    pub package_id: Option<EntityRef>,

    #[serde(default)]
    pub travel_date: Option<String>,
    #[serde(default)]
    pub pilgrims: Option<u32>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Booking {
    /// Attached guide id, empty strings count as none
    pub fn guide(&self) -> Option<&str> {
        self.guide_id.as_ref().map(EntityRef::id).filter(|id| !id.is_empty())
    }

    pub fn transport(&self) -> Option<&str> {
        self.transport_id.as_ref().map(EntityRef::id).filter(|id| !id.is_empty())
    }

    pub fn has_guide(&self) -> bool {
        self.guide().is_some()
    }

    pub fn has_transport(&self) -> bool {
        self.transport().is_some()
    }

    /// Both resources are attached on the record
    pub fn is_fully_assigned(&self) -> bool {
        self.has_guide() && self.has_transport()
    }

    pub fn customer_label(&self) -> String {
        self.customer_id
            .as_ref()
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn package_label(&self) -> String {
        self.package_id
            .as_ref()
            .map(|p| p.label().to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}
