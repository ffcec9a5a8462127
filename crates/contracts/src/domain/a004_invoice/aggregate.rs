use serde::{Deserialize, Serialize};

use crate::domain::common::EntityRef;

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Cancelled,
    #[serde(other)]
    Other,
}

impl InvoiceStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Cancelled => "Cancelled",
            InvoiceStatus::Other => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "_id")]
    pub id: String,
    pub booking_id: EntityRef,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub due_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_invoice_with_populated_booking() {
        let json = r#"{"_id":"i1","booking_id":{"_id":"b1"},"amount":1200.5,"status":"draft"}"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.booking_id.id(), "b1");
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.amount, Some(1200.5));
    }
}
