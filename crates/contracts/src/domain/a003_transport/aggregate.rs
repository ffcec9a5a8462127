use serde::{Deserialize, Serialize};

/// Vehicle that can be attached to a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transport {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

fn default_active() -> bool {
    true
}
