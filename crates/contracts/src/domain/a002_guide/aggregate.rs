use serde::{Deserialize, Serialize};

/// Tour guide that can be attached to a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

fn default_active() -> bool {
    true
}
