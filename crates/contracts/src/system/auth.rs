use serde::{Deserialize, Serialize};

/// Staff role stored with the browser session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Sales,
    Operations,
    Accounts,
}

impl StaffRole {
    pub fn code(&self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Sales => "sales",
            StaffRole::Operations => "operations",
            StaffRole::Accounts => "accounts",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StaffRole::Admin => "Admin",
            StaffRole::Sales => "Sales",
            StaffRole::Operations => "Operations",
            StaffRole::Accounts => "Accounts",
        }
    }

    /// Case-insensitive parse
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "admin" => Some(StaffRole::Admin),
            "sales" => Some(StaffRole::Sales),
            "operations" => Some(StaffRole::Operations),
            "accounts" => Some(StaffRole::Accounts),
            _ => None,
        }
    }
}

/// Session fields kept by the application shell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionInfo {
    pub access_token: Option<String>,
    pub role: Option<StaffRole>,
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_code() {
        assert_eq!(StaffRole::from_code("Operations"), Some(StaffRole::Operations));
        assert_eq!(StaffRole::from_code(" admin "), Some(StaffRole::Admin));
        assert_eq!(StaffRole::from_code("guest"), None);
    }
}
