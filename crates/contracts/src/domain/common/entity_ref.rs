use serde::{Deserialize, Serialize};

/// Reference to another document as the API returns it.
///
/// Depending on the endpoint the backend sends either the bare `_id`
/// or a populated object carrying at least `_id` and a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl EntityRef {
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Id(id) => id,
            EntityRef::Populated { id, .. } => id,
        }
    }

    /// Human readable label: the populated name when present, the id otherwise
    pub fn label(&self) -> &str {
        match self {
            EntityRef::Populated {
                name: Some(name), ..
            } if !name.trim().is_empty() => name,
            _ => self.id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_id() {
        let r: EntityRef = serde_json::from_str("\"c-1\"").unwrap();
        assert_eq!(r.id(), "c-1");
        assert_eq!(r.label(), "c-1");
    }

    #[test]
    fn test_populated_object() {
        let r: EntityRef = serde_json::from_str(r#"{"_id":"p-7","name":"Umrah Economy"}"#).unwrap();
        assert_eq!(r.id(), "p-7");
        assert_eq!(r.label(), "Umrah Economy");
    }

    #[test]
    fn test_populated_without_name_falls_back_to_id() {
        let r: EntityRef = serde_json::from_str(r#"{"_id":"p-8"}"#).unwrap();
        assert_eq!(r.label(), "p-8");
    }
}
