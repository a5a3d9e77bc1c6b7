//! Inmate records
//!
//! Each inmate appears twice per round: once as a mugshot card and once as a
//! crime card.

use serde::{Deserialize, Serialize};

/// A single inmate record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inmate {
    pub id: i64,
    pub name: String,
    /// Mugshot image URL
    pub image: String,
    /// Crime description shown on the crime card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crime: Option<String>,
}

impl Inmate {
    pub fn new(id: i64, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            crime: None,
        }
    }

    pub fn with_crime(mut self, crime: impl Into<String>) -> Self {
        self.crime = Some(crime.into());
        self
    }

    /// Id as used in the match state
    pub fn key(&self) -> String {
        self.id.to_string()
    }

    /// Crime card text
    pub fn crime_text(&self) -> &str {
        self.crime.as_deref().unwrap_or("Unknown crime")
    }
}

/// Body returned by the roster endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InmatesPayload {
    pub inmates: Vec<Inmate>,
}

/// Fixed roster used when the real one cannot be loaded
pub fn placeholder_inmates() -> Vec<Inmate> {
    [
        (1, "John Doe", "cfqyy"),
        (2, "Jane Smith", "j2s7m"),
        (3, "Mike Johnson", "p9r4t"),
        (4, "Sarah Williams", "5a1tv"),
        (5, "Robert Brown", "k8paz"),
        (6, "Emily Davis", "d3xrz"),
    ]
    .into_iter()
    .map(|(id, name, key)| Inmate::new(id, name, format!("/placeholder.svg?key={}", key)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_crime_is_optional() {
        let json = r#"{"inmates":[
            {"id":1,"name":"A","image":"/a.jpg","crime":"Grand theft auto"},
            {"id":2,"name":"B","image":"/b.jpg"}
        ]}"#;
        let payload: InmatesPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.inmates.len(), 2);
        assert_eq!(payload.inmates[0].crime_text(), "Grand theft auto");
        assert_eq!(payload.inmates[1].crime, None);
        assert_eq!(payload.inmates[1].crime_text(), "Unknown crime");
    }

    #[test]
    fn test_placeholder_roster() {
        let roster = placeholder_inmates();
        assert_eq!(roster.len(), 6);
        let ids: Vec<i64> = roster.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert!(roster.iter().all(|i| i.image.starts_with("/placeholder.svg?key=")));
    }

    #[test]
    fn test_ids_outside_u32_parse() {
        let json = r#"{"inmates":[
            {"id":-7,"name":"A","image":"/a.jpg"},
            {"id":5000000000,"name":"B","image":"/b.jpg"}
        ]}"#;
        let payload: InmatesPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.inmates[0].id, -7);
        assert_eq!(payload.inmates[0].key(), "-7");
        assert_eq!(payload.inmates[1].id, 5_000_000_000);
    }

    #[test]
    fn test_key_is_decimal_id() {
        assert_eq!(Inmate::new(42, "X", "/x.png").key(), "42");
    }
}
