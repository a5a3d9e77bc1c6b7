//! Inmate roster sources
//!
//! The round only depends on `InmateSource`; the browser build fetches over
//! HTTP, native runs read a JSON file or use a fixed list.

use thiserror::Error;

use crate::game::{Inmate, InmatesPayload};

/// Roster loading failures
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to fetch inmates: {0}")]
    Status(u16),
    #[error("malformed inmate payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("inmate roster is empty")]
    EmptyRoster,
    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can produce the inmate roster
#[allow(async_fn_in_trait)]
pub trait InmateSource {
    async fn fetch_inmates(&self) -> Result<Vec<Inmate>, SourceError>;
}

/// Parse a `{"inmates": [...]}` body. An empty roster is an error.
pub fn parse_inmates(body: &str) -> Result<Vec<Inmate>, SourceError> {
    let payload: InmatesPayload = serde_json::from_str(body)?;
    if payload.inmates.is_empty() {
        return Err(SourceError::EmptyRoster);
    }
    Ok(payload.inmates)
}

/// Fixed in-memory roster
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    inmates: Vec<Inmate>,
}

impl StaticSource {
    pub fn new(inmates: Vec<Inmate>) -> Self {
        Self { inmates }
    }
}

impl InmateSource for StaticSource {
    async fn fetch_inmates(&self) -> Result<Vec<Inmate>, SourceError> {
        if self.inmates.is_empty() {
            return Err(SourceError::EmptyRoster);
        }
        Ok(self.inmates.clone())
    }
}

/// Roster read from a JSON file on disk (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl InmateSource for JsonFileSource {
    async fn fetch_inmates(&self) -> Result<Vec<Inmate>, SourceError> {
        let body = std::fs::read_to_string(&self.path)?;
        parse_inmates(&body)
    }
}

/// Roster fetched from the game's API (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    endpoint: String,
}

#[cfg(target_arch = "wasm32")]
impl HttpSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl InmateSource for HttpSource {
    async fn fetch_inmates(&self) -> Result<Vec<Inmate>, SourceError> {
        use gloo_net::http::Request;

        let response = Request::get(&self.endpoint)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(SourceError::Status(response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        parse_inmates(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_parse_inmates() {
        let body = r#"{"inmates":[{"id":9,"name":"Ann","image":"/9.jpg","crime":"Arson"}]}"#;
        let inmates = parse_inmates(body).unwrap();
        assert_eq!(inmates.len(), 1);
        assert_eq!(inmates[0].id, 9);
        assert_eq!(inmates[0].crime.as_deref(), Some("Arson"));
    }

    #[test]
    fn test_parse_rejects_empty_and_garbage() {
        assert!(matches!(
            parse_inmates(r#"{"inmates":[]}"#),
            Err(SourceError::EmptyRoster)
        ));
        assert!(matches!(parse_inmates("[1,2,3]"), Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_static_source() {
        let source = StaticSource::new(crate::game::placeholder_inmates());
        let inmates = block_on(source.fetch_inmates()).unwrap();
        assert_eq!(inmates.len(), 6);

        let empty = StaticSource::default();
        assert!(matches!(
            block_on(empty.fetch_inmates()),
            Err(SourceError::EmptyRoster)
        ));
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = JsonFileSource::new("/nonexistent/inmates.json");
        assert!(matches!(
            block_on(source.fetch_inmates()),
            Err(SourceError::Io(_))
        ));
    }

    #[test]
    fn test_file_source_reads_payload() {
        let path = std::env::temp_dir().join(format!("mug-matcher-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"inmates":[{"id":1,"name":"A","image":"/a.jpg"},{"id":2,"name":"B","image":"/b.jpg"}]}"#,
        )
        .unwrap();
        let inmates = block_on(JsonFileSource::new(&path).fetch_inmates()).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(inmates.len(), 2);
    }
}
