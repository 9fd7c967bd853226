//! Response DTOs for the inspection API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for the key listing (GET /keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    /// Logical keys in the cache namespace, sorted
    pub keys: Vec<String>,
    /// Number of keys listed
    pub count: usize,
}

impl KeysResponse {
    /// Creates a new KeysResponse, sorting the keys for stable output
    pub fn new(mut keys: Vec<String>) -> Self {
        keys.sort();
        Self {
            count: keys.len(),
            keys,
        }
    }
}

/// Response body for DELETE /keys/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for bulk operations: tag and pattern invalidation, sweeps
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    /// What was done
    pub message: String,
    /// Number of keys affected
    pub count: usize,
}

impl CountResponse {
    pub fn new(message: impl Into<String>, count: usize) -> Self {
        Self {
            message: message.into(),
            count,
        }
    }
}

/// Response body for DELETE /keys
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Number of namespaced keys removed
    pub removed: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_response_sorted() {
        let resp = KeysResponse::new(vec!["tag_events".to_string(), "events".to_string()]);
        assert_eq!(resp.keys, vec!["events", "tag_events"]);
        assert_eq!(resp.count, 2);
    }

    #[test]
    fn test_delete_response_names_key() {
        let resp = DeleteResponse::new("events_list");
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["key"], "events_list");
        assert_eq!(value["message"], "Key 'events_list' deleted successfully");
    }

    #[test]
    fn test_count_and_clear_shapes() {
        let count = serde_json::to_value(CountResponse::new("Invalidated tag 'events'", 3)).unwrap();
        assert_eq!(count, json!({ "message": "Invalidated tag 'events'", "count": 3 }));

        let clear = serde_json::to_value(ClearResponse { removed: 4 }).unwrap();
        assert_eq!(clear, json!({ "removed": 4 }));
    }

    #[test]
    fn test_health_timestamp_is_rfc3339() {
        let resp = HealthResponse::healthy();
        assert_eq!(resp.status, "healthy");
        assert!(chrono::DateTime::parse_from_rfc3339(&resp.timestamp).is_ok());
    }
}
