//! API Handlers
//!
//! HTTP request handlers for each inspection endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{CacheService, CacheStats};
use crate::config::CacheConfig;
use crate::error::{ApiError, Result, StorageResult};
use crate::models::{ClearResponse, CountResponse, DeleteResponse, HealthResponse, KeysResponse};

/// Application state shared across all handlers.
///
/// The cache synchronizes through its storage medium, so handlers share it
/// through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache service
    pub cache: Arc<CacheService>,
}

impl AppState {
    /// Creates a new AppState with the given cache service.
    pub fn new(cache: CacheService) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration, opening the storage medium.
    pub fn from_config(config: &CacheConfig) -> StorageResult<Self> {
        Ok(Self::new(CacheService::open(config)?))
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Handler for GET /keys
///
/// Lists keys as stored; expired entries not yet purged are included.
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    Json(KeysResponse::new(state.cache.keys()))
}

/// Handler for DELETE /keys/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if !state.cache.keys().contains(&key) {
        return Err(ApiError::NotFound(key));
    }

    state.cache.delete(&key);
    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for DELETE /keys
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    Json(ClearResponse {
        removed: state.cache.clear(),
    })
}

/// Handler for DELETE /tags/:tag
///
/// Unknown tags are not an error; they report a count of 0.
pub async fn invalidate_tag_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<CountResponse>> {
    if tag.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Tag cannot be empty".to_string()));
    }

    let count = state.cache.invalidate_tag(&tag);
    Ok(Json(CountResponse::new(
        format!("Invalidated tag '{}'", tag),
        count,
    )))
}

/// Handler for DELETE /patterns/:pattern
///
/// Substring match against logical keys.
pub async fn delete_pattern_handler(
    State(state): State<AppState>,
    Path(pattern): Path<String>,
) -> Result<Json<CountResponse>> {
    if pattern.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Pattern cannot be empty".to_string(),
        ));
    }

    let count = state.cache.delete_pattern(pattern.as_str());
    Ok(Json(CountResponse::new(
        format!("Deleted keys matching '{}'", pattern),
        count,
    )))
}

/// Handler for POST /clean
pub async fn clean_handler(State(state): State<AppState>) -> Json<CountResponse> {
    let count = state.cache.clean_expired();
    Json(CountResponse::new("Removed expired entries", count))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn state() -> AppState {
        AppState::new(CacheService::new(
            &CacheConfig::default(),
            Arc::new(MemoryStorage::new()),
        ))
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = state();
        state.cache.set("a", &1, None);

        let response = stats_handler(State(state)).await;
        assert_eq!(response.total_keys, 1);
        assert_eq!(response.expired_keys, 0);
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = state();
        state.cache.set("to_delete", "value", None);

        let result = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(result.is_ok());
        assert!(!state.cache.has("to_delete"));

        let result = delete_handler(State(state), Path("to_delete".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalidate_tag_handler() {
        let state = state();
        state.cache.set_with_tags("k1", "v", &["t"], None);
        state.cache.set_with_tags("k2", "v", &["t"], None);

        let response = invalidate_tag_handler(State(state.clone()), Path("t".to_string()))
            .await
            .unwrap();
        assert_eq!(response.count, 2);

        let response = invalidate_tag_handler(State(state), Path("t".to_string()))
            .await
            .unwrap();
        assert_eq!(response.count, 0);
    }

    #[tokio::test]
    async fn test_invalidate_tag_rejects_blank() {
        let result = invalidate_tag_handler(State(state()), Path("  ".to_string())).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_clear_and_keys_handlers() {
        let state = state();
        state.cache.set("b", &2, None);
        state.cache.set("a", &1, None);

        let keys = keys_handler(State(state.clone())).await;
        assert_eq!(keys.keys, vec!["a", "b"]);

        let cleared = clear_handler(State(state.clone())).await;
        assert_eq!(cleared.removed, 2);
        assert_eq!(keys_handler(State(state)).await.count, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
