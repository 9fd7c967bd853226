//! Booking Cache - request-layer cache for the booking client
//!
//! TTL and tag based cache over a synchronous storage medium, the
//! cache-through / invalidate-after request layer built on it, and a small
//! HTTP service for inspecting a cache namespace.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod request;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheService, CacheStats, KeyPattern};
pub use config::{CacheConfig, Config, StorageKind, TagTtlPolicy};
pub use request::{ApiClient, BookingApi, HttpTransport, Mutation, RequestOptions};
pub use tasks::spawn_cleanup_task;
