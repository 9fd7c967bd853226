//! API Module
//!
//! HTTP handlers and routing for the cache inspection API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Namespace statistics
//! - `GET /keys`, `DELETE /keys`, `DELETE /keys/:key` - Key listing and removal
//! - `DELETE /tags/:tag` - Tag invalidation
//! - `DELETE /patterns/:pattern` - Pattern deletion
//! - `POST /clean` - Expired entry sweep

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
