//! Request Layer Module
//!
//! Cache-through reads and invalidate-after writes against the booking API.
//!
//! # Contract
//! - Read keys are derived from the endpoint and sorted parameters
//! - Any read call-site can bypass the cache
//! - Writes are never cached and invalidate their tags only on success

mod booking;
mod client;
mod http;
mod invalidation;
mod key;
mod options;
mod transport;

pub use booking::BookingApi;
pub use client::ApiClient;
pub use http::HttpTransport;
pub use invalidation::{read_tag, Mutation};
pub use key::cache_key;
pub use options::RequestOptions;
pub use transport::{ApiRequest, ApiResponse, Method, StaticToken, TokenSource, Transport};
