//! Cache-aware API client.
//!
//! Reads go through the cache: look up before the fetch, store after it.
//! Writes go around it: never cached, and on success they invalidate the
//! tags their [`Mutation`] names. The cache is only touched strictly before
//! or strictly after a network call, never while one is pending.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cache::CacheService;
use crate::error::RequestError;
use crate::request::invalidation::Mutation;
use crate::request::key::cache_key;
use crate::request::options::RequestOptions;
use crate::request::transport::{ApiRequest, ApiResponse, Method, Transport};

// == Api Client ==
pub struct ApiClient<T> {
    transport: T,
    cache: Arc<CacheService>,
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client sending through `transport` and caching into `cache`.
    pub fn new(transport: T, cache: Arc<CacheService>) -> Self {
        Self { transport, cache }
    }

    pub fn cache(&self) -> &CacheService {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // == Get ==
    /// Idempotent read, served from the cache when `options` allow it.
    ///
    /// There is no request coalescing: two reads of the same uncached key
    /// issued before either fetch completes both go to the network.
    pub async fn get<R, P>(
        &self,
        endpoint: &str,
        params: &P,
        options: &RequestOptions,
    ) -> Result<R, RequestError>
    where
        R: Serialize + DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let key = options
            .key
            .clone()
            .unwrap_or_else(|| cache_key(endpoint, params));

        if options.enabled {
            if let Some(hit) = self.cache.get::<R>(&key) {
                debug!("Cache hit for {}", key);
                return Ok(hit);
            }
            debug!("Cache miss for {}", key);
        }

        let request = ApiRequest::get(endpoint).with_query(params)?;
        let data: R = self.transport.send(request).await?.json()?;

        if options.enabled && !self.cache.set_with_tags(&key, &data, &options.tags, options.ttl) {
            debug!("Response for {} not cached", key);
        }

        Ok(data)
    }

    // == Mutate ==
    /// State-changing call. Invalidates `mutation.tags()` as soon as the
    /// server accepts the call, then decodes the response body as `R`.
    ///
    /// A body that fails to decode is reported as an error, but the
    /// invalidation has already happened by then.
    pub async fn mutate<R, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        mutation: Mutation,
    ) -> Result<R, RequestError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send_mutation(method, endpoint, body, mutation).await?;
        Ok(response.json()?)
    }

    /// Mutation without a request body whose response body is ignored,
    /// whatever it contains.
    pub async fn mutate_empty(
        &self,
        method: Method,
        endpoint: &str,
        mutation: Mutation,
    ) -> Result<(), RequestError> {
        self.send_mutation::<()>(method, endpoint, None, mutation)
            .await?;
        Ok(())
    }

    async fn send_mutation<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        mutation: Mutation,
    ) -> Result<ApiResponse, RequestError>
    where
        B: Serialize + ?Sized,
    {
        debug_assert!(method.is_mutating(), "mutate called with {:?}", method);

        let mut request = ApiRequest::new(method, endpoint);
        if let Some(body) = body {
            request = request.with_body(body)?;
        }

        let response = self.transport.send(request).await?;

        let tags = mutation.tags();
        let invalidated = self.cache.invalidate_tags(&tags);
        debug!("{:?} invalidated {} cached keys via {:?}", mutation, invalidated, tags);

        Ok(response)
    }
}

impl<T> std::fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
