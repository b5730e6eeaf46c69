//! HTTP client and remote collaborators for the storefront.
//!
//! [`RemoteMenu`] and [`RemoteOrders`] implement the core crate's product
//! and order interfaces against the storefront backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use storefront_data::{FetchClient, RemoteMenu};
//! use storefront_core::prelude::*;
//!
//! let client = FetchClient::http("https://api.example.com", Duration::from_secs(30))?;
//! let menu = RemoteMenu::new(client);
//! let product = menu.require_product(&ProductId::new("42"))?;
//! ```

mod error;
mod remote;
mod request;
mod response;
mod transport;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub use error::FetchError;
pub use remote::{RemoteMenu, RemoteOrders};
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use transport::{HttpTransport, Transport};

/// HTTP client for the storefront backend.
///
/// Relative URLs are joined onto the base URL. Cloning is cheap and shares
/// the underlying transport.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl FetchClient {
    /// Create a client over any transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport: Arc::new(transport),
        }
    }

    /// Create a client over the platform HTTP stack.
    pub fn http(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self::new(HttpTransport::new(timeout)?).with_base_url(base_url))
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !is_absolute(&url) => {
                format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl ClientRequestBuilder<'_> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send the request and return the response.
    pub fn send(self) -> Result<Response, FetchError> {
        if !is_absolute(&self.builder.url) {
            return Err(FetchError::InvalidUrl(self.builder.url));
        }
        tracing::debug!(
            method = self.builder.method.as_str(),
            url = %self.builder.url,
            "sending request"
        );
        self.client.transport.send(&self.builder)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, RemoteMenu, RemoteOrders, Response};
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Transport that replays canned responses and records requests.
    #[derive(Default)]
    pub struct MockTransport {
        pub responses: Mutex<Vec<Result<Response, FetchError>>>,
        pub requests: Mutex<Vec<RequestBuilder>>,
    }

    impl MockTransport {
        pub fn replying(responses: Vec<Result<Response, FetchError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into_iter().rev().collect()),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub fn sent(&self) -> Vec<RequestBuilder> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(FetchError::RequestError("no canned response".to_string())))
        }
    }

    pub fn client(transport: &Arc<MockTransport>) -> FetchClient {
        FetchClient::new(Arc::clone(transport)).with_base_url("http://api.test/")
    }
}
