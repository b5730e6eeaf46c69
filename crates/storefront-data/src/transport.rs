//! Sending requests.
//!
//! [`HttpTransport`] uses Spin's outbound HTTP on `wasm32` and a blocking
//! `reqwest` client elsewhere.

use crate::{FetchError, RequestBuilder, Response};

/// Something that can send a request and wait for the response.
pub trait Transport {
    fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
        (**self).send(request)
    }
}

/// The platform HTTP stack.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::blocking::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpTransport {
    /// Build a transport whose requests give up after `timeout`.
    pub fn new(timeout: std::time::Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;
        Ok(Self { client })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Transport for HttpTransport {
    fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
        use crate::Method;

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, request.url.as_str());
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().map_err(map_reqwest_error)?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_builder() {
        FetchError::InvalidUrl(e.to_string())
    } else {
        FetchError::RequestError(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl HttpTransport {
    /// Spin applies its own outbound timeouts.
    pub fn new(_timeout: std::time::Duration) -> Result<Self, FetchError> {
        Ok(Self {})
    }
}

#[cfg(target_arch = "wasm32")]
impl Transport for HttpTransport {
    fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
        use crate::Method;
        use spin_sdk::http::{Method as SpinMethod, Request};

        let method = match request.method {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
            Method::Put => SpinMethod::Put,
            Method::Delete => SpinMethod::Delete,
        };

        let mut builder = Request::builder();
        builder.method(method);
        builder.uri(&request.url);
        for (key, value) in &request.headers {
            builder.header(key.as_str(), value.as_str());
        }
        let outbound = match &request.body {
            Some(body) => builder.body(body.clone()).build(),
            None => builder.build(),
        };

        let response: spin_sdk::http::Response = spin_sdk::http::run(spin_sdk::http::send(outbound))
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = *response.status();
        let headers = response
            .headers()
            .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or("").to_string()))
            .collect();
        let body = response.into_body();

        Ok(Response::new(status, headers, body))
    }
}
