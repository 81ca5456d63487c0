//! Default transport backed by reqwest

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use url::Url;

use super::HttpRequest;
use super::HttpResponse;
use super::Method;
use super::Transport;
use crate::error::TransportError;

/// [`Transport`] implementation backed by a [`reqwest::Client`].
///
/// No timeout or retry policy is applied here; the client relies on the
/// transport's defaults. Callers that need a timeout can supply a
/// pre-configured `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default `reqwest::Client`.
    ///
    /// Fails if the underlying client cannot be constructed; the error is
    /// propagated, not swallowed.
    pub fn new() -> Result<Self, TransportError> {
        let http_client = Client::builder().build()?;
        Ok(Self { http_client })
    }

    /// Creates a transport around an existing `reqwest::Client`.
    pub fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = Url::parse(&request.url)
            .map_err(|_| TransportError::invalid_url(request.url.clone()))?;

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportError::invalid_header(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| TransportError::invalid_header(name.clone()))?;
            headers.insert(header_name, header_value);
        }

        let mut builder = self.http_client.request(method, url).headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
