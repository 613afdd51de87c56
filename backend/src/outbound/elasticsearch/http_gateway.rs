//! Reqwest-backed Elasticsearch gateway.
//!
//! This adapter owns transport details only: URL construction, basic-auth
//! credentials, timeout and HTTP error mapping. Response bodies of successful
//! index and search calls are returned as-is for the document mapper.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url, header};
use serde_json::{Value, json};
use tracing::debug;

use super::dto::{ClusterInfoDto, ErrorEnvelopeDto};
use crate::domain::ports::{ClusterInfo, SearchGateway, SearchGatewayError};

/// Static basic-auth credentials sent with every store request.
#[derive(Clone)]
pub struct ElasticsearchCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ElasticsearchCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Gateway adapter talking to one Elasticsearch endpoint.
pub struct ElasticsearchGateway {
    client: Client,
    base_url: Url,
    credentials: Option<ElasticsearchCredentials>,
}

impl ElasticsearchGateway {
    /// Build an anonymous gateway with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_credentials(base_url, timeout, None)
    }

    /// Build a gateway that authenticates with static credentials.
    ///
    /// ```rust,ignore
    /// let gateway = ElasticsearchGateway::with_credentials(url, timeout, Some(credentials))?;
    /// let info = gateway.cluster_info().await?;
    /// ```
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_credentials(
        base_url: Url,
        timeout: Duration,
        credentials: Option<ElasticsearchCredentials>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, path = url.path(), "search store request");
        let builder = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        match &self.credentials {
            Some(credentials) => {
                builder.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<(StatusCode, Vec<u8>), SearchGatewayError> {
        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl SearchGateway for ElasticsearchGateway {
    async fn create_document(
        &self,
        index: &str,
        document: &[u8],
    ) -> Result<Vec<u8>, SearchGatewayError> {
        let mut url = endpoint(&self.base_url, &[index, "_doc"])?;
        url.query_pairs_mut().append_pair("refresh", "true");
        let builder = self
            .request(Method::POST, url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(document.to_vec());

        let (status, body) = self.send(builder).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        Ok(body)
    }

    async fn search_by_name(
        &self,
        index: &str,
        name: &str,
    ) -> Result<Vec<u8>, SearchGatewayError> {
        let mut url = endpoint(&self.base_url, &[index, "_search"])?;
        url.query_pairs_mut()
            .append_pair("track_total_hits", "true")
            .append_pair("pretty", "true");
        let builder = self.request(Method::POST, url).json(&name_match_query(name));

        let (status, body) = self.send(builder).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        Ok(body)
    }

    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchGatewayError> {
        let url = endpoint(&self.base_url, &[index, "_doc", id])?;
        let (status, body) = self.send(self.request(Method::DELETE, url)).await?;
        match status {
            _ if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND if serde_json::from_slice::<ErrorEnvelopeDto>(&body).is_err() => {
                Err(SearchGatewayError::document_not_found(id))
            }
            _ => Err(map_status_error(status, &body)),
        }
    }

    async fn cluster_info(&self) -> Result<ClusterInfo, SearchGatewayError> {
        let url = endpoint(&self.base_url, &[])?;
        let (status, body) = self.send(self.request(Method::GET, url)).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        let info: ClusterInfoDto = serde_json::from_slice(&body).map_err(|error| {
            SearchGatewayError::decode(format!("invalid cluster info payload: {error}"))
        })?;
        Ok(info.into())
    }
}

/// Append percent-encoded path segments to the configured base URL, keeping
/// any path prefix it already carries.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, SearchGatewayError> {
    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|()| {
            SearchGatewayError::transport(format!("store URL {base} cannot carry a path"))
        })?
        .pop_if_empty()
        .extend(segments);
    if segments.is_empty() && !url.path().ends_with('/') {
        url.path_segments_mut()
            .map_err(|()| {
                SearchGatewayError::transport(format!("store URL {base} cannot carry a path"))
            })?
            .push("");
    }
    Ok(url)
}

fn name_match_query(name: &str) -> Value {
    json!({
        "query": {
            "match": {
                "name": name
            }
        }
    })
}

fn map_transport_error(error: reqwest::Error) -> SearchGatewayError {
    if error.is_timeout() {
        SearchGatewayError::timeout(error.to_string())
    } else {
        SearchGatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SearchGatewayError {
    if matches!(
        status,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT
    ) {
        return SearchGatewayError::timeout(format!("status {}", status.as_u16()));
    }

    match serde_json::from_slice::<ErrorEnvelopeDto>(body) {
        Ok(envelope) => {
            let (error_type, reason) = envelope.error.into_parts();
            SearchGatewayError::store(status.as_u16(), error_type, reason)
        }
        Err(_) => SearchGatewayError::store(
            status.as_u16(),
            status.canonical_reason().unwrap_or("unknown_status"),
            body_preview(body),
        ),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
