//! HTTP transport implementation.
//!
//! This module provides HTTP/1.1 and HTTP/2 transport using reqwest.

use reqwest::{Client, header::CONTENT_TYPE};
use tracing::{debug, instrument};
use url::Url;

use super::config::{HttpConfig, HttpVersion};
use crate::{
    credential::SECURITY_KEY_FIELD,
    error::{NmiError, Result},
    transport::{AuthenticatedRequest, FORM_CONTENT_TYPE, Transport, TransportResponse},
};

/// Validates URL for security constraints.
///
/// Ensures the URL uses HTTPS and does not point to localhost.
pub(crate) fn validate_url(url: &Url) -> Result<()> {
    if url.scheme() != "https" {
        return Err(NmiError::TransportError("Only HTTPS URLs are allowed".to_owned()));
    }

    if let Some(host) = url.host_str()
        && (host == "localhost" || host.starts_with("127.") || host == "::1" || host == "[::1]")
    {
        return Err(NmiError::TransportError("Localhost URLs are not allowed".to_owned()));
    }

    Ok(())
}

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// Supports connection pooling and keep-alive. Timeouts from [`HttpConfig`]
/// are the only way a call is cut short.
///
/// # Examples
///
/// ```
/// use nmi_gateway::transport::{HttpConfig, HttpTransport, HttpVersion};
///
/// let config = HttpConfig {
///     pool_max_idle_per_host: 20,
///     timeout_secs: 60,
///     connect_timeout_secs: 15,
///     http_version: HttpVersion::Http1,
/// };
///
/// let transport = HttpTransport::with_config(&config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    http_version: HttpVersion,
}

impl HttpTransport {
    /// Creates a transport with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates a transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns error if `config` is out of range or the HTTP client cannot be built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        builder = match config.http_version {
            HttpVersion::Http1 => builder.http1_only(),
            HttpVersion::Http2 => builder.http2_prior_knowledge(),
            HttpVersion::Auto => builder,
        };

        let client = builder.build().map_err(NmiError::HttpError)?;

        Ok(Self { client, http_version: config.http_version })
    }

    #[instrument(skip(self, request), fields(fields = request.body().len()))]
    async fn execute(&self, url: &str, request: &AuthenticatedRequest) -> Result<TransportResponse> {
        let mut target = Url::parse(url)
            .map_err(|e| NmiError::ConfigError(format!("invalid gateway url '{url}': {e}")))?;

        validate_url(&target)?;

        target.query_pairs_mut().append_pair(SECURITY_KEY_FIELD, request.credential().expose());

        let body = request.encode_form()?;

        // reqwest errors embed the URL, which now carries the credential
        let response = self
            .client
            .post(target)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| NmiError::HttpError(e.without_url()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(NmiError::TransportError(format!("gateway returned HTTP status {status}")));
        }

        let text = response.text().await.map_err(|e| NmiError::HttpError(e.without_url()))?;
        debug!(status, bytes = text.len(), "gateway responded");

        Ok(TransportResponse { status, body: text })
    }
}

impl Transport for HttpTransport {
    async fn post_form<'a>(
        &'a self,
        url: &'a str,
        request: &'a AuthenticatedRequest,
    ) -> Result<TransportResponse> {
        self.execute(url, request).await
    }

    fn protocol_name(&self) -> &'static str {
        self.http_version.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{credential::SecurityKey, wire::OperationRequest};

    fn request() -> AuthenticatedRequest {
        AuthenticatedRequest::new(
            OperationRequest::new(None).field("type", "validate").flatten(),
            SecurityKey::new("key").unwrap(),
        )
    }

    #[test]
    fn test_http_transport_new() {
        assert!(HttpTransport::new().is_ok());
    }

    #[test]
    fn test_http_transport_protocol_name() {
        let config_http1 = HttpConfig { http_version: HttpVersion::Http1, ..Default::default() };
        let transport = HttpTransport::with_config(&config_http1).unwrap();
        assert_eq!(transport.protocol_name(), "http/1.1");

        let config_auto = HttpConfig::default();
        let transport = HttpTransport::with_config(&config_auto).unwrap();
        assert_eq!(transport.protocol_name(), "http");
    }

    #[test]
    fn test_http_transport_rejects_bad_config() {
        let config = HttpConfig { timeout_secs: 0, ..Default::default() };
        assert!(matches!(HttpTransport::with_config(&config), Err(NmiError::ConfigError(_))));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url(&Url::parse("https://secure.nmi.com/api/transact.php").unwrap()).is_ok());
        assert!(validate_url(&Url::parse("http://secure.nmi.com/api/transact.php").unwrap()).is_err());
        assert!(validate_url(&Url::parse("https://localhost/api").unwrap()).is_err());
        assert!(validate_url(&Url::parse("https://127.0.0.1/api").unwrap()).is_err());
    }

    #[tokio::test]
    async fn test_post_form_invalid_url() {
        let transport = HttpTransport::new().unwrap();
        let result = transport.post_form("not-a-url", &request()).await;
        assert!(matches!(result, Err(NmiError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_post_form_rejects_plain_http() {
        let transport = HttpTransport::new().unwrap();
        let result = transport.post_form("http://secure.nmi.com/api/transact.php", &request()).await;
        assert!(matches!(result, Err(NmiError::TransportError(_))));
    }
}
