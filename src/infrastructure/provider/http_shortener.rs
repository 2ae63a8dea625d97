//! HTTP implementation of the shortening-provider gateway.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::domain::entities::{LinkStats, ShortenError, ShortenRequest, ShortenResult};
use crate::domain::gateway::ShortenerGateway;

use super::http_client::build_provider_client;

/// Provider response for a shorten call.
///
/// Wire format: `{"status": "success", "shortenedUrl": "https://..."}`.
/// Anything else (failure status, missing field) is a provider error.
#[derive(Debug, Deserialize)]
struct ShortenResponse {
    status: Option<String>,
    #[serde(rename = "shortenedUrl")]
    shortened_url: Option<String>,
    message: Option<String>,
}

/// Provider response for the `type=stats` variant.
#[derive(Debug, Deserialize)]
struct StatsResponse {
    status: Option<String>,
    clicks: Option<u64>,
    revenue: Option<f64>,
    currency: Option<String>,
}

/// Gateway that talks to a nanolinks-style provider over HTTP.
///
/// Request shape: `GET {base}/api?api={key}&url={url}[&alias={alias}]`.
/// Every call is bounded by the client timeout; no transport error ever
/// escapes as a panic or raw error — all failures become [`ShortenError`].
pub struct HttpShortenerGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpShortenerGateway {
    /// Creates a gateway against the given provider base URL.
    ///
    /// `timeout_secs` bounds each outbound call end to end.
    ///
    /// # Errors
    ///
    /// Returns the underlying builder error when the HTTP client cannot be
    /// constructed (startup-time failure, typically TLS initialization).
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> reqwest::Result<Self> {
        Ok(Self {
            client: build_provider_client(timeout_secs)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api", self.base_url)
    }

    /// Rejects URLs the provider would choke on before issuing any call.
    fn check_url(url: &str) -> Result<(), ShortenError> {
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {
                Ok(())
            }
            _ => Err(ShortenError::InvalidUrl),
        }
    }

    fn classify_transport(e: &reqwest::Error) -> ShortenError {
        if e.is_timeout() {
            ShortenError::Timeout
        } else {
            ShortenError::Provider(e.to_string())
        }
    }
}

#[async_trait]
impl ShortenerGateway for HttpShortenerGateway {
    async fn shorten(&self, request: &ShortenRequest) -> ShortenResult {
        Self::check_url(&request.url)?;

        let mut query: Vec<(&str, &str)> = vec![
            ("api", request.credential.as_str()),
            ("url", request.url.as_str()),
        ];
        if let Some(alias) = &request.alias {
            query.push(("alias", alias.as_str()));
        }

        let response = self
            .client
            .get(self.endpoint())
            .query(&query)
            .send()
            .await
            .map_err(|e| Self::classify_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShortenError::Provider(format!("HTTP {status}")));
        }

        let body: ShortenResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ShortenError::Timeout
            } else {
                ShortenError::Provider(format!("unparseable response: {e}"))
            }
        })?;

        match body {
            ShortenResponse {
                status: Some(s),
                shortened_url: Some(short),
                ..
            } if s == "success" => {
                tracing::debug!(url = %request.url, short = %short, "provider shortened url");
                Ok(short)
            }
            ShortenResponse { message, .. } => Err(ShortenError::Provider(
                message.unwrap_or_else(|| "provider reported failure".to_string()),
            )),
        }
    }

    async fn stats(&self, url: &str, credential: &str) -> Result<LinkStats, ShortenError> {
        Self::check_url(url)?;

        let query: Vec<(&str, &str)> =
            vec![("api", credential), ("url", url), ("type", "stats")];

        let response = self
            .client
            .get(self.endpoint())
            .query(&query)
            .send()
            .await
            .map_err(|e| Self::classify_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShortenError::Provider(format!("HTTP {status}")));
        }

        let body: StatsResponse = response
            .json()
            .await
            .map_err(|e| ShortenError::Provider(format!("unparseable response: {e}")))?;

        match body {
            StatsResponse {
                status: Some(s),
                clicks: Some(clicks),
                revenue,
                currency,
            } if s == "success" => Ok(LinkStats {
                clicks,
                revenue: revenue.unwrap_or(0.0),
                currency,
            }),
            _ => Err(ShortenError::Provider(
                "provider reported failure".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_url_requires_scheme_and_host() {
        assert!(HttpShortenerGateway::check_url("https://foo.com/x").is_ok());
        assert!(HttpShortenerGateway::check_url("http://foo.com").is_ok());
        assert_eq!(
            HttpShortenerGateway::check_url("foo.com/x"),
            Err(ShortenError::InvalidUrl)
        );
        assert_eq!(
            HttpShortenerGateway::check_url("ftp://foo.com"),
            Err(ShortenError::InvalidUrl)
        );
        assert_eq!(
            HttpShortenerGateway::check_url("https://"),
            Err(ShortenError::InvalidUrl)
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway = HttpShortenerGateway::new("https://nanolinks.in/", 10).unwrap();
        assert_eq!(gateway.endpoint(), "https://nanolinks.in/api");
    }
}
