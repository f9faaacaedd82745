use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{StatusCode, Url};
use thiserror::Error;

/// Value sent in the `Accept-Language` header so pages render in English.
pub const ACCEPT_LANGUAGE_VALUE: &str = "en-US;q=0.9";

const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("domain not allowed: {0}")]
    DomainNotAllowed(String),

    #[error("HTTP {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// The error message followed by each underlying cause, so a rejected
    /// redirect names the host that was refused.
    pub fn report(self) -> String {
        format!("{:#}", anyhow::Error::new(self))
    }
}

/// Anything that can turn a URL into an HTML document.
///
/// `HttpFetcher` is the live implementation; tests substitute canned pages.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP fetcher restricted to a fixed set of hosts.
///
/// Hosts are compared exactly, so `trackingdifferences.com` does not admit
/// `www.trackingdifferences.com` unless both are listed. Redirects that
/// leave the allow-list fail the request.
pub struct HttpFetcher {
    client: reqwest::Client,
    allowed_domains: Vec<String>,
}

impl HttpFetcher {
    pub fn new(allowed_domains: &[&str]) -> Result<Self, FetchError> {
        let allowed_domains: Vec<String> = allowed_domains
            .iter()
            .map(|d| d.to_ascii_lowercase())
            .collect();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

        let redirect_domains = allowed_domains.clone();
        let redirect = reqwest::redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else if !is_allowed(attempt.url(), &redirect_domains) {
                let host = attempt.url().host_str().unwrap_or_default().to_string();
                attempt.error(FetchError::DomainNotAllowed(host))
            } else {
                attempt.follow()
            }
        });

        let client = reqwest::Client::builder()
            .user_agent(concat!("etf-scraper/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .redirect(redirect)
            .build()?;

        Ok(Self {
            client,
            allowed_domains,
        })
    }

    fn check_domain(&self, url: &Url) -> Result<(), FetchError> {
        if is_allowed(url, &self.allowed_domains) {
            Ok(())
        } else {
            Err(FetchError::DomainNotAllowed(
                url.host_str().unwrap_or_default().to_string(),
            ))
        }
    }
}

impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        self.check_domain(&parsed)?;

        let response = self.client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// True when the URL's host is one of `allowed` (already lowercased).
fn is_allowed(url: &Url, allowed: &[String]) -> bool {
    match url.host_str() {
        Some(host) => allowed.iter().any(|d| d == host),
        None => false,
    }
}
