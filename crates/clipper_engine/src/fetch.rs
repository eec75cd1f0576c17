use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use futures_util::StreamExt;
use rand::Rng;
use reqwest::header::{CONTENT_TYPE, REFERER, USER_AGENT};

use clipper_core::HarvestConfig;

use crate::identity::{Identity, IdentityPool, BASE_HEADERS};

/// Successful fetch: body bytes plus the response facts the pipeline
/// classifies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSuccess {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// URL after redirects, which may differ from the requested one.
    pub final_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchErrorKind {
    InvalidUrl,
    Timeout,
    Network,
    /// Non-success status, surfaced only after the retry policy exhausts.
    HttpStatus(u16),
    TooLarge { max_bytes: u64 },
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchErrorKind::InvalidUrl => write!(f, "invalid url"),
            FetchErrorKind::Timeout => write!(f, "timeout"),
            FetchErrorKind::Network => write!(f, "network error"),
            FetchErrorKind::HttpStatus(status) => write!(f, "http status {status}"),
            FetchErrorKind::TooLarge { max_bytes } => {
                write!(f, "response too large (max {max_bytes} bytes)")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Blocking, one-request-at-a-time fetch contract. Implementations own
/// their politeness delay, identity rotation, and retry behavior; callers
/// see only the final outcome.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<FetchSuccess, FetchError>;
}

/// A response is treated as PDF when the declared content type says so or
/// the URL path (query string ignored) ends in `.pdf`.
pub fn is_pdf_response(content_type: Option<&str>, url: &str) -> bool {
    if let Some(declared) = content_type {
        if declared.to_ascii_lowercase().contains("application/pdf") {
            return true;
        }
    }
    let path = url.split('?').next().unwrap_or(url);
    path.to_ascii_lowercase().ends_with(".pdf")
}

/// The production fetch engine: a reqwest client behind a private
/// current-thread runtime, so the crate keeps an async HTTP stack while
/// presenting the strictly serial blocking contract the rate limiting
/// depends on.
pub struct PoliteFetcher {
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    pool: IdentityPool,
    config: HarvestConfig,
}

impl PoliteFetcher {
    pub fn new(config: HarvestConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(config.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FetchErrorKind::Network, err.to_string()))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| FetchError::new(FetchErrorKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            runtime,
            pool: IdentityPool,
            config,
        })
    }

    async fn fetch_inner(&self, url: reqwest::Url) -> Result<FetchSuccess, FetchError> {
        sleep_uniform_secs(&self.config.delay_range).await;

        let retry = &self.config.retry;
        let mut last_error: Option<FetchError> = None;
        for attempt in 0..=retry.max_retries {
            if attempt > 0 {
                let backoff = retry.backoff_for(attempt - 1);
                let jitter = Duration::from_millis(rand::rng().random_range(0..1000));
                tokio::time::sleep(backoff + jitter).await;
            }
            let identity = self.pool.draw();
            match self.attempt(url.clone(), &identity).await {
                Ok(success) => return Ok(success),
                Err(error) => {
                    let retryable = match error.kind {
                        FetchErrorKind::HttpStatus(status) => retry.is_retryable_status(status),
                        FetchErrorKind::Timeout | FetchErrorKind::Network => true,
                        _ => false,
                    };
                    if !retryable {
                        return Err(error);
                    }
                    log::debug!("attempt {} for {url} failed: {error}", attempt + 1);
                    last_error = Some(error);
                }
            }
        }
        Err(last_error
            .unwrap_or_else(|| FetchError::new(FetchErrorKind::Network, "retries exhausted")))
    }

    async fn attempt(
        &self,
        url: reqwest::Url,
        identity: &Identity,
    ) -> Result<FetchSuccess, FetchError> {
        let mut request = self
            .client
            .get(url.clone())
            .header(USER_AGENT, identity.user_agent);
        for (name, value) in BASE_HEADERS {
            request = request.header(*name, *value);
        }
        if let Some(referer) = Identity::referer_for(url.as_str()) {
            request = request.header(REFERER, referer);
        }

        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FetchErrorKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(declared_len) = response.content_length() {
            if declared_len > self.config.max_bytes {
                return Err(FetchError::new(
                    FetchErrorKind::TooLarge {
                        max_bytes: self.config.max_bytes,
                    },
                    "declared length over limit",
                ));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_transport_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > self.config.max_bytes {
                return Err(FetchError::new(
                    FetchErrorKind::TooLarge {
                        max_bytes: self.config.max_bytes,
                    },
                    "response body over limit",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(FetchSuccess {
            bytes,
            content_type,
            final_url,
        })
    }
}

impl Fetcher for PoliteFetcher {
    fn fetch(&self, url: &str) -> Result<FetchSuccess, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FetchErrorKind::InvalidUrl, err.to_string()))?;
        self.runtime.block_on(self.fetch_inner(parsed))
    }
}

fn map_transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FetchErrorKind::Timeout, err.to_string());
    }
    FetchError::new(FetchErrorKind::Network, err.to_string())
}

/// Politeness sleep: uniform draw from `range` seconds. A non-positive
/// upper bound sleeps nothing, which is what the tests rely on.
async fn sleep_uniform_secs(range: &RangeInclusive<f64>) {
    let (low, high) = (*range.start(), *range.end());
    if high <= 0.0 {
        return;
    }
    let secs = rand::rng().random_range(low.min(high)..=high);
    tokio::time::sleep(Duration::from_secs_f64(secs)).await;
}
