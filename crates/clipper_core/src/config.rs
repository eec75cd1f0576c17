use std::ops::RangeInclusive;
use std::time::Duration;

/// Automatic retry applied uniformly by the fetch engine for transport
/// failures and the retryable status set. Applies to GET only; the engine
/// issues no other method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the initial request.
    pub max_retries: u32,
    /// Base backoff; the delay before retry `n` is `base * 2^n` plus jitter.
    pub backoff_base: Duration,
    /// Status codes worth another attempt on an idempotent request.
    pub retryable_statuses: Vec<u16>,
}

impl RetryPolicy {
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Backoff before retry number `attempt` (0-based), jitter excluded.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_base * 2u32.saturating_pow(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 4,
            backoff_base: Duration::from_millis(800),
            retryable_statuses: vec![401, 403, 404, 408, 425, 429, 500, 502, 503, 504],
        }
    }
}

/// One extra manual retry for rate-limit style rejections, layered on top
/// of [`RetryPolicy`] by the orchestrator with a freshly drawn identity.
/// Kept separate from the generic loop: it fires once, after the generic
/// retries have already run their course.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondChancePolicy {
    pub statuses: Vec<u16>,
    /// Delay before the extra attempt, in seconds, drawn uniformly.
    pub delay_range: RangeInclusive<f64>,
}

impl SecondChancePolicy {
    pub fn applies_to(&self, status: u16) -> bool {
        self.statuses.contains(&status)
    }
}

impl Default for SecondChancePolicy {
    fn default() -> Self {
        Self {
            statuses: vec![403, 429],
            delay_range: 2.0..=4.0,
        }
    }
}

/// Every knob of a harvest run in one place, passed explicitly into the
/// fetch engine, quality gate, and store at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Politeness delay between requests, in seconds, drawn uniformly.
    /// A zero upper bound disables the sleep.
    pub delay_range: RangeInclusive<f64>,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub retry: RetryPolicy,
    pub second_chance: SecondChancePolicy,
    /// Checkpoint after every N newly accepted documents.
    pub save_every: usize,
    /// Quality floor: minimum word count for an accepted document.
    pub min_words: usize,
    /// Hosts that typically need JS or cookies; failures there are
    /// reported softly but handled identically.
    pub js_gated_hosts: Vec<String>,
}

impl HarvestConfig {
    /// Suffix match against the known JS/cookie-gated host list.
    pub fn is_js_gated(&self, host: &str) -> bool {
        self.js_gated_hosts
            .iter()
            .any(|gated| host == gated || host.ends_with(&format!(".{gated}")))
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(25),
            delay_range: 0.9..=2.2,
            redirect_limit: 10,
            max_bytes: 20 * 1024 * 1024,
            retry: RetryPolicy::default(),
            second_chance: SecondChancePolicy::default(),
            save_every: 4,
            min_words: 120,
            js_gated_hosts: vec![
                "sciencedirect.com".to_string(),
                "pmc.ncbi.nlm.nih.gov".to_string(),
                "ncbi.nlm.nih.gov".to_string(),
                "timesofagriculture.in".to_string(),
                "medium.com".to_string(),
            ],
        }
    }
}
