use rand::seq::IndexedRandom;
use url::Url;

/// Static header set sent with every request.
pub(crate) const BASE_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,\
         image/avif,image/webp,image/apng,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Cache-Control", "no-cache"),
    ("Pragma", "no-cache"),
];

/// Rotating pool of realistic desktop browser signatures. Helps against
/// blanket bot blocks; rotated per attempt, never persisted.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:128.0) Gecko/20100101 Firefox/128.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36 Edg/127.0.0.0",
];

/// One simulated browser identity for a single request attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_agent: &'static str,
}

impl Identity {
    /// Referer presented alongside this identity: the target's scheme+host.
    pub fn referer_for(url: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        Some(format!("{}://{}", parsed.scheme(), host))
    }
}

/// Fixed identity pool; one entry is drawn at random per attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPool;

impl IdentityPool {
    pub fn draw(&self) -> Identity {
        let user_agent = USER_AGENTS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(USER_AGENTS[0]);
        Identity { user_agent }
    }

    /// The full signature pool, exposed so callers can verify membership.
    pub fn user_agents() -> &'static [&'static str] {
        USER_AGENTS
    }
}
