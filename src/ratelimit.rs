use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;

// The Sheets API allows 60 read requests per minute per user; the cinema
// site gets the same treatment.
const REQ_PER_MINUTE: NonZeroU32 = nonzero!(60u32);
// Small bursts are fine (worksheet list, then a couple of ranges).
const BURST: NonZeroU32 = nonzero!(5u32);

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

pub struct RateLimiter {
    limiter: DirectRateLimiter,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_quota(Quota::per_minute(REQ_PER_MINUTE).allow_burst(BURST))
    }

    pub fn with_quota(quota: Quota) -> Self {
        RateLimiter {
            limiter: GovernorRateLimiter::direct(quota),
        }
    }

    /// Waits (non-blocking) until the quota allows another request.
    pub async fn wait_until_ready(&self) {
        self.limiter.until_ready().await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn burst_passes_without_waiting() {
        let limiter = RateLimiter::new();
        let start = Instant::now();
        for _ in 0..BURST.get() {
            limiter.wait_until_ready().await;
        }
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn waits_once_the_burst_is_spent() {
        let limiter = RateLimiter::with_quota(Quota::with_period(Duration::from_millis(50)).unwrap());
        limiter.wait_until_ready().await;
        let start = Instant::now();
        limiter.wait_until_ready().await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
