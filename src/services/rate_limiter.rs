//! Fixed-window rate limiter for the public quote endpoint
//!
//! Counts requests per client key inside a fixed window. State lives in
//! process memory, so limits are per server instance only. Expired windows
//! are removed by a periodic sweep.

use crate::models::RateLimitSection;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Counter for one client key
#[derive(Debug, Clone, Copy)]
struct WindowRecord {
    count: u32,
    reset_at: Instant,
}

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
}

#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    records: Mutex<HashMap<String, WindowRecord>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &RateLimitSection) -> Self {
        Self::new(Duration::from_secs(config.window_secs), config.max_requests)
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, WindowRecord>> {
        // Recover the map from a poisoned lock
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Count a request from `key` and decide whether it is allowed
    pub fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let mut records = self.records();

        if let Some(record) = records.get_mut(key).filter(|r| now <= r.reset_at) {
            if record.count >= self.max_requests {
                return RateLimitDecision {
                    allowed: false,
                    remaining: 0,
                };
            }
            record.count += 1;
            return RateLimitDecision {
                allowed: true,
                remaining: self.max_requests - record.count,
            };
        }

        records.insert(
            key.to_string(),
            WindowRecord {
                count: 1,
                reset_at: now + self.window,
            },
        );
        RateLimitDecision {
            allowed: true,
            remaining: self.max_requests.saturating_sub(1),
        }
    }

    /// Drop expired windows, returning how many were removed
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut records = self.records();
        let before = records.len();
        records.retain(|_, record| now <= record.reset_at);
        before - records.len()
    }

    /// Number of tracked client keys
    pub fn tracked(&self) -> usize {
        self.records().len()
    }

    /// Run [`RateLimiter::sweep`] on a fixed interval in the background
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = limiter.sweep();
                if removed > 0 {
                    tracing::debug!(removed, "Swept expired rate limit windows");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> RateLimiter {
        RateLimiter::new(Duration::from_secs(60), 5)
    }

    #[test]
    fn test_allows_up_to_max_then_denies() {
        let limiter = limiter();
        let now = Instant::now();

        let remaining: Vec<u32> = (0..5)
            .map(|_| {
                let decision = limiter.check_at("1.2.3.4", now);
                assert!(decision.allowed);
                decision.remaining
            })
            .collect();
        assert_eq!(remaining, vec![4, 3, 2, 1, 0]);

        let denied = limiter.check_at("1.2.3.4", now);
        assert_eq!(
            denied,
            RateLimitDecision {
                allowed: false,
                remaining: 0
            }
        );
    }

    #[test]
    fn test_window_resets_after_expiry() {
        let limiter = limiter();
        let now = Instant::now();
        for _ in 0..6 {
            limiter.check_at("client", now);
        }
        assert!(!limiter.check_at("client", now + Duration::from_secs(60)).allowed);

        let later = now + Duration::from_secs(61);
        let decision = limiter.check_at("client", later);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 4);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = limiter();
        let now = Instant::now();
        for _ in 0..5 {
            limiter.check_at("a", now);
        }
        assert!(!limiter.check_at("a", now).allowed);
        assert!(limiter.check_at("b", now).allowed);
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let limiter = limiter();
        let now = Instant::now();
        limiter.check_at("old", now);
        limiter.check_at("new", now + Duration::from_secs(30));
        assert_eq!(limiter.tracked(), 2);

        let removed = limiter.sweep_at(now + Duration::from_secs(61));
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = RateLimitSection {
            window_secs: 10,
            max_requests: 1,
            sweep_interval_secs: 60,
        };
        let limiter = RateLimiter::from_config(&config);
        let now = Instant::now();
        assert!(limiter.check_at("k", now).allowed);
        assert!(!limiter.check_at("k", now).allowed);
    }

    #[tokio::test]
    async fn test_sweeper_task_runs() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_millis(1), 5));
        limiter.check("k");
        let handle = limiter.spawn_sweeper(Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();
        assert_eq!(limiter.tracked(), 0);
    }
}
