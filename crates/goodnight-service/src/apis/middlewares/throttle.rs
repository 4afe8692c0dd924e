use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::AppState;

pub const DEFAULT_LIMIT: u32 = 60;
pub const DEFAULT_PERIOD_SECS: u64 = 60;

/// Fixed-window request counter keyed by client IP.
///
/// Window boundaries are global (`now - now % period`), so rolling into a new
/// window drops every count at once. That keeps the map bounded by the number
/// of distinct clients seen in a single window, even when callers mint fresh
/// `x-forwarded-for` values.
pub struct RateLimiter {
    limit: u32,
    period: u64,
    window: Mutex<Window>,
}

struct Window {
    started_at: u64,
    counts: HashMap<IpAddr, u32>,
}

/// What a single hit against the limiter decided.
#[derive(Debug, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Throttled {
        limit: u32,
        /// Epoch second at which the current window rolls over.
        reset: u64,
    },
}

impl RateLimiter {
    pub fn new(limit: u32, period: u64) -> Self {
        RateLimiter {
            limit,
            period: period.max(1),
            window: Mutex::new(Window {
                started_at: 0,
                counts: HashMap::new(),
            }),
        }
    }

    /// Count one request from `ip` at epoch second `now`.
    pub fn hit(&self, ip: IpAddr, now: u64) -> RateDecision {
        let window_start = now - (now % self.period);
        let mut window = self.window.lock().unwrap_or_else(|e| e.into_inner());

        if window.started_at != window_start {
            window.started_at = window_start;
            window.counts.clear();
        }

        let count = window.counts.entry(ip).or_insert(0);
        *count += 1;

        if *count > self.limit {
            RateDecision::Throttled {
                limit: self.limit,
                reset: window_start + self.period,
            }
        } else {
            RateDecision::Allowed
        }
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.window
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .counts
            .len()
    }
}

fn client_ip(request: &Request<Body>) -> IpAddr {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|value| value.trim().parse::<IpAddr>().ok())
    {
        return forwarded;
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Global per-IP throttle applied in front of every route.
pub async fn throttle_by_ip(
    State(app_state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    match app_state.rate_limiter.hit(client_ip(&request), now) {
        RateDecision::Allowed => next.run(request).await,
        RateDecision::Throttled { limit, reset } => {
            let retry_after = reset.saturating_sub(now);
            (
                StatusCode::TOO_MANY_REQUESTS,
                [
                    ("RateLimit-Limit", limit.to_string()),
                    ("RateLimit-Remaining", "0".to_string()),
                    ("RateLimit-Reset", reset.to_string()),
                    ("Retry-After", retry_after.to_string()),
                ],
                Json(json!({ "error": "Request Throttled" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn requests_within_limit_are_allowed() {
        let limiter = RateLimiter::new(3, 60);
        for _ in 0..3 {
            assert_eq!(limiter.hit(ip(1), 100), RateDecision::Allowed);
        }
    }

    #[test]
    fn over_limit_requests_are_throttled_until_window_rolls() {
        let limiter = RateLimiter::new(2, 60);
        assert_eq!(limiter.hit(ip(1), 100), RateDecision::Allowed);
        assert_eq!(limiter.hit(ip(1), 101), RateDecision::Allowed);
        // Window covering t=100 is [60, 120); reset at 120.
        assert_eq!(
            limiter.hit(ip(1), 102),
            RateDecision::Throttled { limit: 2, reset: 120 }
        );
        // Next window starts fresh.
        assert_eq!(limiter.hit(ip(1), 120), RateDecision::Allowed);
    }

    #[test]
    fn stale_clients_are_evicted_when_the_window_rolls() {
        let limiter = RateLimiter::new(5, 60);
        for last in 1..=50 {
            limiter.hit(ip(last), 100);
        }
        assert_eq!(limiter.tracked_clients(), 50);

        // Next window: only the clients still sending are tracked.
        limiter.hit(ip(1), 120);
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn clients_are_counted_independently() {
        let limiter = RateLimiter::new(1, 60);
        assert_eq!(limiter.hit(ip(1), 100), RateDecision::Allowed);
        assert_eq!(limiter.hit(ip(2), 100), RateDecision::Allowed);
        assert!(matches!(
            limiter.hit(ip(1), 100),
            RateDecision::Throttled { .. }
        ));
    }
}
