//! Clock/id port: the single place that reads wall-clock time and mints ids.
//!
//! Every other component asks a `&dyn Clock` for "now" and for fresh ids
//! instead of calling `Utc::now()` or `Uuid::new_v4()` directly, so tests can
//! swap in a `FixedClock` and get deterministic, reproducible ledger and
//! streak computations.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn new_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Real clock backed by the system time and random UUIDv4 generation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock for tests: returns a fixed instant and a sequence of
/// ids derived from an internal counter rather than randomness.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: DateTime<Utc>,
    next_id: std::sync::Arc<std::sync::atomic::AtomicU64>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            next_id: std::sync::Arc::new(std::sync::atomic::AtomicU64::new(1)),
        }
    }

    pub fn set_now(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn new_id(&self) -> Uuid {
        let n = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Uuid::from_u128(n as u128)
    }
}
