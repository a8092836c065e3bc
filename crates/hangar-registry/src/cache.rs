//! Client-list cache
//!
//! A single-slot TTL cache over the full client listing. The clock is
//! injected so tests can step time instead of sleeping; mutating client
//! operations call `invalidate` so the console never serves a listing that
//! predates a write it performed itself.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;

use hangar_persistence::entity::client;

/// Time source for cache expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside of tests.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CachedListing {
    stored_at: DateTime<Utc>,
    clients: Vec<client::Model>,
}

pub struct ClientCache {
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    slot: Mutex<Option<CachedListing>>,
}

impl ClientCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
            slot: Mutex::new(None),
        }
    }

    pub fn with_system_clock(ttl: Duration) -> Self {
        Self::new(ttl, Arc::new(SystemClock))
    }

    /// The cached listing, unless it has reached its TTL.
    pub fn get(&self) -> Option<Vec<client::Model>> {
        let slot = self.slot.lock();
        let cached = slot.as_ref()?;
        if self.clock.now() - cached.stored_at >= self.ttl {
            return None;
        }
        Some(cached.clients.clone())
    }

    pub fn put(&self, clients: Vec<client::Model>) {
        *self.slot.lock() = Some(CachedListing {
            stored_at: self.clock.now(),
            clients,
        });
    }

    /// Drop the cached listing. Called after every client mutation.
    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn starting_at(now: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self { now: Mutex::new(now) })
        }

        fn advance(&self, duration: Duration) {
            let mut now = self.now.lock();
            *now = *now + TimeDelta::from_std(duration).unwrap();
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock()
        }
    }

    fn sample_client(id: &str) -> client::Model {
        let now = Utc::now();
        client::Model {
            id: id.to_string(),
            name: "Acme".to_string(),
            email: format!("{}@acme.com", id),
            address: "1 Main St".to_string(),
            vm_ip: None,
            vm_password: None,
            gmt_create: now,
            gmt_modified: now,
        }
    }

    #[test]
    fn test_hit_before_ttl_miss_at_ttl() {
        let clock = ManualClock::starting_at(Utc::now());
        let cache = ClientCache::new(Duration::from_secs(60), clock.clone());

        cache.put(vec![sample_client("c1")]);
        assert_eq!(cache.get().unwrap().len(), 1);

        clock.advance(Duration::from_secs(59));
        assert!(cache.get().is_some());

        // Expiry is exact: the deadline itself already misses
        clock.advance(Duration::from_secs(1));
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_invalidate_drops_listing() {
        let clock = ManualClock::starting_at(Utc::now());
        let cache = ClientCache::new(Duration::from_secs(60), clock);

        cache.put(vec![sample_client("c1")]);
        cache.invalidate();
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_put_resets_deadline() {
        let clock = ManualClock::starting_at(Utc::now());
        let cache = ClientCache::new(Duration::from_secs(60), clock.clone());

        cache.put(vec![sample_client("c1")]);
        clock.advance(Duration::from_secs(45));
        cache.put(vec![sample_client("c1"), sample_client("c2")]);
        clock.advance(Duration::from_secs(45));

        // 45s after the refresh, 90s after the first put
        assert_eq!(cache.get().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_cache_misses() {
        let cache = ClientCache::with_system_clock(Duration::from_secs(60));
        assert!(cache.get().is_none());
    }
}
