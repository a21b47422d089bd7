//! Transient peer liveness registry.
//!
//! The command transport tracks which remote clients have spoken
//! recently so acknowledgements and telemetry go only to live peers.
//! This is an explicitly owned registry for the transport collaborator
//! to hold; the core never owns or touches it.

use embassy_time::{Duration, Instant};
use heapless::FnvIndexMap;

use crate::timebase;

/// TTL-evicting map of peer keys (socket addresses, client ids) to the
/// instant they were last seen.
///
/// `CAP` must be a power of two (heapless index-map requirement). When
/// the registry is full, noting a new peer displaces the stalest entry.
pub struct PeerRegistry<K, const CAP: usize>
where
    K: Copy + Eq + core::hash::Hash,
{
    seen: FnvIndexMap<K, Instant, CAP>,
    ttl: Duration,
}

impl<K, const CAP: usize> PeerRegistry<K, CAP>
where
    K: Copy + Eq + core::hash::Hash,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            seen: FnvIndexMap::new(),
            ttl,
        }
    }

    /// Record that a peer was heard from at `now`.
    pub fn note_seen(&mut self, peer: K, now: Instant) {
        if self.seen.insert(peer, now).is_err() {
            // Full with a new key: displace the stalest entry.
            let stalest = self
                .seen
                .iter()
                .min_by_key(|(_, at)| at.as_ticks())
                .map(|(k, _)| *k);
            if let Some(stalest) = stalest {
                self.seen.remove(&stalest);
                let _ = self.seen.insert(peer, now);
            }
        }
    }

    /// Drop every peer not heard from within the TTL. Returns how many
    /// entries were evicted.
    pub fn prune(&mut self, now: Instant) -> usize {
        let mut evicted = 0;
        loop {
            let expired = self
                .seen
                .iter()
                .find(|(_, at)| timebase::elapsed(**at, now) > self.ttl)
                .map(|(k, _)| *k);
            match expired {
                Some(key) => {
                    self.seen.remove(&key);
                    evicted += 1;
                }
                None => break,
            }
        }
        evicted
    }

    /// Number of peers heard from within the TTL as of `now`.
    pub fn active(&self, now: Instant) -> usize {
        self.seen
            .values()
            .filter(|at| timebase::elapsed(**at, now) <= self.ttl)
            .count()
    }

    /// Whether a peer is currently live.
    pub fn is_live(&self, peer: &K, now: Instant) -> bool {
        self.seen
            .get(peer)
            .is_some_and(|at| timebase::elapsed(*at, now) <= self.ttl)
    }

    /// Iterate over live peer keys.
    pub fn live_peers(&self, now: Instant) -> impl Iterator<Item = &K> {
        self.seen
            .iter()
            .filter(move |(_, at)| timebase::elapsed(**at, now) <= self.ttl)
            .map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
