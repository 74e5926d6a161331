//! Latest-fetch-wins guard for consumers that re-fetch on input changes.
//!
//! When a consumer re-fetches because its input changed (say, a different
//! company was picked) an older response may arrive after the newer one.
//! [`FetchGuard`] hands out a generation ticket per fetch; only the newest
//! ticket's result is kept.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Generation number of one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Tracks the newest fetch started by one consumer.
#[derive(Debug, Default)]
pub struct FetchGuard {
    latest: AtomicU64,
}

impl FetchGuard {
    /// Create a guard with no fetch in flight.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Start a fetch, superseding every earlier ticket.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is still the newest fetch.
    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Run `fetch` and keep its output only if no newer fetch began meanwhile.
    pub async fn run<F: Future>(&self, fetch: F) -> Option<F::Output> {
        let ticket = self.begin();
        let output = fetch.await;
        if self.is_current(ticket) {
            Some(output)
        } else {
            debug!(generation = ticket.0, "Discarding superseded fetch result");
            None
        }
    }
}
