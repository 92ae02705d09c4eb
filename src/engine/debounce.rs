//! Delay-coalescing for search input
//!
//! Every keystroke schedules a new ticket; only the ticket that is still
//! current when its delay elapses may commit. Earlier tickets are stale
//! and their completions are dropped.

use std::time::Duration;

/// Generation number of one scheduled commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Supersede any pending ticket and issue a new one
    pub fn schedule(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    /// Drop the pending ticket without issuing a new one
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }
}

/// Resolve to `ticket` once `delay` has passed
pub async fn elapsed(delay: Duration, ticket: Ticket) -> Ticket {
    tokio::time::sleep(delay).await;
    ticket
}
