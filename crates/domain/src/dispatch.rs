// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The dispatch decision.
//!
//! When a counter asks for its next customer two choices are made, in order:
//!
//! 1. **Which queue.** Among the queues the counter is assigned to today, the
//!    longest one wins. Equal lengths are broken by the shorter service time,
//!    and an exact duration tie keeps the queue seen first. Queues of length
//!    zero are never chosen, so an idle office yields no queue at all.
//! 2. **Which ticket.** Inside the chosen queue the waiting ticket with the
//!    lowest queue position is called. Equal positions fall back to the lowest
//!    ticket id.
//!
//! Both functions are pure; the persistence layer runs them inside the
//! transaction that commits the call.

use serde::{Deserialize, Serialize};

use crate::types::{Queue, Ticket};

/// A queue a counter may drain, paired with its service's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchCandidate {
    /// The queue state for today.
    pub queue: Queue,
    /// The expected handling duration of the queue's service, in minutes.
    pub service_time: u32,
}

impl DispatchCandidate {
    /// Creates a new `DispatchCandidate`.
    #[must_use]
    pub const fn new(queue: Queue, service_time: u32) -> Self {
        Self {
            queue,
            service_time,
        }
    }
}

/// Selects the queue a counter should drain next.
///
/// # Arguments
///
/// * `candidates` - The queues the counter is assigned to, in the order the
///   store returned them. Order only matters for exact service-time ties.
///
/// # Returns
///
/// The longest non-empty queue, or `None` if every candidate is empty or
/// there are no candidates.
#[must_use]
pub fn find_longest_queue(candidates: &[DispatchCandidate]) -> Option<&DispatchCandidate> {
    let max_length: u32 = candidates.iter().map(|c| c.queue.length).max()?;
    if max_length == 0 {
        return None;
    }

    let mut selected: Option<&DispatchCandidate> = None;
    for candidate in candidates.iter().filter(|c| c.queue.length == max_length) {
        match selected {
            // Strictly shorter service time replaces; equal keeps first-seen.
            Some(current) if current.service_time <= candidate.service_time => {}
            _ => selected = Some(candidate),
        }
    }

    selected
}

/// Selects the ticket to call from a queue's waiting tickets.
///
/// Served tickets in `tickets` are ignored.
///
/// # Returns
///
/// The waiting ticket with the lowest `(queue_position, ticket_id)`, or
/// `None` if nothing is waiting.
#[must_use]
pub fn select_next_ticket(tickets: &[Ticket]) -> Option<&Ticket> {
    tickets
        .iter()
        .filter(|t| t.is_waiting())
        .min_by_key(|t| (t.queue_position, t.ticket_id))
}
