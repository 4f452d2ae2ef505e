// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The transactional `call_next` unit.
//!
//! Candidate loading, both dispatch decisions, the ticket claim and the
//! queue decrement all run inside one immediate transaction. Either the
//! ticket is served and its queue shrinks by one, or nothing changes.

use diesel::SqliteConnection;
use office_queue_domain::{
    DispatchCandidate, Ticket, find_longest_queue, select_next_ticket,
};
use time::Date;
use tracing::{debug, info, warn};

use crate::error::PersistenceError;
use crate::mutations::queues::decrement_queue;
use crate::mutations::tickets::claim_ticket;
use crate::queries::counters::get_counter;
use crate::queries::queues::list_dispatch_candidates;
use crate::queries::tickets::{get_ticket, list_waiting_tickets};

/// Calls the next customer for a counter.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `counter_id` - The requesting counter
/// * `today` - The day whose assignments and queues apply
///
/// # Returns
///
/// The claimed ticket as stored after the call, or `None` when none of the
/// counter's queues has anybody waiting.
///
/// # Errors
///
/// Returns an error if:
/// - The counter does not exist
/// - The chosen queue has a positive length but no waiting ticket
/// - Any statement fails
pub fn call_next(
    conn: &mut SqliteConnection,
    counter_id: i64,
    today: Date,
) -> Result<Option<Ticket>, PersistenceError> {
    conn.immediate_transaction(|conn| {
        get_counter(conn, counter_id)?;

        let candidates: Vec<DispatchCandidate> =
            list_dispatch_candidates(conn, counter_id, today)?;
        let Some(target) = find_longest_queue(&candidates) else {
            debug!(counter_id, %today, "No waiting customers for counter");
            return Ok(None);
        };
        let service_id: i64 = target.queue.service_id;
        let length: u32 = target.queue.length;

        let waiting: Vec<Ticket> = list_waiting_tickets(conn, service_id, today)?;
        let Some(next) = select_next_ticket(&waiting) else {
            warn!(
                service_id,
                length, "Queue reports waiting customers but has no waiting ticket"
            );
            return Err(PersistenceError::InconsistentQueue {
                service_id,
                date: today,
                length,
            });
        };
        let ticket_id: i64 = next.ticket_id;

        debug!(counter_id, service_id, ticket_id, length, "Selected next ticket");

        claim_ticket(conn, ticket_id, counter_id)?;
        decrement_queue(conn, service_id, today)?;

        let ticket: Ticket = get_ticket(conn, ticket_id)?;
        info!(
            counter_id,
            service_id,
            ticket_id,
            queue_position = ticket.queue_position,
            "Called ticket"
        );

        Ok(Some(ticket))
    })
}
