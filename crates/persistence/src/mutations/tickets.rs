// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket store mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use office_queue_domain::{Queue, Ticket, format_day};
use time::Date;
use tracing::{info, warn};

use crate::backend::PersistenceBackend;
use crate::data_models::column_i32;
use crate::diesel_schema::{queues, tickets};
use crate::error::PersistenceError;
use crate::mutations::queues::{decrement_queue, increment_queue};
use crate::queries::queues::find_queue;
use crate::queries::services::get_service;
use crate::queries::tickets::{find_ticket, get_ticket};

/// Issues a new ticket for a service.
///
/// The queue increment and the ticket insert share one immediate
/// transaction. The ticket's position is the queue length before the
/// increment, so concurrent issuers always get distinct positions.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `service_id` - The requested service
/// * `date` - The issuing day
///
/// # Errors
///
/// Returns an error if:
/// - The service does not exist
/// - No queue is open for the service on `date`
/// - The insert fails
///
/// No ticket is stored and the queue is unchanged on error.
pub fn issue_ticket(
    conn: &mut SqliteConnection,
    service_id: i64,
    date: Date,
) -> Result<Ticket, PersistenceError> {
    conn.immediate_transaction(|conn| {
        get_service(conn, service_id)?;

        let queue: Queue = increment_queue(conn, service_id, date)?;
        let queue_position: u32 = queue.length.checked_sub(1).ok_or_else(|| {
            PersistenceError::InvalidStoredValue(format!(
                "Queue for service {service_id} reported length 0 after increment"
            ))
        })?;

        diesel::insert_into(tickets::table)
            .values((
                tickets::service_id.eq(service_id),
                tickets::queue_position.eq(column_i32("queue_position", queue_position)?),
                tickets::issue_date.eq(format_day(date)),
                tickets::served.eq(0),
            ))
            .execute(conn)?;

        let ticket_id: i64 = conn.get_last_insert_rowid()?;
        info!(ticket_id, service_id, queue_position, %date, "Issued ticket");

        get_ticket(conn, ticket_id)
    })
}

/// Claims a waiting ticket for a counter.
///
/// The update only matches unserved tickets, so two counters can never
/// both claim the same ticket. `called_at` is stamped with the database
/// clock.
///
/// # Errors
///
/// Returns `TicketNotFound` if the ticket does not exist, or
/// `TicketAlreadyServed` if another counter claimed it first.
pub fn claim_ticket(
    conn: &mut SqliteConnection,
    ticket_id: i64,
    counter_id: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(
        tickets::table
            .filter(tickets::ticket_id.eq(ticket_id))
            .filter(tickets::served.eq(0)),
    )
    .set((
        tickets::counter_id.eq(Some(counter_id)),
        tickets::served.eq(1),
        tickets::called_at.eq(diesel::dsl::sql::<Nullable<Text>>("CURRENT_TIMESTAMP")),
    ))
    .execute(conn)?;

    if rows_affected == 0 {
        if find_ticket(conn, ticket_id)?.is_none() {
            return Err(PersistenceError::TicketNotFound(ticket_id));
        }
        warn!(ticket_id, counter_id, "Ticket was already served");
        return Err(PersistenceError::TicketAlreadyServed(ticket_id));
    }

    Ok(())
}

/// Deletes a ticket.
///
/// A waiting ticket also leaves its queue, so the queue length keeps
/// matching the number of waiting tickets. If the queue was deleted or
/// already emptied by a reset, only the ticket row goes.
///
/// # Errors
///
/// Returns `TicketNotFound` if the ticket does not exist.
pub fn delete_ticket(conn: &mut SqliteConnection, ticket_id: i64) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        let ticket: Ticket =
            find_ticket(conn, ticket_id)?.ok_or(PersistenceError::TicketNotFound(ticket_id))?;

        diesel::delete(tickets::table.filter(tickets::ticket_id.eq(ticket_id))).execute(conn)?;

        let queue: Option<Queue> = find_queue(conn, ticket.service_id, ticket.issue_date)?;
        if !ticket.served && queue.is_some_and(|queue| queue.length > 0) {
            decrement_queue(conn, ticket.service_id, ticket.issue_date)?;
        }

        info!(ticket_id, served = ticket.served, "Deleted ticket");
        Ok(())
    })
}

/// Deletes every ticket and returns how many were removed.
///
/// Queues that had waiting tickets are emptied.
///
/// # Errors
///
/// Returns an error if any statement fails; nothing is changed in that case.
pub fn delete_all_tickets(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let waiting_queues: Vec<(i64, String)> = tickets::table
            .filter(tickets::served.eq(0))
            .select((tickets::service_id, tickets::issue_date))
            .distinct()
            .load(conn)?;

        let removed: usize = diesel::delete(tickets::table).execute(conn)?;

        for (service_id, issue_date) in &waiting_queues {
            diesel::update(
                queues::table
                    .filter(queues::service_id.eq(*service_id))
                    .filter(queues::date.eq(issue_date.as_str())),
            )
            .set(queues::length.eq(0))
            .execute(conn)?;
        }

        info!(removed, emptied_queues = waiting_queues.len(), "Deleted all tickets");
        Ok(removed)
    })
}
