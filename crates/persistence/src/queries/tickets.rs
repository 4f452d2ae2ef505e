// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use office_queue_domain::{Ticket, format_day};
use time::Date;

use crate::data_models::{TicketRow, convert_rows};
use crate::diesel_schema::tickets;
use crate::error::PersistenceError;

/// Retrieves a ticket by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the ticket is not found.
pub fn find_ticket(
    conn: &mut SqliteConnection,
    ticket_id: i64,
) -> Result<Option<Ticket>, PersistenceError> {
    let row: Option<TicketRow> = tickets::table
        .filter(tickets::ticket_id.eq(ticket_id))
        .select(TicketRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Ticket::try_from).transpose()
}

/// Retrieves a ticket by id.
///
/// # Errors
///
/// Returns `TicketNotFound` if no ticket has the id.
pub fn get_ticket(conn: &mut SqliteConnection, ticket_id: i64) -> Result<Ticket, PersistenceError> {
    find_ticket(conn, ticket_id)?.ok_or(PersistenceError::TicketNotFound(ticket_id))
}

/// Lists every ticket ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_tickets(conn: &mut SqliteConnection) -> Result<Vec<Ticket>, PersistenceError> {
    let rows: Vec<TicketRow> = tickets::table
        .order(tickets::ticket_id.asc())
        .select(TicketRow::as_select())
        .load(conn)?;

    convert_rows(rows)
}

/// Lists the unserved tickets issued for a service on `date`, in call order.
///
/// Call order is `(queue_position, ticket_id)`. Tickets left over from
/// earlier days are not included.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_waiting_tickets(
    conn: &mut SqliteConnection,
    service_id: i64,
    date: Date,
) -> Result<Vec<Ticket>, PersistenceError> {
    let rows: Vec<TicketRow> = tickets::table
        .filter(tickets::service_id.eq(service_id))
        .filter(tickets::issue_date.eq(format_day(date)))
        .filter(tickets::served.eq(0))
        .order((tickets::queue_position.asc(), tickets::ticket_id.asc()))
        .select(TicketRow::as_select())
        .load(conn)?;

    convert_rows(rows)
}
