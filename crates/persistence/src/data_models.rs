// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs for the Diesel schema and their conversion into domain types.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use office_queue_domain::{Counter, Queue, Service, Ticket, parse_day};

use crate::diesel_schema::{counters, queues, services, tickets};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = services)]
pub struct ServiceRow {
    pub service_id: i64,
    pub name: String,
    pub service_time: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = counters)]
pub struct CounterRow {
    pub counter_id: i64,
    pub name: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = queues)]
pub struct QueueRow {
    pub service_id: i64,
    pub date: String,
    pub length: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = tickets)]
pub struct TicketRow {
    pub ticket_id: i64,
    pub service_id: i64,
    pub counter_id: Option<i64>,
    pub queue_position: i32,
    pub issue_date: String,
    pub called_at: Option<String>,
    pub served: i32,
}

/// Converts a stored non-negative `INTEGER` column into a `u32`.
pub fn stored_u32(column: &str, value: i32) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::InvalidStoredValue(format!("{column} must be non-negative, got {value}"))
    })
}

/// Converts a `u32` into the `INTEGER` column representation.
pub fn column_i32(column: &str, value: u32) -> Result<i32, PersistenceError> {
    value.to_i32().ok_or_else(|| {
        PersistenceError::InvalidStoredValue(format!("{column} value {value} is out of range"))
    })
}

fn stored_day(value: &str) -> Result<time::Date, PersistenceError> {
    parse_day(value).map_err(|e| PersistenceError::InvalidStoredValue(e.to_string()))
}

impl TryFrom<ServiceRow> for Service {
    type Error = PersistenceError;

    fn try_from(row: ServiceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            service_id: row.service_id,
            name: row.name,
            service_time: stored_u32("service_time", row.service_time)?,
        })
    }
}

impl From<CounterRow> for Counter {
    fn from(row: CounterRow) -> Self {
        Self {
            counter_id: row.counter_id,
            name: row.name,
        }
    }
}

impl TryFrom<QueueRow> for Queue {
    type Error = PersistenceError;

    fn try_from(row: QueueRow) -> Result<Self, Self::Error> {
        Ok(Self {
            service_id: row.service_id,
            date: stored_day(&row.date)?,
            length: stored_u32("length", row.length)?,
        })
    }
}

impl TryFrom<TicketRow> for Ticket {
    type Error = PersistenceError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        Ok(Self {
            ticket_id: row.ticket_id,
            service_id: row.service_id,
            counter_id: row.counter_id,
            queue_position: stored_u32("queue_position", row.queue_position)?,
            issue_date: stored_day(&row.issue_date)?,
            called_at: row.called_at,
            served: row.served != 0,
        })
    }
}

/// Converts a batch of rows, failing on the first invalid one.
pub fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, PersistenceError>
where
    T: TryFrom<R, Error = PersistenceError>,
{
    rows.into_iter().map(T::try_from).collect()
}
