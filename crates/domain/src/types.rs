// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;

/// A named kind of service offered at the office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// The canonical identifier assigned by the store.
    pub service_id: i64,
    /// The unique, human-readable name.
    pub name: String,
    /// Expected handling duration in minutes.
    pub service_time: u32,
}

impl Service {
    /// Creates a new `Service`.
    #[must_use]
    pub fn new(service_id: i64, name: &str, service_time: u32) -> Self {
        Self {
            service_id,
            name: name.to_string(),
            service_time,
        }
    }
}

/// A physical service counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    /// The canonical identifier assigned by the store.
    pub counter_id: i64,
    /// The unique, human-readable name.
    pub name: String,
}

impl Counter {
    /// Creates a new `Counter`.
    #[must_use]
    pub fn new(counter_id: i64, name: &str) -> Self {
        Self {
            counter_id,
            name: name.to_string(),
        }
    }
}

/// "On `date`, counter `counter_id` serves service `service_id`."
///
/// Assignments are keyed by calendar day and expire implicitly when the
/// day rolls over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CounterAssignment {
    /// The assigned counter.
    pub counter_id: i64,
    /// The service the counter serves.
    pub service_id: i64,
    /// The day the assignment holds for.
    pub date: Date,
}

/// The per-service, per-day count of issued tickets still waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    /// The service this queue belongs to.
    pub service_id: i64,
    /// The calendar day this queue is open for.
    pub date: Date,
    /// Number of issued, unserved tickets for this service on `date`.
    pub length: u32,
}

impl Queue {
    /// Creates a new `Queue`.
    #[must_use]
    pub const fn new(service_id: i64, date: Date, length: u32) -> Self {
        Self {
            service_id,
            date,
            length,
        }
    }

    /// Returns whether anybody is waiting in this queue.
    #[must_use]
    pub const fn has_waiting(&self) -> bool {
        self.length > 0
    }
}

/// A single customer's claim on a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Monotonic identifier assigned by the store.
    pub ticket_id: i64,
    /// The service the ticket was drawn for.
    pub service_id: i64,
    /// The counter that called the ticket, once called.
    pub counter_id: Option<i64>,
    /// Queue length observed when the ticket was issued.
    pub queue_position: u32,
    /// The calendar day the ticket was issued.
    pub issue_date: Date,
    /// Timestamp at which a counter called the ticket.
    pub called_at: Option<String>,
    /// Whether a counter has claimed this ticket.
    pub served: bool,
}

impl Ticket {
    /// Returns whether the ticket is still waiting to be called.
    #[must_use]
    pub const fn is_waiting(&self) -> bool {
        !self.served
    }
}
