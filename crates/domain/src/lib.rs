// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain model for the Office Queue system.
//!
//! This crate holds everything about queueing that can be decided without
//! touching storage:
//!
//! - the entities (services, counters, day-scoped counter assignments,
//!   per-day queues and tickets)
//! - input validation for administrator-supplied names and durations
//! - the dispatch decision: which queue a counter drains and which ticket
//!   inside that queue it calls
//! - the waiting-time formula used when a customer draws a ticket
//!
//! Every function here is pure. Calendar days are passed in explicitly,
//! never read from a clock.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod day;
mod dispatch;
mod error;
mod types;
mod validation;
mod waiting_time;

#[cfg(test)]
mod tests;

pub use day::{format_day, parse_day};
pub use dispatch::{DispatchCandidate, find_longest_queue, select_next_ticket};
pub use error::DomainError;
pub use types::{Counter, CounterAssignment, Queue, Service, Ticket};
pub use validation::{validate_counter_name, validate_service_name, validate_service_time};
pub use waiting_time::{WaitingTimeInputs, estimate_waiting_time};
