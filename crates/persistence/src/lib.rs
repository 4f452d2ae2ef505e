// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Office Queue system.
//!
//! This crate stores services, counters, their day-scoped assignments, the
//! queue ledger and tickets in `SQLite` through Diesel, and runs the
//! multi-step operations of the ticket-dispatch core as single transactions.
//!
//! ## Transactional units
//!
//! - `issue_ticket`: queue increment and ticket insert
//! - `call_next`: queue selection, ticket claim and queue decrement
//! - `reset_all_queues`: the start-of-day reset of every queue
//!
//! Each runs inside `BEGIN IMMEDIATE`, so the write lock is taken before
//! anything is read. Connections sharing one database file serialize on
//! that lock and wait up to the configured busy timeout.
//!
//! ## Day keys
//!
//! Every day-scoped row (assignments, queues, ticket issue dates) is keyed
//! on a `YYYY-MM-DD` string. Callers pass the day explicitly; nothing in
//! this crate reads the clock except `called_at`, which is stamped by the
//! database.
//!
//! ## Testing
//!
//! Tests run against a fresh in-memory database per test
//! (`Persistence::new_in_memory`). Concurrency tests open several
//! connections to one file database.

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

use diesel::SqliteConnection;
use office_queue_domain::{
    Counter, CounterAssignment, Queue, Service, Ticket, WaitingTimeInputs,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Persistence adapter for the office queue store.
///
/// Owns one `SQLite` connection. Callers that share an adapter across
/// threads wrap it in a mutex; separate adapters on the same file
/// coordinate through `SQLite` locking.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database so tests are isolated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:office_queue_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if missing and switched to WAL journaling.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Service Registry
    // ========================================================================

    /// Creates a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the insert fails.
    pub fn create_service(
        &mut self,
        name: &str,
        service_time: u32,
    ) -> Result<Service, PersistenceError> {
        mutations::services::create_service(&mut self.conn, name, service_time)
    }

    /// Retrieves a service by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the service does not exist.
    pub fn get_service(&mut self, service_id: i64) -> Result<Service, PersistenceError> {
        queries::services::get_service(&mut self.conn, service_id)
    }

    /// Retrieves a service by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no service has the name.
    pub fn get_service_by_name(&mut self, name: &str) -> Result<Service, PersistenceError> {
        queries::services::find_service_by_name(&mut self.conn, name)?
            .ok_or_else(|| PersistenceError::ServiceNameNotFound(name.to_string()))
    }

    /// Lists every service.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_services(&mut self) -> Result<Vec<Service>, PersistenceError> {
        queries::services::list_services(&mut self.conn)
    }

    /// Renames a service and replaces its service time.
    ///
    /// # Errors
    ///
    /// Returns an error if the service does not exist or the new name is taken.
    pub fn update_service(
        &mut self,
        name: &str,
        new_name: &str,
        new_service_time: u32,
    ) -> Result<Service, PersistenceError> {
        mutations::services::update_service(&mut self.conn, name, new_name, new_service_time)
    }

    /// Deletes a service with its assignments, queues and tickets.
    ///
    /// # Errors
    ///
    /// Returns an error if the service does not exist.
    pub fn delete_service(&mut self, name: &str) -> Result<(), PersistenceError> {
        mutations::services::delete_service(&mut self.conn, name)
    }

    // ========================================================================
    // Counter Registry
    // ========================================================================

    /// Creates a counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the insert fails.
    pub fn create_counter(&mut self, name: &str) -> Result<Counter, PersistenceError> {
        mutations::counters::create_counter(&mut self.conn, name)
    }

    /// Retrieves a counter by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter does not exist.
    pub fn get_counter(&mut self, counter_id: i64) -> Result<Counter, PersistenceError> {
        queries::counters::get_counter(&mut self.conn, counter_id)
    }

    /// Lists every counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_counters(&mut self) -> Result<Vec<Counter>, PersistenceError> {
        queries::counters::list_counters(&mut self.conn)
    }

    /// Renames a counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter does not exist or the name is taken.
    pub fn update_counter(
        &mut self,
        counter_id: i64,
        name: &str,
    ) -> Result<Counter, PersistenceError> {
        mutations::counters::update_counter(&mut self.conn, counter_id, name)
    }

    /// Deletes a counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter does not exist.
    pub fn delete_counter(&mut self, counter_id: i64) -> Result<(), PersistenceError> {
        mutations::counters::delete_counter(&mut self.conn, counter_id)
    }

    /// Lets a counter serve a service on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if either side does not exist or the assignment
    /// already exists.
    pub fn assign_service(
        &mut self,
        counter_id: i64,
        service_id: i64,
        date: Date,
    ) -> Result<CounterAssignment, PersistenceError> {
        mutations::counters::assign_service(&mut self.conn, counter_id, service_id, date)
    }

    /// Withdraws a counter's assignment to a service on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment does not exist.
    pub fn unassign_service(
        &mut self,
        counter_id: i64,
        service_id: i64,
        date: Date,
    ) -> Result<(), PersistenceError> {
        mutations::counters::unassign_service(&mut self.conn, counter_id, service_id, date)
    }

    /// Lists the services a counter serves on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter does not exist.
    pub fn services_for_day(
        &mut self,
        counter_id: i64,
        date: Date,
    ) -> Result<Vec<Service>, PersistenceError> {
        queries::counters::services_for_day(&mut self.conn, counter_id, date)
    }

    // ========================================================================
    // Queue Ledger
    // ========================================================================

    /// Opens an empty queue for a service on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service does not exist or the queue is
    /// already open.
    pub fn open_queue(&mut self, service_id: i64, date: Date) -> Result<Queue, PersistenceError> {
        mutations::queues::open_queue(&mut self.conn, service_id, date)
    }

    /// Retrieves the queue for a service on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if no queue is open.
    pub fn get_queue(&mut self, service_id: i64, date: Date) -> Result<Queue, PersistenceError> {
        queries::queues::get_queue(&mut self.conn, service_id, date)
    }

    /// Lists every queue row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_queues(&mut self) -> Result<Vec<Queue>, PersistenceError> {
        queries::queues::list_queues(&mut self.conn)
    }

    /// Lists the queues a counter is assigned on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter does not exist.
    pub fn list_queues_for_counter(
        &mut self,
        counter_id: i64,
        date: Date,
    ) -> Result<Vec<Queue>, PersistenceError> {
        queries::queues::list_queues_for_counter(&mut self.conn, counter_id, date)
    }

    /// Adds one waiting customer to a queue without issuing a ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if no queue is open.
    pub fn increment_queue(
        &mut self,
        service_id: i64,
        date: Date,
    ) -> Result<Queue, PersistenceError> {
        mutations::queues::increment_queue(&mut self.conn, service_id, date)
    }

    /// Removes one waiting customer from a queue.
    ///
    /// # Errors
    ///
    /// Returns an error if no queue is open or it is already empty.
    pub fn decrement_queue(&mut self, service_id: i64, date: Date) -> Result<(), PersistenceError> {
        mutations::queues::decrement_queue(&mut self.conn, service_id, date)
    }

    /// Resets every queue to an empty queue dated `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset fails; nothing changes in that case.
    pub fn reset_all_queues(&mut self, today: Date) -> Result<usize, PersistenceError> {
        mutations::queues::reset_all_queues(&mut self.conn, today)
    }

    /// Deletes the queue for a service on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue does not exist.
    pub fn delete_queue(&mut self, service_id: i64, date: Date) -> Result<(), PersistenceError> {
        mutations::queues::delete_queue(&mut self.conn, service_id, date)
    }

    /// Deletes every queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_all_queues(&mut self) -> Result<usize, PersistenceError> {
        mutations::queues::delete_all_queues(&mut self.conn)
    }

    // ========================================================================
    // Ticket Store
    // ========================================================================

    /// Issues a ticket for a service on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service does not exist or no queue is open.
    pub fn issue_ticket(&mut self, service_id: i64, date: Date) -> Result<Ticket, PersistenceError> {
        mutations::tickets::issue_ticket(&mut self.conn, service_id, date)
    }

    /// Retrieves a ticket by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket does not exist.
    pub fn get_ticket(&mut self, ticket_id: i64) -> Result<Ticket, PersistenceError> {
        queries::tickets::get_ticket(&mut self.conn, ticket_id)
    }

    /// Lists every ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_tickets(&mut self) -> Result<Vec<Ticket>, PersistenceError> {
        queries::tickets::list_tickets(&mut self.conn)
    }

    /// Lists the unserved tickets issued for a service on `date`, in call order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_waiting_tickets(
        &mut self,
        service_id: i64,
        date: Date,
    ) -> Result<Vec<Ticket>, PersistenceError> {
        queries::tickets::list_waiting_tickets(&mut self.conn, service_id, date)
    }

    /// Marks a ticket served by a counter without touching the queue ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket does not exist or was already served.
    pub fn mark_ticket_served(
        &mut self,
        ticket_id: i64,
        counter_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::tickets::claim_ticket(&mut self.conn, ticket_id, counter_id)
    }

    /// Deletes a ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket does not exist.
    pub fn delete_ticket(&mut self, ticket_id: i64) -> Result<(), PersistenceError> {
        mutations::tickets::delete_ticket(&mut self.conn, ticket_id)
    }

    /// Deletes every ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_all_tickets(&mut self) -> Result<usize, PersistenceError> {
        mutations::tickets::delete_all_tickets(&mut self.conn)
    }

    // ========================================================================
    // Dispatch & Waiting Time
    // ========================================================================

    /// Calls the next customer for a counter on `today`.
    ///
    /// Returns `Ok(None)` when nobody is waiting in any of the counter's queues.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter does not exist or the ledger and the
    /// ticket store disagree. Nothing is changed on error.
    pub fn call_next(
        &mut self,
        counter_id: i64,
        today: Date,
    ) -> Result<Option<Ticket>, PersistenceError> {
        mutations::dispatch::call_next(&mut self.conn, counter_id, today)
    }

    /// Reads the inputs of the waiting-time estimate for a service on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service does not exist or no queue is open.
    pub fn waiting_time_inputs(
        &mut self,
        service_id: i64,
        date: Date,
    ) -> Result<WaitingTimeInputs, PersistenceError> {
        queries::waiting_time::waiting_time_inputs(&mut self.conn, service_id, date)
    }
}
