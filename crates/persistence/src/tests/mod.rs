// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod concurrency_tests;

use office_queue_domain::{Counter, Service};
use time::{Date, Month};

use crate::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// The day most tests run on.
pub fn today() -> Date {
    Date::from_calendar_date(2026, Month::March, 2).expect("Valid test date")
}

pub fn yesterday() -> Date {
    today().previous_day().expect("Valid previous day")
}

/// Creates a service with an open queue for `today()`.
pub fn create_open_service(persistence: &mut Persistence, name: &str, service_time: u32) -> Service {
    let service: Service = persistence.create_service(name, service_time).unwrap();
    persistence.open_queue(service.service_id, today()).unwrap();
    service
}

/// Creates a counter assigned to each of `service_ids` for `today()`.
pub fn create_assigned_counter(
    persistence: &mut Persistence,
    name: &str,
    service_ids: &[i64],
) -> Counter {
    let counter: Counter = persistence.create_counter(name).unwrap();
    for service_id in service_ids {
        persistence
            .assign_service(counter.counter_id, *service_id, today())
            .unwrap();
    }
    counter
}

/// Checks the ledger invariant for one service and day: the queue length
/// equals the number of waiting tickets issued that day.
pub fn assert_ledger_matches_tickets(persistence: &mut Persistence, service_id: i64, date: Date) {
    let length: u32 = persistence.get_queue(service_id, date).unwrap().length;
    let waiting: usize = persistence
        .list_waiting_tickets(service_id, date)
        .unwrap()
        .len();
    assert_eq!(
        usize::try_from(length).unwrap(),
        waiting,
        "Queue length for service {service_id} does not match waiting tickets"
    );
}
