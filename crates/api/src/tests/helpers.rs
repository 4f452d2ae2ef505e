// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use office_queue_persistence::Persistence;
use time::{Date, Month};

use crate::{
    CounterInfo, CounterNameRequest, CreateServiceRequest, OpenQueueRequest, ServiceInfo,
    assign_service, create_counter, create_service, open_queue,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn today() -> Date {
    Date::from_calendar_date(2026, Month::March, 2).unwrap()
}

pub fn yesterday() -> Date {
    Date::from_calendar_date(2026, Month::March, 1).unwrap()
}

pub fn create_service_request(name: &str, service_time: u32) -> CreateServiceRequest {
    CreateServiceRequest {
        name: name.to_string(),
        service_time,
    }
}

pub fn counter_request(name: &str) -> CounterNameRequest {
    CounterNameRequest {
        name: name.to_string(),
    }
}

/// Creates a service and opens its queue for today.
pub fn setup_open_service(persistence: &mut Persistence, name: &str, service_time: u32) -> i64 {
    let service: ServiceInfo =
        create_service(persistence, &create_service_request(name, service_time)).unwrap();
    let request: OpenQueueRequest = OpenQueueRequest {
        service_id: service.service_id,
        date: None,
    };
    open_queue(persistence, &request, today()).unwrap();
    service.service_id
}

/// Creates a counter that serves the given services today.
pub fn setup_counter(persistence: &mut Persistence, name: &str, service_ids: &[i64]) -> i64 {
    let counter: CounterInfo = create_counter(persistence, &counter_request(name)).unwrap();
    for service_id in service_ids {
        assign_service(persistence, counter.counter_id, *service_id, today()).unwrap();
    }
    counter.counter_id
}
