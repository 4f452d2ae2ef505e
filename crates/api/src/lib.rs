// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Office Queue system.
//!
//! Handlers here sit between a transport (the HTTP server) and the
//! persistence adapter. They validate requests with the domain validators,
//! translate domain and persistence errors into [`ApiError`], and shape
//! results into serializable DTOs. The current day is always an argument.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    assign_service, call_next, create_counter, create_service, delete_all_queues,
    delete_all_tickets, delete_counter, delete_queue, delete_service, delete_ticket,
    estimate_waiting_time, get_counter, get_queue, get_service, get_service_by_name, get_ticket,
    issue_ticket, list_counter_services, list_counters, list_queues, list_services, list_tickets,
    open_queue, parse_request_day, reset_queues, unassign_service, update_counter, update_service,
};
pub use request_response::{
    AssignmentInfo, CallNextResponse, CounterInfo, CounterNameRequest, CounterServicesResponse,
    CreateServiceRequest, DeleteResponse, IssueTicketRequest, ListCountersResponse,
    ListQueuesResponse, ListServicesResponse, ListTicketsResponse, OpenQueueRequest, QueueInfo,
    ResetQueuesResponse, ServiceInfo, TicketInfo, UpdateServiceRequest, WaitingTimeResponse,
};
