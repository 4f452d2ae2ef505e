// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Every handler takes the persistence adapter and, where the operation is
//! day-scoped, the caller's `today`. Handlers validate input, call the
//! store, translate errors and shape the response. They never read the clock.

use office_queue_domain::{
    Counter, Queue, Service, Ticket, WaitingTimeInputs, estimate_waiting_time as estimate,
    format_day, parse_day, validate_counter_name, validate_service_name, validate_service_time,
};
use office_queue_persistence::Persistence;
use time::Date;
use tracing::{debug, info};

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AssignmentInfo, CallNextResponse, CounterInfo, CounterNameRequest, CounterServicesResponse,
    CreateServiceRequest, DeleteResponse, IssueTicketRequest, ListCountersResponse,
    ListQueuesResponse, ListServicesResponse, ListTicketsResponse, OpenQueueRequest, QueueInfo,
    ResetQueuesResponse, ServiceInfo, TicketInfo, UpdateServiceRequest, WaitingTimeResponse,
};

/// Parses a `YYYY-MM-DD` day supplied by a caller.
///
/// # Errors
///
/// Returns `InvalidInput` on the `date` field if the string is not a day.
pub fn parse_request_day(value: &str) -> Result<Date, ApiError> {
    parse_day(value).map_err(translate_domain_error)
}

// ========================================================================
// Services
// ========================================================================

/// Creates a service.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The service name and duration
///
/// # Errors
///
/// Returns an error if:
/// - The name is blank or too long
/// - The service time is zero
/// - Another service already has the name
pub fn create_service(
    persistence: &mut Persistence,
    request: &CreateServiceRequest,
) -> Result<ServiceInfo, ApiError> {
    validate_service_name(&request.name).map_err(translate_domain_error)?;
    validate_service_time(request.service_time).map_err(translate_domain_error)?;

    let service: Service = persistence
        .create_service(&request.name, request.service_time)
        .map_err(translate_persistence_error)?;

    Ok(service.into())
}

/// Retrieves a service by id.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the service does not exist.
pub fn get_service(persistence: &mut Persistence, service_id: i64) -> Result<ServiceInfo, ApiError> {
    persistence
        .get_service(service_id)
        .map(ServiceInfo::from)
        .map_err(translate_persistence_error)
}

/// Retrieves a service by name.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no service has the name.
pub fn get_service_by_name(
    persistence: &mut Persistence,
    name: &str,
) -> Result<ServiceInfo, ApiError> {
    persistence
        .get_service_by_name(name)
        .map(ServiceInfo::from)
        .map_err(translate_persistence_error)
}

/// Lists every service.
///
/// # Errors
///
/// Returns an error if the store cannot be queried.
pub fn list_services(persistence: &mut Persistence) -> Result<ListServicesResponse, ApiError> {
    let services: Vec<Service> = persistence
        .list_services()
        .map_err(translate_persistence_error)?;

    Ok(ListServicesResponse {
        services: services.into_iter().map(ServiceInfo::from).collect(),
    })
}

/// Renames a service and replaces its duration.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `name` - The service's current name
/// * `request` - The new name and duration
///
/// # Errors
///
/// Returns an error if:
/// - The new name or duration is invalid
/// - No service has `name`
/// - Another service already has the new name
pub fn update_service(
    persistence: &mut Persistence,
    name: &str,
    request: &UpdateServiceRequest,
) -> Result<ServiceInfo, ApiError> {
    validate_service_name(&request.new_name).map_err(translate_domain_error)?;
    validate_service_time(request.service_time).map_err(translate_domain_error)?;

    persistence
        .update_service(name, &request.new_name, request.service_time)
        .map(ServiceInfo::from)
        .map_err(translate_persistence_error)
}

/// Deletes a service together with its assignments, queues and tickets.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no service has the name.
pub fn delete_service(persistence: &mut Persistence, name: &str) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_service(name)
        .map_err(translate_persistence_error)?;

    Ok(DeleteResponse {
        deleted: 1,
        message: format!("Deleted service '{name}'"),
    })
}

/// Estimates how long a customer drawing a ticket now would wait.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `service_id` - The requested service
/// * `today` - The day of the request
///
/// # Errors
///
/// Returns `ResourceNotFound` if:
/// - The service does not exist
/// - No queue is open for it today
/// - No counter serves it today
pub fn estimate_waiting_time(
    persistence: &mut Persistence,
    service_id: i64,
    today: Date,
) -> Result<WaitingTimeResponse, ApiError> {
    let inputs: WaitingTimeInputs = persistence
        .waiting_time_inputs(service_id, today)
        .map_err(translate_persistence_error)?;

    let waiting_time: f64 = estimate(&inputs).map_err(translate_domain_error)?;
    debug!(service_id, waiting_time, "Estimated waiting time");

    Ok(WaitingTimeResponse {
        service_id,
        date: format_day(today),
        queue_length: inputs.queue_length,
        waiting_time,
    })
}

// ========================================================================
// Counters
// ========================================================================

/// Creates a counter.
///
/// # Errors
///
/// Returns an error if the name is invalid or already taken.
pub fn create_counter(
    persistence: &mut Persistence,
    request: &CounterNameRequest,
) -> Result<CounterInfo, ApiError> {
    validate_counter_name(&request.name).map_err(translate_domain_error)?;

    let counter: Counter = persistence
        .create_counter(&request.name)
        .map_err(translate_persistence_error)?;

    Ok(counter.into())
}

/// Retrieves a counter by id.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the counter does not exist.
pub fn get_counter(persistence: &mut Persistence, counter_id: i64) -> Result<CounterInfo, ApiError> {
    persistence
        .get_counter(counter_id)
        .map(CounterInfo::from)
        .map_err(translate_persistence_error)
}

/// Lists every counter.
///
/// # Errors
///
/// Returns an error if the store cannot be queried.
pub fn list_counters(persistence: &mut Persistence) -> Result<ListCountersResponse, ApiError> {
    let counters: Vec<Counter> = persistence
        .list_counters()
        .map_err(translate_persistence_error)?;

    Ok(ListCountersResponse {
        counters: counters.into_iter().map(CounterInfo::from).collect(),
    })
}

/// Renames a counter.
///
/// # Errors
///
/// Returns an error if the name is invalid or taken, or the counter does
/// not exist.
pub fn update_counter(
    persistence: &mut Persistence,
    counter_id: i64,
    request: &CounterNameRequest,
) -> Result<CounterInfo, ApiError> {
    validate_counter_name(&request.name).map_err(translate_domain_error)?;

    persistence
        .update_counter(counter_id, &request.name)
        .map(CounterInfo::from)
        .map_err(translate_persistence_error)
}

/// Deletes a counter.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the counter does not exist.
pub fn delete_counter(
    persistence: &mut Persistence,
    counter_id: i64,
) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_counter(counter_id)
        .map_err(translate_persistence_error)?;

    Ok(DeleteResponse {
        deleted: 1,
        message: format!("Deleted counter {counter_id}"),
    })
}

/// Lets a counter serve a service today.
///
/// # Errors
///
/// Returns an error if the counter or service does not exist, or the
/// assignment already exists.
pub fn assign_service(
    persistence: &mut Persistence,
    counter_id: i64,
    service_id: i64,
    today: Date,
) -> Result<AssignmentInfo, ApiError> {
    persistence
        .assign_service(counter_id, service_id, today)
        .map(AssignmentInfo::from)
        .map_err(translate_persistence_error)
}

/// Withdraws today's assignment of a service from a counter.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the counter does not serve the service today.
pub fn unassign_service(
    persistence: &mut Persistence,
    counter_id: i64,
    service_id: i64,
    today: Date,
) -> Result<DeleteResponse, ApiError> {
    persistence
        .unassign_service(counter_id, service_id, today)
        .map_err(translate_persistence_error)?;

    Ok(DeleteResponse {
        deleted: 1,
        message: format!("Counter {counter_id} no longer serves service {service_id} today"),
    })
}

/// Lists the services a counter serves today.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the counter does not exist.
pub fn list_counter_services(
    persistence: &mut Persistence,
    counter_id: i64,
    today: Date,
) -> Result<CounterServicesResponse, ApiError> {
    let services: Vec<Service> = persistence
        .services_for_day(counter_id, today)
        .map_err(translate_persistence_error)?;

    Ok(CounterServicesResponse {
        counter_id,
        date: format_day(today),
        services: services.into_iter().map(ServiceInfo::from).collect(),
    })
}

// ========================================================================
// Queues
// ========================================================================

/// Opens an empty queue for a service.
///
/// The queue is opened for `request.date` when given, otherwise for `today`.
///
/// # Errors
///
/// Returns an error if:
/// - The date is malformed
/// - The service does not exist
/// - A queue is already open for the service on that day
pub fn open_queue(
    persistence: &mut Persistence,
    request: &OpenQueueRequest,
    today: Date,
) -> Result<QueueInfo, ApiError> {
    let date: Date = match &request.date {
        Some(value) => parse_request_day(value)?,
        None => today,
    };

    persistence
        .open_queue(request.service_id, date)
        .map(QueueInfo::from)
        .map_err(translate_persistence_error)
}

/// Retrieves the queue for a service on a day.
///
/// # Errors
///
/// Returns an error if the date is malformed or no such queue exists.
pub fn get_queue(
    persistence: &mut Persistence,
    service_id: i64,
    date: &str,
) -> Result<QueueInfo, ApiError> {
    let date: Date = parse_request_day(date)?;

    persistence
        .get_queue(service_id, date)
        .map(QueueInfo::from)
        .map_err(translate_persistence_error)
}

/// Lists every queue.
///
/// # Errors
///
/// Returns an error if the store cannot be queried.
pub fn list_queues(persistence: &mut Persistence) -> Result<ListQueuesResponse, ApiError> {
    let queues: Vec<Queue> = persistence
        .list_queues()
        .map_err(translate_persistence_error)?;

    Ok(ListQueuesResponse {
        queues: queues.into_iter().map(QueueInfo::from).collect(),
    })
}

/// Deletes the queue for a service on a day.
///
/// # Errors
///
/// Returns an error if the date is malformed or no such queue exists.
pub fn delete_queue(
    persistence: &mut Persistence,
    service_id: i64,
    date: &str,
) -> Result<DeleteResponse, ApiError> {
    let day: Date = parse_request_day(date)?;

    persistence
        .delete_queue(service_id, day)
        .map_err(translate_persistence_error)?;

    Ok(DeleteResponse {
        deleted: 1,
        message: format!("Deleted queue for service {service_id} on {date}"),
    })
}

/// Deletes every queue.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_all_queues(persistence: &mut Persistence) -> Result<DeleteResponse, ApiError> {
    let deleted: usize = persistence
        .delete_all_queues()
        .map_err(translate_persistence_error)?;

    Ok(DeleteResponse {
        deleted,
        message: format!("Deleted {deleted} queues"),
    })
}

/// Calls the next customer for a counter.
///
/// An idle counter is not an error: the response carries no ticket.
///
/// # Errors
///
/// Returns an error if:
/// - The counter does not exist
/// - The queue ledger and the ticket store disagree
/// - The store fails; the call then has no effect
pub fn call_next(
    persistence: &mut Persistence,
    counter_id: i64,
    today: Date,
) -> Result<CallNextResponse, ApiError> {
    let ticket: Option<Ticket> = persistence
        .call_next(counter_id, today)
        .map_err(translate_persistence_error)?;

    match &ticket {
        Some(called) => info!(counter_id, ticket_id = called.ticket_id, "Counter called ticket"),
        None => debug!(counter_id, "Counter is idle"),
    }

    Ok(CallNextResponse {
        counter_id,
        ticket: ticket.map(TicketInfo::from),
    })
}

/// Starts a new day for every queue.
///
/// # Errors
///
/// Returns an error if the reset fails; no queue changes in that case.
pub fn reset_queues(
    persistence: &mut Persistence,
    today: Date,
) -> Result<ResetQueuesResponse, ApiError> {
    let queues_reset: usize = persistence
        .reset_all_queues(today)
        .map_err(translate_persistence_error)?;

    Ok(ResetQueuesResponse {
        date: format_day(today),
        queues_reset,
    })
}

// ========================================================================
// Tickets
// ========================================================================

/// Issues a ticket for a service today.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the service does not exist or no queue is
/// open for it today.
pub fn issue_ticket(
    persistence: &mut Persistence,
    request: &IssueTicketRequest,
    today: Date,
) -> Result<TicketInfo, ApiError> {
    persistence
        .issue_ticket(request.service_id, today)
        .map(TicketInfo::from)
        .map_err(translate_persistence_error)
}

/// Retrieves a ticket by id.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the ticket does not exist.
pub fn get_ticket(persistence: &mut Persistence, ticket_id: i64) -> Result<TicketInfo, ApiError> {
    persistence
        .get_ticket(ticket_id)
        .map(TicketInfo::from)
        .map_err(translate_persistence_error)
}

/// Lists every ticket.
///
/// # Errors
///
/// Returns an error if the store cannot be queried.
pub fn list_tickets(persistence: &mut Persistence) -> Result<ListTicketsResponse, ApiError> {
    let tickets: Vec<Ticket> = persistence
        .list_tickets()
        .map_err(translate_persistence_error)?;

    Ok(ListTicketsResponse {
        tickets: tickets.into_iter().map(TicketInfo::from).collect(),
    })
}

/// Deletes a ticket.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the ticket does not exist.
pub fn delete_ticket(
    persistence: &mut Persistence,
    ticket_id: i64,
) -> Result<DeleteResponse, ApiError> {
    persistence
        .delete_ticket(ticket_id)
        .map_err(translate_persistence_error)?;

    Ok(DeleteResponse {
        deleted: 1,
        message: format!("Deleted ticket {ticket_id}"),
    })
}

/// Deletes every ticket.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_all_tickets(persistence: &mut Persistence) -> Result<DeleteResponse, ApiError> {
    let deleted: usize = persistence
        .delete_all_tickets()
        .map_err(translate_persistence_error)?;

    Ok(DeleteResponse {
        deleted,
        message: format!("Deleted {deleted} tickets"),
    })
}
