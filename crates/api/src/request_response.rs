// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Days cross the API as `YYYY-MM-DD` strings.

use office_queue_domain::{Counter, CounterAssignment, Queue, Service, Ticket, format_day};
use serde::{Deserialize, Serialize};

/// API request to create a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    /// The unique service name.
    pub name: String,
    /// Expected handling duration in minutes.
    pub service_time: u32,
}

/// API request to rename a service and change its duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    /// The new unique service name.
    pub new_name: String,
    /// The new handling duration in minutes.
    pub service_time: u32,
}

/// API request to create or rename a counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterNameRequest {
    /// The unique counter name.
    pub name: String,
}

/// API request to open a queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenQueueRequest {
    /// The service to open a queue for.
    pub service_id: i64,
    /// The day to open it for (`YYYY-MM-DD`). Defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// API request to issue a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTicketRequest {
    /// The requested service.
    pub service_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service_id: i64,
    pub name: String,
    pub service_time: u32,
}

impl From<Service> for ServiceInfo {
    fn from(service: Service) -> Self {
        Self {
            service_id: service.service_id,
            name: service.name,
            service_time: service.service_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterInfo {
    pub counter_id: i64,
    pub name: String,
}

impl From<Counter> for CounterInfo {
    fn from(counter: Counter) -> Self {
        Self {
            counter_id: counter.counter_id,
            name: counter.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueInfo {
    pub service_id: i64,
    pub date: String,
    pub length: u32,
}

impl From<Queue> for QueueInfo {
    fn from(queue: Queue) -> Self {
        Self {
            service_id: queue.service_id,
            date: format_day(queue.date),
            length: queue.length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketInfo {
    pub ticket_id: i64,
    pub service_id: i64,
    /// The counter that called the ticket; absent while waiting.
    pub counter_id: Option<i64>,
    pub queue_position: u32,
    pub issue_date: String,
    /// When the ticket was called; absent while waiting.
    pub called_at: Option<String>,
    pub served: bool,
}

impl From<Ticket> for TicketInfo {
    fn from(ticket: Ticket) -> Self {
        Self {
            ticket_id: ticket.ticket_id,
            service_id: ticket.service_id,
            counter_id: ticket.counter_id,
            queue_position: ticket.queue_position,
            issue_date: format_day(ticket.issue_date),
            called_at: ticket.called_at,
            served: ticket.served,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInfo {
    pub counter_id: i64,
    pub service_id: i64,
    pub date: String,
}

impl From<CounterAssignment> for AssignmentInfo {
    fn from(assignment: CounterAssignment) -> Self {
        Self {
            counter_id: assignment.counter_id,
            service_id: assignment.service_id,
            date: format_day(assignment.date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListServicesResponse {
    pub services: Vec<ServiceInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCountersResponse {
    pub counters: Vec<CounterInfo>,
}

/// The services a counter serves on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterServicesResponse {
    pub counter_id: i64,
    pub date: String,
    pub services: Vec<ServiceInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQueuesResponse {
    pub queues: Vec<QueueInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTicketsResponse {
    pub tickets: Vec<TicketInfo>,
}

/// API response for a call-next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallNextResponse {
    /// The requesting counter.
    pub counter_id: i64,
    /// The called ticket, or `None` when nobody is waiting.
    pub ticket: Option<TicketInfo>,
}

/// API response for the start-of-day queue reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetQueuesResponse {
    /// The day every queue now belongs to.
    pub date: String,
    /// The number of queues open after the reset.
    pub queues_reset: usize,
}

/// API response for a waiting-time estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitingTimeResponse {
    pub service_id: i64,
    pub date: String,
    pub queue_length: u32,
    /// Estimated wait in minutes.
    pub waiting_time: f64,
}

/// API response for a delete operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Number of rows removed.
    pub deleted: usize,
    /// A success message.
    pub message: String,
}
