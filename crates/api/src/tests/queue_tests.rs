// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use office_queue_persistence::Persistence;

use crate::tests::helpers::{
    create_service_request, create_test_persistence, setup_open_service, today,
};
use crate::{
    ApiError, IssueTicketRequest, OpenQueueRequest, QueueInfo, ServiceInfo, create_service,
    delete_all_queues, delete_queue, get_queue, issue_ticket, list_queues, open_queue,
    reset_queues,
};

#[test]
fn test_open_queue_defaults_to_today() {
    let mut persistence: Persistence = create_test_persistence();
    let service: ServiceInfo =
        create_service(&mut persistence, &create_service_request("Passports", 10)).unwrap();
    let request: OpenQueueRequest = OpenQueueRequest {
        service_id: service.service_id,
        date: None,
    };

    let queue: QueueInfo = open_queue(&mut persistence, &request, today()).unwrap();

    assert_eq!(queue.date, "2026-03-02");
    assert_eq!(queue.length, 0);
}

#[test]
fn test_open_queue_with_explicit_date() {
    let mut persistence: Persistence = create_test_persistence();
    let service: ServiceInfo =
        create_service(&mut persistence, &create_service_request("Passports", 10)).unwrap();
    let request: OpenQueueRequest = OpenQueueRequest {
        service_id: service.service_id,
        date: Some(String::from("2026-03-05")),
    };

    let queue: QueueInfo = open_queue(&mut persistence, &request, today()).unwrap();

    assert_eq!(queue.date, "2026-03-05");
    assert_eq!(
        get_queue(&mut persistence, service.service_id, "2026-03-05").unwrap(),
        queue
    );
}

#[test]
fn test_open_queue_rejects_malformed_date() {
    let mut persistence: Persistence = create_test_persistence();
    let service: ServiceInfo =
        create_service(&mut persistence, &create_service_request("Passports", 10)).unwrap();
    let request: OpenQueueRequest = OpenQueueRequest {
        service_id: service.service_id,
        date: Some(String::from("03/05/2026")),
    };

    assert!(matches!(
        open_queue(&mut persistence, &request, today()),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date"
    ));
}

#[test]
fn test_open_queue_twice_is_conflict() {
    let mut persistence: Persistence = create_test_persistence();
    let service_id: i64 = setup_open_service(&mut persistence, "Passports", 10);
    let request: OpenQueueRequest = OpenQueueRequest {
        service_id,
        date: None,
    };

    assert!(matches!(
        open_queue(&mut persistence, &request, today()),
        Err(ApiError::Conflict { ref resource_type, .. }) if resource_type == "Queue"
    ));
}

#[test]
fn test_open_queue_for_unknown_service_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let request: OpenQueueRequest = OpenQueueRequest {
        service_id: 7,
        date: None,
    };

    assert!(matches!(
        open_queue(&mut persistence, &request, today()),
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Service"
    ));
}

#[test]
fn test_reset_queues_moves_every_queue_to_today() {
    let mut persistence: Persistence = create_test_persistence();
    let service: ServiceInfo =
        create_service(&mut persistence, &create_service_request("Passports", 10)).unwrap();
    let request: OpenQueueRequest = OpenQueueRequest {
        service_id: service.service_id,
        date: Some(String::from("2026-03-01")),
    };
    open_queue(&mut persistence, &request, today()).unwrap();

    let response = reset_queues(&mut persistence, today()).unwrap();

    assert_eq!(response.date, "2026-03-02");
    assert_eq!(response.queues_reset, 1);
    let queues: Vec<QueueInfo> = list_queues(&mut persistence).unwrap().queues;
    assert_eq!(queues.len(), 1);
    assert_eq!(queues[0].date, "2026-03-02");
    assert_eq!(queues[0].length, 0);
}

#[test]
fn test_reset_queues_with_no_queues() {
    let mut persistence: Persistence = create_test_persistence();

    let response = reset_queues(&mut persistence, today()).unwrap();

    assert_eq!(response.queues_reset, 0);
}

#[test]
fn test_delete_queue_and_delete_all() {
    let mut persistence: Persistence = create_test_persistence();
    let passports: i64 = setup_open_service(&mut persistence, "Passports", 10);
    setup_open_service(&mut persistence, "Licences", 5);

    delete_queue(&mut persistence, passports, "2026-03-02").unwrap();
    assert!(matches!(
        get_queue(&mut persistence, passports, "2026-03-02"),
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Queue"
    ));

    let response = delete_all_queues(&mut persistence).unwrap();
    assert_eq!(response.deleted, 1);
    assert!(list_queues(&mut persistence).unwrap().queues.is_empty());
}

#[test]
fn test_issued_tickets_grow_queue_length() {
    let mut persistence: Persistence = create_test_persistence();
    let service_id: i64 = setup_open_service(&mut persistence, "Passports", 10);
    let request: IssueTicketRequest = IssueTicketRequest { service_id };

    issue_ticket(&mut persistence, &request, today()).unwrap();
    issue_ticket(&mut persistence, &request, today()).unwrap();

    let queue: QueueInfo = get_queue(&mut persistence, service_id, "2026-03-02").unwrap();
    assert_eq!(queue.length, 2);
}
