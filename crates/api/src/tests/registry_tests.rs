// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use office_queue_persistence::Persistence;

use crate::tests::helpers::{
    counter_request, create_service_request, create_test_persistence, setup_counter,
    setup_open_service, today, yesterday,
};
use crate::{
    ApiError, CounterInfo, ServiceInfo, UpdateServiceRequest, assign_service, create_counter,
    create_service, delete_counter, delete_service, get_counter, get_service,
    get_service_by_name, list_counter_services, list_counters, list_services, unassign_service,
    update_counter, update_service,
};

#[test]
fn test_create_service_returns_assigned_id() {
    let mut persistence: Persistence = create_test_persistence();

    let service: ServiceInfo =
        create_service(&mut persistence, &create_service_request("Passports", 10)).unwrap();

    assert_eq!(service.name, "Passports");
    assert_eq!(service.service_time, 10);
    assert_eq!(
        get_service(&mut persistence, service.service_id).unwrap(),
        service
    );
}

#[test]
fn test_create_service_rejects_blank_name() {
    let mut persistence: Persistence = create_test_persistence();

    let result = create_service(&mut persistence, &create_service_request("   ", 10));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "name"
    ));
    assert!(list_services(&mut persistence).unwrap().services.is_empty());
}

#[test]
fn test_create_service_rejects_zero_service_time() {
    let mut persistence: Persistence = create_test_persistence();

    let result = create_service(&mut persistence, &create_service_request("Passports", 0));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "service_time"
    ));
}

#[test]
fn test_create_service_duplicate_name_is_conflict() {
    let mut persistence: Persistence = create_test_persistence();
    create_service(&mut persistence, &create_service_request("Passports", 10)).unwrap();

    let result = create_service(&mut persistence, &create_service_request("Passports", 5));

    assert!(matches!(
        result,
        Err(ApiError::Conflict { ref resource_type, .. }) if resource_type == "Service"
    ));
}

#[test]
fn test_get_unknown_service_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    assert!(matches!(
        get_service(&mut persistence, 42),
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Service"
    ));
    assert!(matches!(
        get_service_by_name(&mut persistence, "Nope"),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_update_service_by_name() {
    let mut persistence: Persistence = create_test_persistence();
    create_service(&mut persistence, &create_service_request("Passports", 10)).unwrap();
    let request: UpdateServiceRequest = UpdateServiceRequest {
        new_name: String::from("Travel Documents"),
        service_time: 12,
    };

    let updated: ServiceInfo = update_service(&mut persistence, "Passports", &request).unwrap();

    assert_eq!(updated.name, "Travel Documents");
    assert_eq!(updated.service_time, 12);
    assert!(get_service_by_name(&mut persistence, "Passports").is_err());
}

#[test]
fn test_update_unknown_service_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let request: UpdateServiceRequest = UpdateServiceRequest {
        new_name: String::from("Anything"),
        service_time: 5,
    };

    assert!(matches!(
        update_service(&mut persistence, "Ghost", &request),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_delete_service_reports_one_row() {
    let mut persistence: Persistence = create_test_persistence();
    setup_open_service(&mut persistence, "Passports", 10);

    let response = delete_service(&mut persistence, "Passports").unwrap();

    assert_eq!(response.deleted, 1);
    assert!(list_services(&mut persistence).unwrap().services.is_empty());
    assert!(matches!(
        delete_service(&mut persistence, "Passports"),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_counter_crud() {
    let mut persistence: Persistence = create_test_persistence();

    let counter: CounterInfo =
        create_counter(&mut persistence, &counter_request("Window 1")).unwrap();
    let renamed: CounterInfo = update_counter(
        &mut persistence,
        counter.counter_id,
        &counter_request("Window A"),
    )
    .unwrap();

    assert_eq!(renamed.name, "Window A");
    assert_eq!(list_counters(&mut persistence).unwrap().counters.len(), 1);

    delete_counter(&mut persistence, counter.counter_id).unwrap();
    assert!(matches!(
        get_counter(&mut persistence, counter.counter_id),
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Counter"
    ));
}

#[test]
fn test_create_counter_duplicate_name_is_conflict() {
    let mut persistence: Persistence = create_test_persistence();
    create_counter(&mut persistence, &counter_request("Window 1")).unwrap();

    assert!(matches!(
        create_counter(&mut persistence, &counter_request("Window 1")),
        Err(ApiError::Conflict { ref resource_type, .. }) if resource_type == "Counter"
    ));
}

#[test]
fn test_assignments_are_scoped_to_today() {
    let mut persistence: Persistence = create_test_persistence();
    let passports: i64 = setup_open_service(&mut persistence, "Passports", 10);
    let licences: i64 = setup_open_service(&mut persistence, "Licences", 5);
    let counter_id: i64 = setup_counter(&mut persistence, "Window 1", &[passports, licences]);

    let today_services = list_counter_services(&mut persistence, counter_id, today()).unwrap();
    let yesterday_services =
        list_counter_services(&mut persistence, counter_id, yesterday()).unwrap();

    assert_eq!(today_services.date, "2026-03-02");
    assert_eq!(today_services.services.len(), 2);
    assert!(yesterday_services.services.is_empty());
}

#[test]
fn test_duplicate_assignment_is_conflict() {
    let mut persistence: Persistence = create_test_persistence();
    let passports: i64 = setup_open_service(&mut persistence, "Passports", 10);
    let counter_id: i64 = setup_counter(&mut persistence, "Window 1", &[passports]);

    assert!(matches!(
        assign_service(&mut persistence, counter_id, passports, today()),
        Err(ApiError::Conflict { .. })
    ));
}

#[test]
fn test_unassign_service() {
    let mut persistence: Persistence = create_test_persistence();
    let passports: i64 = setup_open_service(&mut persistence, "Passports", 10);
    let counter_id: i64 = setup_counter(&mut persistence, "Window 1", &[passports]);

    unassign_service(&mut persistence, counter_id, passports, today()).unwrap();

    assert!(
        list_counter_services(&mut persistence, counter_id, today())
            .unwrap()
            .services
            .is_empty()
    );
    assert!(matches!(
        unassign_service(&mut persistence, counter_id, passports, today()),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_assign_unknown_counter_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let passports: i64 = setup_open_service(&mut persistence, "Passports", 10);

    assert!(matches!(
        assign_service(&mut persistence, 99, passports, today()),
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Counter"
    ));
}
