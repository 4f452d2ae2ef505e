// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Several connections to one database file, driven from separate threads.

use std::collections::HashSet;
use std::path::PathBuf;
use std::thread;

use office_queue_domain::Ticket;

use super::today;
use crate::Persistence;

struct TempDatabase {
    path: PathBuf,
}

impl TempDatabase {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "office_queue_{name}_{}.db",
            std::process::id()
        ));
        let database = Self { path };
        database.remove_files();
        database
    }

    fn open(&self) -> Persistence {
        Persistence::new_with_file(&self.path).unwrap()
    }

    fn remove_files(&self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", self.path.display()));
        }
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        self.remove_files();
    }
}

#[test]
fn test_concurrent_call_next_never_double_claims() {
    let database = TempDatabase::new("double_claim");
    let mut setup = database.open();
    let service = setup.create_service("Shipping", 5).unwrap();
    setup.open_queue(service.service_id, today()).unwrap();
    let mut counter_ids: Vec<i64> = Vec::new();
    for name in ["Counter 1", "Counter 2"] {
        let counter = setup.create_counter(name).unwrap();
        setup
            .assign_service(counter.counter_id, service.service_id, today())
            .unwrap();
        counter_ids.push(counter.counter_id);
    }
    for _ in 0..10 {
        setup.issue_ticket(service.service_id, today()).unwrap();
    }

    let connections: Vec<(i64, Persistence)> = counter_ids
        .iter()
        .map(|counter_id| (*counter_id, database.open()))
        .collect();

    let handles: Vec<_> = connections
        .into_iter()
        .map(|(counter_id, mut persistence)| {
            thread::spawn(move || {
                let mut called: Vec<Ticket> = Vec::new();
                while let Some(ticket) = persistence.call_next(counter_id, today()).unwrap() {
                    called.push(ticket);
                }
                called
            })
        })
        .collect();

    let called: Vec<Ticket> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();

    let unique: HashSet<i64> = called.iter().map(|t| t.ticket_id).collect();
    assert_eq!(called.len(), 10);
    assert_eq!(unique.len(), 10);
    assert_eq!(setup.get_queue(service.service_id, today()).unwrap().length, 0);
    assert!(
        setup
            .list_waiting_tickets(service.service_id, today())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_concurrent_issue_assigns_distinct_positions() {
    let database = TempDatabase::new("issue_positions");
    let mut setup = database.open();
    let service = setup.create_service("Shipping", 5).unwrap();
    setup.open_queue(service.service_id, today()).unwrap();

    let connections: Vec<Persistence> = (0..3).map(|_| database.open()).collect();
    let service_id: i64 = service.service_id;

    let handles: Vec<_> = connections
        .into_iter()
        .map(|mut persistence| {
            thread::spawn(move || {
                (0..5)
                    .map(|_| persistence.issue_ticket(service_id, today()).unwrap())
                    .collect::<Vec<Ticket>>()
            })
        })
        .collect();

    let issued: Vec<Ticket> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();

    let mut positions: Vec<u32> = issued.iter().map(|t| t.queue_position).collect();
    positions.sort_unstable();
    assert_eq!(positions, (0..15).collect::<Vec<u32>>());
    assert_eq!(setup.get_queue(service_id, today()).unwrap().length, 15);
}
