// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other test in this crate opens an in-memory database, so
//! migrations and foreign key enforcement are exercised implicitly. These
//! cover the constructor paths directly.

use super::{create_test_contest, create_test_persistence};
use crate::Persistence;
use crate::error::PersistenceError;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = create_test_persistence();
    let mut db2: Persistence = create_test_persistence();

    create_test_contest(&mut db1, "Only In One");

    assert_eq!(db1.get_contests().unwrap().len(), 1);
    assert!(db2.get_contests().unwrap().is_empty());
}

#[test]
fn test_migrations_applied_on_initialization() {
    let mut persistence: Persistence = create_test_persistence();

    assert!(persistence.get_contests().is_ok());
    assert!(
        persistence
            .get_votes_for_participant(1)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_foreign_key_enforcement_is_active() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_file_database_persists_between_connections() {
    let path = std::env::temp_dir().join(format!(
        "contest_vote_init_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut first: Persistence = Persistence::new_with_file(&path).unwrap();
        create_test_contest(&mut first, "Durable");
    }

    let mut second: Persistence = Persistence::new_with_file(&path).unwrap();
    let contests = second.get_contests().unwrap();
    assert_eq!(contests.len(), 1);
    assert_eq!(contests[0].name, "Durable");

    drop(second);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
