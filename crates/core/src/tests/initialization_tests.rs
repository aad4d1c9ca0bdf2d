// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tour_planner_domain::{Identifiable, Tour, TourId};

use crate::tests::helpers::{
    Fakes, create_ready_manager, create_stored_tour, create_test_config, create_test_manager,
};
use crate::{Config, CoreError, DataManager, JsonConverter, ManagerState};

#[test]
fn test_new_manager_is_uninitialized() {
    let (manager, fakes) = create_test_manager();

    assert_eq!(manager.state(), ManagerState::Uninitialized);
    assert!(manager.config().is_none());
    assert_eq!(manager.tours().count(), 0);
    assert_eq!(fakes.store.borrow().open_calls, 0);
}

#[test]
fn test_operations_before_initialize_fail() {
    let (mut manager, _fakes) = create_test_manager();

    assert!(matches!(
        manager.synchronize_tours(),
        Err(CoreError::NotInitialized)
    ));
    assert!(matches!(
        manager.create_tour("Loop", "", "A", "B"),
        Err(CoreError::NotInitialized)
    ));
}

#[test]
fn test_initialize_loads_tours_as_baseline() {
    let stored: Vec<Tour> = vec![create_stored_tour("One"), create_stored_tour("Two")];
    let (manager, fakes) = create_ready_manager(stored);

    assert_eq!(manager.state(), ManagerState::Ready);
    assert_eq!(manager.tours().count(), 2);
    assert!(!manager.has_pending_changes());
    assert_eq!(manager.config(), Some(&create_test_config()));
    assert_eq!(fakes.store.borrow().query_calls, 1);
}

#[test]
fn test_create_builds_and_initializes() {
    let fakes: Fakes = Fakes::default();
    fakes.store.borrow_mut().stored = vec![create_stored_tour("Stored")];

    let manager: DataManager = DataManager::create(
        create_test_config(),
        fakes.provider_factory(),
        fakes.database_factory(),
        fakes.report_generator(),
        Box::new(JsonConverter::new()),
    )
    .unwrap();

    assert_eq!(manager.state(), ManagerState::Ready);
    assert_eq!(manager.tours().count(), 1);
    assert_eq!(fakes.store.borrow().open_calls, 1);
}

#[test]
fn test_provider_failure_leaves_uninitialized_manager_untouched() {
    let (mut manager, fakes) = create_test_manager();
    fakes.providers.borrow_mut().fail_create = true;

    let result: Result<(), CoreError> = manager.initialize(create_test_config());

    assert!(matches!(result, Err(CoreError::ProviderInitialization(_))));
    assert_eq!(manager.state(), ManagerState::Uninitialized);
    assert!(manager.config().is_none());
    assert_eq!(fakes.store.borrow().open_calls, 0);
}

#[test]
fn test_store_open_failure_is_reported_with_context() {
    let (mut manager, fakes) = create_test_manager();
    fakes.store.borrow_mut().fail_open = true;

    let result: Result<(), CoreError> = manager.initialize(create_test_config());

    assert!(matches!(
        result,
        Err(CoreError::Store {
            operation: "open database",
            ..
        })
    ));
    assert_eq!(manager.state(), ManagerState::Uninitialized);
}

#[test]
fn test_failed_reinitialize_keeps_tours_and_state() {
    let (mut manager, fakes) = create_ready_manager(vec![create_stored_tour("Stored")]);
    let id: TourId = manager.create_tour("Pending", "", "Graz", "Wien").unwrap();
    fakes.store.borrow_mut().fail_query = true;

    let mut changed: Config = create_test_config();
    changed.database.connection_string = String::from("other.db");
    let result: Result<(), CoreError> = manager.reinitialize(Some(changed));

    assert!(matches!(
        result,
        Err(CoreError::Store {
            operation: "query tours",
            ..
        })
    ));
    assert_eq!(manager.state(), ManagerState::Ready);
    assert_eq!(manager.config(), Some(&create_test_config()));
    assert_eq!(manager.tours().count(), 2);
    assert!(manager.tour(id).is_some());
    assert!(manager.has_pending_changes());
}

#[test]
fn test_reinitialize_without_config_reuses_last_one() {
    let (mut manager, fakes) = create_ready_manager(vec![create_stored_tour("Stored")]);
    manager.create_tour("Pending", "", "Graz", "Wien").unwrap();

    manager.reinitialize(None).unwrap();

    assert_eq!(fakes.providers.borrow().reset_calls, 1);
    assert_eq!(fakes.store.borrow().query_calls, 2);
    assert_eq!(manager.tours().count(), 1);
    assert!(!manager.has_pending_changes());
}

#[test]
fn test_reinitialize_without_any_config_fails() {
    let (mut manager, fakes) = create_test_manager();

    let result: Result<(), CoreError> = manager.reinitialize(None);

    assert!(matches!(result, Err(CoreError::NotInitialized)));
    assert_eq!(fakes.providers.borrow().reset_calls, 0);
}

#[test]
fn test_initialize_replaces_working_set() {
    let first: Tour = create_stored_tour("First");
    let first_id: TourId = first.id();
    let (mut manager, fakes) = create_ready_manager(vec![first]);
    fakes.store.borrow_mut().stored = vec![create_stored_tour("Second")];

    manager.initialize(create_test_config()).unwrap();

    assert!(manager.tour(first_id).is_none());
    let names: Vec<&str> = manager.tours().map(Tour::name).collect();
    assert_eq!(names, vec!["Second"]);
}

#[test]
fn test_dispose_is_terminal() {
    let (mut manager, _fakes) = create_ready_manager(vec![create_stored_tour("Stored")]);

    manager.dispose();
    manager.dispose();

    assert_eq!(manager.state(), ManagerState::Disposed);
    assert_eq!(manager.tours().count(), 0);
    assert!(matches!(
        manager.synchronize_tours(),
        Err(CoreError::Disposed)
    ));
    assert!(matches!(
        manager.initialize(create_test_config()),
        Err(CoreError::Disposed)
    ));
    assert!(matches!(
        manager.reinitialize(None),
        Err(CoreError::Disposed)
    ));
}
