// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tour_planner_domain::{
    ChangeTrackingCollection, Identifiable, LogEntry, LogEntryFields, Route, Step, Tour, TourId,
};

use crate::{
    ApiClientConfig, Config, DataManager, DataProviderFactory, DatabaseClient,
    DatabaseClientFactory, DbClientConfig, DirectionsProvider, JsonConverter, MapImageProvider,
    ProviderError, ReportError, ReportGenerator, StoreError,
};

/// The partitions of one `batch_synchronize` call, by identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta {
    pub new: Vec<TourId>,
    pub removed: Vec<TourId>,
    pub changed: Vec<TourId>,
}

#[derive(Debug, Default)]
pub struct StoreLog {
    pub stored: Vec<Tour>,
    pub open_calls: usize,
    pub query_calls: usize,
    pub deltas: Vec<Delta>,
    pub fail_open: bool,
    pub fail_query: bool,
    pub fail_sync: bool,
    pub panic_on_sync: bool,
}

#[derive(Debug, Default)]
pub struct ProviderLog {
    pub route_calls: usize,
    pub image_calls: usize,
    pub clean_calls: Vec<usize>,
    pub reset_calls: usize,
    pub fail_create: bool,
    pub fail_route: bool,
    pub no_route: bool,
    pub fail_image: bool,
    pub fail_clean: bool,
}

pub struct FakeDatabase {
    log: Rc<RefCell<StoreLog>>,
}

impl DatabaseClient for FakeDatabase {
    fn query_tours(&mut self) -> Result<Vec<Tour>, StoreError> {
        let mut log = self.log.borrow_mut();
        log.query_calls += 1;
        if log.fail_query {
            return Err(StoreError::Query(String::from("query refused")));
        }
        Ok(log.stored.clone())
    }

    fn batch_synchronize(
        &mut self,
        tours: &ChangeTrackingCollection<Tour>,
    ) -> Result<(), StoreError> {
        let mut log = self.log.borrow_mut();
        if log.panic_on_sync {
            drop(log);
            panic!("store crashed");
        }

        log.deltas.push(Delta {
            new: tours.new_items().map(Identifiable::id).collect(),
            removed: tours.removed_items().map(Identifiable::id).collect(),
            changed: tours.changed_items().map(Identifiable::id).collect(),
        });
        if log.fail_sync {
            return Err(StoreError::Write(String::from("disk full")));
        }

        let removed: Vec<TourId> = tours.removed_items().map(Identifiable::id).collect();
        log.stored.retain(|tour| !removed.contains(&tour.id()));
        for tour in tours.changed_items() {
            if let Some(slot) = log.stored.iter_mut().find(|stored| stored.id() == tour.id()) {
                *slot = tour.clone();
            }
        }
        log.stored.extend(tours.new_items().cloned());
        Ok(())
    }
}

pub struct FakeDatabaseFactory {
    log: Rc<RefCell<StoreLog>>,
}

impl DatabaseClientFactory for FakeDatabaseFactory {
    fn create_database_client(
        &mut self,
        _config: &DbClientConfig,
    ) -> Result<Box<dyn DatabaseClient>, StoreError> {
        let mut log = self.log.borrow_mut();
        log.open_calls += 1;
        if log.fail_open {
            return Err(StoreError::Connection(String::from("no such database")));
        }
        Ok(Box::new(FakeDatabase {
            log: Rc::clone(&self.log),
        }))
    }
}

pub struct FakeDirections {
    log: Rc<RefCell<ProviderLog>>,
}

impl DirectionsProvider for FakeDirections {
    fn get_route(&mut self, from: &str, to: &str) -> Result<Option<Route>, ProviderError> {
        let mut log = self.log.borrow_mut();
        log.route_calls += 1;
        if log.fail_route {
            return Err(ProviderError::Request(String::from("timeout")));
        }
        if log.no_route {
            return Ok(None);
        }

        let mut route: Route = Route::new(&format!("{from}-{to}"), from, to);
        route.steps.push(Step::new(4.2, &format!("Drive from {from} to {to}")));
        Ok(Some(route))
    }

    fn clean_cache(&mut self, tours: &[&Tour]) -> Result<(), ProviderError> {
        let mut log = self.log.borrow_mut();
        log.clean_calls.push(tours.len());
        if log.fail_clean {
            return Err(ProviderError::Request(String::from("cache locked")));
        }
        Ok(())
    }
}

pub struct FakeMapImages {
    log: Rc<RefCell<ProviderLog>>,
}

impl MapImageProvider for FakeMapImages {
    fn get_image(&mut self, route: &Route) -> Result<PathBuf, ProviderError> {
        let mut log = self.log.borrow_mut();
        log.image_calls += 1;
        if log.fail_image {
            return Err(ProviderError::Request(String::from("quota exceeded")));
        }
        Ok(PathBuf::from(format!("cache/{}.png", route.route_id)))
    }

    fn clean_cache(&mut self, tours: &[&Tour]) -> Result<(), ProviderError> {
        self.log.borrow_mut().clean_calls.push(tours.len());
        Ok(())
    }
}

pub struct FakeProviderFactory {
    log: Rc<RefCell<ProviderLog>>,
}

impl DataProviderFactory for FakeProviderFactory {
    fn create_directions_provider(
        &mut self,
        _config: &ApiClientConfig,
    ) -> Result<Box<dyn DirectionsProvider>, ProviderError> {
        if self.log.borrow().fail_create {
            return Err(ProviderError::Configuration(String::from("missing key")));
        }
        Ok(Box::new(FakeDirections {
            log: Rc::clone(&self.log),
        }))
    }

    fn create_map_image_provider(
        &mut self,
        _config: &ApiClientConfig,
    ) -> Result<Box<dyn MapImageProvider>, ProviderError> {
        if self.log.borrow().fail_create {
            return Err(ProviderError::Configuration(String::from("missing key")));
        }
        Ok(Box::new(FakeMapImages {
            log: Rc::clone(&self.log),
        }))
    }

    fn reset_connection(&mut self) {
        self.log.borrow_mut().reset_calls += 1;
    }
}

pub struct FakeReportGenerator {
    calls: Rc<RefCell<Vec<String>>>,
}

impl ReportGenerator for FakeReportGenerator {
    fn generate_tour_report(&self, tour: &Tour, path: &Path) -> Result<(), ReportError> {
        self.calls
            .borrow_mut()
            .push(format!("tour:{}:{}", tour.name(), path.display()));
        Ok(())
    }

    fn generate_summary_report(&self, tours: &[&Tour], path: &Path) -> Result<(), ReportError> {
        self.calls
            .borrow_mut()
            .push(format!("summary:{}:{}", tours.len(), path.display()));
        Ok(())
    }
}

/// Shared views into the fakes injected into a manager.
#[derive(Default)]
pub struct Fakes {
    pub store: Rc<RefCell<StoreLog>>,
    pub providers: Rc<RefCell<ProviderLog>>,
    pub reports: Rc<RefCell<Vec<String>>>,
}

pub fn create_test_config() -> Config {
    Config {
        directions_api: ApiClientConfig::new("https://directions.example"),
        map_image_api: ApiClientConfig::new("https://maps.example"),
        database: DbClientConfig::new(":memory:"),
    }
}

pub fn create_stored_tour(name: &str) -> Tour {
    let mut route: Route = Route::new(&format!("route-{name}"), "Graz", "Maribor");
    route.steps.push(Step::new(64.0, "Follow A9 south"));
    let entry: LogEntry = LogEntry::new(LogEntryFields::on(time::macros::datetime!(
        2026-03-14 09:30 UTC
    )))
    .unwrap();
    Tour::from_parts(TourId::new(), name, "", None, route, vec![entry]).unwrap()
}

impl Fakes {
    pub fn provider_factory(&self) -> Box<dyn DataProviderFactory> {
        Box::new(FakeProviderFactory {
            log: Rc::clone(&self.providers),
        })
    }

    pub fn database_factory(&self) -> Box<dyn DatabaseClientFactory> {
        Box::new(FakeDatabaseFactory {
            log: Rc::clone(&self.store),
        })
    }

    pub fn report_generator(&self) -> Box<dyn ReportGenerator> {
        Box::new(FakeReportGenerator {
            calls: Rc::clone(&self.reports),
        })
    }
}

/// Creates an uninitialized manager wired to fresh fakes.
pub fn create_test_manager() -> (DataManager, Fakes) {
    let fakes: Fakes = Fakes::default();
    let manager: DataManager = DataManager::new(
        fakes.provider_factory(),
        fakes.database_factory(),
        fakes.report_generator(),
        Box::new(JsonConverter::new()),
    );
    (manager, fakes)
}

/// Creates a `Ready` manager whose store initially holds `stored`.
pub fn create_ready_manager(stored: Vec<Tour>) -> (DataManager, Fakes) {
    let (mut manager, fakes) = create_test_manager();
    fakes.store.borrow_mut().stored = stored;
    manager.initialize(create_test_config()).unwrap();
    (manager, fakes)
}
