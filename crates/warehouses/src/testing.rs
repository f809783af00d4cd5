//! Hand-written fakes for unit tests.
//!
//! `FakeBackend` stands in for the store, the archive side channel and the
//! transaction boundary at once. Its transaction boundary runs the work
//! directly (no rollback), so tests observe every write a use case issues.
//! `find_by_business_unit_code` returns whatever record it holds for the
//! code, archived or not, so tests can hand a use case an archived
//! predecessor.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use fulfilment_core::{BusinessUnitCode, DomainError, DomainResult, ErrorRule, LocationId};

use crate::model::{Location, Warehouse};
use crate::ports::{ArchiveWarehouseOperation, LocationResolver, TransactionBoundary, WarehouseStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Transaction,
    Create(String),
    Archive(String),
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    records: Mutex<Vec<Warehouse>>,
    calls: Mutex<Vec<Call>>,
    fail_create: Mutex<bool>,
}

impl FakeBackend {
    pub fn with(records: Vec<Warehouse>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn fail_creates(&self) {
        *self.fail_create.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than transaction markers.
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| *c != Call::Transaction)
            .collect()
    }

    pub fn records(&self) -> Vec<Warehouse> {
        self.records.lock().unwrap().clone()
    }
}

impl WarehouseStore for FakeBackend {
    fn get_all(&self) -> DomainResult<Vec<Warehouse>> {
        Ok(self.records())
    }

    fn create(&self, warehouse: Warehouse) -> DomainResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Create(warehouse.business_unit_code.to_string()));
        if *self.fail_create.lock().unwrap() {
            return Err(DomainError::storage("create failed"));
        }
        self.records.lock().unwrap().push(warehouse);
        Ok(())
    }

    fn update(&self, warehouse: &Warehouse) -> DomainResult<()> {
        let mut records = self.records.lock().unwrap();
        let existing = records
            .iter_mut()
            .find(|w| w.business_unit_code == warehouse.business_unit_code)
            .ok_or_else(|| not_located(&warehouse.business_unit_code))?;
        *existing = warehouse.clone();
        Ok(())
    }

    fn remove(&self, warehouse: &Warehouse) -> DomainResult<()> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|w| w.business_unit_code != warehouse.business_unit_code);
        if records.len() == before {
            return Err(not_located(&warehouse.business_unit_code));
        }
        Ok(())
    }

    fn find_by_business_unit_code(&self, code: &BusinessUnitCode) -> DomainResult<Warehouse> {
        self.records()
            .into_iter()
            .find(|w| &w.business_unit_code == code)
            .ok_or_else(|| not_located(code))
    }
}

impl ArchiveWarehouseOperation for FakeBackend {
    fn archive(&self, warehouse: &Warehouse) -> DomainResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Archive(warehouse.business_unit_code.to_string()));
        let mut records = self.records.lock().unwrap();
        if let Some(existing) = records
            .iter_mut()
            .find(|w| w.business_unit_code == warehouse.business_unit_code && w.is_active())
        {
            existing.archived_at = Some(Utc::now());
        }
        Ok(())
    }
}

impl TransactionBoundary for FakeBackend {
    fn in_transaction<T, F>(&self, work: F) -> DomainResult<T>
    where
        F: FnOnce() -> DomainResult<T>,
    {
        self.calls.lock().unwrap().push(Call::Transaction);
        work()
    }
}

#[derive(Debug, Default)]
pub struct FakeResolver {
    locations: HashMap<LocationId, Location>,
}

impl FakeResolver {
    pub fn with(locations: Vec<Location>) -> Self {
        Self {
            locations: locations
                .into_iter()
                .map(|l| (l.identification.clone(), l))
                .collect(),
        }
    }
}

impl LocationResolver for FakeResolver {
    fn resolve_by_identifier(&self, identifier: &LocationId) -> DomainResult<Location> {
        self.locations.get(identifier).cloned().ok_or_else(|| {
            DomainError::not_found(ErrorRule::LocationNotFound, identifier.to_string())
        })
    }
}

fn not_located(code: &BusinessUnitCode) -> DomainError {
    DomainError::not_found(ErrorRule::WarehouseNotLocated, code.to_string())
}

pub fn code(value: &str) -> BusinessUnitCode {
    BusinessUnitCode::parse(value).unwrap()
}

pub fn location_id(value: &str) -> LocationId {
    LocationId::parse(value).unwrap()
}

pub fn warehouse(code_value: &str, location: &str, capacity: u32, stock: u32) -> Warehouse {
    Warehouse::new(code(code_value), location_id(location), capacity, stock)
}

pub fn location(id: &str, max_number_of_warehouses: u32, max_capacity: u32) -> Location {
    Location::new(location_id(id), max_number_of_warehouses, max_capacity)
}
