//! Collaborator contracts the lifecycle engine depends on.
//!
//! Adapters live in the infrastructure crate; this module only fixes the
//! shapes. Every port is forwarded through `Arc<T>` so use cases can share a
//! single adapter instance.

use std::sync::Arc;

use fulfilment_core::{BusinessUnitCode, DomainResult, LocationId};

use crate::model::{Location, Warehouse};

/// Read-only access to location reference data.
pub trait LocationResolver: Send + Sync {
    /// Fails with `NotFound` / `LocationNotFound` for unknown identifiers.
    fn resolve_by_identifier(&self, identifier: &LocationId) -> DomainResult<Location>;
}

/// Persistence port for warehouse records.
pub trait WarehouseStore: Send + Sync {
    /// All records, archived ones included.
    fn get_all(&self) -> DomainResult<Vec<Warehouse>>;

    fn create(&self, warehouse: Warehouse) -> DomainResult<()>;

    /// Overwrite location, capacity and stock of the active record with the
    /// same business-unit code.
    fn update(&self, warehouse: &Warehouse) -> DomainResult<()>;

    fn remove(&self, warehouse: &Warehouse) -> DomainResult<()>;

    /// The *active* record with this code; `NotFound` / `WarehouseNotLocated` otherwise.
    fn find_by_business_unit_code(&self, code: &BusinessUnitCode) -> DomainResult<Warehouse>;

    /// Any record with this code, archived or not. Active records win.
    fn lookup_business_unit_code(&self, code: &BusinessUnitCode) -> DomainResult<Option<Warehouse>> {
        let mut matches: Vec<Warehouse> = self
            .get_all()?
            .into_iter()
            .filter(|w| &w.business_unit_code == code)
            .collect();
        matches.sort_by_key(|w| w.is_archived());
        Ok(matches.into_iter().next())
    }

    /// Active warehouses assigned to a location.
    fn active_at_location(&self, location: &LocationId) -> DomainResult<Vec<Warehouse>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|w| w.is_active() && &w.location == location)
            .collect())
    }
}

/// Marks a warehouse as archived. Independent of [`WarehouseStore::update`].
pub trait ArchiveWarehouseOperation: Send + Sync {
    fn archive(&self, warehouse: &Warehouse) -> DomainResult<()>;
}

/// All-or-nothing execution of a unit of work.
///
/// If `work` returns `Err`, nothing it wrote through the bound store may stay
/// visible.
pub trait TransactionBoundary: Send + Sync {
    fn in_transaction<T, F>(&self, work: F) -> DomainResult<T>
    where
        F: FnOnce() -> DomainResult<T>;
}

impl<S> LocationResolver for Arc<S>
where
    S: LocationResolver + ?Sized,
{
    fn resolve_by_identifier(&self, identifier: &LocationId) -> DomainResult<Location> {
        (**self).resolve_by_identifier(identifier)
    }
}

impl<S> WarehouseStore for Arc<S>
where
    S: WarehouseStore + ?Sized,
{
    fn get_all(&self) -> DomainResult<Vec<Warehouse>> {
        (**self).get_all()
    }

    fn create(&self, warehouse: Warehouse) -> DomainResult<()> {
        (**self).create(warehouse)
    }

    fn update(&self, warehouse: &Warehouse) -> DomainResult<()> {
        (**self).update(warehouse)
    }

    fn remove(&self, warehouse: &Warehouse) -> DomainResult<()> {
        (**self).remove(warehouse)
    }

    fn find_by_business_unit_code(&self, code: &BusinessUnitCode) -> DomainResult<Warehouse> {
        (**self).find_by_business_unit_code(code)
    }

    fn lookup_business_unit_code(&self, code: &BusinessUnitCode) -> DomainResult<Option<Warehouse>> {
        (**self).lookup_business_unit_code(code)
    }

    fn active_at_location(&self, location: &LocationId) -> DomainResult<Vec<Warehouse>> {
        (**self).active_at_location(location)
    }
}

impl<S> ArchiveWarehouseOperation for Arc<S>
where
    S: ArchiveWarehouseOperation + ?Sized,
{
    fn archive(&self, warehouse: &Warehouse) -> DomainResult<()> {
        (**self).archive(warehouse)
    }
}

impl<S> TransactionBoundary for Arc<S>
where
    S: TransactionBoundary,
{
    fn in_transaction<T, F>(&self, work: F) -> DomainResult<T>
    where
        F: FnOnce() -> DomainResult<T>,
    {
        (**self).in_transaction(work)
    }
}
