//! Service-construction wiring for the warehouse lifecycle.

use std::sync::Arc;

use fulfilment_core::DomainResult;
use fulfilment_warehouses::{
    CreateWarehouseOperation, CreateWarehouseUseCase, ReplaceWarehouseOperation,
    ReplaceWarehouseUseCase, Warehouse,
};

use crate::config::InfraConfig;
use crate::location_gateway::InMemoryLocationGateway;
use crate::warehouse_store::InMemoryWarehouseStore;

pub type InMemoryCreateWarehouse = CreateWarehouseUseCase<InMemoryWarehouseStore, InMemoryWarehouseStore>;
pub type InMemoryReplaceWarehouse =
    ReplaceWarehouseUseCase<InMemoryWarehouseStore, InMemoryWarehouseStore, InMemoryWarehouseStore>;

/// Both lifecycle operations wired against one in-memory store.
///
/// The store doubles as archive side channel and transaction boundary, so
/// create and replace serialize against each other.
#[derive(Debug)]
pub struct WarehouseLifecycle {
    store: Arc<InMemoryWarehouseStore>,
    locations: Arc<InMemoryLocationGateway>,
    create: InMemoryCreateWarehouse,
    replace: InMemoryReplaceWarehouse,
}

impl WarehouseLifecycle {
    pub fn new(store: Arc<InMemoryWarehouseStore>, locations: Arc<InMemoryLocationGateway>) -> Self {
        let create =
            CreateWarehouseUseCase::with_default_rules(store.clone(), locations.clone(), store.clone());
        let replace = ReplaceWarehouseUseCase::with_default_rules(
            store.clone(),
            store.clone(),
            locations.clone(),
            store.clone(),
        );
        Self {
            store,
            locations,
            create,
            replace,
        }
    }

    /// Empty store plus the catalogue selected by `config`.
    pub fn from_config(config: &InfraConfig) -> anyhow::Result<Self> {
        let locations = config.location_gateway()?;
        Ok(Self::new(
            Arc::new(InMemoryWarehouseStore::new()),
            Arc::new(locations),
        ))
    }

    pub fn store(&self) -> &Arc<InMemoryWarehouseStore> {
        &self.store
    }

    pub fn locations(&self) -> &Arc<InMemoryLocationGateway> {
        &self.locations
    }
}

impl CreateWarehouseOperation for WarehouseLifecycle {
    fn create(&self, candidate: Warehouse) -> DomainResult<()> {
        self.create.create(candidate)
    }
}

impl ReplaceWarehouseOperation for WarehouseLifecycle {
    fn replace(&self, successor: Warehouse) -> DomainResult<()> {
        self.replace.replace(successor)
    }
}
