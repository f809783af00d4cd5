//! Warehouse lifecycle domain module.
//!
//! Business rules for creating and replacing warehouses, implemented as
//! deterministic domain logic over collaborator ports (no IO, no HTTP, no
//! storage).

pub mod model;
pub mod ports;
pub mod usecases;
pub mod validator;

#[cfg(test)]
mod testing;

pub use model::{Location, Warehouse, WarehouseRequest};
pub use ports::{ArchiveWarehouseOperation, LocationResolver, TransactionBoundary, WarehouseStore};
pub use usecases::{
    ensure_replaceable, CreateWarehouseOperation, CreateWarehouseUseCase, ReplaceWarehouseOperation,
    ReplaceWarehouseUseCase,
};
pub use validator::{
    BuCodeExistenceValidator, LocationCapacityValidator, LocationExistsValidator,
    LocationWarehouseCountValidator, ValidatorChain, WarehouseValidator,
};
