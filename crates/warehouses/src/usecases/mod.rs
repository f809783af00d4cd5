//! Application-level operations of the warehouse lifecycle.

mod create;
mod replace;

use fulfilment_core::DomainResult;

use crate::model::{Warehouse, WarehouseRequest};

pub use create::CreateWarehouseUseCase;
pub use replace::{ensure_replaceable, ReplaceWarehouseUseCase};

/// Front-door capability: create a warehouse.
pub trait CreateWarehouseOperation {
    fn create(&self, candidate: Warehouse) -> DomainResult<()>;

    /// Convert a raw request body and create it.
    fn create_request(&self, body: Option<WarehouseRequest>) -> DomainResult<()> {
        self.create(WarehouseRequest::require(body)?)
    }
}

/// Front-door capability: replace the active warehouse sharing the successor's code.
pub trait ReplaceWarehouseOperation {
    fn replace(&self, successor: Warehouse) -> DomainResult<()>;

    fn replace_request(&self, body: Option<WarehouseRequest>) -> DomainResult<()> {
        self.replace(WarehouseRequest::require(body)?)
    }
}
