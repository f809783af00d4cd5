//! Infrastructure layer: storage adapters, reference data, config and wiring.

pub mod config;
pub mod lifecycle;
pub mod location_gateway;
pub mod warehouse_store;


pub use config::InfraConfig;
pub use lifecycle::WarehouseLifecycle;
pub use location_gateway::InMemoryLocationGateway;
pub use warehouse_store::InMemoryWarehouseStore;
