//! Location reference data.

use std::collections::HashMap;

use fulfilment_core::{DomainError, DomainResult, ErrorRule, LocationId};
use fulfilment_warehouses::{Location, LocationResolver};

/// Approved locations shipped with the service: identifier, max warehouses, max capacity.
const BUILTIN_LOCATIONS: &[(&str, u32, u32)] = &[
    ("ZWOLLE-001", 1, 40),
    ("ZWOLLE-002", 2, 50),
    ("AMSTERDAM-001", 5, 100),
    ("AMSTERDAM-002", 3, 75),
    ("TILBURG-001", 1, 40),
    ("HELMOND-001", 1, 45),
    ("EINDHOVEN-001", 2, 70),
    ("VETSBY-001", 1, 90),
];

/// Immutable in-memory location catalogue.
#[derive(Debug, Clone)]
pub struct InMemoryLocationGateway {
    locations: HashMap<LocationId, Location>,
}

impl InMemoryLocationGateway {
    pub fn new(locations: impl IntoIterator<Item = Location>) -> Self {
        Self {
            locations: locations
                .into_iter()
                .map(|l| (l.identification.clone(), l))
                .collect(),
        }
    }

    /// The built-in catalogue of approved locations.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_LOCATIONS.iter().filter_map(|&(id, max_warehouses, max_capacity)| {
            LocationId::parse(id)
                .ok()
                .map(|id| Location::new(id, max_warehouses, max_capacity))
        }))
    }

    /// All locations, sorted by identifier.
    pub fn locations(&self) -> Vec<Location> {
        let mut all: Vec<Location> = self.locations.values().cloned().collect();
        all.sort_by(|a, b| a.identification.cmp(&b.identification));
        all
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl Default for InMemoryLocationGateway {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LocationResolver for InMemoryLocationGateway {
    fn resolve_by_identifier(&self, identifier: &LocationId) -> DomainResult<Location> {
        self.locations.get(identifier).cloned().ok_or_else(|| {
            DomainError::not_found(
                ErrorRule::LocationNotFound,
                format!("location {identifier} does not exist"),
            )
        })
    }
}
