use std::sync::Arc;

use fulfilment_core::DomainResult;

use super::WarehouseValidator;
use crate::model::Warehouse;
use crate::ports::LocationResolver;

/// Requires the candidate's location to resolve.
pub struct LocationExistsValidator<L> {
    resolver: Arc<L>,
}

impl<L> LocationExistsValidator<L> {
    pub fn new(resolver: Arc<L>) -> Self {
        Self { resolver }
    }
}

impl<L: LocationResolver> WarehouseValidator for LocationExistsValidator<L> {
    fn name(&self) -> &'static str {
        "location_exists"
    }

    fn validate(&self, candidate: &Warehouse) -> DomainResult<()> {
        self.resolver
            .resolve_by_identifier(&candidate.location)
            .map(|_| ())
    }
}
