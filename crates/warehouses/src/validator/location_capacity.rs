use std::sync::Arc;

use fulfilment_core::{DomainError, DomainResult, ErrorRule};

use super::WarehouseValidator;
use crate::model::Warehouse;
use crate::ports::LocationResolver;

/// Caps a warehouse's capacity at its location's maximum capacity.
pub struct LocationCapacityValidator<L> {
    resolver: Arc<L>,
}

impl<L> LocationCapacityValidator<L> {
    pub fn new(resolver: Arc<L>) -> Self {
        Self { resolver }
    }
}

impl<L: LocationResolver> WarehouseValidator for LocationCapacityValidator<L> {
    fn name(&self) -> &'static str {
        "location_capacity"
    }

    fn validate(&self, candidate: &Warehouse) -> DomainResult<()> {
        let location = self.resolver.resolve_by_identifier(&candidate.location)?;
        if candidate.capacity > location.max_capacity {
            return Err(DomainError::conflict(
                ErrorRule::LocationCapacityExceeded,
                format!(
                    "capacity {} exceeds maximum {} of location {}",
                    candidate.capacity, location.max_capacity, location.identification
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::testing::{location, warehouse, FakeResolver};

    fn validator(max_capacity: u32) -> LocationCapacityValidator<FakeResolver> {
        LocationCapacityValidator::new(Arc::new(FakeResolver::with(vec![location(
            "ZAANDAM-001",
            3,
            max_capacity,
        )])))
    }

    #[test]
    fn capacity_below_maximum_passes() {
        assert!(validator(1001).validate(&warehouse("MWH.1", "ZAANDAM-001", 1000, 0)).is_ok());
    }

    #[test]
    fn capacity_equal_to_maximum_passes() {
        assert!(validator(1000).validate(&warehouse("MWH.1", "ZAANDAM-001", 1000, 0)).is_ok());
    }

    #[test]
    fn capacity_above_maximum_conflicts() {
        let err = validator(999)
            .validate(&warehouse("MWH.1", "ZAANDAM-001", 1000, 0))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict { rule: ErrorRule::LocationCapacityExceeded, .. }
        ));
    }

    proptest! {
        /// Property: the rule accepts exactly the capacities within the ceiling.
        #[test]
        fn accepts_iff_capacity_within_ceiling(max in 0u32..10_000, capacity in 0u32..10_000) {
            let outcome = validator(max).validate(&warehouse("MWH.1", "ZAANDAM-001", capacity, 0));
            prop_assert_eq!(outcome.is_ok(), capacity <= max);
        }
    }
}
