use std::sync::Arc;

use fulfilment_core::{DomainError, DomainResult, ErrorRule};

use super::WarehouseValidator;
use crate::model::Warehouse;
use crate::ports::{LocationResolver, WarehouseStore};

/// Requires a free warehouse slot at the candidate's location.
///
/// Only active warehouses occupy a slot.
pub struct LocationWarehouseCountValidator<L, S> {
    resolver: Arc<L>,
    store: Arc<S>,
}

impl<L, S> LocationWarehouseCountValidator<L, S> {
    pub fn new(resolver: Arc<L>, store: Arc<S>) -> Self {
        Self { resolver, store }
    }
}

impl<L: LocationResolver, S: WarehouseStore> WarehouseValidator for LocationWarehouseCountValidator<L, S> {
    fn name(&self) -> &'static str {
        "location_warehouse_count"
    }

    fn validate(&self, candidate: &Warehouse) -> DomainResult<()> {
        let location = self.resolver.resolve_by_identifier(&candidate.location)?;
        let occupied = self.store.active_at_location(&location.identification)?.len();

        if occupied >= location.max_number_of_warehouses as usize {
            return Err(DomainError::conflict(
                ErrorRule::MaxWarehousesLimitReached,
                format!(
                    "location {} already holds {occupied} of {} warehouses",
                    location.identification, location.max_number_of_warehouses
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::testing::{location, warehouse, FakeBackend, FakeResolver};

    fn validator(
        records: Vec<Warehouse>,
        max_warehouses: u32,
    ) -> LocationWarehouseCountValidator<FakeResolver, FakeBackend> {
        LocationWarehouseCountValidator::new(
            Arc::new(FakeResolver::with(vec![location("AMSTERDAM-002", max_warehouses, 75)])),
            Arc::new(FakeBackend::with(records)),
        )
    }

    #[test]
    fn empty_location_is_feasible() {
        let validator = validator(vec![], 2);
        assert!(validator.validate(&warehouse("MWH.1", "AMSTERDAM-002", 10, 0)).is_ok());
    }

    #[test]
    fn full_location_conflicts() {
        let validator = validator(
            vec![
                warehouse("MWH.1", "AMSTERDAM-002", 10, 0),
                warehouse("MWH.2", "AMSTERDAM-002", 10, 0),
            ],
            2,
        );

        let err = validator
            .validate(&warehouse("MWH.3", "AMSTERDAM-002", 10, 0))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict { rule: ErrorRule::MaxWarehousesLimitReached, .. }
        ));
    }

    #[test]
    fn archived_and_foreign_warehouses_do_not_occupy_slots() {
        let mut archived = warehouse("MWH.1", "AMSTERDAM-002", 10, 0);
        archived.archived_at = Some(Utc::now());
        let validator = validator(vec![archived, warehouse("MWH.2", "ZWOLLE-001", 10, 0)], 1);

        assert!(validator.validate(&warehouse("MWH.3", "AMSTERDAM-002", 10, 0)).is_ok());
    }

    #[test]
    fn location_without_slots_rejects_everything() {
        let validator = validator(vec![], 0);
        let err = validator
            .validate(&warehouse("MWH.3", "AMSTERDAM-002", 10, 0))
            .unwrap_err();
        assert!(err.is_rule(ErrorRule::MaxWarehousesLimitReached));
    }
}
