use std::sync::Arc;

use fulfilment_core::{DomainError, DomainResult, ErrorRule};

use super::WarehouseValidator;
use crate::model::Warehouse;
use crate::ports::WarehouseStore;

/// Rejects candidates whose business-unit code is already taken.
///
/// Archived records still hold their code for audit purposes, so they count
/// as taken as well.
pub struct BuCodeExistenceValidator<S> {
    store: Arc<S>,
}

impl<S> BuCodeExistenceValidator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: WarehouseStore> WarehouseValidator for BuCodeExistenceValidator<S> {
    fn name(&self) -> &'static str {
        "bu_code_existence"
    }

    fn validate(&self, candidate: &Warehouse) -> DomainResult<()> {
        match self.store.lookup_business_unit_code(&candidate.business_unit_code)? {
            None => Ok(()),
            Some(existing) => {
                let state = if existing.is_archived() { "archived" } else { "active" };
                Err(DomainError::conflict(
                    ErrorRule::BusinessUnitCodeAlreadyExists,
                    format!(
                        "warehouse with business unit code {} already exists ({state})",
                        candidate.business_unit_code
                    ),
                ))
            }
        }
    }
}
