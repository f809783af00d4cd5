//! Business-rule checks gating warehouse creation and replacement.
//!
//! Each rule is its own type closing over the collaborators it reads. A
//! [`ValidatorChain`] runs rules in a fixed order and stops at the first
//! rejection, returning that error unchanged.

mod bu_code;
mod location_capacity;
mod location_exists;
mod warehouse_count;

use std::sync::Arc;

use fulfilment_core::DomainResult;

use crate::model::Warehouse;
use crate::ports::{LocationResolver, WarehouseStore};

pub use bu_code::BuCodeExistenceValidator;
pub use location_capacity::LocationCapacityValidator;
pub use location_exists::LocationExistsValidator;
pub use warehouse_count::LocationWarehouseCountValidator;

/// A single pluggable rule.
///
/// `Ok(())` means the candidate passes. Validators only read from their
/// collaborators; they never write.
pub trait WarehouseValidator: Send + Sync {
    /// Short rule name used in logs.
    fn name(&self) -> &'static str;

    fn validate(&self, candidate: &Warehouse) -> DomainResult<()>;
}

/// Ordered list of validators.
pub struct ValidatorChain {
    validators: Vec<Box<dyn WarehouseValidator>>,
}

impl ValidatorChain {
    pub fn new(validators: Vec<Box<dyn WarehouseValidator>>) -> Self {
        Self { validators }
    }

    /// A chain that accepts every candidate.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Rules for creating a brand-new warehouse, in evaluation order:
    /// code unused, location exists, location has a free slot, capacity fits.
    pub fn for_create<S, L>(store: Arc<S>, resolver: Arc<L>) -> Self
    where
        S: WarehouseStore + 'static,
        L: LocationResolver + 'static,
    {
        Self::new(vec![
            Box::new(BuCodeExistenceValidator::new(store.clone())),
            Box::new(LocationExistsValidator::new(resolver.clone())),
            Box::new(LocationWarehouseCountValidator::new(resolver.clone(), store)),
            Box::new(LocationCapacityValidator::new(resolver)),
        ])
    }

    /// Rules a replacement successor must satisfy on top of the replacement
    /// invariants. The successor takes over the predecessor's code and slot,
    /// so only the location rules apply.
    pub fn for_replace<L>(resolver: Arc<L>) -> Self
    where
        L: LocationResolver + 'static,
    {
        Self::new(vec![
            Box::new(LocationExistsValidator::new(resolver.clone())),
            Box::new(LocationCapacityValidator::new(resolver)),
        ])
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run every validator in order; the first failure aborts the chain.
    pub fn validate(&self, candidate: &Warehouse) -> DomainResult<()> {
        self.validators.iter().try_for_each(|validator| {
            validator.validate(candidate).inspect_err(|err| {
                tracing::warn!(
                    validator = validator.name(),
                    business_unit_code = %candidate.business_unit_code,
                    error = %err,
                    "warehouse rejected by validator"
                );
            })
        })
    }
}

impl core::fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("validators", &self.names())
            .finish()
    }
}
