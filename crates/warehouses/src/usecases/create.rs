use std::sync::Arc;

use fulfilment_core::{DomainResult, OperationId};

use super::CreateWarehouseOperation;
use crate::model::Warehouse;
use crate::ports::{LocationResolver, TransactionBoundary, WarehouseStore};
use crate::validator::ValidatorChain;

/// Validates a candidate against the create rules and persists it.
///
/// Validation and the write run inside one transaction, so a rejected
/// candidate leaves the store untouched and two racing creates cannot both
/// observe a free slot.
#[derive(Debug)]
pub struct CreateWarehouseUseCase<S, T> {
    store: Arc<S>,
    transactions: Arc<T>,
    validators: ValidatorChain,
}

impl<S, T> CreateWarehouseUseCase<S, T>
where
    S: WarehouseStore,
    T: TransactionBoundary,
{
    pub fn new(store: Arc<S>, transactions: Arc<T>, validators: ValidatorChain) -> Self {
        Self {
            store,
            transactions,
            validators,
        }
    }

    /// Wire the use case with [`ValidatorChain::for_create`].
    pub fn with_default_rules<L>(store: Arc<S>, resolver: Arc<L>, transactions: Arc<T>) -> Self
    where
        S: 'static,
        L: LocationResolver + 'static,
    {
        let validators = ValidatorChain::for_create(store.clone(), resolver);
        Self::new(store, transactions, validators)
    }

    pub fn validators(&self) -> &ValidatorChain {
        &self.validators
    }
}

impl<S, T> CreateWarehouseOperation for CreateWarehouseUseCase<S, T>
where
    S: WarehouseStore,
    T: TransactionBoundary,
{
    fn create(&self, candidate: Warehouse) -> DomainResult<()> {
        let span = tracing::info_span!(
            "warehouse.create",
            operation_id = %OperationId::new(),
            business_unit_code = %candidate.business_unit_code,
        );
        let _entered = span.enter();

        candidate.ensure_well_formed()?;

        let location = candidate.location.clone();
        let capacity = candidate.capacity;
        self.transactions.in_transaction(move || {
            self.validators.validate(&candidate)?;
            self.store.create(candidate)
        })?;

        tracing::info!(%location, capacity, "warehouse created");
        Ok(())
    }
}
