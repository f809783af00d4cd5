use std::sync::Arc;

use fulfilment_core::{DomainError, DomainResult, Entity, ErrorRule, OperationId};

use super::ReplaceWarehouseOperation;
use crate::model::Warehouse;
use crate::ports::{ArchiveWarehouseOperation, LocationResolver, TransactionBoundary, WarehouseStore};
use crate::validator::ValidatorChain;

/// Supersedes the active warehouse sharing the successor's business-unit code.
///
/// Pipeline, all inside one transaction:
///
/// ```text
/// find predecessor -> replacement invariants -> successor rules -> archive -> create
/// ```
///
/// Archiving happens before creating so that a concurrent replace of the
/// same code fails the "not archived" check. If creation fails, the
/// transaction boundary discards the archive.
#[derive(Debug)]
pub struct ReplaceWarehouseUseCase<S, A, T> {
    store: Arc<S>,
    archive: Arc<A>,
    transactions: Arc<T>,
    successor_rules: ValidatorChain,
}

impl<S, A, T> ReplaceWarehouseUseCase<S, A, T>
where
    S: WarehouseStore,
    A: ArchiveWarehouseOperation,
    T: TransactionBoundary,
{
    pub fn new(
        store: Arc<S>,
        archive: Arc<A>,
        transactions: Arc<T>,
        successor_rules: ValidatorChain,
    ) -> Self {
        Self {
            store,
            archive,
            transactions,
            successor_rules,
        }
    }

    /// Wire the use case with [`ValidatorChain::for_replace`].
    pub fn with_default_rules<L>(
        store: Arc<S>,
        archive: Arc<A>,
        resolver: Arc<L>,
        transactions: Arc<T>,
    ) -> Self
    where
        L: LocationResolver + 'static,
    {
        Self::new(store, archive, transactions, ValidatorChain::for_replace(resolver))
    }
}

impl<S, A, T> ReplaceWarehouseOperation for ReplaceWarehouseUseCase<S, A, T>
where
    S: WarehouseStore,
    A: ArchiveWarehouseOperation,
    T: TransactionBoundary,
{
    fn replace(&self, successor: Warehouse) -> DomainResult<()> {
        let span = tracing::info_span!(
            "warehouse.replace",
            operation_id = %OperationId::new(),
            business_unit_code = %successor.business_unit_code,
        );
        let _entered = span.enter();

        successor.ensure_well_formed()?;

        let archived = self.transactions.in_transaction(move || {
            let predecessor = self
                .store
                .find_by_business_unit_code(&successor.business_unit_code)?;

            ensure_replaceable(&predecessor, &successor).inspect_err(|err| {
                tracing::warn!(error = %err, "replacement rejected");
            })?;
            self.successor_rules.validate(&successor)?;

            self.archive.archive(&predecessor)?;
            self.store.create(successor)?;
            Ok(predecessor)
        })?;

        tracing::info!(
            predecessor_location = %archived.location,
            predecessor_capacity = archived.capacity,
            "warehouse replaced"
        );
        Ok(())
    }
}

/// Invariants a predecessor/successor pair must satisfy, checked in order.
///
/// Pure: reads nothing but its arguments.
pub fn ensure_replaceable(predecessor: &Warehouse, successor: &Warehouse) -> DomainResult<()> {
    if !predecessor.same_identity(successor) {
        return Err(DomainError::conflict(
            ErrorRule::BusinessUnitCodeMismatch,
            format!(
                "expected business unit code {}, got {}",
                predecessor.business_unit_code, successor.business_unit_code
            ),
        ));
    }

    if let Some(archived_at) = predecessor.archived_at {
        return Err(DomainError::conflict(
            ErrorRule::WarehousePreviouslyArchived,
            format!(
                "warehouse {} was archived at {archived_at}",
                predecessor.business_unit_code
            ),
        ));
    }

    if successor.capacity < predecessor.capacity {
        return Err(DomainError::conflict(
            ErrorRule::InsufficientWarehouseCapacity,
            format!(
                "successor capacity {} is below predecessor capacity {}",
                successor.capacity, predecessor.capacity
            ),
        ));
    }

    if successor.stock != predecessor.stock {
        return Err(DomainError::conflict(
            ErrorRule::WarehouseStockMismatch,
            format!(
                "successor stock {} differs from predecessor stock {}",
                successor.stock, predecessor.stock
            ),
        ));
    }

    Ok(())
}
