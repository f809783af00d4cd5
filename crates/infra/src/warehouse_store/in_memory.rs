use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, ThreadId};

use chrono::Utc;

use fulfilment_core::{BusinessUnitCode, DomainError, DomainResult, Entity, ErrorRule, LocationId};
use fulfilment_warehouses::{ArchiveWarehouseOperation, TransactionBoundary, Warehouse, WarehouseStore};

/// In-memory warehouse table.
///
/// Intended for tests/dev. Besides the store port it implements the archive
/// side channel and the transaction boundary:
///
/// - At most one *active* record per business-unit code (unique constraint).
/// - `in_transaction` serializes transactional work behind a gate and
///   journals the writes the transaction's thread makes. On failure only
///   those writes are undone; rows written by other callers meanwhile stay.
///   Transactions are not reentrant.
#[derive(Debug, Default)]
pub struct InMemoryWarehouseStore {
    rows: RwLock<Vec<Row>>,
    next_row_id: AtomicU64,
    transaction_gate: Mutex<()>,
    journal: Mutex<Option<Journal>>,
}

#[derive(Debug, Clone)]
struct Row {
    id: u64,
    warehouse: Warehouse,
}

/// Undo log of the open transaction.
#[derive(Debug)]
struct Journal {
    owner: ThreadId,
    undo: Vec<Undo>,
}

#[derive(Debug)]
enum Undo {
    Inserted(u64),
    Changed { id: u64, before: Warehouse },
    Removed { index: usize, row: Row },
}

impl InMemoryWarehouseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the table with existing records (e.g. fixtures).
    pub fn with_records(records: Vec<Warehouse>) -> Self {
        let rows: Vec<Row> = records
            .into_iter()
            .zip(0..)
            .map(|(warehouse, id)| Row { id, warehouse })
            .collect();
        Self {
            next_row_id: AtomicU64::new(rows.len() as u64),
            rows: RwLock::new(rows),
            ..Self::default()
        }
    }

    fn allocate_row_id(&self) -> u64 {
        self.next_row_id.fetch_add(1, Ordering::Relaxed)
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Vec<Row>>> {
        self.rows
            .read()
            .map_err(|_| DomainError::storage("warehouse table lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Vec<Row>>> {
        self.rows
            .write()
            .map_err(|_| DomainError::storage("warehouse table lock poisoned"))
    }

    fn journal(&self) -> DomainResult<MutexGuard<'_, Option<Journal>>> {
        self.journal
            .lock()
            .map_err(|_| DomainError::storage("transaction journal lock poisoned"))
    }

    /// Log `undo` when the calling thread owns the open transaction.
    ///
    /// Called with the table write lock held.
    fn record(&self, undo: Undo) -> DomainResult<()> {
        if let Some(journal) = self.journal()?.as_mut() {
            if journal.owner == thread::current().id() {
                journal.undo.push(undo);
            }
        }
        Ok(())
    }

    fn roll_back(&self, undo: Vec<Undo>) -> DomainResult<()> {
        let mut rows = self.write()?;
        for entry in undo.into_iter().rev() {
            match entry {
                Undo::Inserted(id) => rows.retain(|row| row.id != id),
                Undo::Changed { id, before } => {
                    if let Some(row) = rows.iter_mut().find(|row| row.id == id) {
                        row.warehouse = before;
                    }
                }
                Undo::Removed { index, row } => {
                    let index = index.min(rows.len());
                    rows.insert(index, row);
                }
            }
        }
        Ok(())
    }

    fn not_located(code: &BusinessUnitCode) -> DomainError {
        DomainError::not_found(
            ErrorRule::WarehouseNotLocated,
            format!("no active warehouse found with business unit code {code}"),
        )
    }
}

fn active_position(rows: &[Row], code: &BusinessUnitCode) -> Option<usize> {
    rows.iter()
        .position(|row| row.warehouse.is_active() && row.warehouse.id() == code)
}

fn any_position(rows: &[Row], code: &BusinessUnitCode) -> Option<usize> {
    active_position(rows, code).or_else(|| rows.iter().position(|row| row.warehouse.id() == code))
}

impl WarehouseStore for InMemoryWarehouseStore {
    fn get_all(&self) -> DomainResult<Vec<Warehouse>> {
        Ok(self.read()?.iter().map(|row| row.warehouse.clone()).collect())
    }

    fn create(&self, mut warehouse: Warehouse) -> DomainResult<()> {
        let mut rows = self.write()?;

        if warehouse.is_active() && active_position(&rows, &warehouse.business_unit_code).is_some() {
            return Err(DomainError::conflict(
                ErrorRule::BusinessUnitCodeAlreadyExists,
                format!(
                    "an active warehouse with business unit code {} already exists",
                    warehouse.business_unit_code
                ),
            ));
        }

        if warehouse.created_at.is_none() {
            warehouse.created_at = Some(Utc::now());
        }
        let id = self.allocate_row_id();
        self.record(Undo::Inserted(id))?;
        tracing::debug!(business_unit_code = %warehouse.business_unit_code, "warehouse row inserted");
        rows.push(Row { id, warehouse });
        Ok(())
    }

    fn update(&self, warehouse: &Warehouse) -> DomainResult<()> {
        let mut rows = self.write()?;
        let idx = active_position(&rows, &warehouse.business_unit_code)
            .ok_or_else(|| Self::not_located(&warehouse.business_unit_code))?;

        let row = &mut rows[idx];
        self.record(Undo::Changed {
            id: row.id,
            before: row.warehouse.clone(),
        })?;
        row.warehouse.location = warehouse.location.clone();
        row.warehouse.capacity = warehouse.capacity;
        row.warehouse.stock = warehouse.stock;
        tracing::debug!(business_unit_code = %warehouse.business_unit_code, "warehouse row updated");
        Ok(())
    }

    fn remove(&self, warehouse: &Warehouse) -> DomainResult<()> {
        let mut rows = self.write()?;
        let code = &warehouse.business_unit_code;
        let idx = any_position(&rows, code).ok_or_else(|| Self::not_located(code))?;

        let row = rows.remove(idx);
        self.record(Undo::Removed { index: idx, row })?;
        tracing::debug!(business_unit_code = %code, "warehouse row deleted");
        Ok(())
    }

    fn find_by_business_unit_code(&self, code: &BusinessUnitCode) -> DomainResult<Warehouse> {
        let rows = self.read()?;
        active_position(&rows, code)
            .map(|idx| rows[idx].warehouse.clone())
            .ok_or_else(|| Self::not_located(code))
    }

    fn lookup_business_unit_code(&self, code: &BusinessUnitCode) -> DomainResult<Option<Warehouse>> {
        let rows = self.read()?;
        Ok(any_position(&rows, code).map(|idx| rows[idx].warehouse.clone()))
    }

    fn active_at_location(&self, location: &LocationId) -> DomainResult<Vec<Warehouse>> {
        Ok(self
            .read()?
            .iter()
            .map(|row| &row.warehouse)
            .filter(|w| w.is_active() && &w.location == location)
            .cloned()
            .collect())
    }
}

impl ArchiveWarehouseOperation for InMemoryWarehouseStore {
    fn archive(&self, warehouse: &Warehouse) -> DomainResult<()> {
        let mut rows = self.write()?;
        let idx = active_position(&rows, &warehouse.business_unit_code)
            .ok_or_else(|| Self::not_located(&warehouse.business_unit_code))?;

        let row = &mut rows[idx];
        self.record(Undo::Changed {
            id: row.id,
            before: row.warehouse.clone(),
        })?;
        row.warehouse.archived_at = Some(Utc::now());
        tracing::debug!(business_unit_code = %warehouse.business_unit_code, "warehouse archived");
        Ok(())
    }
}

impl TransactionBoundary for InMemoryWarehouseStore {
    fn in_transaction<T, F>(&self, work: F) -> DomainResult<T>
    where
        F: FnOnce() -> DomainResult<T>,
    {
        // The gate guards no data, so a poisoned gate is still usable.
        let _gate = self
            .transaction_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *self.journal()? = Some(Journal {
            owner: thread::current().id(),
            undo: Vec::new(),
        });

        let outcome = work();
        let undo = self
            .journal()?
            .take()
            .map(|journal| journal.undo)
            .unwrap_or_default();

        if let Err(err) = &outcome {
            self.roll_back(undo)?;
            tracing::debug!(error = %err, "transaction rolled back");
        }
        outcome
    }
}
