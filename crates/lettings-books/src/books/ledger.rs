use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::classify::{CategoryTable, LedgerEffect};
use super::domain::{BankingTransaction, EntryId, LandlordLedgerEntry, TenantLedgerEntry};
use super::repository::{LedgerEntryStore, RepositoryError};

static LANDLORD_ENTRY_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static TENANT_ENTRY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_landlord_entry_id() -> EntryId {
    let id = LANDLORD_ENTRY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EntryId(format!("lle-{id:06}"))
}

fn next_tenant_entry_id() -> EntryId {
    let id = TENANT_ENTRY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EntryId(format!("tbe-{id:06}"))
}

/// Outcome of re-projecting a transaction onto an existing ledger entry.
///
/// `Declassified` means the transaction's category no longer belongs to this
/// ledger. The ledger does NOT delete the entry in that case; whether to
/// delete it and move the value to the other ledger is the reconciliation
/// service's call.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerUpdate<E> {
    Updated(E),
    Declassified,
}

/// Landlord-side balance sheet.
pub struct LandlordLedger<S> {
    store: Arc<S>,
    categories: Arc<CategoryTable>,
}

impl<S: LedgerEntryStore> LandlordLedger<S> {
    pub fn new(store: Arc<S>, categories: Arc<CategoryTable>) -> Self {
        Self { store, categories }
    }

    /// Project a transaction onto this ledger. Returns `None` without
    /// writing when the category is not a landlord-side category.
    pub fn create_entry(
        &self,
        transaction: &BankingTransaction,
    ) -> Result<Option<LandlordLedgerEntry>, RepositoryError> {
        let Some(entry) = self.project(next_landlord_entry_id(), transaction) else {
            return Ok(None);
        };

        let stored = self.store.insert_landlord_entry(entry)?;
        debug!(entry = %stored.id, category = %stored.category, "landlord ledger entry created");
        Ok(Some(stored))
    }

    /// Replace the entry at `id` with a fresh projection of `transaction`.
    /// Every field is overwritten, including the zeroed side of the amount
    /// pair.
    pub fn update_entry(
        &self,
        id: &EntryId,
        transaction: &BankingTransaction,
    ) -> Result<LedgerUpdate<LandlordLedgerEntry>, RepositoryError> {
        let Some(entry) = self.project(id.clone(), transaction) else {
            return Ok(LedgerUpdate::Declassified);
        };

        let stored = self.store.update_landlord_entry(entry)?;
        debug!(entry = %stored.id, category = %stored.category, "landlord ledger entry updated");
        Ok(LedgerUpdate::Updated(stored))
    }

    pub fn delete_entry(&self, id: &EntryId) -> Result<(), RepositoryError> {
        self.store.delete_landlord_entry(id)?;
        debug!(entry = %id, "landlord ledger entry deleted");
        Ok(())
    }

    pub fn entries(&self) -> Result<Vec<LandlordLedgerEntry>, RepositoryError> {
        self.store.list_landlord_entries()
    }

    pub fn entries_for_property(
        &self,
        property: &super::domain::PropertyId,
    ) -> Result<Vec<LandlordLedgerEntry>, RepositoryError> {
        self.store.landlord_entries_for_property(property)
    }

    fn project(&self, id: EntryId, transaction: &BankingTransaction) -> Option<LandlordLedgerEntry> {
        let (due, debited) = match self.categories.effect_of(&transaction.category) {
            Some(LedgerEffect::DebitedToLandlord) => (0.0, transaction.amount),
            Some(LedgerEffect::DueToLandlord) => (transaction.amount, 0.0),
            _ => return None,
        };

        Some(LandlordLedgerEntry {
            id,
            property: transaction.property.clone(),
            category: transaction.category.clone(),
            date: transaction.date,
            rental_period: transaction.rental_period.clone(),
            amount_due_to_ll: due,
            debited_to_ll: debited,
        })
    }
}

/// Tenant-side balance sheet.
pub struct TenantLedger<S> {
    store: Arc<S>,
    categories: Arc<CategoryTable>,
}

impl<S: LedgerEntryStore> TenantLedger<S> {
    pub fn new(store: Arc<S>, categories: Arc<CategoryTable>) -> Self {
        Self { store, categories }
    }

    pub fn create_entry(
        &self,
        transaction: &BankingTransaction,
    ) -> Result<Option<TenantLedgerEntry>, RepositoryError> {
        let Some(entry) = self.project(next_tenant_entry_id(), transaction) else {
            return Ok(None);
        };

        let stored = self.store.insert_tenant_entry(entry)?;
        debug!(entry = %stored.id, category = %stored.category, "tenant ledger entry created");
        Ok(Some(stored))
    }

    pub fn update_entry(
        &self,
        id: &EntryId,
        transaction: &BankingTransaction,
    ) -> Result<LedgerUpdate<TenantLedgerEntry>, RepositoryError> {
        let Some(entry) = self.project(id.clone(), transaction) else {
            return Ok(LedgerUpdate::Declassified);
        };

        let stored = self.store.update_tenant_entry(entry)?;
        debug!(entry = %stored.id, category = %stored.category, "tenant ledger entry updated");
        Ok(LedgerUpdate::Updated(stored))
    }

    pub fn delete_entry(&self, id: &EntryId) -> Result<(), RepositoryError> {
        self.store.delete_tenant_entry(id)?;
        debug!(entry = %id, "tenant ledger entry deleted");
        Ok(())
    }

    pub fn entries(&self) -> Result<Vec<TenantLedgerEntry>, RepositoryError> {
        self.store.list_tenant_entries()
    }

    pub fn entries_for_property(
        &self,
        property: &super::domain::PropertyId,
    ) -> Result<Vec<TenantLedgerEntry>, RepositoryError> {
        self.store.tenant_entries_for_property(property)
    }

    fn project(&self, id: EntryId, transaction: &BankingTransaction) -> Option<TenantLedgerEntry> {
        let (due, paid) = match self.categories.effect_of(&transaction.category) {
            Some(LedgerEffect::RentDue) => (transaction.amount, 0.0),
            Some(LedgerEffect::RentPaid) => (0.0, transaction.amount),
            _ => return None,
        };

        Some(TenantLedgerEntry {
            id,
            property: transaction.property.clone(),
            category: transaction.category.clone(),
            date: transaction.date,
            rental_period: transaction.rental_period.clone(),
            rent_due: due,
            rent_paid_by_tenant: paid,
        })
    }
}
