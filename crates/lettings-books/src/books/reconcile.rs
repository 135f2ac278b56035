use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::warn;

use super::classify::CategoryTable;
use super::domain::{BankingTransaction, TransactionDraft, TransactionId};
use super::ledger::{LandlordLedger, LedgerUpdate, TenantLedger};
use super::repository::{InvoiceStore, LedgerEntryStore, RepositoryError, TransactionStore};
use super::status::payment_status;

static TRANSACTION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_transaction_id() -> TransactionId {
    let id = TRANSACTION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    TransactionId(format!("txn-{id:06}"))
}

/// Error raised by the reconciliation service. Store failures abort the
/// remaining steps of a lifecycle event; completed writes are not rolled
/// back.
#[derive(Debug, thiserror::Error)]
pub enum ReconciliationError {
    #[error("banking transaction {0} not found")]
    UnknownTransaction(TransactionId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Coordinates the transaction log, both balance ledgers, and invoice
/// payment status across a banking transaction's lifecycle.
pub struct ReconciliationService<S> {
    store: Arc<S>,
    landlord_ledger: LandlordLedger<S>,
    tenant_ledger: TenantLedger<S>,
    categories: Arc<CategoryTable>,
}

impl<S> ReconciliationService<S>
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore,
{
    pub fn new(store: Arc<S>, categories: Arc<CategoryTable>) -> Self {
        Self {
            landlord_ledger: LandlordLedger::new(store.clone(), categories.clone()),
            tenant_ledger: TenantLedger::new(store.clone(), categories.clone()),
            store,
            categories,
        }
    }

    pub fn landlord_ledger(&self) -> &LandlordLedger<S> {
        &self.landlord_ledger
    }

    pub fn tenant_ledger(&self) -> &TenantLedger<S> {
        &self.tenant_ledger
    }

    /// Record a new bank movement: project it onto whichever ledger its
    /// category selects, persist the transaction with the resulting
    /// back-reference, then refresh the referenced invoice's status.
    pub fn create_transaction(
        &self,
        draft: TransactionDraft,
    ) -> Result<BankingTransaction, ReconciliationError> {
        let mut transaction = draft.into_transaction(next_transaction_id());

        if let Some(entry) = self.landlord_ledger.create_entry(&transaction)? {
            transaction.ll_entry = Some(entry.id);
        }
        if let Some(entry) = self.tenant_ledger.create_entry(&transaction)? {
            transaction.tenant_entry = Some(entry.id);
        }

        let stored = self.store.insert_transaction(transaction)?;

        if let Some(number) = stored.invoice_number.clone() {
            self.refresh_invoice_status(&number)?;
        }

        Ok(stored)
    }

    /// Re-reconcile an edited transaction.
    ///
    /// Each existing ledger link is re-projected with the new data. A link
    /// whose entry declassifies is deleted, and when the opposite ledger had
    /// no entry for this transaction one is created there (the category
    /// moved ledgers). The two branches run independently: a record that
    /// somehow carries both links has both processed, neither assumed away.
    pub fn update_transaction(
        &self,
        id: &TransactionId,
        draft: TransactionDraft,
    ) -> Result<BankingTransaction, ReconciliationError> {
        let existing = self
            .store
            .fetch_transaction(id)?
            .ok_or_else(|| ReconciliationError::UnknownTransaction(id.clone()))?;

        let candidate = draft.into_transaction(id.clone());
        let mut ll_link = existing.ll_entry.clone();
        let mut tenant_link = existing.tenant_entry.clone();

        if let Some(entry_id) = &existing.ll_entry {
            match self.landlord_ledger.update_entry(entry_id, &candidate)? {
                LedgerUpdate::Updated(_) => {}
                LedgerUpdate::Declassified => {
                    self.landlord_ledger.delete_entry(entry_id)?;
                    ll_link = None;
                    if existing.tenant_entry.is_none() {
                        if let Some(entry) = self.tenant_ledger.create_entry(&candidate)? {
                            tenant_link = Some(entry.id);
                        }
                    }
                }
            }
        }

        if let Some(entry_id) = &existing.tenant_entry {
            match self.tenant_ledger.update_entry(entry_id, &candidate)? {
                LedgerUpdate::Updated(_) => {}
                LedgerUpdate::Declassified => {
                    self.tenant_ledger.delete_entry(entry_id)?;
                    tenant_link = None;
                    if existing.ll_entry.is_none() {
                        if let Some(entry) = self.landlord_ledger.create_entry(&candidate)? {
                            ll_link = Some(entry.id);
                        }
                    }
                }
            }
        }

        let mut transaction = candidate;
        transaction.ll_entry = ll_link;
        transaction.tenant_entry = tenant_link;
        let stored = self.store.update_transaction(transaction)?;

        if let Some(number) = stored.invoice_number.clone() {
            self.refresh_invoice_status(&number)?;
        }

        Ok(stored)
    }

    /// Remove a transaction along with its ledger entries, then refresh the
    /// referenced invoice. Returns `Ok(None)` when the id is already gone,
    /// so a repeated delete is not an error.
    pub fn delete_transaction(
        &self,
        id: &TransactionId,
    ) -> Result<Option<BankingTransaction>, ReconciliationError> {
        let Some(existing) = self.store.fetch_transaction(id)? else {
            return Ok(None);
        };

        if let Some(entry_id) = &existing.ll_entry {
            self.landlord_ledger.delete_entry(entry_id)?;
        }
        if let Some(entry_id) = &existing.tenant_entry {
            self.tenant_ledger.delete_entry(entry_id)?;
        }

        self.store.delete_transaction(id)?;

        if let Some(number) = existing.invoice_number.clone() {
            self.refresh_invoice_status(&number)?;
        }

        Ok(Some(existing))
    }

    pub fn transaction(
        &self,
        id: &TransactionId,
    ) -> Result<Option<BankingTransaction>, ReconciliationError> {
        Ok(self.store.fetch_transaction(id)?)
    }

    pub fn transactions(&self) -> Result<Vec<BankingTransaction>, ReconciliationError> {
        Ok(self.store.list_transactions()?)
    }

    /// Recompute the referenced invoice's payment status from the full
    /// transaction log. A dangling invoice number is a data-integrity gap,
    /// not a failure: log it and move on.
    fn refresh_invoice_status(&self, number: &str) -> Result<(), ReconciliationError> {
        let Some(mut invoice) = self.store.invoice_by_number(number)? else {
            warn!(invoice_number = %number, "transaction references a missing invoice, skipping status refresh");
            return Ok(());
        };

        let related = self.store.transactions_for_invoice(number)?;
        invoice.payment_status = payment_status(&invoice, &related, &self.categories);
        self.store.update_invoice(invoice)?;
        Ok(())
    }
}
