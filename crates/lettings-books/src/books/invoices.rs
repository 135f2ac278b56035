use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::classify::CategoryTable;
use super::domain::{Invoice, InvoiceDraft, InvoiceId, PropertyId};
use super::repository::{InvoiceStore, RepositoryError, TransactionStore};
use super::status::payment_status;

static INVOICE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_invoice_id() -> InvoiceId {
    let id = INVOICE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    InvoiceId(format!("inv-{id:06}"))
}

/// Error raised by the invoice service.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    #[error("invoice number {0} already exists")]
    DuplicateNumber(String),
    #[error("invoice {0} not found")]
    UnknownInvoice(InvoiceId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Invoice CRUD. Creation trusts the submitted status (matching the ledger
/// the books were migrated from); every update recomputes it from the
/// transaction log before persisting.
pub struct InvoiceService<S> {
    store: Arc<S>,
    categories: Arc<CategoryTable>,
}

impl<S> InvoiceService<S>
where
    S: InvoiceStore + TransactionStore,
{
    pub fn new(store: Arc<S>, categories: Arc<CategoryTable>) -> Self {
        Self { store, categories }
    }

    pub fn create(&self, draft: InvoiceDraft) -> Result<Invoice, InvoiceError> {
        if self.store.invoice_by_number(&draft.number)?.is_some() {
            return Err(InvoiceError::DuplicateNumber(draft.number));
        }

        let invoice = draft.into_invoice(next_invoice_id());
        Ok(self.store.insert_invoice(invoice)?)
    }

    pub fn update(&self, id: &InvoiceId, draft: InvoiceDraft) -> Result<Invoice, InvoiceError> {
        if self
            .store
            .invoice_by_number_excluding(id, &draft.number)?
            .is_some()
        {
            return Err(InvoiceError::DuplicateNumber(draft.number));
        }

        let mut invoice = draft.into_invoice(id.clone());
        let related = self.store.transactions_for_invoice(&invoice.number)?;
        invoice.payment_status = payment_status(&invoice, &related, &self.categories);

        match self.store.update_invoice(invoice) {
            Ok(stored) => Ok(stored),
            Err(RepositoryError::NotFound) => Err(InvoiceError::UnknownInvoice(id.clone())),
            Err(err) => Err(err.into()),
        }
    }

    pub fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, InvoiceError> {
        Ok(self.store.fetch_invoice(id)?)
    }

    /// Returns the removed invoice, or `None` when the id was already gone.
    pub fn delete(&self, id: &InvoiceId) -> Result<Option<Invoice>, InvoiceError> {
        let Some(existing) = self.store.fetch_invoice(id)? else {
            return Ok(None);
        };
        self.store.delete_invoice(id)?;
        Ok(Some(existing))
    }

    pub fn list(&self) -> Result<Vec<Invoice>, InvoiceError> {
        Ok(self.store.list_invoices()?)
    }

    pub fn for_property(&self, property: &PropertyId) -> Result<Vec<Invoice>, InvoiceError> {
        Ok(self.store.invoices_for_property(property)?)
    }
}
