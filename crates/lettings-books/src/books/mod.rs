//! The bookkeeping core: banking-transaction log, the landlord and tenant
//! balance ledgers derived from it, and the invoice book whose payment
//! statuses the log decides.
//!
//! Reconciliation flows one way. A bank movement is classified by category,
//! projected onto at most one ledger, and stored with a back-reference to
//! the entry it produced; edits and deletes propagate through that
//! back-reference, and any invoice the movement names gets its status
//! recomputed from scratch.

pub mod classify;
pub mod domain;
pub mod invoices;
pub mod ledger;
pub mod reconcile;
pub mod repository;
pub mod router;
pub mod status;

#[cfg(test)]
mod tests;

pub use classify::{CategoryRulesError, CategoryTable, LedgerEffect};
pub use domain::{
    BankingTransaction, EntryId, Invoice, InvoiceDraft, InvoiceId, LandlordLedgerEntry,
    PaymentStatus, PropertyId, TenantLedgerEntry, TransactionDirection, TransactionDraft,
    TransactionId, ValidationError,
};
pub use invoices::{InvoiceError, InvoiceService};
pub use ledger::{LandlordLedger, LedgerUpdate, TenantLedger};
pub use reconcile::{ReconciliationError, ReconciliationService};
pub use repository::{
    InvoiceStore, LedgerEntryStore, PropertyDirectory, PropertyRef, RepositoryError,
    TransactionStore,
};
pub use router::{books_router, BooksState};
pub use status::payment_status;
