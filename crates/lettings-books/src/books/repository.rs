use serde::Serialize;

use super::domain::{
    BankingTransaction, EntryId, Invoice, InvoiceId, LandlordLedgerEntry, PropertyId,
    TenantLedgerEntry, TransactionId,
};

/// Error enumeration for store failures, shared by every collection.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Banking-transaction log operations.
///
/// `update_transaction` returns the post-update record; `delete_transaction`
/// is idempotent and succeeds when the id is already gone.
pub trait TransactionStore: Send + Sync {
    fn insert_transaction(
        &self,
        transaction: BankingTransaction,
    ) -> Result<BankingTransaction, RepositoryError>;
    fn update_transaction(
        &self,
        transaction: BankingTransaction,
    ) -> Result<BankingTransaction, RepositoryError>;
    fn fetch_transaction(
        &self,
        id: &TransactionId,
    ) -> Result<Option<BankingTransaction>, RepositoryError>;
    fn delete_transaction(&self, id: &TransactionId) -> Result<(), RepositoryError>;
    /// All transactions, ordered by date.
    fn list_transactions(&self) -> Result<Vec<BankingTransaction>, RepositoryError>;
    /// Every transaction whose invoice number matches, any category.
    fn transactions_for_invoice(
        &self,
        number: &str,
    ) -> Result<Vec<BankingTransaction>, RepositoryError>;
}

/// Persistence for the two balance sheets. Updates are full replaces keyed
/// by entry id; deletes are idempotent; per-property listings are ordered by
/// rental period and unpaginated.
pub trait LedgerEntryStore: Send + Sync {
    fn insert_landlord_entry(
        &self,
        entry: LandlordLedgerEntry,
    ) -> Result<LandlordLedgerEntry, RepositoryError>;
    fn update_landlord_entry(
        &self,
        entry: LandlordLedgerEntry,
    ) -> Result<LandlordLedgerEntry, RepositoryError>;
    fn delete_landlord_entry(&self, id: &EntryId) -> Result<(), RepositoryError>;
    fn list_landlord_entries(&self) -> Result<Vec<LandlordLedgerEntry>, RepositoryError>;
    fn landlord_entries_for_property(
        &self,
        property: &PropertyId,
    ) -> Result<Vec<LandlordLedgerEntry>, RepositoryError>;

    fn insert_tenant_entry(
        &self,
        entry: TenantLedgerEntry,
    ) -> Result<TenantLedgerEntry, RepositoryError>;
    fn update_tenant_entry(
        &self,
        entry: TenantLedgerEntry,
    ) -> Result<TenantLedgerEntry, RepositoryError>;
    fn delete_tenant_entry(&self, id: &EntryId) -> Result<(), RepositoryError>;
    fn list_tenant_entries(&self) -> Result<Vec<TenantLedgerEntry>, RepositoryError>;
    fn tenant_entries_for_property(
        &self,
        property: &PropertyId,
    ) -> Result<Vec<TenantLedgerEntry>, RepositoryError>;
}

/// Invoice collection operations, including the duplicate-number checks the
/// CRUD layer relies on ("same number" and "same number except me").
pub trait InvoiceStore: Send + Sync {
    fn insert_invoice(&self, invoice: Invoice) -> Result<Invoice, RepositoryError>;
    fn update_invoice(&self, invoice: Invoice) -> Result<Invoice, RepositoryError>;
    fn fetch_invoice(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepositoryError>;
    fn delete_invoice(&self, id: &InvoiceId) -> Result<(), RepositoryError>;
    fn invoice_by_number(&self, number: &str) -> Result<Option<Invoice>, RepositoryError>;
    fn invoice_by_number_excluding(
        &self,
        id: &InvoiceId,
        number: &str,
    ) -> Result<Option<Invoice>, RepositoryError>;
    /// All invoices, ordered by date.
    fn list_invoices(&self) -> Result<Vec<Invoice>, RepositoryError>;
    fn invoices_for_property(&self, property: &PropertyId)
        -> Result<Vec<Invoice>, RepositoryError>;
}

/// Selected fields of a property and its linked parties, resolved by
/// following the reference chain. This is the only view the books ever take
/// of the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyRef {
    pub id: PropertyId,
    pub p_id: String,
    pub landlord_ll_id: Option<String>,
    pub tenant_t_id: Option<String>,
}

/// Reference-following capability of the store. The directory collections
/// are owned elsewhere; the books only read identifying fields.
pub trait PropertyDirectory: Send + Sync {
    fn property_ref(&self, id: &PropertyId) -> Result<Option<PropertyRef>, RepositoryError>;
}
