use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::{
    BankingTransaction, Invoice, InvoiceDraft, InvoiceId, PropertyId, TransactionDraft,
    TransactionId,
};
use super::invoices::{InvoiceError, InvoiceService};
use super::reconcile::{ReconciliationError, ReconciliationService};
use super::repository::{
    InvoiceStore, LedgerEntryStore, PropertyDirectory, PropertyRef, RepositoryError,
    TransactionStore,
};

/// Shared state for the bookkeeping routes.
pub struct BooksState<S> {
    pub reconciliation: Arc<ReconciliationService<S>>,
    pub invoices: Arc<InvoiceService<S>>,
    pub store: Arc<S>,
}

impl<S> Clone for BooksState<S> {
    fn clone(&self) -> Self {
        Self {
            reconciliation: self.reconciliation.clone(),
            invoices: self.invoices.clone(),
            store: self.store.clone(),
        }
    }
}

/// Router builder exposing the banking log, both balance sheets, and the
/// invoice book.
pub fn books_router<S>(state: BooksState<S>) -> Router
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    Router::new()
        .route(
            "/api/v1/banking-entries",
            get(list_transactions_handler::<S>).post(create_transaction_handler::<S>),
        )
        .route(
            "/api/v1/banking-entries/:id",
            get(get_transaction_handler::<S>)
                .put(update_transaction_handler::<S>)
                .delete(delete_transaction_handler::<S>),
        )
        .route(
            "/api/v1/landlord-balance",
            get(list_landlord_entries_handler::<S>),
        )
        .route(
            "/api/v1/landlord-balance/by-property/:property_id",
            get(landlord_entries_for_property_handler::<S>),
        )
        .route(
            "/api/v1/tenant-balance",
            get(list_tenant_entries_handler::<S>),
        )
        .route(
            "/api/v1/tenant-balance/by-property/:property_id",
            get(tenant_entries_for_property_handler::<S>),
        )
        .route(
            "/api/v1/invoices",
            get(list_invoices_handler::<S>).post(create_invoice_handler::<S>),
        )
        .route(
            "/api/v1/invoices/by-property/:property_id",
            get(invoices_for_property_handler::<S>),
        )
        .route(
            "/api/v1/invoices/:id",
            get(get_invoice_handler::<S>)
                .put(update_invoice_handler::<S>)
                .delete(delete_invoice_handler::<S>),
        )
        .with_state(state)
}

/// Transaction as served, with the property reference expanded to the
/// identifying fields of the linked parties.
#[derive(Debug, Serialize)]
pub struct BankingEntryView {
    #[serde(flatten)]
    pub transaction: BankingTransaction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_detail: Option<PropertyRef>,
}

fn expand_property<S: PropertyDirectory>(
    store: &S,
    transaction: BankingTransaction,
) -> Result<BankingEntryView, RepositoryError> {
    let property_detail = match &transaction.property {
        Some(id) => store.property_ref(id)?,
        None => None,
    };
    Ok(BankingEntryView {
        transaction,
        property_detail,
    })
}

fn store_error_response(err: &RepositoryError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}

fn reconciliation_error_response(err: ReconciliationError) -> Response {
    match err {
        ReconciliationError::UnknownTransaction(_) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        ReconciliationError::Repository(err) => store_error_response(&err),
    }
}

fn invoice_error_response(err: InvoiceError) -> Response {
    match err {
        InvoiceError::DuplicateNumber(_) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        InvoiceError::UnknownInvoice(_) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        InvoiceError::Repository(err) => store_error_response(&err),
    }
}

fn validation_response(err: super::domain::ValidationError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

pub(crate) async fn list_transactions_handler<S>(State(state): State<BooksState<S>>) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    let transactions = match state.reconciliation.transactions() {
        Ok(transactions) => transactions,
        Err(err) => return reconciliation_error_response(err),
    };

    let mut views = Vec::with_capacity(transactions.len());
    for transaction in transactions {
        match expand_property(state.store.as_ref(), transaction) {
            Ok(view) => views.push(view),
            Err(err) => return store_error_response(&err),
        }
    }

    (StatusCode::OK, Json(views)).into_response()
}

pub(crate) async fn create_transaction_handler<S>(
    State(state): State<BooksState<S>>,
    Json(draft): Json<TransactionDraft>,
) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    if let Err(err) = draft.validate() {
        return validation_response(err);
    }

    match state.reconciliation.create_transaction(draft) {
        Ok(stored) => match expand_property(state.store.as_ref(), stored) {
            Ok(view) => (StatusCode::OK, Json(view)).into_response(),
            Err(err) => store_error_response(&err),
        },
        Err(err) => reconciliation_error_response(err),
    }
}

pub(crate) async fn get_transaction_handler<S>(
    State(state): State<BooksState<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    match state.reconciliation.transaction(&TransactionId(id)) {
        Ok(Some(transaction)) => (StatusCode::OK, Json(transaction)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "banking entry not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => reconciliation_error_response(err),
    }
}

pub(crate) async fn update_transaction_handler<S>(
    State(state): State<BooksState<S>>,
    Path(id): Path<String>,
    Json(draft): Json<TransactionDraft>,
) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    if let Err(err) = draft.validate() {
        return validation_response(err);
    }

    match state
        .reconciliation
        .update_transaction(&TransactionId(id), draft)
    {
        Ok(stored) => (StatusCode::OK, Json(stored)).into_response(),
        Err(err) => reconciliation_error_response(err),
    }
}

pub(crate) async fn delete_transaction_handler<S>(
    State(state): State<BooksState<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    match state.reconciliation.delete_transaction(&TransactionId(id)) {
        Ok(Some(removed)) => (StatusCode::OK, Json(removed)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "banking entry not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => reconciliation_error_response(err),
    }
}

pub(crate) async fn list_landlord_entries_handler<S>(State(state): State<BooksState<S>>) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    match state.reconciliation.landlord_ledger().entries() {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(err) => store_error_response(&err),
    }
}

pub(crate) async fn landlord_entries_for_property_handler<S>(
    State(state): State<BooksState<S>>,
    Path(property_id): Path<String>,
) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    match state
        .reconciliation
        .landlord_ledger()
        .entries_for_property(&PropertyId(property_id))
    {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(err) => store_error_response(&err),
    }
}

pub(crate) async fn list_tenant_entries_handler<S>(State(state): State<BooksState<S>>) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    match state.reconciliation.tenant_ledger().entries() {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(err) => store_error_response(&err),
    }
}

pub(crate) async fn tenant_entries_for_property_handler<S>(
    State(state): State<BooksState<S>>,
    Path(property_id): Path<String>,
) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    match state
        .reconciliation
        .tenant_ledger()
        .entries_for_property(&PropertyId(property_id))
    {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(err) => store_error_response(&err),
    }
}

pub(crate) async fn list_invoices_handler<S>(State(state): State<BooksState<S>>) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    match state.invoices.list() {
        Ok(invoices) => (StatusCode::OK, Json(invoices)).into_response(),
        Err(err) => invoice_error_response(err),
    }
}

pub(crate) async fn invoices_for_property_handler<S>(
    State(state): State<BooksState<S>>,
    Path(property_id): Path<String>,
) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    match state.invoices.for_property(&PropertyId(property_id)) {
        Ok(invoices) => (StatusCode::OK, Json(invoices)).into_response(),
        Err(err) => invoice_error_response(err),
    }
}

pub(crate) async fn create_invoice_handler<S>(
    State(state): State<BooksState<S>>,
    Json(draft): Json<InvoiceDraft>,
) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    if let Err(err) = draft.validate() {
        return validation_response(err);
    }

    match state.invoices.create(draft) {
        Ok(stored) => (StatusCode::OK, Json(stored)).into_response(),
        Err(err) => invoice_error_response(err),
    }
}

pub(crate) async fn get_invoice_handler<S>(
    State(state): State<BooksState<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    match state.invoices.get(&InvoiceId(id)) {
        Ok(Some(invoice)) => (StatusCode::OK, Json(invoice)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "invoice not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => invoice_error_response(err),
    }
}

pub(crate) async fn update_invoice_handler<S>(
    State(state): State<BooksState<S>>,
    Path(id): Path<String>,
    Json(draft): Json<InvoiceDraft>,
) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    if let Err(err) = draft.validate() {
        return validation_response(err);
    }

    match state.invoices.update(&InvoiceId(id), draft) {
        Ok(stored) => (StatusCode::OK, Json(stored)).into_response(),
        Err(err) => invoice_error_response(err),
    }
}

pub(crate) async fn delete_invoice_handler<S>(
    State(state): State<BooksState<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: TransactionStore + LedgerEntryStore + InvoiceStore + PropertyDirectory + 'static,
{
    match state.invoices.delete(&InvoiceId(id)) {
        Ok(Some(removed)) => (StatusCode::OK, Json(removed)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "invoice not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => invoice_error_response(err),
    }
}
