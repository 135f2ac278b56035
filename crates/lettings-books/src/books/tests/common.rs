use std::sync::Arc;

use chrono::NaiveDate;

use crate::books::classify::CategoryTable;
use crate::books::domain::{
    InvoiceDraft, PaymentStatus, PropertyId, TransactionDirection, TransactionDraft,
};
use crate::books::invoices::InvoiceService;
use crate::books::reconcile::ReconciliationService;
use crate::memory::InMemoryStore;

pub(super) fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 5).expect("valid date")
}

pub(super) fn property_one() -> PropertyId {
    PropertyId("prop-p1".to_string())
}

pub(super) fn build_reconciliation() -> (Arc<InMemoryStore>, ReconciliationService<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::default());
    let categories = Arc::new(CategoryTable::default());
    let service = ReconciliationService::new(store.clone(), categories);
    (store, service)
}

pub(super) fn build_invoice_service(store: Arc<InMemoryStore>) -> InvoiceService<InMemoryStore> {
    InvoiceService::new(store, Arc::new(CategoryTable::default()))
}

pub(super) fn draft(category: &str, amount: f64) -> TransactionDraft {
    TransactionDraft {
        date: sample_date(),
        direction: TransactionDirection::Credit,
        category: category.to_string(),
        property: Some(property_one()),
        invoice_number: None,
        amount,
        rental_period: Some("2024-02-01 - 2024-02-29".to_string()),
        reference: Some("FPS CREDIT".to_string()),
        to_from_account: None,
        running_balance: None,
        complete: false,
        invoice_listed: false,
    }
}

pub(super) fn settlement_draft(number: &str, amount: f64) -> TransactionDraft {
    let mut draft = draft("Payment of Invoices", amount);
    draft.direction = TransactionDirection::Debit;
    draft.invoice_number = Some(number.to_string());
    draft
}

pub(super) fn invoice_draft(number: &str, amount: f64) -> InvoiceDraft {
    InvoiceDraft {
        date: sample_date(),
        number: number.to_string(),
        property: Some(property_one()),
        rental_period: None,
        supplier: Some("Acme Maintenance".to_string()),
        category: Some("Maintenance".to_string()),
        description: Some("Boiler service".to_string()),
        amount,
        payment_status: PaymentStatus::Unpaid,
        date_agent_paid: None,
        add_to_ll_balance: false,
        paid_by_tenant: false,
        reconciled: false,
        paid_amount: None,
        paid_amount_by_tenant: None,
    }
}
