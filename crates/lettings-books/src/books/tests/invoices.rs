use super::common::*;
use crate::books::domain::{InvoiceId, PaymentStatus};
use crate::books::invoices::InvoiceError;

#[test]
fn duplicate_invoice_number_is_rejected_on_create() {
    let (store, _) = build_reconciliation();
    let invoices = build_invoice_service(store);

    invoices
        .create(invoice_draft("INV-100", 500.0))
        .expect("first create succeeds");

    let duplicate = invoices.create(invoice_draft("INV-100", 120.0));
    assert!(matches!(duplicate, Err(InvoiceError::DuplicateNumber(_))));
}

#[test]
fn update_may_keep_its_own_number_but_not_take_anothers() {
    let (store, _) = build_reconciliation();
    let invoices = build_invoice_service(store);

    let first = invoices
        .create(invoice_draft("INV-100", 500.0))
        .expect("create succeeds");
    invoices
        .create(invoice_draft("INV-101", 80.0))
        .expect("create succeeds");

    let kept = invoices.update(&first.id, invoice_draft("INV-100", 550.0));
    assert!(kept.is_ok());

    let stolen = invoices.update(&first.id, invoice_draft("INV-101", 550.0));
    assert!(matches!(stolen, Err(InvoiceError::DuplicateNumber(_))));
}

#[test]
fn update_recomputes_status_from_the_transaction_log() {
    let (store, reconciliation) = build_reconciliation();
    let invoices = build_invoice_service(store);

    let invoice = invoices
        .create(invoice_draft("INV-100", 500.0))
        .expect("create succeeds");
    reconciliation
        .create_transaction(settlement_draft("INV-100", 500.0))
        .expect("settlement recorded");

    // The client may claim any status it likes; the log wins.
    let mut draft = invoice_draft("INV-100", 500.0);
    draft.payment_status = PaymentStatus::Unpaid;
    let updated = invoices.update(&invoice.id, draft).expect("update succeeds");
    assert_eq!(updated.payment_status, PaymentStatus::PaidByAgent);
}

#[test]
fn landlord_charge_flag_wins_on_update() {
    let (store, _) = build_reconciliation();
    let invoices = build_invoice_service(store);

    let invoice = invoices
        .create(invoice_draft("INV-100", 500.0))
        .expect("create succeeds");

    let mut draft = invoice_draft("INV-100", 500.0);
    draft.add_to_ll_balance = true;
    let updated = invoices.update(&invoice.id, draft).expect("update succeeds");
    assert_eq!(updated.payment_status, PaymentStatus::ChargedToLandlord);
}

#[test]
fn create_trusts_the_submitted_status() {
    let (store, _) = build_reconciliation();
    let invoices = build_invoice_service(store);

    let mut draft = invoice_draft("INV-200", 90.0);
    draft.payment_status = PaymentStatus::PaidByAgent;
    let stored = invoices.create(draft).expect("create succeeds");
    assert_eq!(stored.payment_status, PaymentStatus::PaidByAgent);
}

#[test]
fn updating_an_unknown_invoice_is_an_error() {
    let (store, _) = build_reconciliation();
    let invoices = build_invoice_service(store);

    let missing = InvoiceId("inv-missing".to_string());
    let result = invoices.update(&missing, invoice_draft("INV-300", 10.0));
    assert!(matches!(result, Err(InvoiceError::UnknownInvoice(_))));
}

#[test]
fn delete_reports_absence_instead_of_failing() {
    let (store, _) = build_reconciliation();
    let invoices = build_invoice_service(store);

    let stored = invoices
        .create(invoice_draft("INV-100", 500.0))
        .expect("create succeeds");

    assert!(invoices
        .delete(&stored.id)
        .expect("first delete succeeds")
        .is_some());
    assert!(invoices
        .delete(&stored.id)
        .expect("second delete succeeds")
        .is_none());
}

#[test]
fn listings_are_scoped_by_property() {
    let (store, _) = build_reconciliation();
    let invoices = build_invoice_service(store);

    invoices
        .create(invoice_draft("INV-100", 500.0))
        .expect("create succeeds");
    let mut elsewhere = invoice_draft("INV-101", 75.0);
    elsewhere.property = None;
    invoices.create(elsewhere).expect("create succeeds");

    let scoped = invoices
        .for_property(&property_one())
        .expect("list succeeds");
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].number, "INV-100");

    assert_eq!(invoices.list().expect("list succeeds").len(), 2);
}
