use std::sync::Arc;

use super::common::*;
use crate::books::classify::CategoryTable;
use crate::books::domain::EntryId;
use crate::books::ledger::{LandlordLedger, LedgerUpdate, TenantLedger};
use crate::books::repository::LedgerEntryStore;
use crate::memory::InMemoryStore;

fn ledgers() -> (
    Arc<InMemoryStore>,
    LandlordLedger<InMemoryStore>,
    TenantLedger<InMemoryStore>,
) {
    let store = Arc::new(InMemoryStore::default());
    let categories = Arc::new(CategoryTable::default());
    (
        store.clone(),
        LandlordLedger::new(store.clone(), categories.clone()),
        TenantLedger::new(store, categories),
    )
}

#[test]
fn landlord_debit_category_fills_debited_and_zeroes_due() {
    let (_, landlord, _) = ledgers();
    let transaction = draft("LL Rent Payment", 1_000.0).into_transaction(test_id("txn-l1"));

    let entry = landlord
        .create_entry(&transaction)
        .expect("create succeeds")
        .expect("classified");

    assert_eq!(entry.debited_to_ll, 1_000.0);
    assert_eq!(entry.amount_due_to_ll, 0.0);
    assert_eq!(entry.category, "LL Rent Payment");
    assert_eq!(entry.property, transaction.property);
}

#[test]
fn landlord_due_category_fills_due_and_zeroes_debited() {
    let (_, landlord, _) = ledgers();
    let transaction = draft("Maintenance Refund", 85.5).into_transaction(test_id("txn-l2"));

    let entry = landlord
        .create_entry(&transaction)
        .expect("create succeeds")
        .expect("classified");

    assert_eq!(entry.amount_due_to_ll, 85.5);
    assert_eq!(entry.debited_to_ll, 0.0);
}

#[test]
fn tenant_categories_never_reach_the_landlord_ledger() {
    let (store, landlord, _) = ledgers();
    let transaction = draft("Tenant Credit", 500.0).into_transaction(test_id("txn-l3"));

    let entry = landlord.create_entry(&transaction).expect("create succeeds");
    assert!(entry.is_none());
    assert!(store
        .list_landlord_entries()
        .expect("list succeeds")
        .is_empty());
}

#[test]
fn tenant_paid_category_fills_paid_and_zeroes_due() {
    let (_, _, tenant) = ledgers();
    let transaction = draft("Tenant Credit", 640.0).into_transaction(test_id("txn-t1"));

    let entry = tenant
        .create_entry(&transaction)
        .expect("create succeeds")
        .expect("classified");

    assert_eq!(entry.rent_paid_by_tenant, 640.0);
    assert_eq!(entry.rent_due, 0.0);
}

#[test]
fn tenant_due_category_fills_due_side() {
    let (_, _, tenant) = ledgers();
    let transaction =
        draft("Agreed Rent Increase (LL-/TRI)", 75.0).into_transaction(test_id("txn-t2"));

    let entry = tenant
        .create_entry(&transaction)
        .expect("create succeeds")
        .expect("classified");

    assert_eq!(entry.rent_due, 75.0);
    assert_eq!(entry.rent_paid_by_tenant, 0.0);
}

#[test]
fn overlapping_category_lands_on_the_landlord_side_only() {
    let (store, landlord, tenant) = ledgers();
    let transaction =
        draft("Deposit Received by Tenant", 900.0).into_transaction(test_id("txn-o1"));

    assert!(landlord
        .create_entry(&transaction)
        .expect("create succeeds")
        .is_some());
    assert!(tenant
        .create_entry(&transaction)
        .expect("create succeeds")
        .is_none());
    assert!(store
        .list_tenant_entries()
        .expect("list succeeds")
        .is_empty());
}

#[test]
fn update_replaces_every_field_and_zeroes_the_other_side() {
    let (_, landlord, _) = ledgers();
    let original = draft("LL Rent Payment", 1_000.0).into_transaction(test_id("txn-u1"));
    let entry = landlord
        .create_entry(&original)
        .expect("create succeeds")
        .expect("classified");

    let mut revised = draft("Maintenance Refund", 120.0);
    revised.rental_period = Some("2024-03-01 - 2024-03-31".to_string());
    let revised = revised.into_transaction(test_id("txn-u1"));

    let updated = match landlord
        .update_entry(&entry.id, &revised)
        .expect("update succeeds")
    {
        LedgerUpdate::Updated(updated) => updated,
        LedgerUpdate::Declassified => panic!("still a landlord category"),
    };

    assert_eq!(updated.id, entry.id);
    assert_eq!(updated.amount_due_to_ll, 120.0);
    assert_eq!(updated.debited_to_ll, 0.0);
    assert_eq!(
        updated.rental_period.as_deref(),
        Some("2024-03-01 - 2024-03-31")
    );
}

#[test]
fn update_reports_declassification_without_deleting() {
    let (store, landlord, _) = ledgers();
    let original = draft("LL Rent Payment", 1_000.0).into_transaction(test_id("txn-u2"));
    let entry = landlord
        .create_entry(&original)
        .expect("create succeeds")
        .expect("classified");

    let revised = draft("Tenant Credit", 1_000.0).into_transaction(test_id("txn-u2"));
    let outcome = landlord
        .update_entry(&entry.id, &revised)
        .expect("update succeeds");

    assert!(matches!(outcome, LedgerUpdate::Declassified));
    // Deciding what happens to the orphaned entry is the reconciliation
    // service's job; the ledger must leave it alone.
    assert_eq!(
        store.list_landlord_entries().expect("list succeeds").len(),
        1
    );
}

#[test]
fn delete_is_idempotent() {
    let (_, landlord, _) = ledgers();
    let id = EntryId("lle-missing".to_string());
    landlord.delete_entry(&id).expect("first delete succeeds");
    landlord.delete_entry(&id).expect("second delete succeeds");
}

#[test]
fn property_listing_orders_by_rental_period() {
    let (_, landlord, _) = ledgers();

    let mut march = draft("LL Rent Payment", 1_000.0);
    march.rental_period = Some("2024-03-01 - 2024-03-31".to_string());
    let mut february = draft("LL Rent Payment", 1_000.0);
    february.rental_period = Some("2024-02-01 - 2024-02-29".to_string());

    landlord
        .create_entry(&march.into_transaction(test_id("txn-m")))
        .expect("create succeeds");
    landlord
        .create_entry(&february.into_transaction(test_id("txn-f")))
        .expect("create succeeds");

    let listed = landlord
        .entries_for_property(&property_one())
        .expect("list succeeds");
    assert_eq!(listed.len(), 2);
    assert!(listed[0].rental_period < listed[1].rental_period);
}

fn test_id(raw: &str) -> crate::books::domain::TransactionId {
    crate::books::domain::TransactionId(raw.to_string())
}
