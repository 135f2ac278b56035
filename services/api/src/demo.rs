use std::sync::Arc;

use chrono::NaiveDate;
use clap::Args;

use crate::infra::{build_services, Services};
use lettings_books::books::{
    BooksState, CategoryTable, InvoiceDraft, InvoiceId, PaymentStatus, PropertyId,
    ReconciliationError, TransactionDirection, TransactionDraft,
};
use lettings_books::directory::{LandlordDraft, PropertyDraft, TenantDraft};
use lettings_books::error::AppError;
use lettings_books::memory::InMemoryStore;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Dump the final records as pretty-printed JSON
    #[arg(long)]
    pub(crate) json: bool,
}

fn demo_date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, day).unwrap_or_default()
}

fn transaction(property: &PropertyId, category: &str, amount: f64) -> TransactionDraft {
    TransactionDraft {
        date: demo_date(5),
        direction: TransactionDirection::Credit,
        category: category.to_string(),
        property: Some(property.clone()),
        invoice_number: None,
        amount,
        rental_period: Some("2024-02-01 - 2024-02-29".to_string()),
        reference: Some("FPS CREDIT".to_string()),
        to_from_account: Some("20-45-11 55667788".to_string()),
        running_balance: None,
        complete: false,
        invoice_listed: false,
    }
}

/// Seed a one-property portfolio and narrate a reconciliation scenario.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let Services { books, directory } = build_services(Arc::new(CategoryTable::default()));

    println!("== Seeding the directory ==");
    let landlord = directory.landlords.create(LandlordDraft {
        ll_id: "LL-01".to_string(),
        name: "Avery Holt".to_string(),
        rent_amount: 1_000.0,
        rent_period_start: Some(demo_date(1)),
        rent_period_end: Some(demo_date(28)),
        contract_start_date: Some(demo_date(1)),
    })?;
    let tenant = directory.tenants.create(TenantDraft {
        t_id: "T-01".to_string(),
        name: "Noor Patel".to_string(),
        rent_amount: 1_000.0,
        tenancy_start_date: Some(demo_date(1)),
    })?;
    let property = directory.properties.create(PropertyDraft {
        p_id: "P-01".to_string(),
        address: "14 Quay Street".to_string(),
        post_code: Some("IP1 3QJ".to_string()),
        landlord_id: Some(landlord.id.clone()),
        tenant_id: Some(tenant.id.clone()),
    })?;
    println!(
        "  landlord {} / tenant {} / property {}",
        landlord.ll_id, tenant.t_id, property.p_id
    );

    println!("\n== Raising an invoice ==");
    let invoice = books.invoices.create(InvoiceDraft {
        date: demo_date(2),
        number: "INV-2024-017".to_string(),
        property: Some(property.id.clone()),
        rental_period: None,
        supplier: Some("Acme Maintenance".to_string()),
        category: Some("Maintenance".to_string()),
        description: Some("Boiler service".to_string()),
        amount: 500.0,
        payment_status: PaymentStatus::Unpaid,
        date_agent_paid: None,
        add_to_ll_balance: false,
        paid_by_tenant: false,
        reconciled: false,
        paid_amount: None,
        paid_amount_by_tenant: None,
    })?;
    println!(
        "  {} for {:.2} ({})",
        invoice.number,
        invoice.amount,
        invoice.payment_status.label()
    );

    println!("\n== Recording bank movements ==");
    let rent = books
        .reconciliation
        .create_transaction(transaction(&property.id, "LL Rent Payment", 1_000.0))?;
    println!(
        "  {} {:.2} -> landlord entry {}",
        rent.category,
        rent.amount,
        rent.ll_entry
            .as_ref()
            .map(|id| id.0.as_str())
            .unwrap_or("none")
    );

    let increase = books.reconciliation.create_transaction(transaction(
        &property.id,
        "Agreed Rent Increase (LL-/TRI)",
        75.0,
    ))?;
    println!(
        "  {} {:.2} -> tenant entry {}",
        increase.category,
        increase.amount,
        increase
            .tenant_entry
            .as_ref()
            .map(|id| id.0.as_str())
            .unwrap_or("none")
    );

    let mut settle = transaction(&property.id, "Payment of Invoices", 300.0);
    settle.direction = TransactionDirection::Debit;
    settle.invoice_number = Some(invoice.number.clone());
    books.reconciliation.create_transaction(settle)?;
    print_invoice_status(&books, &invoice.id)?;

    let mut settle_rest = transaction(&property.id, "Payment of Invoices", 200.0);
    settle_rest.direction = TransactionDirection::Debit;
    settle_rest.invoice_number = Some(invoice.number.clone());
    let settle_rest = books.reconciliation.create_transaction(settle_rest)?;
    print_invoice_status(&books, &invoice.id)?;

    println!("\n== Reclassifying the rent payment ==");
    let moved = books
        .reconciliation
        .update_transaction(&rent.id, transaction(&property.id, "Tenant Credit", 1_000.0))?;
    println!(
        "  landlord link: {:?}, tenant link: {}",
        moved.ll_entry,
        moved
            .tenant_entry
            .as_ref()
            .map(|id| id.0.as_str())
            .unwrap_or("none")
    );

    println!("\n== Removing the second settlement ==");
    books.reconciliation.delete_transaction(&settle_rest.id)?;
    print_invoice_status(&books, &invoice.id)?;

    println!("\n== Balances for {} ==", property.p_id);
    let landlord_entries = books
        .reconciliation
        .landlord_ledger()
        .entries_for_property(&property.id)
        .map_err(ReconciliationError::from)?;
    for entry in &landlord_entries {
        println!(
            "  landlord | {:<40} due {:>9.2} debited {:>9.2}",
            entry.category, entry.amount_due_to_ll, entry.debited_to_ll
        );
    }
    let tenant_entries = books
        .reconciliation
        .tenant_ledger()
        .entries_for_property(&property.id)
        .map_err(ReconciliationError::from)?;
    for entry in &tenant_entries {
        println!(
            "  tenant   | {:<40} due {:>9.2} paid {:>9.2}",
            entry.category, entry.rent_due, entry.rent_paid_by_tenant
        );
    }

    if args.json {
        println!("\n== Records ==");
        let transactions = books.reconciliation.transactions()?;
        println!(
            "{}",
            serde_json::to_string_pretty(&transactions).unwrap_or_default()
        );
        let invoices = books.invoices.list()?;
        println!(
            "{}",
            serde_json::to_string_pretty(&invoices).unwrap_or_default()
        );
    }

    Ok(())
}

fn print_invoice_status(
    books: &BooksState<InMemoryStore>,
    id: &InvoiceId,
) -> Result<(), AppError> {
    if let Some(invoice) = books.invoices.get(id)? {
        println!(
            "  invoice {} is now {}",
            invoice.number,
            invoice.payment_status.label()
        );
    }
    Ok(())
}
