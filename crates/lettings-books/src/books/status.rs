use super::classify::CategoryTable;
use super::domain::{BankingTransaction, Invoice, PaymentStatus};

/// Derive an invoice's payment status from its flags and the transactions
/// referencing its number. Read-only; the caller persists the result.
///
/// Evaluation order, first match wins:
/// 1. `add_to_ll_balance` set: the whole invoice is charged to the landlord.
/// 2. Transactions under the agent invoice-settlement category summing to
///    exactly the invoice amount: paid by the agent; a positive partial sum:
///    partially paid.
/// 3. The same test over the furniture-allowance category.
/// 4. Otherwise unpaid.
///
/// Sums compare with exact f64 equality; see DESIGN.md on accumulated
/// drift.
pub fn payment_status(
    invoice: &Invoice,
    related: &[BankingTransaction],
    categories: &CategoryTable,
) -> PaymentStatus {
    if invoice.add_to_ll_balance {
        return PaymentStatus::ChargedToLandlord;
    }

    for settlement in [
        categories.invoice_settlement(),
        categories.furniture_allowance(),
    ] {
        let total: f64 = related
            .iter()
            .filter(|transaction| transaction.category == settlement)
            .map(|transaction| transaction.amount)
            .sum();

        if total == invoice.amount {
            return PaymentStatus::PaidByAgent;
        }
        if total > 0.0 {
            return PaymentStatus::PartiallyPaid;
        }
    }

    PaymentStatus::Unpaid
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::books::domain::{InvoiceId, TransactionDirection, TransactionId};

    fn invoice(amount: f64, add_to_ll_balance: bool) -> Invoice {
        Invoice {
            id: InvoiceId("inv-000100".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date"),
            number: "INV-100".to_string(),
            property: None,
            rental_period: None,
            supplier: Some("Acme Maintenance".to_string()),
            category: None,
            description: None,
            amount,
            payment_status: PaymentStatus::Unpaid,
            date_agent_paid: None,
            add_to_ll_balance,
            paid_by_tenant: false,
            reconciled: false,
            paid_amount: None,
            paid_amount_by_tenant: None,
        }
    }

    fn settlement(category: &str, amount: f64) -> BankingTransaction {
        BankingTransaction {
            id: TransactionId(format!("txn-{category}-{amount}")),
            date: NaiveDate::from_ymd_opt(2024, 2, 10).expect("valid date"),
            direction: TransactionDirection::Debit,
            category: category.to_string(),
            property: None,
            invoice_number: Some("INV-100".to_string()),
            amount,
            rental_period: None,
            reference: None,
            to_from_account: None,
            running_balance: None,
            complete: false,
            invoice_listed: true,
            ll_entry: None,
            tenant_entry: None,
        }
    }

    #[test]
    fn exact_settlement_sum_is_paid_by_agent() {
        let table = CategoryTable::default();
        let related = vec![
            settlement("Payment of Invoices", 200.0),
            settlement("Payment of Invoices", 300.0),
        ];
        assert_eq!(
            payment_status(&invoice(500.0, false), &related, &table),
            PaymentStatus::PaidByAgent
        );
    }

    #[test]
    fn partial_settlement_sum_is_partially_paid() {
        let table = CategoryTable::default();
        let related = vec![settlement("Payment of Invoices", 300.0)];
        assert_eq!(
            payment_status(&invoice(500.0, false), &related, &table),
            PaymentStatus::PartiallyPaid
        );
    }

    #[test]
    fn no_settlement_transactions_is_unpaid() {
        let table = CategoryTable::default();
        assert_eq!(
            payment_status(&invoice(500.0, false), &[], &table),
            PaymentStatus::Unpaid
        );
    }

    #[test]
    fn landlord_charge_flag_short_circuits_everything() {
        let table = CategoryTable::default();
        let related = vec![settlement("Payment of Invoices", 500.0)];
        assert_eq!(
            payment_status(&invoice(500.0, true), &related, &table),
            PaymentStatus::ChargedToLandlord
        );
    }

    #[test]
    fn furniture_allowance_is_consulted_after_agent_payments() {
        let table = CategoryTable::default();
        let related = vec![settlement("LL Furniture Allowance (LLRR/T--)", 500.0)];
        assert_eq!(
            payment_status(&invoice(500.0, false), &related, &table),
            PaymentStatus::PaidByAgent
        );

        let partial = vec![settlement("LL Furniture Allowance (LLRR/T--)", 120.0)];
        assert_eq!(
            payment_status(&invoice(500.0, false), &partial, &table),
            PaymentStatus::PartiallyPaid
        );
    }

    #[test]
    fn agent_partial_payment_masks_furniture_settlement() {
        // A positive agent-payment sum decides the status before the
        // furniture category is ever consulted.
        let table = CategoryTable::default();
        let related = vec![
            settlement("Payment of Invoices", 100.0),
            settlement("LL Furniture Allowance (LLRR/T--)", 400.0),
        ];
        assert_eq!(
            payment_status(&invoice(500.0, false), &related, &table),
            PaymentStatus::PartiallyPaid
        );
    }

    #[test]
    fn unrelated_categories_do_not_count_toward_settlement() {
        let table = CategoryTable::default();
        let related = vec![settlement("LL Rent Payment", 500.0)];
        assert_eq!(
            payment_status(&invoice(500.0, false), &related, &table),
            PaymentStatus::Unpaid
        );
    }
}
