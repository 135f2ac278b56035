use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for banking transactions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(pub String);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for ledger entries on either balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub String);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for invoices. Distinct from the user-facing invoice
/// number, which is caller-supplied and unique among invoices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InvoiceId(pub String);

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to a property record. The books never dereference it
/// beyond copying it into ledger entries and filtering by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub String);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a bank movement credits or debits the agency account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionDirection {
    Credit,
    Debit,
}

/// One record per bank movement, as stored. At most one of `ll_entry` and
/// `tenant_entry` is set in steady state; a reclassifying update clears one
/// side and sets the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankingTransaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub direction: TransactionDirection,
    pub category: String,
    pub property: Option<PropertyId>,
    pub invoice_number: Option<String>,
    pub amount: f64,
    pub rental_period: Option<String>,
    pub reference: Option<String>,
    pub to_from_account: Option<String>,
    pub running_balance: Option<f64>,
    pub complete: bool,
    pub invoice_listed: bool,
    pub ll_entry: Option<EntryId>,
    pub tenant_entry: Option<EntryId>,
}

/// Client payload for creating or replacing a banking transaction. Ledger
/// back-references are never accepted from the client; the reconciliation
/// service owns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub direction: TransactionDirection,
    pub category: String,
    #[serde(default)]
    pub property: Option<PropertyId>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub rental_period: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub to_from_account: Option<String>,
    #[serde(default)]
    pub running_balance: Option<f64>,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub invoice_listed: bool,
}

impl TransactionDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category.len() > 255 {
            return Err(ValidationError::TooLong {
                field: "category",
                max: 255,
            });
        }
        if !(0.0..=100_000.0).contains(&self.amount) {
            return Err(ValidationError::OutOfRange {
                field: "amount",
                min: 0.0,
                max: 100_000.0,
            });
        }
        if let Some(number) = &self.invoice_number {
            if number.len() > 20 {
                return Err(ValidationError::TooLong {
                    field: "invoice_number",
                    max: 20,
                });
            }
        }
        Ok(())
    }

    pub fn into_transaction(self, id: TransactionId) -> BankingTransaction {
        BankingTransaction {
            id,
            date: self.date,
            direction: self.direction,
            category: self.category,
            property: self.property,
            invoice_number: self.invoice_number,
            amount: self.amount,
            rental_period: self.rental_period,
            reference: self.reference,
            to_from_account: self.to_from_account,
            running_balance: self.running_balance,
            complete: self.complete,
            invoice_listed: self.invoice_listed,
            ll_entry: None,
            tenant_entry: None,
        }
    }
}

/// Derived record on the landlord balance sheet. Exactly one of the amount
/// pair is non-zero; the other is written as zero, never left stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandlordLedgerEntry {
    pub id: EntryId,
    pub property: Option<PropertyId>,
    pub category: String,
    pub date: NaiveDate,
    pub rental_period: Option<String>,
    pub amount_due_to_ll: f64,
    pub debited_to_ll: f64,
}

/// Derived record on the tenant balance sheet, symmetric to the landlord
/// side with its own amount pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantLedgerEntry {
    pub id: EntryId,
    pub property: Option<PropertyId>,
    pub category: String,
    pub date: NaiveDate,
    pub rental_period: Option<String>,
    pub rent_due: f64,
    pub rent_paid_by_tenant: f64,
}

/// Closed enumeration of invoice payment states, serialized with the labels
/// the books have always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "Unpaid")]
    Unpaid,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    #[serde(rename = "Paid by the Agent")]
    PaidByAgent,
    #[serde(rename = "Charged to Landlord")]
    ChargedToLandlord,
}

impl PaymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::PartiallyPaid => "Partially Paid",
            PaymentStatus::PaidByAgent => "Paid by the Agent",
            PaymentStatus::ChargedToLandlord => "Charged to Landlord",
        }
    }
}

/// Supplier invoice raised against a property. `payment_status` is always a
/// recomputation over the transaction log, never patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub date: NaiveDate,
    pub number: String,
    pub property: Option<PropertyId>,
    pub rental_period: Option<String>,
    pub supplier: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: f64,
    pub payment_status: PaymentStatus,
    pub date_agent_paid: Option<NaiveDate>,
    pub add_to_ll_balance: bool,
    pub paid_by_tenant: bool,
    pub reconciled: bool,
    pub paid_amount: Option<f64>,
    pub paid_amount_by_tenant: Option<f64>,
}

/// Client payload for creating or replacing an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub date: NaiveDate,
    pub number: String,
    #[serde(default)]
    pub property: Option<PropertyId>,
    #[serde(default)]
    pub rental_period: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub date_agent_paid: Option<NaiveDate>,
    #[serde(default)]
    pub add_to_ll_balance: bool,
    #[serde(default)]
    pub paid_by_tenant: bool,
    #[serde(default)]
    pub reconciled: bool,
    #[serde(default)]
    pub paid_amount: Option<f64>,
    #[serde(default)]
    pub paid_amount_by_tenant: Option<f64>,
}

impl InvoiceDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.number.is_empty() {
            return Err(ValidationError::Required { field: "number" });
        }
        if self.number.len() > 20 {
            return Err(ValidationError::TooLong {
                field: "number",
                max: 20,
            });
        }
        if !(0.0..=100_000.0).contains(&self.amount) {
            return Err(ValidationError::OutOfRange {
                field: "amount",
                min: 0.0,
                max: 100_000.0,
            });
        }
        for (field, value) in [
            ("supplier", &self.supplier),
            ("category", &self.category),
            ("description", &self.description),
        ] {
            if let Some(value) = value {
                if value.len() > 255 {
                    return Err(ValidationError::TooLong { field, max: 255 });
                }
            }
        }
        Ok(())
    }

    pub fn into_invoice(self, id: InvoiceId) -> Invoice {
        Invoice {
            id,
            date: self.date,
            number: self.number,
            property: self.property,
            rental_period: self.rental_period,
            supplier: self.supplier,
            category: self.category,
            description: self.description,
            amount: self.amount,
            payment_status: self.payment_status,
            date_agent_paid: self.date_agent_paid,
            add_to_ll_balance: self.add_to_ll_balance,
            paid_by_tenant: self.paid_by_tenant,
            reconciled: self.reconciled,
            paid_amount: self.paid_amount,
            paid_amount_by_tenant: self.paid_amount_by_tenant,
        }
    }
}

/// Rejected payloads, reported before any orchestration runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
}
