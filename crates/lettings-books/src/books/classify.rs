use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Which ledger, and which side of that ledger's amount pair, a transaction
/// category funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEffect {
    /// Money debited to the landlord's balance (`debited_to_ll`).
    DebitedToLandlord,
    /// Money the agency owes back to the landlord (`amount_due_to_ll`).
    DueToLandlord,
    /// Rent the tenant now owes (`rent_due`).
    RentDue,
    /// Money credited against the tenant's balance (`rent_paid_by_tenant`).
    RentPaid,
}

impl LedgerEffect {
    pub const fn is_landlord(self) -> bool {
        matches!(
            self,
            LedgerEffect::DebitedToLandlord | LedgerEffect::DueToLandlord
        )
    }

    pub const fn is_tenant(self) -> bool {
        matches!(self, LedgerEffect::RentDue | LedgerEffect::RentPaid)
    }
}

/// Immutable classification rules, built once at startup.
///
/// The default table carries the closed production vocabulary. An operator
/// can replace it wholesale with a JSON document (see
/// [`CategoryTable::from_path`]); partially overriding individual sets is
/// deliberately not supported, so a rules file is always self-describing.
///
/// Lookup order is landlord-debit, landlord-due, tenant-due, tenant-paid,
/// first match wins. Several rent-reduction categories appear on both the
/// landlord-debit and tenant-paid lists; the fixed order resolves those to
/// the landlord side.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryTable {
    landlord_debit: BTreeSet<String>,
    landlord_due: BTreeSet<String>,
    tenant_due: BTreeSet<String>,
    tenant_paid: BTreeSet<String>,
    invoice_settlement: String,
    furniture_allowance: String,
}

impl Default for CategoryTable {
    fn default() -> Self {
        let to_set = |labels: &[&str]| labels.iter().map(|label| label.to_string()).collect();

        Self {
            landlord_debit: to_set(&[
                "Agent Top Up",
                "Agent Invoice Payment",
                "LL Rent Payment",
                "Agreed Rent Reduction (LLRR/TRR)",
                "Agreed Rent Reduction Furniture (LLRR/TRR)",
                "Agreed Rent Reduction Maintenance (LLRR/TRR)",
                "Deposit Received by Tenant",
            ]),
            landlord_due: to_set(&[
                "Maintenance Refund",
                "Furniture Refund",
                "Landlord Invoice Refund",
            ]),
            tenant_due: to_set(&["Agreed Rent Increase (LL-/TRI)"]),
            tenant_paid: to_set(&[
                "Tenant Credit",
                "Deposit Paid by Tenant",
                "Tenant Invoice Payment",
                "Deposit Received by Tenant",
                "Agreed Rent Reduction (LLRR/TRR)",
                "Agreed Rent Reduction Furniture (LLRR/TRR)",
                "Agreed Rent Reduction Maintenance (LLRR/TRR)",
                "Agent Rent Reduction (LL-/TRR)",
                "Statement Amendment",
                "Refund",
            ]),
            invoice_settlement: "Payment of Invoices".to_string(),
            furniture_allowance: "LL Furniture Allowance (LLRR/T--)".to_string(),
        }
    }
}

impl CategoryTable {
    /// Total classification function. Unknown categories yield `None` and
    /// must not produce a ledger entry.
    pub fn effect_of(&self, category: &str) -> Option<LedgerEffect> {
        if self.landlord_debit.contains(category) {
            Some(LedgerEffect::DebitedToLandlord)
        } else if self.landlord_due.contains(category) {
            Some(LedgerEffect::DueToLandlord)
        } else if self.tenant_due.contains(category) {
            Some(LedgerEffect::RentDue)
        } else if self.tenant_paid.contains(category) {
            Some(LedgerEffect::RentPaid)
        } else {
            None
        }
    }

    /// Category whose transactions settle an invoice on the agent's behalf.
    pub fn invoice_settlement(&self) -> &str {
        &self.invoice_settlement
    }

    /// Fallback settlement category consulted when no direct agent payment
    /// matches an invoice.
    pub fn furniture_allowance(&self) -> &str {
        &self.furniture_allowance
    }

    pub fn from_path(path: &Path) -> Result<Self, CategoryRulesError> {
        let raw = fs::read(path)?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CategoryRulesError {
    #[error("unable to read category rules: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse category rules: {0}")]
    Parse(#[from] serde_json::Error),
}
