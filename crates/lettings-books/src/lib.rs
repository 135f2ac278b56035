//! Bookkeeping core for a lettings portfolio.
//!
//! The `books` module carries the interesting machinery: a category
//! classifier, the landlord and tenant balance ledgers, the invoice
//! payment-status evaluator, and the reconciliation service that keeps all
//! of them consistent with the banking-transaction log. The `directory`
//! module manages the reference entities (landlords, tenants, properties)
//! that the books only ever point at.

pub mod books;
pub mod config;
pub mod directory;
pub mod error;
pub mod memory;
pub mod telemetry;
