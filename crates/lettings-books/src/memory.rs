//! In-memory reference backend for every store trait.
//!
//! The service binary, the demo, and the test suites all run against this
//! backend; a deployment against a real document store only needs to
//! implement the same traits.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::books::domain::{
    BankingTransaction, EntryId, Invoice, InvoiceId, LandlordLedgerEntry, PropertyId,
    TenantLedgerEntry, TransactionId,
};
use crate::books::repository::{
    InvoiceStore, LedgerEntryStore, PropertyDirectory, PropertyRef, RepositoryError,
    TransactionStore,
};
use crate::directory::domain::{Landlord, LandlordId, Property, Tenant, TenantId};
use crate::directory::repository::DirectoryStore;

#[derive(Debug, Default)]
struct Collections {
    transactions: BTreeMap<String, BankingTransaction>,
    landlord_entries: BTreeMap<String, LandlordLedgerEntry>,
    tenant_entries: BTreeMap<String, TenantLedgerEntry>,
    invoices: BTreeMap<String, Invoice>,
    landlords: BTreeMap<String, Landlord>,
    tenants: BTreeMap<String, Tenant>,
    properties: BTreeMap<String, Property>,
}

/// Single-process store keeping every collection behind one lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Collections>,
}

impl InMemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, Collections>, RepositoryError> {
        self.inner
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }
}

impl TransactionStore for InMemoryStore {
    fn insert_transaction(
        &self,
        transaction: BankingTransaction,
    ) -> Result<BankingTransaction, RepositoryError> {
        let mut inner = self.lock()?;
        if inner.transactions.contains_key(&transaction.id.0) {
            return Err(RepositoryError::Conflict);
        }
        inner
            .transactions
            .insert(transaction.id.0.clone(), transaction.clone());
        Ok(transaction)
    }

    fn update_transaction(
        &self,
        transaction: BankingTransaction,
    ) -> Result<BankingTransaction, RepositoryError> {
        let mut inner = self.lock()?;
        if !inner.transactions.contains_key(&transaction.id.0) {
            return Err(RepositoryError::NotFound);
        }
        inner
            .transactions
            .insert(transaction.id.0.clone(), transaction.clone());
        Ok(transaction)
    }

    fn fetch_transaction(
        &self,
        id: &TransactionId,
    ) -> Result<Option<BankingTransaction>, RepositoryError> {
        Ok(self.lock()?.transactions.get(&id.0).cloned())
    }

    fn delete_transaction(&self, id: &TransactionId) -> Result<(), RepositoryError> {
        self.lock()?.transactions.remove(&id.0);
        Ok(())
    }

    fn list_transactions(&self) -> Result<Vec<BankingTransaction>, RepositoryError> {
        let mut transactions: Vec<_> = self.lock()?.transactions.values().cloned().collect();
        transactions.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(transactions)
    }

    fn transactions_for_invoice(
        &self,
        number: &str,
    ) -> Result<Vec<BankingTransaction>, RepositoryError> {
        Ok(self
            .lock()?
            .transactions
            .values()
            .filter(|transaction| transaction.invoice_number.as_deref() == Some(number))
            .cloned()
            .collect())
    }
}

impl LedgerEntryStore for InMemoryStore {
    fn insert_landlord_entry(
        &self,
        entry: LandlordLedgerEntry,
    ) -> Result<LandlordLedgerEntry, RepositoryError> {
        let mut inner = self.lock()?;
        if inner.landlord_entries.contains_key(&entry.id.0) {
            return Err(RepositoryError::Conflict);
        }
        inner
            .landlord_entries
            .insert(entry.id.0.clone(), entry.clone());
        Ok(entry)
    }

    fn update_landlord_entry(
        &self,
        entry: LandlordLedgerEntry,
    ) -> Result<LandlordLedgerEntry, RepositoryError> {
        let mut inner = self.lock()?;
        if !inner.landlord_entries.contains_key(&entry.id.0) {
            return Err(RepositoryError::NotFound);
        }
        inner
            .landlord_entries
            .insert(entry.id.0.clone(), entry.clone());
        Ok(entry)
    }

    fn delete_landlord_entry(&self, id: &EntryId) -> Result<(), RepositoryError> {
        self.lock()?.landlord_entries.remove(&id.0);
        Ok(())
    }

    fn list_landlord_entries(&self) -> Result<Vec<LandlordLedgerEntry>, RepositoryError> {
        let mut entries: Vec<_> = self.lock()?.landlord_entries.values().cloned().collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(entries)
    }

    fn landlord_entries_for_property(
        &self,
        property: &PropertyId,
    ) -> Result<Vec<LandlordLedgerEntry>, RepositoryError> {
        let mut entries: Vec<_> = self
            .lock()?
            .landlord_entries
            .values()
            .filter(|entry| entry.property.as_ref() == Some(property))
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            a.rental_period
                .cmp(&b.rental_period)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(entries)
    }

    fn insert_tenant_entry(
        &self,
        entry: TenantLedgerEntry,
    ) -> Result<TenantLedgerEntry, RepositoryError> {
        let mut inner = self.lock()?;
        if inner.tenant_entries.contains_key(&entry.id.0) {
            return Err(RepositoryError::Conflict);
        }
        inner
            .tenant_entries
            .insert(entry.id.0.clone(), entry.clone());
        Ok(entry)
    }

    fn update_tenant_entry(
        &self,
        entry: TenantLedgerEntry,
    ) -> Result<TenantLedgerEntry, RepositoryError> {
        let mut inner = self.lock()?;
        if !inner.tenant_entries.contains_key(&entry.id.0) {
            return Err(RepositoryError::NotFound);
        }
        inner
            .tenant_entries
            .insert(entry.id.0.clone(), entry.clone());
        Ok(entry)
    }

    fn delete_tenant_entry(&self, id: &EntryId) -> Result<(), RepositoryError> {
        self.lock()?.tenant_entries.remove(&id.0);
        Ok(())
    }

    fn list_tenant_entries(&self) -> Result<Vec<TenantLedgerEntry>, RepositoryError> {
        let mut entries: Vec<_> = self.lock()?.tenant_entries.values().cloned().collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(entries)
    }

    fn tenant_entries_for_property(
        &self,
        property: &PropertyId,
    ) -> Result<Vec<TenantLedgerEntry>, RepositoryError> {
        let mut entries: Vec<_> = self
            .lock()?
            .tenant_entries
            .values()
            .filter(|entry| entry.property.as_ref() == Some(property))
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            a.rental_period
                .cmp(&b.rental_period)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(entries)
    }
}

impl InvoiceStore for InMemoryStore {
    fn insert_invoice(&self, invoice: Invoice) -> Result<Invoice, RepositoryError> {
        let mut inner = self.lock()?;
        if inner.invoices.contains_key(&invoice.id.0) {
            return Err(RepositoryError::Conflict);
        }
        inner.invoices.insert(invoice.id.0.clone(), invoice.clone());
        Ok(invoice)
    }

    fn update_invoice(&self, invoice: Invoice) -> Result<Invoice, RepositoryError> {
        let mut inner = self.lock()?;
        if !inner.invoices.contains_key(&invoice.id.0) {
            return Err(RepositoryError::NotFound);
        }
        inner.invoices.insert(invoice.id.0.clone(), invoice.clone());
        Ok(invoice)
    }

    fn fetch_invoice(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        Ok(self.lock()?.invoices.get(&id.0).cloned())
    }

    fn delete_invoice(&self, id: &InvoiceId) -> Result<(), RepositoryError> {
        self.lock()?.invoices.remove(&id.0);
        Ok(())
    }

    fn invoice_by_number(&self, number: &str) -> Result<Option<Invoice>, RepositoryError> {
        Ok(self
            .lock()?
            .invoices
            .values()
            .find(|invoice| invoice.number == number)
            .cloned())
    }

    fn invoice_by_number_excluding(
        &self,
        id: &InvoiceId,
        number: &str,
    ) -> Result<Option<Invoice>, RepositoryError> {
        Ok(self
            .lock()?
            .invoices
            .values()
            .find(|invoice| invoice.number == number && &invoice.id != id)
            .cloned())
    }

    fn list_invoices(&self) -> Result<Vec<Invoice>, RepositoryError> {
        let mut invoices: Vec<_> = self.lock()?.invoices.values().cloned().collect();
        invoices.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(invoices)
    }

    fn invoices_for_property(
        &self,
        property: &PropertyId,
    ) -> Result<Vec<Invoice>, RepositoryError> {
        let mut invoices: Vec<_> = self
            .lock()?
            .invoices
            .values()
            .filter(|invoice| invoice.property.as_ref() == Some(property))
            .cloned()
            .collect();
        invoices.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(invoices)
    }
}

impl PropertyDirectory for InMemoryStore {
    fn property_ref(&self, id: &PropertyId) -> Result<Option<PropertyRef>, RepositoryError> {
        let inner = self.lock()?;
        let Some(property) = inner.properties.get(&id.0) else {
            return Ok(None);
        };

        let landlord_ll_id = property
            .landlord
            .as_ref()
            .and_then(|landlord_id| inner.landlords.get(&landlord_id.0))
            .map(|landlord| landlord.ll_id.clone());
        let tenant_t_id = property
            .tenant
            .as_ref()
            .and_then(|tenant_id| inner.tenants.get(&tenant_id.0))
            .map(|tenant| tenant.t_id.clone());

        Ok(Some(PropertyRef {
            id: property.id.clone(),
            p_id: property.p_id.clone(),
            landlord_ll_id,
            tenant_t_id,
        }))
    }
}

impl DirectoryStore for InMemoryStore {
    fn insert_landlord(&self, landlord: Landlord) -> Result<Landlord, RepositoryError> {
        let mut inner = self.lock()?;
        if inner.landlords.contains_key(&landlord.id.0) {
            return Err(RepositoryError::Conflict);
        }
        inner
            .landlords
            .insert(landlord.id.0.clone(), landlord.clone());
        Ok(landlord)
    }

    fn update_landlord(&self, landlord: Landlord) -> Result<Landlord, RepositoryError> {
        let mut inner = self.lock()?;
        if !inner.landlords.contains_key(&landlord.id.0) {
            return Err(RepositoryError::NotFound);
        }
        inner
            .landlords
            .insert(landlord.id.0.clone(), landlord.clone());
        Ok(landlord)
    }

    fn fetch_landlord(&self, id: &LandlordId) -> Result<Option<Landlord>, RepositoryError> {
        Ok(self.lock()?.landlords.get(&id.0).cloned())
    }

    fn delete_landlord(&self, id: &LandlordId) -> Result<(), RepositoryError> {
        self.lock()?.landlords.remove(&id.0);
        Ok(())
    }

    fn list_landlords(&self) -> Result<Vec<Landlord>, RepositoryError> {
        let mut landlords: Vec<_> = self.lock()?.landlords.values().cloned().collect();
        landlords.sort_by(|a, b| a.ll_id.cmp(&b.ll_id).then_with(|| a.id.cmp(&b.id)));
        Ok(landlords)
    }

    fn find_landlord_matching(
        &self,
        ll_id: &str,
        name: &str,
        exclude: Option<&LandlordId>,
    ) -> Result<Option<Landlord>, RepositoryError> {
        Ok(self
            .lock()?
            .landlords
            .values()
            .find(|landlord| {
                Some(&landlord.id) != exclude
                    && (landlord.ll_id == ll_id || landlord.name == name)
            })
            .cloned())
    }

    fn insert_tenant(&self, tenant: Tenant) -> Result<Tenant, RepositoryError> {
        let mut inner = self.lock()?;
        if inner.tenants.contains_key(&tenant.id.0) {
            return Err(RepositoryError::Conflict);
        }
        inner.tenants.insert(tenant.id.0.clone(), tenant.clone());
        Ok(tenant)
    }

    fn update_tenant(&self, tenant: Tenant) -> Result<Tenant, RepositoryError> {
        let mut inner = self.lock()?;
        if !inner.tenants.contains_key(&tenant.id.0) {
            return Err(RepositoryError::NotFound);
        }
        inner.tenants.insert(tenant.id.0.clone(), tenant.clone());
        Ok(tenant)
    }

    fn fetch_tenant(&self, id: &TenantId) -> Result<Option<Tenant>, RepositoryError> {
        Ok(self.lock()?.tenants.get(&id.0).cloned())
    }

    fn delete_tenant(&self, id: &TenantId) -> Result<(), RepositoryError> {
        self.lock()?.tenants.remove(&id.0);
        Ok(())
    }

    fn list_tenants(&self) -> Result<Vec<Tenant>, RepositoryError> {
        let mut tenants: Vec<_> = self.lock()?.tenants.values().cloned().collect();
        tenants.sort_by(|a, b| a.t_id.cmp(&b.t_id).then_with(|| a.id.cmp(&b.id)));
        Ok(tenants)
    }

    fn find_tenant_matching(
        &self,
        t_id: &str,
        name: &str,
        exclude: Option<&TenantId>,
    ) -> Result<Option<Tenant>, RepositoryError> {
        Ok(self
            .lock()?
            .tenants
            .values()
            .find(|tenant| {
                Some(&tenant.id) != exclude && (tenant.t_id == t_id || tenant.name == name)
            })
            .cloned())
    }

    fn insert_property(&self, property: Property) -> Result<Property, RepositoryError> {
        let mut inner = self.lock()?;
        if inner.properties.contains_key(&property.id.0) {
            return Err(RepositoryError::Conflict);
        }
        inner
            .properties
            .insert(property.id.0.clone(), property.clone());
        Ok(property)
    }

    fn update_property(&self, property: Property) -> Result<Property, RepositoryError> {
        let mut inner = self.lock()?;
        if !inner.properties.contains_key(&property.id.0) {
            return Err(RepositoryError::NotFound);
        }
        inner
            .properties
            .insert(property.id.0.clone(), property.clone());
        Ok(property)
    }

    fn fetch_property(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        Ok(self.lock()?.properties.get(&id.0).cloned())
    }

    fn delete_property(&self, id: &PropertyId) -> Result<(), RepositoryError> {
        self.lock()?.properties.remove(&id.0);
        Ok(())
    }

    fn list_properties(&self) -> Result<Vec<Property>, RepositoryError> {
        let mut properties: Vec<_> = self.lock()?.properties.values().cloned().collect();
        properties.sort_by(|a, b| a.p_id.cmp(&b.p_id).then_with(|| a.id.cmp(&b.id)));
        Ok(properties)
    }

    fn find_property_conflict(
        &self,
        p_id: &str,
        address: &str,
        landlord: Option<&LandlordId>,
        tenant: Option<&TenantId>,
        exclude: Option<&PropertyId>,
    ) -> Result<Option<Property>, RepositoryError> {
        Ok(self
            .lock()?
            .properties
            .values()
            .find(|property| {
                if Some(&property.id) == exclude {
                    return false;
                }
                property.p_id == p_id
                    || property.address == address
                    || (landlord.is_some() && property.landlord.as_ref() == landlord)
                    || (tenant.is_some() && property.tenant.as_ref() == tenant)
            })
            .cloned())
    }
}
