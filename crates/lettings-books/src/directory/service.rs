use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::books::domain::PropertyId;
use crate::books::repository::RepositoryError;

use super::domain::{
    Landlord, LandlordDraft, LandlordId, Property, PropertyDraft, PropertySnapshot, Tenant,
    TenantDraft, TenantId,
};
use super::repository::DirectoryStore;

static LANDLORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static TENANT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static PROPERTY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_landlord_id() -> LandlordId {
    let id = LANDLORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LandlordId(format!("ll-{id:06}"))
}

fn next_tenant_id() -> TenantId {
    let id = TENANT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    TenantId(format!("tn-{id:06}"))
}

fn next_property_id() -> PropertyId {
    let id = PROPERTY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PropertyId(format!("prop-{id:06}"))
}

/// Error raised by the directory services.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("landlord with the same LL-ID or name already exists")]
    DuplicateLandlord,
    #[error("tenant with the same T-ID or name already exists")]
    DuplicateTenant,
    #[error("property with the same P-ID, address, landlord, or tenant already exists")]
    DuplicateProperty,
    #[error("landlord {0} not found")]
    UnknownLandlord(LandlordId),
    #[error("tenant {0} not found")]
    UnknownTenant(TenantId),
    #[error("property {0} not found")]
    UnknownProperty(PropertyId),
    #[error("referenced landlord does not exist")]
    InvalidLandlordLink,
    #[error("referenced tenant does not exist")]
    InvalidTenantLink,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Landlord CRUD with uniqueness over `ll_id` and name.
pub struct LandlordService<S> {
    store: Arc<S>,
}

impl<S: DirectoryStore> LandlordService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create(&self, draft: LandlordDraft) -> Result<Landlord, DirectoryError> {
        if self
            .store
            .find_landlord_matching(&draft.ll_id, &draft.name, None)?
            .is_some()
        {
            return Err(DirectoryError::DuplicateLandlord);
        }

        let landlord = Landlord {
            id: next_landlord_id(),
            ll_id: draft.ll_id,
            name: draft.name,
            property: None,
            rent_amount: draft.rent_amount,
            rent_period_start: draft.rent_period_start,
            rent_period_end: draft.rent_period_end,
            contract_start_date: draft.contract_start_date,
            rent_balance_owed: 0.0,
            deposit: 0.0,
            expenses_not_charged: 0.0,
        };
        Ok(self.store.insert_landlord(landlord)?)
    }

    pub fn update(&self, id: &LandlordId, draft: LandlordDraft) -> Result<Landlord, DirectoryError> {
        if self
            .store
            .find_landlord_matching(&draft.ll_id, &draft.name, Some(id))?
            .is_some()
        {
            return Err(DirectoryError::DuplicateLandlord);
        }

        let mut landlord = self
            .store
            .fetch_landlord(id)?
            .ok_or_else(|| DirectoryError::UnknownLandlord(id.clone()))?;

        landlord.ll_id = draft.ll_id;
        landlord.name = draft.name;
        landlord.rent_amount = draft.rent_amount;
        landlord.rent_period_start = draft.rent_period_start;
        landlord.rent_period_end = draft.rent_period_end;
        landlord.contract_start_date = draft.contract_start_date;

        Ok(self.store.update_landlord(landlord)?)
    }

    pub fn get(&self, id: &LandlordId) -> Result<Option<Landlord>, DirectoryError> {
        Ok(self.store.fetch_landlord(id)?)
    }

    pub fn delete(&self, id: &LandlordId) -> Result<Option<Landlord>, DirectoryError> {
        let Some(existing) = self.store.fetch_landlord(id)? else {
            return Ok(None);
        };
        self.store.delete_landlord(id)?;
        Ok(Some(existing))
    }

    pub fn list(&self) -> Result<Vec<Landlord>, DirectoryError> {
        Ok(self.store.list_landlords()?)
    }
}

/// Tenant CRUD with uniqueness over `t_id` and name.
pub struct TenantService<S> {
    store: Arc<S>,
}

impl<S: DirectoryStore> TenantService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create(&self, draft: TenantDraft) -> Result<Tenant, DirectoryError> {
        if self
            .store
            .find_tenant_matching(&draft.t_id, &draft.name, None)?
            .is_some()
        {
            return Err(DirectoryError::DuplicateTenant);
        }

        let tenant = Tenant {
            id: next_tenant_id(),
            t_id: draft.t_id,
            name: draft.name,
            property: None,
            landlord: None,
            rent_amount: draft.rent_amount,
            tenancy_start_date: draft.tenancy_start_date,
            balance: 0.0,
            refund_amount: 0.0,
        };
        Ok(self.store.insert_tenant(tenant)?)
    }

    pub fn update(&self, id: &TenantId, draft: TenantDraft) -> Result<Tenant, DirectoryError> {
        if self
            .store
            .find_tenant_matching(&draft.t_id, &draft.name, Some(id))?
            .is_some()
        {
            return Err(DirectoryError::DuplicateTenant);
        }

        let mut tenant = self
            .store
            .fetch_tenant(id)?
            .ok_or_else(|| DirectoryError::UnknownTenant(id.clone()))?;

        tenant.t_id = draft.t_id;
        tenant.name = draft.name;
        tenant.rent_amount = draft.rent_amount;
        tenant.tenancy_start_date = draft.tenancy_start_date;

        Ok(self.store.update_tenant(tenant)?)
    }

    pub fn get(&self, id: &TenantId) -> Result<Option<Tenant>, DirectoryError> {
        Ok(self.store.fetch_tenant(id)?)
    }

    pub fn delete(&self, id: &TenantId) -> Result<Option<Tenant>, DirectoryError> {
        let Some(existing) = self.store.fetch_tenant(id)? else {
            return Ok(None);
        };
        self.store.delete_tenant(id)?;
        Ok(Some(existing))
    }

    pub fn list(&self) -> Result<Vec<Tenant>, DirectoryError> {
        Ok(self.store.list_tenants()?)
    }
}

/// Property CRUD. Linking a landlord or tenant denormalizes the property's
/// identifying fields onto their records, and unlinking clears them again,
/// so party records stay readable without a join.
pub struct PropertyService<S> {
    store: Arc<S>,
}

impl<S: DirectoryStore> PropertyService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create(&self, draft: PropertyDraft) -> Result<Property, DirectoryError> {
        self.check_conflict(&draft, None)?;
        self.check_links(&draft)?;

        let property = Property {
            id: next_property_id(),
            p_id: draft.p_id,
            address: draft.address,
            post_code: draft.post_code,
            landlord: draft.landlord_id,
            tenant: draft.tenant_id,
        };
        let stored = self.store.insert_property(property)?;
        self.attach_parties(&stored)?;
        Ok(stored)
    }

    pub fn update(&self, id: &PropertyId, draft: PropertyDraft) -> Result<Property, DirectoryError> {
        self.check_conflict(&draft, Some(id))?;
        self.check_links(&draft)?;

        let old = self
            .store
            .fetch_property(id)?
            .ok_or_else(|| DirectoryError::UnknownProperty(id.clone()))?;

        let property = Property {
            id: id.clone(),
            p_id: draft.p_id,
            address: draft.address,
            post_code: draft.post_code,
            landlord: draft.landlord_id,
            tenant: draft.tenant_id,
        };
        let stored = self.store.update_property(property)?;

        self.detach_parties(&old)?;
        self.attach_parties(&stored)?;
        Ok(stored)
    }

    pub fn get(&self, id: &PropertyId) -> Result<Option<Property>, DirectoryError> {
        Ok(self.store.fetch_property(id)?)
    }

    pub fn delete(&self, id: &PropertyId) -> Result<Option<Property>, DirectoryError> {
        let Some(existing) = self.store.fetch_property(id)? else {
            return Ok(None);
        };
        self.store.delete_property(id)?;
        self.detach_parties(&existing)?;
        Ok(Some(existing))
    }

    pub fn list(&self) -> Result<Vec<Property>, DirectoryError> {
        Ok(self.store.list_properties()?)
    }

    fn check_conflict(
        &self,
        draft: &PropertyDraft,
        exclude: Option<&PropertyId>,
    ) -> Result<(), DirectoryError> {
        if self
            .store
            .find_property_conflict(
                &draft.p_id,
                &draft.address,
                draft.landlord_id.as_ref(),
                draft.tenant_id.as_ref(),
                exclude,
            )?
            .is_some()
        {
            return Err(DirectoryError::DuplicateProperty);
        }
        Ok(())
    }

    fn check_links(&self, draft: &PropertyDraft) -> Result<(), DirectoryError> {
        if let Some(landlord_id) = &draft.landlord_id {
            if self.store.fetch_landlord(landlord_id)?.is_none() {
                return Err(DirectoryError::InvalidLandlordLink);
            }
        }
        if let Some(tenant_id) = &draft.tenant_id {
            if self.store.fetch_tenant(tenant_id)?.is_none() {
                return Err(DirectoryError::InvalidTenantLink);
            }
        }
        Ok(())
    }

    fn attach_parties(&self, property: &Property) -> Result<(), DirectoryError> {
        let snapshot = PropertySnapshot {
            p_id: property.p_id.clone(),
            address: property.address.clone(),
        };

        if let Some(landlord_id) = &property.landlord {
            if let Some(mut landlord) = self.store.fetch_landlord(landlord_id)? {
                landlord.property = Some(snapshot.clone());
                self.store.update_landlord(landlord)?;
            }
        }
        if let Some(tenant_id) = &property.tenant {
            if let Some(mut tenant) = self.store.fetch_tenant(tenant_id)? {
                tenant.property = Some(snapshot);
                tenant.landlord = property.landlord.clone();
                self.store.update_tenant(tenant)?;
            }
        }
        Ok(())
    }

    fn detach_parties(&self, property: &Property) -> Result<(), DirectoryError> {
        if let Some(landlord_id) = &property.landlord {
            if let Some(mut landlord) = self.store.fetch_landlord(landlord_id)? {
                landlord.property = None;
                self.store.update_landlord(landlord)?;
            }
        }
        if let Some(tenant_id) = &property.tenant {
            if let Some(mut tenant) = self.store.fetch_tenant(tenant_id)? {
                tenant.property = None;
                tenant.landlord = None;
                self.store.update_tenant(tenant)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::memory::InMemoryStore;

    fn services() -> (
        LandlordService<InMemoryStore>,
        TenantService<InMemoryStore>,
        PropertyService<InMemoryStore>,
    ) {
        let store = Arc::new(InMemoryStore::default());
        (
            LandlordService::new(store.clone()),
            TenantService::new(store.clone()),
            PropertyService::new(store),
        )
    }

    fn landlord_draft(ll_id: &str, name: &str) -> LandlordDraft {
        LandlordDraft {
            ll_id: ll_id.to_string(),
            name: name.to_string(),
            rent_amount: 1_200.0,
            rent_period_start: None,
            rent_period_end: None,
            contract_start_date: None,
        }
    }

    fn tenant_draft(t_id: &str, name: &str) -> TenantDraft {
        TenantDraft {
            t_id: t_id.to_string(),
            name: name.to_string(),
            rent_amount: 1_200.0,
            tenancy_start_date: None,
        }
    }

    fn property_draft(
        p_id: &str,
        address: &str,
        landlord: Option<&Landlord>,
        tenant: Option<&Tenant>,
    ) -> PropertyDraft {
        PropertyDraft {
            p_id: p_id.to_string(),
            address: address.to_string(),
            post_code: Some("IP1 3QJ".to_string()),
            landlord_id: landlord.map(|landlord| landlord.id.clone()),
            tenant_id: tenant.map(|tenant| tenant.id.clone()),
        }
    }

    #[test]
    fn duplicate_landlord_id_or_name_is_rejected() {
        let (landlords, _, _) = services();
        landlords
            .create(landlord_draft("LL-01", "Avery Holt"))
            .expect("first create succeeds");

        let same_id = landlords.create(landlord_draft("LL-01", "Someone Else"));
        assert!(matches!(same_id, Err(DirectoryError::DuplicateLandlord)));

        let same_name = landlords.create(landlord_draft("LL-02", "Avery Holt"));
        assert!(matches!(same_name, Err(DirectoryError::DuplicateLandlord)));
    }

    #[test]
    fn landlord_update_can_keep_its_own_identity() {
        let (landlords, _, _) = services();
        let stored = landlords
            .create(landlord_draft("LL-01", "Avery Holt"))
            .expect("create succeeds");

        let mut draft = landlord_draft("LL-01", "Avery Holt");
        draft.rent_amount = 1_450.0;
        let updated = landlords.update(&stored.id, draft).expect("update succeeds");
        assert_eq!(updated.rent_amount, 1_450.0);
    }

    #[test]
    fn linking_a_property_propagates_snapshots() {
        let (landlords, tenants, properties) = services();
        let landlord = landlords
            .create(landlord_draft("LL-01", "Avery Holt"))
            .expect("landlord created");
        let tenant = tenants
            .create(tenant_draft("T-01", "Noor Patel"))
            .expect("tenant created");

        let property = properties
            .create(property_draft(
                "P-01",
                "14 Quay Street",
                Some(&landlord),
                Some(&tenant),
            ))
            .expect("property created");

        let landlord = landlords
            .get(&landlord.id)
            .expect("lookup succeeds")
            .expect("landlord exists");
        assert_eq!(
            landlord.property.as_ref().map(|snapshot| snapshot.p_id.as_str()),
            Some("P-01")
        );

        let tenant = tenants
            .get(&tenant.id)
            .expect("lookup succeeds")
            .expect("tenant exists");
        assert_eq!(tenant.landlord, property.landlord);
        assert_eq!(
            tenant.property.as_ref().map(|snapshot| snapshot.address.as_str()),
            Some("14 Quay Street")
        );
    }

    #[test]
    fn relinking_a_property_clears_the_old_parties() {
        let (landlords, tenants, properties) = services();
        let first = landlords
            .create(landlord_draft("LL-01", "Avery Holt"))
            .expect("landlord created");
        let second = landlords
            .create(landlord_draft("LL-02", "Bram Osei"))
            .expect("landlord created");
        let tenant = tenants
            .create(tenant_draft("T-01", "Noor Patel"))
            .expect("tenant created");

        let property = properties
            .create(property_draft(
                "P-01",
                "14 Quay Street",
                Some(&first),
                Some(&tenant),
            ))
            .expect("property created");

        properties
            .update(
                &property.id,
                property_draft("P-01", "14 Quay Street", Some(&second), None),
            )
            .expect("update succeeds");

        let first = landlords
            .get(&first.id)
            .expect("lookup succeeds")
            .expect("landlord exists");
        assert!(first.property.is_none());

        let second = landlords
            .get(&second.id)
            .expect("lookup succeeds")
            .expect("landlord exists");
        assert!(second.property.is_some());

        let tenant = tenants
            .get(&tenant.id)
            .expect("lookup succeeds")
            .expect("tenant exists");
        assert!(tenant.property.is_none());
        assert!(tenant.landlord.is_none());
    }

    #[test]
    fn property_with_an_unknown_party_is_rejected() {
        let (_, _, properties) = services();
        let draft = PropertyDraft {
            p_id: "P-01".to_string(),
            address: "14 Quay Street".to_string(),
            post_code: None,
            landlord_id: Some(LandlordId("ll-missing".to_string())),
            tenant_id: None,
        };
        assert!(matches!(
            properties.create(draft),
            Err(DirectoryError::InvalidLandlordLink)
        ));
    }

    #[test]
    fn already_linked_parties_conflict_with_new_properties() {
        let (landlords, _, properties) = services();
        let landlord = landlords
            .create(landlord_draft("LL-01", "Avery Holt"))
            .expect("landlord created");

        properties
            .create(property_draft("P-01", "14 Quay Street", Some(&landlord), None))
            .expect("first property created");

        let conflicting = properties.create(property_draft(
            "P-02",
            "9 Mill Lane",
            Some(&landlord),
            None,
        ));
        assert!(matches!(
            conflicting,
            Err(DirectoryError::DuplicateProperty)
        ));
    }

    #[test]
    fn deleting_a_property_detaches_its_parties() {
        let (landlords, tenants, properties) = services();
        let landlord = landlords
            .create(landlord_draft("LL-01", "Avery Holt"))
            .expect("landlord created");
        let tenant = tenants
            .create(tenant_draft("T-01", "Noor Patel"))
            .expect("tenant created");

        let property = properties
            .create(property_draft(
                "P-01",
                "14 Quay Street",
                Some(&landlord),
                Some(&tenant),
            ))
            .expect("property created");

        properties.delete(&property.id).expect("delete succeeds");

        let landlord = landlords
            .get(&landlord.id)
            .expect("lookup succeeds")
            .expect("landlord exists");
        assert!(landlord.property.is_none());

        let tenant = tenants
            .get(&tenant.id)
            .expect("lookup succeeds")
            .expect("tenant exists");
        assert!(tenant.property.is_none());
        assert!(tenant.landlord.is_none());
    }
}
