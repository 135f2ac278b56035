use crate::books::domain::PropertyId;
use crate::books::repository::RepositoryError;

use super::domain::{Landlord, LandlordId, Property, Tenant, TenantId};

/// Persistence for the reference entities. Duplicate probes mirror the
/// "$or over identifying fields" checks the CRUD layer performs, with an
/// optional excluded id for update-time "except me" variants.
pub trait DirectoryStore: Send + Sync {
    fn insert_landlord(&self, landlord: Landlord) -> Result<Landlord, RepositoryError>;
    fn update_landlord(&self, landlord: Landlord) -> Result<Landlord, RepositoryError>;
    fn fetch_landlord(&self, id: &LandlordId) -> Result<Option<Landlord>, RepositoryError>;
    fn delete_landlord(&self, id: &LandlordId) -> Result<(), RepositoryError>;
    /// All landlords, ordered by `ll_id`.
    fn list_landlords(&self) -> Result<Vec<Landlord>, RepositoryError>;
    /// A landlord sharing `ll_id` or `name`, ignoring `exclude`.
    fn find_landlord_matching(
        &self,
        ll_id: &str,
        name: &str,
        exclude: Option<&LandlordId>,
    ) -> Result<Option<Landlord>, RepositoryError>;

    fn insert_tenant(&self, tenant: Tenant) -> Result<Tenant, RepositoryError>;
    fn update_tenant(&self, tenant: Tenant) -> Result<Tenant, RepositoryError>;
    fn fetch_tenant(&self, id: &TenantId) -> Result<Option<Tenant>, RepositoryError>;
    fn delete_tenant(&self, id: &TenantId) -> Result<(), RepositoryError>;
    /// All tenants, ordered by `t_id`.
    fn list_tenants(&self) -> Result<Vec<Tenant>, RepositoryError>;
    fn find_tenant_matching(
        &self,
        t_id: &str,
        name: &str,
        exclude: Option<&TenantId>,
    ) -> Result<Option<Tenant>, RepositoryError>;

    fn insert_property(&self, property: Property) -> Result<Property, RepositoryError>;
    fn update_property(&self, property: Property) -> Result<Property, RepositoryError>;
    fn fetch_property(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError>;
    fn delete_property(&self, id: &PropertyId) -> Result<(), RepositoryError>;
    /// All properties, ordered by `p_id`.
    fn list_properties(&self) -> Result<Vec<Property>, RepositoryError>;
    /// A property sharing `p_id`, `address`, or a non-null landlord/tenant
    /// link, ignoring `exclude`.
    fn find_property_conflict(
        &self,
        p_id: &str,
        address: &str,
        landlord: Option<&LandlordId>,
        tenant: Option<&TenantId>,
        exclude: Option<&PropertyId>,
    ) -> Result<Option<Property>, RepositoryError>;
}
