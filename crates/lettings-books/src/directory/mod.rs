//! Reference entities the books point at: landlords, tenants, and the
//! properties linking them. The bookkeeping core only ever sees their ids.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Landlord, LandlordDraft, LandlordId, Property, PropertyDraft, PropertySnapshot, Tenant,
    TenantDraft, TenantId,
};
pub use repository::DirectoryStore;
pub use router::{directory_router, DirectoryState};
pub use service::{DirectoryError, LandlordService, PropertyService, TenantService};
