use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::books::domain::{PropertyId, ValidationError};

/// Identifier wrapper for landlord records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LandlordId(pub String);

impl fmt::Display for LandlordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for tenant records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenantId(pub String);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifying fields of a property, denormalized onto the parties linked
/// to it so their records are readable without a join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySnapshot {
    pub p_id: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landlord {
    pub id: LandlordId,
    pub ll_id: String,
    pub name: String,
    pub property: Option<PropertySnapshot>,
    pub rent_amount: f64,
    pub rent_period_start: Option<NaiveDate>,
    pub rent_period_end: Option<NaiveDate>,
    pub contract_start_date: Option<NaiveDate>,
    pub rent_balance_owed: f64,
    pub deposit: f64,
    pub expenses_not_charged: f64,
}

/// Client payload for landlord create/update. Balance fields are maintained
/// by the books, not accepted from the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandlordDraft {
    pub ll_id: String,
    pub name: String,
    #[serde(default)]
    pub rent_amount: f64,
    #[serde(default)]
    pub rent_period_start: Option<NaiveDate>,
    #[serde(default)]
    pub rent_period_end: Option<NaiveDate>,
    #[serde(default)]
    pub contract_start_date: Option<NaiveDate>,
}

impl LandlordDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_short_id("ll_id", &self.ll_id)?;
        validate_name("name", &self.name)?;
        if !(0.0..=100_000.0).contains(&self.rent_amount) {
            return Err(ValidationError::OutOfRange {
                field: "rent_amount",
                min: 0.0,
                max: 100_000.0,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub t_id: String,
    pub name: String,
    pub property: Option<PropertySnapshot>,
    pub landlord: Option<LandlordId>,
    pub rent_amount: f64,
    pub tenancy_start_date: Option<NaiveDate>,
    pub balance: f64,
    pub refund_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantDraft {
    pub t_id: String,
    pub name: String,
    #[serde(default)]
    pub rent_amount: f64,
    #[serde(default)]
    pub tenancy_start_date: Option<NaiveDate>,
}

impl TenantDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_short_id("t_id", &self.t_id)?;
        validate_name("name", &self.name)?;
        if !(0.0..=100_000.0).contains(&self.rent_amount) {
            return Err(ValidationError::OutOfRange {
                field: "rent_amount",
                min: 0.0,
                max: 100_000.0,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub p_id: String,
    pub address: String,
    pub post_code: Option<String>,
    pub landlord: Option<LandlordId>,
    pub tenant: Option<TenantId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDraft {
    pub p_id: String,
    pub address: String,
    #[serde(default)]
    pub post_code: Option<String>,
    #[serde(default)]
    pub landlord_id: Option<LandlordId>,
    #[serde(default)]
    pub tenant_id: Option<TenantId>,
}

impl PropertyDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_short_id("p_id", &self.p_id)?;
        validate_name("address", &self.address)?;
        if let Some(post_code) = &self.post_code {
            if post_code.len() > 255 {
                return Err(ValidationError::TooLong {
                    field: "post_code",
                    max: 255,
                });
            }
        }
        Ok(())
    }
}

fn validate_short_id(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if value.len() > 20 {
        return Err(ValidationError::TooLong { field, max: 20 });
    }
    Ok(())
}

fn validate_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if value.len() > 255 {
        return Err(ValidationError::TooLong { field, max: 255 });
    }
    Ok(())
}
