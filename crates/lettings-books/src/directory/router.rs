use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::books::domain::{PropertyId, ValidationError};

use super::domain::{LandlordDraft, LandlordId, PropertyDraft, TenantDraft, TenantId};
use super::repository::DirectoryStore;
use super::service::{DirectoryError, LandlordService, PropertyService, TenantService};

/// Shared state for the reference-entity routes.
pub struct DirectoryState<S> {
    pub landlords: Arc<LandlordService<S>>,
    pub tenants: Arc<TenantService<S>>,
    pub properties: Arc<PropertyService<S>>,
}

impl<S> Clone for DirectoryState<S> {
    fn clone(&self) -> Self {
        Self {
            landlords: self.landlords.clone(),
            tenants: self.tenants.clone(),
            properties: self.properties.clone(),
        }
    }
}

/// Router builder for landlord, tenant, and property CRUD.
pub fn directory_router<S>(state: DirectoryState<S>) -> Router
where
    S: DirectoryStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/landlords",
            get(list_landlords_handler::<S>).post(create_landlord_handler::<S>),
        )
        .route(
            "/api/v1/landlords/:id",
            get(get_landlord_handler::<S>)
                .put(update_landlord_handler::<S>)
                .delete(delete_landlord_handler::<S>),
        )
        .route(
            "/api/v1/tenants",
            get(list_tenants_handler::<S>).post(create_tenant_handler::<S>),
        )
        .route(
            "/api/v1/tenants/:id",
            get(get_tenant_handler::<S>)
                .put(update_tenant_handler::<S>)
                .delete(delete_tenant_handler::<S>),
        )
        .route(
            "/api/v1/properties",
            get(list_properties_handler::<S>).post(create_property_handler::<S>),
        )
        .route(
            "/api/v1/properties/:id",
            get(get_property_handler::<S>)
                .put(update_property_handler::<S>)
                .delete(delete_property_handler::<S>),
        )
        .with_state(state)
}

fn directory_error_response(err: DirectoryError) -> Response {
    let status = match &err {
        DirectoryError::DuplicateLandlord
        | DirectoryError::DuplicateTenant
        | DirectoryError::DuplicateProperty
        | DirectoryError::InvalidLandlordLink
        | DirectoryError::InvalidTenantLink => StatusCode::BAD_REQUEST,
        DirectoryError::UnknownLandlord(_)
        | DirectoryError::UnknownTenant(_)
        | DirectoryError::UnknownProperty(_) => StatusCode::NOT_FOUND,
        DirectoryError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}

fn validation_response(err: ValidationError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn not_found_response(entity: &str) -> Response {
    let payload = json!({ "error": format!("{entity} not found") });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

pub(crate) async fn list_landlords_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
) -> Response {
    match state.landlords.list() {
        Ok(landlords) => (StatusCode::OK, Json(landlords)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn create_landlord_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
    Json(draft): Json<LandlordDraft>,
) -> Response {
    if let Err(err) = draft.validate() {
        return validation_response(err);
    }
    match state.landlords.create(draft) {
        Ok(stored) => (StatusCode::OK, Json(stored)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn get_landlord_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
    Path(id): Path<String>,
) -> Response {
    match state.landlords.get(&LandlordId(id)) {
        Ok(Some(landlord)) => (StatusCode::OK, Json(landlord)).into_response(),
        Ok(None) => not_found_response("landlord"),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn update_landlord_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
    Path(id): Path<String>,
    Json(draft): Json<LandlordDraft>,
) -> Response {
    if let Err(err) = draft.validate() {
        return validation_response(err);
    }
    match state.landlords.update(&LandlordId(id), draft) {
        Ok(stored) => (StatusCode::OK, Json(stored)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn delete_landlord_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
    Path(id): Path<String>,
) -> Response {
    match state.landlords.delete(&LandlordId(id)) {
        Ok(Some(removed)) => (StatusCode::OK, Json(removed)).into_response(),
        Ok(None) => not_found_response("landlord"),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn list_tenants_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
) -> Response {
    match state.tenants.list() {
        Ok(tenants) => (StatusCode::OK, Json(tenants)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn create_tenant_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
    Json(draft): Json<TenantDraft>,
) -> Response {
    if let Err(err) = draft.validate() {
        return validation_response(err);
    }
    match state.tenants.create(draft) {
        Ok(stored) => (StatusCode::OK, Json(stored)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn get_tenant_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
    Path(id): Path<String>,
) -> Response {
    match state.tenants.get(&TenantId(id)) {
        Ok(Some(tenant)) => (StatusCode::OK, Json(tenant)).into_response(),
        Ok(None) => not_found_response("tenant"),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn update_tenant_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
    Path(id): Path<String>,
    Json(draft): Json<TenantDraft>,
) -> Response {
    if let Err(err) = draft.validate() {
        return validation_response(err);
    }
    match state.tenants.update(&TenantId(id), draft) {
        Ok(stored) => (StatusCode::OK, Json(stored)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn delete_tenant_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
    Path(id): Path<String>,
) -> Response {
    match state.tenants.delete(&TenantId(id)) {
        Ok(Some(removed)) => (StatusCode::OK, Json(removed)).into_response(),
        Ok(None) => not_found_response("tenant"),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn list_properties_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
) -> Response {
    match state.properties.list() {
        Ok(properties) => (StatusCode::OK, Json(properties)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn create_property_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
    Json(draft): Json<PropertyDraft>,
) -> Response {
    if let Err(err) = draft.validate() {
        return validation_response(err);
    }
    match state.properties.create(draft) {
        Ok(stored) => (StatusCode::OK, Json(stored)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn get_property_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
    Path(id): Path<String>,
) -> Response {
    match state.properties.get(&PropertyId(id)) {
        Ok(Some(property)) => (StatusCode::OK, Json(property)).into_response(),
        Ok(None) => not_found_response("property"),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn update_property_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
    Path(id): Path<String>,
    Json(draft): Json<PropertyDraft>,
) -> Response {
    if let Err(err) = draft.validate() {
        return validation_response(err);
    }
    match state.properties.update(&PropertyId(id), draft) {
        Ok(stored) => (StatusCode::OK, Json(stored)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn delete_property_handler<S: DirectoryStore + 'static>(
    State(state): State<DirectoryState<S>>,
    Path(id): Path<String>,
) -> Response {
    match state.properties.delete(&PropertyId(id)) {
        Ok(Some(removed)) => (StatusCode::OK, Json(removed)).into_response(),
        Ok(None) => not_found_response("property"),
        Err(err) => directory_error_response(err),
    }
}
