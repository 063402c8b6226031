use std::sync::Arc;

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use models::customer::{self, Tier};
use service::customer::domain::CustomerDraft;
use service::customer::repo::seaorm::SeaOrmCustomerStore;
use service::customer::CustomerService;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub customers: Arc<CustomerService<SeaOrmCustomerStore>>,
}

/// Incoming customer fields; `id` and `tier` are never accepted on input.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub annual_spend: Option<Decimal>,
    #[serde(default)]
    pub last_purchase_date: Option<NaiveDate>,
}

impl CustomerPayload {
    fn into_draft(self) -> CustomerDraft {
        CustomerDraft {
            name: self.name,
            email: self.email,
            annual_spend: self.annual_spend,
            last_purchase_date: self.last_purchase_date,
        }
    }
}

/// Outgoing record; `tier` is derived against today's date on every read.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBody {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub annual_spend: Option<Decimal>,
    pub last_purchase_date: Option<NaiveDate>,
    pub tier: Tier,
}

impl From<customer::Model> for CustomerBody {
    fn from(m: customer::Model) -> Self {
        let tier = m.tier(Utc::now().date_naive());
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            annual_spend: m.annual_spend,
            last_purchase_date: m.last_purchase_date,
            tier,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub name: Option<String>,
    pub email: Option<String>,
}

fn validate_create(payload: &CustomerPayload) -> Result<(), String> {
    let mut failures = Vec::new();
    match payload.name.as_deref() {
        Some(n) if !n.trim().is_empty() => {}
        _ => failures.push("name - must not be blank"),
    }
    match payload.email.as_deref() {
        Some(e) if !e.trim().is_empty() => {
            if !e.contains('@') {
                failures.push("email - must be a well-formed email address");
            }
        }
        _ => failures.push("email - must not be blank"),
    }
    if payload.annual_spend.is_none() {
        failures.push("annualSpend - must be present");
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("Required Fields are missing: {}", failures.join("; ")))
    }
}

pub async fn create(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    Json(payload): Json<CustomerPayload>,
) -> Result<Json<CustomerBody>, ApiError> {
    info!("received request to create a new customer");
    validate_create(&payload).map_err(|msg| ApiError::bad_request(msg, uri.path()))?;
    let created = state
        .customers
        .create(payload.into_draft())
        .await
        .map_err(|e| ApiError::from_service(e, uri.path()))?;
    Ok(Json(created.into()))
}

pub async fn get_all(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Vec<CustomerBody>>, ApiError> {
    info!("received request to fetch all customers");
    let all = state
        .customers
        .get_all()
        .await
        .map_err(|e| ApiError::from_service(e, uri.path()))?;
    Ok(Json(all.into_iter().map(CustomerBody::from).collect()))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerBody>, ApiError> {
    info!(customer_id = %id, "received request to fetch customer by id");
    let found = state
        .customers
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_service(e, uri.path()))?;
    match found {
        Some(found) => Ok(Json(found.into())),
        None => Err(ApiError::not_found("customer not found", uri.path())),
    }
}

/// `GET /customers?name=` returns a list, `?email=` a single record.
/// Name wins when both parameters are supplied.
pub async fn lookup(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    Query(q): Query<LookupQuery>,
) -> Result<Response, ApiError> {
    if let Some(name) = q.name {
        info!(name = %name, "received request to fetch customers by name");
        let matches = state
            .customers
            .get_by_name(&name)
            .await
            .map_err(|e| ApiError::from_service(e, uri.path()))?;
        let body: Vec<CustomerBody> = matches.into_iter().map(CustomerBody::from).collect();
        Ok(Json(body).into_response())
    } else if let Some(email) = q.email {
        info!(email = %email, "received request to fetch customer by email");
        let found = state
            .customers
            .get_by_email(&email)
            .await
            .map_err(|e| ApiError::from_service(e, uri.path()))?;
        match found {
            Some(found) => Ok(Json(CustomerBody::from(found)).into_response()),
            None => Err(ApiError::not_found("customer not found", uri.path())),
        }
    } else {
        Err(ApiError::bad_request("name or email query parameter is required", uri.path()))
    }
}

pub async fn update(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<Uuid>,
    Json(payload): Json<CustomerPayload>,
) -> Result<Json<CustomerBody>, ApiError> {
    info!(customer_id = %id, "received request to update customer");
    let updated = state
        .customers
        .update(id, payload.into_draft())
        .await
        .map_err(|e| ApiError::from_service(e, uri.path()))?;
    Ok(Json(updated.into()))
}

pub async fn remove(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    info!(customer_id = %id, "received request to delete customer");
    let removed = state
        .customers
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service(e, uri.path()))?;
    if removed {
        Ok((StatusCode::OK, "success"))
    } else {
        Err(ApiError::not_found("customer not found", uri.path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, email: Option<&str>, spend: Option<i64>) -> CustomerPayload {
        CustomerPayload {
            name: name.map(Into::into),
            email: email.map(Into::into),
            annual_spend: spend.map(Decimal::from),
            last_purchase_date: None,
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(validate_create(&payload(Some("Jane"), Some("jane@example.com"), Some(100))).is_ok());
    }

    #[test]
    fn missing_fields_are_all_listed() {
        let msg = validate_create(&payload(None, Some("jane@example.com"), None)).unwrap_err();
        assert!(msg.starts_with("Required Fields are missing:"));
        assert!(msg.contains("name"));
        assert!(msg.contains("annualSpend"));
        assert!(!msg.contains("email"));
    }

    #[test]
    fn blank_name_counts_as_missing() {
        let msg = validate_create(&payload(Some("   "), Some("jane@example.com"), Some(1))).unwrap_err();
        assert!(msg.contains("name - must not be blank"));
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let msg = validate_create(&payload(Some("Jane"), Some("not-an-email"), Some(1))).unwrap_err();
        assert!(msg.contains("email - must be a well-formed email address"));
    }
}
