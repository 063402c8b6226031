use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use models::customer;

use super::domain::CustomerDraft;
use super::repository::CustomerStore;
use crate::errors::ServiceError;

/// Customer business service independent of web framework
pub struct CustomerService<S: CustomerStore> {
    store: Arc<S>,
}

impl<S: CustomerStore> CustomerService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    /// Create a customer.
    ///
    /// Name and email are trimmed and lower-cased when present; absent
    /// values are stored as absent. Field presence is the transport layer's
    /// responsibility, not checked here.
    #[instrument(skip(self, draft), fields(email = draft.email.as_deref().unwrap_or("")))]
    pub async fn create(&self, mut draft: CustomerDraft) -> Result<customer::Model, ServiceError> {
        draft.name = draft.name.map(|n| normalize(&n));
        draft.email = draft.email.map(|e| normalize(&e));
        let created = self.store.insert(draft).await?;
        info!(customer_id = %created.id, "customer created");
        Ok(created)
    }

    /// Absence is returned as a value; the caller decides whether it is an
    /// error.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<customer::Model>, ServiceError> {
        debug!(customer_id = %id, "fetching customer by id");
        self.store.find_by_id(id).await
    }

    /// Lookup by name (input is normalized first). Unlike `get_by_id`, zero
    /// matches raises `NotFound` here instead of returning an empty list.
    pub async fn get_by_name(&self, name: &str) -> Result<Vec<customer::Model>, ServiceError> {
        debug!(name, "fetching customers by name");
        let matches = self.store.find_by_name(&normalize(name)).await?;
        if matches.is_empty() {
            warn!(name, "no customer with that name");
            return Err(ServiceError::not_found("customer"));
        }
        Ok(matches)
    }

    /// Lookup by email (input is normalized first). Absence is returned as a
    /// value, consistent with `get_by_id` and unlike `get_by_name`.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<customer::Model>, ServiceError> {
        debug!(email, "fetching customer by email");
        self.store.find_by_email(&normalize(email)).await
    }

    /// Full replace of every field but the identifier.
    ///
    /// A missing or blank incoming name/email overwrites the stored value
    /// with the empty string, and spend/purchase-date are overwritten even
    /// when absent. There are no partial-update semantics.
    #[instrument(skip(self, draft), fields(customer_id = %id))]
    pub async fn update(&self, id: Uuid, draft: CustomerDraft) -> Result<customer::Model, ServiceError> {
        let Some(mut existing) = self.store.find_by_id(id).await? else {
            warn!(customer_id = %id, "customer missing on update");
            return Err(ServiceError::not_found("customer"));
        };
        existing.name = Some(normalize_or_empty(draft.name));
        existing.email = Some(normalize_or_empty(draft.email));
        existing.annual_spend = draft.annual_spend;
        existing.last_purchase_date = draft.last_purchase_date;
        let updated = self.store.update(existing).await?;
        info!(customer_id = %updated.id, "customer updated");
        Ok(updated)
    }

    /// Remove by identifier; returns whether a row was removed. Mapping a
    /// missing row to a not-found response is the caller's job.
    pub async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        info!(customer_id = %id, "deleting customer");
        self.store.delete_by_id(id).await
    }

    /// Every customer in the store, in store order. An empty store raises
    /// `NotFound`; callers never see an empty success.
    pub async fn get_all(&self) -> Result<Vec<customer::Model>, ServiceError> {
        let customers = self.store.find_all().await?;
        if customers.is_empty() {
            warn!("store holds no customers");
            return Err(ServiceError::NotFound("no customers present in the store".into()));
        }
        Ok(customers)
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn normalize_or_empty(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => normalize(&v),
        _ => String::new(),
    }
}
