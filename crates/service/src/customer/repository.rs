use async_trait::async_trait;
use uuid::Uuid;

use models::customer;

use super::domain::CustomerDraft;
use crate::errors::ServiceError;

/// Store abstraction for customer persistence.
///
/// Implementations only move rows in and out; every business rule
/// (normalization, not-found policy, replace semantics) lives in
/// [`super::service::CustomerService`].
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert a new row; the store assigns the identifier.
    async fn insert(&self, draft: CustomerDraft) -> Result<customer::Model, ServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<customer::Model>, ServiceError>;

    /// All rows whose stored name equals `name`, in store order.
    async fn find_by_name(&self, name: &str) -> Result<Vec<customer::Model>, ServiceError>;

    /// First row whose stored email equals `email`. Uniqueness is assumed,
    /// not enforced.
    async fn find_by_email(&self, email: &str) -> Result<Option<customer::Model>, ServiceError>;

    async fn find_all(&self) -> Result<Vec<customer::Model>, ServiceError>;

    /// Persist the full row under its existing identifier.
    async fn update(&self, record: customer::Model) -> Result<customer::Model, ServiceError>;

    /// Remove a row; returns false when no row had that identifier.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// Simple in-memory store for tests and doc examples
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryCustomerStore {
        rows: Mutex<HashMap<Uuid, customer::Model>>,
    }

    #[async_trait]
    impl CustomerStore for InMemoryCustomerStore {
        async fn insert(&self, draft: CustomerDraft) -> Result<customer::Model, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let record = customer::Model {
                id: Uuid::new_v4(),
                name: draft.name,
                email: draft.email,
                annual_spend: draft.annual_spend,
                last_purchase_date: draft.last_purchase_date,
            };
            rows.insert(record.id, record.clone());
            Ok(record)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<customer::Model>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.get(&id).cloned())
        }

        async fn find_by_name(&self, name: &str) -> Result<Vec<customer::Model>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .values()
                .filter(|c| c.name.as_deref() == Some(name))
                .cloned()
                .collect())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<customer::Model>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.values().find(|c| c.email.as_deref() == Some(email)).cloned())
        }

        async fn find_all(&self) -> Result<Vec<customer::Model>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.values().cloned().collect())
        }

        async fn update(&self, record: customer::Model) -> Result<customer::Model, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            rows.insert(record.id, record.clone());
            Ok(record)
        }

        async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            Ok(rows.remove(&id).is_some())
        }
    }
}
