use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use models::customer::{self, Entity as CustomerEntity};

use crate::customer::domain::CustomerDraft;
use crate::customer::repository::CustomerStore;
use crate::errors::ServiceError;

pub struct SeaOrmCustomerStore {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl CustomerStore for SeaOrmCustomerStore {
    async fn insert(&self, draft: CustomerDraft) -> Result<customer::Model, ServiceError> {
        let am = customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(draft.name),
            email: Set(draft.email),
            annual_spend: Set(draft.annual_spend),
            last_purchase_date: Set(draft.last_purchase_date),
        };
        am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<customer::Model>, ServiceError> {
        CustomerEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<customer::Model>, ServiceError> {
        CustomerEntity::find()
            .filter(customer::Column::Name.eq(name.to_string()))
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<customer::Model>, ServiceError> {
        CustomerEntity::find()
            .filter(customer::Column::Email.eq(email.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<customer::Model>, ServiceError> {
        CustomerEntity::find()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, record: customer::Model) -> Result<customer::Model, ServiceError> {
        let am = customer::ActiveModel {
            id: Unchanged(record.id),
            name: Set(record.name),
            email: Set(record.email),
            annual_spend: Set(record.annual_spend),
            last_purchase_date: Set(record.last_purchase_date),
        };
        am.update(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = CustomerEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
