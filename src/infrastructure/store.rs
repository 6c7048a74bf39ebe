//! SeaORM implementation of the record store
//!
//! One implementation struct backs every collection. Creation assigns a
//! UUID id; updates are full replaces keyed by id. Reads pull the whole
//! collection - there is no server-side filtering, sorting or pagination.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::domain::{DomainError, Record, RecordStore};
use crate::models::{account, post, product, sale, talent};

#[derive(Clone)]
pub struct SqlRecordStore {
    db: DatabaseConnection,
}

impl SqlRecordStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn talent_fields(id: String, fields: talent::Model) -> talent::ActiveModel {
    talent::ActiveModel {
        id: Set(id),
        name: Set(fields.name),
        niche: Set(fields.niche),
        status: Set(fields.status),
        join_date: Set(fields.join_date),
    }
}

fn account_fields(id: String, fields: account::Model) -> account::ActiveModel {
    account::ActiveModel {
        id: Set(id),
        talent_id: Set(fields.talent_id),
        talent_name: Set(fields.talent_name),
        platform: Set(fields.platform),
        username: Set(fields.username),
        followers: Set(fields.followers),
    }
}

fn product_fields(id: String, fields: product::Model) -> product::ActiveModel {
    product::ActiveModel {
        id: Set(id),
        name: Set(fields.name),
        link: Set(fields.link),
        account_id: Set(fields.account_id),
        account_name: Set(fields.account_name),
    }
}

fn post_fields(id: String, fields: post::Model) -> post::ActiveModel {
    post::ActiveModel {
        id: Set(id),
        talent_id: Set(fields.talent_id),
        talent_name: Set(fields.talent_name),
        account_id: Set(fields.account_id),
        account_name: Set(fields.account_name),
        product_id: Set(fields.product_id),
        product_name: Set(fields.product_name),
        date: Set(fields.date),
        views: Set(fields.views),
        likes: Set(fields.likes),
        comments: Set(fields.comments),
        link: Set(fields.link),
    }
}

fn sale_fields(id: String, fields: sale::Model) -> sale::ActiveModel {
    sale::ActiveModel {
        id: Set(id),
        r#type: Set(fields.r#type),
        date: Set(fields.date),
        talent_id: Set(fields.talent_id),
        talent_name: Set(fields.talent_name),
        account_id: Set(fields.account_id),
        account_name: Set(fields.account_name),
        product_id: Set(fields.product_id),
        product_name: Set(fields.product_name),
        revenue: Set(fields.revenue),
        commission: Set(fields.commission),
        quantity: Set(fields.quantity),
        views: Set(fields.views),
        clicks: Set(fields.clicks),
        status: Set(fields.status),
    }
}

#[async_trait]
impl RecordStore<talent::Model> for SqlRecordStore {
    async fn list(&self) -> Result<Vec<talent::Model>, DomainError> {
        Ok(talent::Entity::find().all(&self.db).await?)
    }

    async fn create(&self, fields: talent::Model) -> Result<String, DomainError> {
        let id = Uuid::new_v4().to_string();
        talent_fields(id.clone(), fields).insert(&self.db).await?;
        tracing::debug!("created {} in {}", id, talent::Model::COLLECTION);
        Ok(id)
    }

    async fn update(&self, id: &str, fields: talent::Model) -> Result<(), DomainError> {
        talent::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;
        talent_fields(id.to_owned(), fields).update(&self.db).await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), DomainError> {
        let result = talent::Entity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore<account::Model> for SqlRecordStore {
    async fn list(&self) -> Result<Vec<account::Model>, DomainError> {
        Ok(account::Entity::find().all(&self.db).await?)
    }

    async fn create(&self, fields: account::Model) -> Result<String, DomainError> {
        let id = Uuid::new_v4().to_string();
        account_fields(id.clone(), fields).insert(&self.db).await?;
        tracing::debug!("created {} in {}", id, account::Model::COLLECTION);
        Ok(id)
    }

    async fn update(&self, id: &str, fields: account::Model) -> Result<(), DomainError> {
        account::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;
        account_fields(id.to_owned(), fields)
            .update(&self.db)
            .await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), DomainError> {
        let result = account::Entity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore<product::Model> for SqlRecordStore {
    async fn list(&self) -> Result<Vec<product::Model>, DomainError> {
        Ok(product::Entity::find().all(&self.db).await?)
    }

    async fn create(&self, fields: product::Model) -> Result<String, DomainError> {
        let id = Uuid::new_v4().to_string();
        product_fields(id.clone(), fields).insert(&self.db).await?;
        tracing::debug!("created {} in {}", id, product::Model::COLLECTION);
        Ok(id)
    }

    async fn update(&self, id: &str, fields: product::Model) -> Result<(), DomainError> {
        product::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;
        product_fields(id.to_owned(), fields)
            .update(&self.db)
            .await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), DomainError> {
        let result = product::Entity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore<post::Model> for SqlRecordStore {
    async fn list(&self) -> Result<Vec<post::Model>, DomainError> {
        Ok(post::Entity::find().all(&self.db).await?)
    }

    async fn create(&self, fields: post::Model) -> Result<String, DomainError> {
        let id = Uuid::new_v4().to_string();
        post_fields(id.clone(), fields).insert(&self.db).await?;
        tracing::debug!("created {} in {}", id, post::Model::COLLECTION);
        Ok(id)
    }

    async fn update(&self, id: &str, fields: post::Model) -> Result<(), DomainError> {
        post::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;
        post_fields(id.to_owned(), fields).update(&self.db).await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), DomainError> {
        let result = post::Entity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore<sale::Model> for SqlRecordStore {
    async fn list(&self) -> Result<Vec<sale::Model>, DomainError> {
        Ok(sale::Entity::find().all(&self.db).await?)
    }

    async fn create(&self, fields: sale::Model) -> Result<String, DomainError> {
        let id = Uuid::new_v4().to_string();
        sale_fields(id.clone(), fields).insert(&self.db).await?;
        tracing::debug!("created {} in {}", id, sale::Model::COLLECTION);
        Ok(id)
    }

    async fn update(&self, id: &str, fields: sale::Model) -> Result<(), DomainError> {
        sale::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;
        sale_fields(id.to_owned(), fields).update(&self.db).await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), DomainError> {
        let result = sale::Entity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }
}
