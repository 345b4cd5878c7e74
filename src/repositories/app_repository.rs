use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::RegisteredApp,
};

#[async_trait]
pub trait AppRepository: Send + Sync {
    async fn create(&self, app: RegisteredApp) -> AppResult<String>;
    async fn find_by_integration_token(&self, token: &str) -> AppResult<Option<RegisteredApp>>;
    async fn find_all_ordered(&self) -> AppResult<Vec<RegisteredApp>>;
    async fn delete(&self, app_id: &str) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoAppRepository {
    collection: Collection<RegisteredApp>,
}

impl MongoAppRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

fn parse_object_id(app_id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(app_id)
        .map_err(|_| AppError::ValidationError(format!("'{}' is not a valid app id", app_id)))
}

#[async_trait]
impl AppRepository for MongoAppRepository {
    async fn create(&self, app: RegisteredApp) -> AppResult<String> {
        let result = self.collection.insert_one(&app).await?;
        result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .ok_or_else(|| {
                AppError::InternalError("inserted app has a non-ObjectId id".to_string())
            })
    }

    async fn find_by_integration_token(&self, token: &str) -> AppResult<Option<RegisteredApp>> {
        let app = self
            .collection
            .find_one(doc! { "integration_token": token })
            .await?;
        Ok(app)
    }

    async fn find_all_ordered(&self) -> AppResult<Vec<RegisteredApp>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "registration_date": 1 })
            .await?;
        let apps: Vec<RegisteredApp> = cursor.try_collect().await?;
        Ok(apps)
    }

    async fn delete(&self, app_id: &str) -> AppResult<u64> {
        let id = parse_object_id(app_id)?;
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "integration_token": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("ensured unique index on integration_token");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id_rejects_garbage() {
        assert!(parse_object_id("not-an-id").is_err());
        assert!(parse_object_id(&ObjectId::new().to_hex()).is_ok());
    }
}
