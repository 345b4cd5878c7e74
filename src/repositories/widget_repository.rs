use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_document},
    options::{ReplaceOptions, UpdateOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Widget,
};

#[async_trait]
pub trait WidgetRepository: Send + Sync {
    /// Replace the single widget slot belonging to `widget.app_id`,
    /// creating it on first share.
    async fn upsert_for_app(&self, widget: &Widget) -> AppResult<()>;
    async fn find_for_app(&self, app_id: &str) -> AppResult<Option<Widget>>;
    async fn insert_user_widget(&self, widget: &Widget) -> AppResult<String>;
    async fn find_user_widget(&self, widget_id: &str) -> AppResult<Option<Widget>>;
    async fn replace_user_widget(&self, widget: &Widget) -> AppResult<()>;
    async fn delete_user_widget(&self, widget_id: &str) -> AppResult<u64>;
    async fn delete_for_app(&self, app_id: &str) -> AppResult<u64>;
    /// User-created widgets, newest first.
    async fn list_user_widgets(&self) -> AppResult<Vec<Widget>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoWidgetRepository {
    collection: Collection<Widget>,
}

impl MongoWidgetRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

fn parse_object_id(widget_id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(widget_id)
        .map_err(|_| AppError::ValidationError(format!("'{}' is not a valid widget id", widget_id)))
}

#[async_trait]
impl WidgetRepository for MongoWidgetRepository {
    async fn upsert_for_app(&self, widget: &Widget) -> AppResult<()> {
        let app_id = widget.app_id.as_deref().ok_or_else(|| {
            AppError::InternalError("app widget is missing its app_id".to_string())
        })?;
        let replacement = to_document(widget).map_err(AppError::from)?;
        let options = UpdateOptions::builder().upsert(true).build();

        self.collection
            .update_one(doc! { "app_id": app_id }, doc! { "$set": replacement })
            .with_options(options)
            .await?;

        Ok(())
    }

    async fn find_for_app(&self, app_id: &str) -> AppResult<Option<Widget>> {
        let widget = self
            .collection
            .find_one(doc! { "app_id": app_id, "user_created": { "$ne": true } })
            .await?;
        Ok(widget)
    }

    async fn insert_user_widget(&self, widget: &Widget) -> AppResult<String> {
        let result = self.collection.insert_one(widget).await?;
        result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .ok_or_else(|| {
                AppError::InternalError("inserted widget has a non-ObjectId id".to_string())
            })
    }

    async fn find_user_widget(&self, widget_id: &str) -> AppResult<Option<Widget>> {
        let id = parse_object_id(widget_id)?;
        let widget = self
            .collection
            .find_one(doc! { "_id": id, "user_created": true })
            .await?;
        Ok(widget)
    }

    async fn replace_user_widget(&self, widget: &Widget) -> AppResult<()> {
        let id = widget.id.ok_or_else(|| {
            AppError::InternalError("cannot replace a widget without an id".to_string())
        })?;
        let options = ReplaceOptions::builder().upsert(false).build();

        let result = self
            .collection
            .replace_one(doc! { "_id": id, "user_created": true }, widget)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "User widget with id '{}' not found",
                id.to_hex()
            )));
        }

        Ok(())
    }

    async fn delete_user_widget(&self, widget_id: &str) -> AppResult<u64> {
        let id = parse_object_id(widget_id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": id, "user_created": true })
            .await?;
        Ok(result.deleted_count)
    }

    async fn delete_for_app(&self, app_id: &str) -> AppResult<u64> {
        let result = self.collection.delete_one(doc! { "app_id": app_id }).await?;
        Ok(result.deleted_count)
    }

    async fn list_user_widgets(&self) -> AppResult<Vec<Widget>> {
        let cursor = self
            .collection
            .find(doc! { "user_created": true })
            .sort(doc! { "created_at": -1 })
            .await?;
        let widgets: Vec<Widget> = cursor.try_collect().await?;
        Ok(widgets)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let model = IndexModel::builder().keys(doc! { "app_id": 1 }).build();
        self.collection.create_index(model).await?;
        log::info!("ensured index on widget app_id");
        Ok(())
    }
}
