//! MongoDB-backed post store.

use std::time::Duration;

use async_trait::async_trait;
use bson::{Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use quill_core::domain::{NewPost, Post, PostPatch};
use quill_core::error::StoreError;
use quill_core::ports::{PostStore, UpdateOutcome};

use super::StoreConfig;
use super::document::{NewPostDocument, PostDocument};

const COLLECTION: &str = "posts";

/// Post store backed by a MongoDB collection.
///
/// The client is acquired once at startup and shared across all operations;
/// the driver pools connections and serializes conflicting writes to the
/// same document, so no locking happens on this side.
pub struct MongoPostStore {
    db: Database,
    collection: Collection<PostDocument>,
}

impl MongoPostStore {
    /// Connect to the configured deployment and bind the posts collection.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        tracing::info!(database = %config.database, "Connecting to document store...");

        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        options.server_selection_timeout = Some(Duration::from_secs(10));

        let client =
            Client::with_options(options).map_err(|e| StoreError::Connection(e.to_string()))?;
        let db = client.database(&config.database);

        // Fail here rather than on the first CRUD call.
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!("Document store connected");

        Ok(Self {
            collection: db.collection(COLLECTION),
            db,
        })
    }
}

/// Build the `$set` document for a patch. Fields the patch does not carry
/// stay out of the document, so the merge leaves them untouched.
fn set_document(patch: &PostPatch) -> Document {
    let mut set = Document::new();
    if let Some(title) = &patch.title {
        set.insert("title", title);
    }
    if let Some(author) = &patch.author {
        set.insert("author", author);
    }
    if let Some(content) = &patch.content {
        set.insert("content", content);
    }
    if let Some(excerpt) = &patch.excerpt {
        set.insert("excerpt", excerpt);
    }
    if let Some(image) = &patch.cover_image {
        set.insert("coverImage", doc! { "url": &image.url });
    }
    if let Some(video) = &patch.cover_video {
        set.insert("coverVideo", doc! { "url": &video.url });
    }
    set
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn insert(&self, post: NewPost) -> Result<ObjectId, StoreError> {
        let result = self
            .collection
            .clone_with_type::<NewPostDocument>()
            .insert_one(NewPostDocument::from(post))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Query("store assigned a non-ObjectId insert id".to_owned()))
    }

    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let documents: Vec<PostDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>, StoreError> {
        let document = self
            .collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(document.map(Into::into))
    }

    async fn update_by_id(
        &self,
        id: ObjectId,
        patch: PostPatch,
    ) -> Result<UpdateOutcome, StoreError> {
        let set = set_document(&patch);

        // The server rejects an empty `$set`; an empty patch degrades to an
        // existence check so it still reports the matched count.
        if set.is_empty() {
            let matched = self
                .collection
                .find_one(doc! { "_id": id })
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?
                .is_some();
            return Ok(UpdateOutcome {
                matched: u64::from(matched),
                modified: 0,
            });
        }

        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, StoreError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }
}
