//! In-memory post store - used as fallback when no document store is configured.

use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;

use quill_core::domain::{NewPost, Post, PostPatch};
use quill_core::error::StoreError;
use quill_core::ports::{PostStore, UpdateOutcome};

/// In-memory post collection behind an async RwLock.
///
/// This is the fallback implementation when MongoDB is not available.
/// Note: Data is lost on process restart. Listing preserves insertion order.
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert(&self, post: NewPost) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        let mut posts = self.posts.write().await;
        posts.push(post.into_post(id));
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>, StoreError> {
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .find(|post| post.id == id)
            .cloned())
    }

    async fn update_by_id(
        &self,
        id: ObjectId,
        patch: PostPatch,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|post| post.id == id) {
            Some(post) => Ok(UpdateOutcome {
                matched: 1,
                modified: u64::from(patch.apply(post)),
            }),
            None => Ok(UpdateOutcome {
                matched: 0,
                modified: 0,
            }),
        }
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, StoreError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|post| post.id != id);
        Ok((before - posts.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
