use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::domain::{NewPost, Post, PostPatch};
use crate::error::StoreError;

/// Result of a partial update.
///
/// Not-found is decided on `matched`, never on `modified`: a patch that
/// matches a document but changes nothing is still a successful update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents matching the identifier (0 or 1).
    pub matched: u64,
    /// Documents the patch actually changed.
    pub modified: u64,
}

/// Post store - abstraction over the document collection holding posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a canonical record and return the store-assigned id.
    async fn insert(&self, post: NewPost) -> Result<ObjectId, StoreError>;

    /// Every stored post, in whatever order the store returns them.
    async fn find_all(&self) -> Result<Vec<Post>, StoreError>;

    /// Look up a single post by its native id.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>, StoreError>;

    /// Merge the patch into the matching document. Fields absent from the
    /// patch are left untouched.
    async fn update_by_id(
        &self,
        id: ObjectId,
        patch: PostPatch,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Delete the matching document, returning how many were removed.
    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, StoreError>;

    /// Round-trip liveness check against the backing store.
    async fn ping(&self) -> Result<(), StoreError>;
}
