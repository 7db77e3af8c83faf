//! Post lifecycle manager - orchestrates create/read/update/delete against a
//! store adapter and dispatches best-effort lifecycle notices.

use std::sync::Arc;

use bson::oid::ObjectId;
use chrono::Utc;

use crate::domain::{Post, PostDraft, PostPatch};
use crate::error::DomainError;
use crate::ports::{LifecycleNotice, Notifier, PostStore};

/// The lifecycle manager. Both collaborators are injected at construction;
/// there is no ambient registry or global configuration behind it.
pub struct PostService {
    store: Arc<dyn PostStore>,
    notifier: Arc<dyn Notifier>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Validate and normalize a draft, persist it, and return the new id.
    ///
    /// Store failures propagate unchanged; the "created" notice is dispatched
    /// after the insert and never affects the result.
    pub async fn create(&self, draft: PostDraft) -> Result<ObjectId, DomainError> {
        draft.validate()?;
        let post = draft.normalize(Utc::now());
        let title = post.title.clone();

        let id = self.store.insert(post).await?;

        self.dispatch(LifecycleNotice::created(id.to_hex(), title));
        Ok(id)
    }

    /// Every stored post, in store order. No sort is imposed here; a
    /// deployment needing deterministic listing adds one explicitly.
    pub async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.store.find_all().await?)
    }

    /// Fetch a single post by its external id.
    pub async fn find_one(&self, id: &str) -> Result<Post, DomainError> {
        let oid = parse_external_id(id)?;
        self.store
            .find_by_id(oid)
            .await?
            .ok_or_else(|| DomainError::NotFound { id: id.to_owned() })
    }

    /// Merge a partial patch into an existing post and return how many
    /// documents changed.
    ///
    /// Not-found is decided on the matched count: a patch that matches a post
    /// but changes nothing is still a success with a modified count of zero.
    pub async fn update(&self, id: &str, patch: PostPatch) -> Result<u64, DomainError> {
        let oid = parse_external_id(id)?;
        let changes = serde_json::to_value(&patch).unwrap_or(serde_json::Value::Null);

        let outcome = self.store.update_by_id(oid, patch).await?;
        if outcome.matched == 0 {
            return Err(DomainError::NotFound { id: id.to_owned() });
        }

        self.dispatch(LifecycleNotice::updated(id.to_owned(), changes));
        Ok(outcome.modified)
    }

    /// Delete a post and return how many documents were removed.
    pub async fn remove(&self, id: &str) -> Result<u64, DomainError> {
        let oid = parse_external_id(id)?;

        let deleted = self.store.delete_by_id(oid).await?;
        if deleted == 0 {
            return Err(DomainError::NotFound { id: id.to_owned() });
        }

        self.dispatch(LifecycleNotice::deleted(id.to_owned()));
        Ok(deleted)
    }

    /// Fire-and-forget notice dispatch. The triggering operation returns
    /// without waiting on the sink; delivery failures are logged inside the
    /// spawned task and never retried.
    fn dispatch(&self, notice: LifecycleNotice) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(err) = notifier.notify(notice).await {
                tracing::warn!(error = %err, "lifecycle notice dropped");
            }
        });
    }
}

/// Convert an external identifier to the store's native form. Malformed
/// strings are rejected here, before any store interaction.
fn parse_external_id(id: &str) -> Result<ObjectId, DomainError> {
    ObjectId::parse_str(id).map_err(|_| DomainError::InvalidId(id.to_owned()))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{MediaRef, NewPost};
    use crate::error::StoreError;
    use crate::ports::{LifecycleEvent, NoticeLevel, NotifyError, UpdateOutcome};

    /// Store double with genuine collection semantics plus a call counter.
    #[derive(Default)]
    struct FakeStore {
        posts: Mutex<Vec<Post>>,
        calls: AtomicUsize,
    }

    impl FakeStore {
        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PostStore for FakeStore {
        async fn insert(&self, post: NewPost) -> Result<ObjectId, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let id = ObjectId::new();
            self.posts.lock().unwrap().push(post.into_post(id));
            Ok(id)
        }

        async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.posts.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .posts
                .lock()
                .unwrap()
                .iter()
                .find(|post| post.id == id)
                .cloned())
        }

        async fn update_by_id(
            &self,
            id: ObjectId,
            patch: PostPatch,
        ) -> Result<UpdateOutcome, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut posts = self.posts.lock().unwrap();
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
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut posts = self.posts.lock().unwrap();
            let before = posts.len();
            posts.retain(|post| post.id != id);
            Ok((before - posts.len()) as u64)
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<LifecycleNotice>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, notice: LifecycleNotice) -> Result<(), NotifyError> {
            self.notices.lock().unwrap().push(notice);
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn notify(&self, _notice: LifecycleNotice) -> Result<(), NotifyError> {
            Err(NotifyError::Delivery("sink unreachable".to_owned()))
        }
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_owned(),
            author: "Al Ice".to_owned(),
            content: "Body text".to_owned(),
            ..Default::default()
        }
    }

    /// Let spawned dispatch tasks run to completion.
    async fn settle() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn create_normalizes_before_persisting() {
        let store = Arc::new(FakeStore::default());
        let service = PostService::new(store.clone(), Arc::new(RecordingNotifier::default()));

        let id = service
            .create(PostDraft {
                title: "  Hello World  ".to_owned(),
                author: " Al Ice ".to_owned(),
                content: " Body text ".to_owned(),
                cover_image: Some(MediaRef {
                    url: "  ".to_owned(),
                }),
                ..Default::default()
            })
            .await
            .expect("create succeeds");

        let stored = service.find_one(&id.to_hex()).await.expect("post exists");
        assert_eq!(stored.title, "Hello World");
        assert_eq!(stored.author, "Al Ice");
        assert_eq!(stored.content, "Body text");
        assert_eq!(stored.excerpt, None);
        assert_eq!(stored.cover_image, None);
        assert_eq!(stored.cover_video, None);
    }

    #[tokio::test]
    async fn create_rejects_invalid_draft_before_store() {
        let store = Arc::new(FakeStore::default());
        let service = PostService::new(store.clone(), Arc::new(RecordingNotifier::default()));

        let result = service.create(draft("   ")).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn malformed_id_rejected_before_store() {
        let store = Arc::new(FakeStore::default());
        let service = PostService::new(store.clone(), Arc::new(RecordingNotifier::default()));

        for result in [
            service.find_one("not-a-hex-id").await.map(|_| ()),
            service
                .update("not-a-hex-id", PostPatch::default())
                .await
                .map(|_| ()),
            service.remove("not-a-hex-id").await.map(|_| ()),
        ] {
            assert!(matches!(result, Err(DomainError::InvalidId(_))));
        }
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn find_one_distinguishes_missing_from_malformed() {
        let service = PostService::new(
            Arc::new(FakeStore::default()),
            Arc::new(RecordingNotifier::default()),
        );

        let absent = ObjectId::new().to_hex();
        assert!(matches!(
            service.find_one(&absent).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found() {
        let service = PostService::new(
            Arc::new(FakeStore::default()),
            Arc::new(RecordingNotifier::default()),
        );

        let result = service
            .update(
                &ObjectId::new().to_hex(),
                PostPatch {
                    title: Some("x".to_owned()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn matched_but_unmodified_update_is_success() {
        let service = PostService::new(
            Arc::new(FakeStore::default()),
            Arc::new(RecordingNotifier::default()),
        );

        let id = service.create(draft("Hello World")).await.unwrap();

        // An empty patch matches the post and changes nothing.
        let modified = service
            .update(&id.to_hex(), PostPatch::default())
            .await
            .expect("empty patch succeeds");
        assert_eq!(modified, 0);

        // So does a patch re-stating the current value.
        let modified = service
            .update(
                &id.to_hex(),
                PostPatch {
                    title: Some("Hello World".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .expect("no-op patch succeeds");
        assert_eq!(modified, 0);
    }

    #[tokio::test]
    async fn update_never_touches_creation_date() {
        let service = PostService::new(
            Arc::new(FakeStore::default()),
            Arc::new(RecordingNotifier::default()),
        );

        let id = service.create(draft("Hello World")).await.unwrap();
        let created = service.find_one(&id.to_hex()).await.unwrap().date;

        service
            .update(
                &id.to_hex(),
                PostPatch {
                    title: Some("Edited".to_owned()),
                    content: Some("New body".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let after = service.find_one(&id.to_hex()).await.unwrap();
        assert_eq!(after.date, created);
        assert_eq!(after.title, "Edited");
    }

    #[tokio::test]
    async fn remove_is_terminal() {
        let service = PostService::new(
            Arc::new(FakeStore::default()),
            Arc::new(RecordingNotifier::default()),
        );

        let id = service.create(draft("Hello World")).await.unwrap();

        assert_eq!(service.remove(&id.to_hex()).await.unwrap(), 1);
        assert!(matches!(
            service.remove(&id.to_hex()).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn notifier_failure_never_reaches_the_caller() {
        let service = PostService::new(Arc::new(FakeStore::default()), Arc::new(FailingNotifier));

        let id = service
            .create(draft("Hello World"))
            .await
            .expect("create unaffected by sink");
        let modified = service
            .update(
                &id.to_hex(),
                PostPatch {
                    title: Some("Edited".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .expect("update unaffected by sink");
        assert_eq!(modified, 1);
        assert_eq!(service.remove(&id.to_hex()).await.unwrap(), 1);

        settle().await;
    }

    #[tokio::test]
    async fn notices_carry_event_tags_and_string_ids() {
        let notifier = Arc::new(RecordingNotifier::default());
        let service = PostService::new(Arc::new(FakeStore::default()), notifier.clone());

        let id = service.create(draft("Hello World")).await.unwrap();
        service
            .update(
                &id.to_hex(),
                PostPatch {
                    title: Some("Edited".to_owned()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        service.remove(&id.to_hex()).await.unwrap();
        settle().await;

        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 3);

        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert_eq!(notices[0].metadata.event, LifecycleEvent::Created);
        assert_eq!(notices[0].metadata.id, id.to_hex());
        assert_eq!(notices[0].metadata.title.as_deref(), Some("Hello World"));

        assert_eq!(notices[1].level, NoticeLevel::Info);
        assert_eq!(notices[1].metadata.event, LifecycleEvent::Updated);
        assert_eq!(
            notices[1].metadata.changes,
            Some(serde_json::json!({ "title": "Edited" }))
        );

        assert_eq!(notices[2].level, NoticeLevel::Warn);
        assert_eq!(notices[2].metadata.event, LifecycleEvent::Deleted);
        assert_eq!(notices[2].metadata.id, id.to_hex());
    }
}
