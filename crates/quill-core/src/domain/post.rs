use bson::oid::ObjectId;
use bson::serde_helpers::serialize_object_id_as_hex_string;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum title length, counted after trimming.
pub const TITLE_MAX_LEN: usize = 80;
/// Maximum author length, counted after trimming.
pub const AUTHOR_MAX_LEN: usize = 30;
/// Maximum excerpt length, counted after trimming.
pub const EXCERPT_MAX_LEN: usize = 250;

/// Reference to an external media asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub url: String,
}

/// Post entity - a stored article.
///
/// Optional fields are either wholly absent or carry a non-blank trimmed
/// value; the normalizer never stores an empty-string or empty-object
/// placeholder. `id` and `date` are assigned once at creation and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Store-assigned identifier. Serialized as the 24-char hex string under
    /// `_id`, the external representation API callers see.
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<MediaRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_video: Option<MediaRef>,
    /// Creation instant. Reflects when the record was created, not when it
    /// was last updated.
    pub date: DateTime<Utc>,
}

/// Canonical record awaiting a store-assigned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<MediaRef>,
    pub cover_video: Option<MediaRef>,
    pub date: DateTime<Utc>,
}

impl NewPost {
    /// Attach a store-assigned id, yielding the persisted form.
    pub fn into_post(self, id: ObjectId) -> Post {
        Post {
            id,
            title: self.title,
            author: self.author,
            content: self.content,
            excerpt: self.excerpt,
            cover_image: self.cover_image,
            cover_video: self.cover_video,
            date: self.date,
        }
    }
}

/// Untrusted creation payload, prior to normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub cover_image: Option<MediaRef>,
    #[serde(default)]
    pub cover_video: Option<MediaRef>,
}

impl PostDraft {
    /// Check the field constraints against the trimmed values.
    pub fn validate(&self) -> Result<(), DomainError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation("title must not be empty".into()));
        }
        if title.chars().count() > TITLE_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "title must be at most {TITLE_MAX_LEN} characters"
            )));
        }

        let author = self.author.trim();
        if author.is_empty() {
            return Err(DomainError::Validation("author must not be empty".into()));
        }
        if author.chars().count() > AUTHOR_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "author must be at most {AUTHOR_MAX_LEN} characters"
            )));
        }

        if let Some(excerpt) = &self.excerpt {
            if excerpt.trim().chars().count() > EXCERPT_MAX_LEN {
                return Err(DomainError::Validation(format!(
                    "excerpt must be at most {EXCERPT_MAX_LEN} characters"
                )));
            }
        }

        Ok(())
    }

    /// Produce the canonical record: trim the text fields, drop optionals
    /// that are blank after trimming, stamp the creation instant.
    ///
    /// Pure function of the draft and `now`.
    pub fn normalize(self, now: DateTime<Utc>) -> NewPost {
        NewPost {
            title: self.title.trim().to_owned(),
            author: self.author.trim().to_owned(),
            content: self.content.trim().to_owned(),
            excerpt: self
                .excerpt
                .as_deref()
                .map(str::trim)
                .filter(|excerpt| !excerpt.is_empty())
                .map(str::to_owned),
            cover_image: normalize_media(self.cover_image),
            cover_video: normalize_media(self.cover_video),
            date: now,
        }
    }
}

fn normalize_media(media: Option<MediaRef>) -> Option<MediaRef> {
    media.and_then(|media| {
        let url = media.url.trim();
        if url.is_empty() {
            None
        } else {
            Some(MediaRef {
                url: url.to_owned(),
            })
        }
    })
}

/// Partial update to a post, merged `$set`-style into the stored record.
///
/// Only mutable fields are expressible here, so an identifier carried in an
/// inbound payload has nowhere to land and is discarded before persistence.
/// Patches are applied as given - they are not re-normalized like drafts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_video: Option<MediaRef>,
}

impl PostPatch {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.content.is_none()
            && self.excerpt.is_none()
            && self.cover_image.is_none()
            && self.cover_video.is_none()
    }

    /// Merge into `post`, replacing exactly the fields the patch carries.
    /// Returns whether anything actually changed.
    pub fn apply(&self, post: &mut Post) -> bool {
        let mut changed = false;

        if let Some(title) = &self.title {
            if &post.title != title {
                post.title = title.clone();
                changed = true;
            }
        }
        if let Some(author) = &self.author {
            if &post.author != author {
                post.author = author.clone();
                changed = true;
            }
        }
        if let Some(content) = &self.content {
            if &post.content != content {
                post.content = content.clone();
                changed = true;
            }
        }
        if let Some(excerpt) = &self.excerpt {
            if post.excerpt.as_ref() != Some(excerpt) {
                post.excerpt = Some(excerpt.clone());
                changed = true;
            }
        }
        if let Some(image) = &self.cover_image {
            if post.cover_image.as_ref() != Some(image) {
                post.cover_image = Some(image.clone());
                changed = true;
            }
        }
        if let Some(video) = &self.cover_video {
            if post.cover_video.as_ref() != Some(video) {
                post.cover_video = Some(video.clone());
                changed = true;
            }
        }

        changed
    }
}
