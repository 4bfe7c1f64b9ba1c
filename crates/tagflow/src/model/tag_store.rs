//! Ordered storage for tag records.
//!
//! [`TagStore`] is the single source of truth for what the field contains.
//! Insertion order is display order is row-major reading order.
//!
//! The store is deliberately dumb: it enforces bounds and the configured tag
//! limit, nothing else. Keeping at most one empty tag, and only at the end,
//! is the orchestrator's job.

use tagflow_core::logging::targets;

use crate::config::TagLimit;
use crate::error::{TagError, TagResult};
use crate::widget::validator::{Validation, evaluate};

/// One chip's worth of data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tag {
    /// The tag text. Empty while the chip is an open slot.
    pub text: String,
    /// One-shot request to take edit focus the first time the chip is
    /// displayed. Cleared as soon as it is consumed.
    pub pending_focus: bool,
}

impl Tag {
    /// Create a tag with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pending_focus: false,
        }
    }

    /// Create an empty tag that grabs focus when first displayed.
    pub fn pending() -> Self {
        Self {
            text: String::new(),
            pending_focus: true,
        }
    }

    /// Whether this tag is an open slot awaiting input.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Ordered sequence of [`Tag`]s.
#[derive(Debug, Clone, Default)]
pub struct TagStore {
    tags: Vec<Tag>,
    limit: TagLimit,
}

impl TagStore {
    /// Create an empty store with no tag limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given tag limit.
    pub fn with_limit(limit: TagLimit) -> Self {
        Self {
            tags: Vec::new(),
            limit,
        }
    }

    /// The configured tag limit.
    #[inline]
    pub fn limit(&self) -> TagLimit {
        self.limit
    }

    /// Change the tag limit. Existing tags are kept even if they exceed it;
    /// see [`truncate_to_limit`](Self::truncate_to_limit).
    pub fn set_limit(&mut self, limit: TagLimit) {
        self.limit = limit;
    }

    /// Drop every tag beyond the limit. Returns how many were dropped.
    pub fn truncate_to_limit(&mut self) -> usize {
        let Some(max) = self.limit.max() else {
            return 0;
        };
        let dropped = self.tags.len().saturating_sub(max);
        if dropped > 0 {
            self.tags.truncate(max);
            tracing::debug!(target: targets::STORE, dropped, limit = max, "tags beyond limit dropped");
        }
        dropped
    }

    /// Number of tags, including an open slot.
    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the store holds no tags at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Get the tag at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.tags.get(index)
    }

    /// The last tag, if any.
    #[inline]
    pub fn last(&self) -> Option<&Tag> {
        self.tags.last()
    }

    /// Iterate over all tags in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// All tags as a slice.
    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }

    /// Whether the last tag is an empty open slot.
    pub fn has_open_slot(&self) -> bool {
        self.tags.last().is_some_and(Tag::is_empty)
    }

    /// Whether the store holds as many tags as the limit allows.
    pub fn is_at_capacity(&self) -> bool {
        self.limit.is_reached(self.tags.len())
    }

    /// Replace the whole contents.
    pub fn reset(&mut self, tags: Vec<Tag>) {
        tracing::debug!(target: targets::STORE, count = tags.len(), "store reset");
        self.tags = tags;
    }

    /// Append a tag at the end.
    ///
    /// At capacity, an empty last tag is an open slot and gets replaced by
    /// `tag`; without one the append is refused with
    /// [`TagError::CapacityExceeded`].
    pub fn try_append(&mut self, tag: Tag) -> TagResult<usize> {
        if self.is_at_capacity() {
            if !self.has_open_slot() {
                let limit = self.limit.max().unwrap_or(usize::MAX);
                return Err(TagError::CapacityExceeded { limit });
            }
            let index = self.tags.len() - 1;
            self.tags[index] = tag;
            tracing::debug!(target: targets::STORE, index, "open slot reused at capacity");
            return Ok(index);
        }

        self.tags.push(tag);
        let index = self.tags.len() - 1;
        tracing::debug!(target: targets::STORE, index, "tag appended");
        Ok(index)
    }

    /// Append a tag at the end, returning its index or `None` if the store is
    /// full. See [`try_append`](Self::try_append).
    pub fn append(&mut self, tag: Tag) -> Option<usize> {
        self.try_append(tag).ok()
    }

    /// Write `text` into the open slot if there is one, else append it.
    ///
    /// Returns the index written, or `None` if the store is full.
    pub fn insert_text_or_fill_slot(&mut self, text: impl Into<String>) -> Option<usize> {
        let text = text.into();
        if self.has_open_slot() {
            let index = self.tags.len() - 1;
            self.tags[index].text = text;
            return Some(index);
        }
        self.append(Tag::new(text))
    }

    /// Replace the text of the tag at `index`.
    pub fn replace_text(&mut self, index: usize, text: impl Into<String>) -> TagResult<()> {
        let len = self.tags.len();
        let tag = self
            .tags
            .get_mut(index)
            .ok_or(TagError::OutOfBounds { index, len })?;
        tag.text = text.into();
        Ok(())
    }

    /// Remove and return the tag at `index`.
    pub fn remove_at(&mut self, index: usize) -> TagResult<Tag> {
        let len = self.tags.len();
        if index >= len {
            return Err(TagError::OutOfBounds { index, len });
        }
        tracing::debug!(target: targets::STORE, index, "tag removed");
        Ok(self.tags.remove(index))
    }

    /// Remove the first tag whose text equals `text`.
    ///
    /// Returns the index it occupied.
    pub fn remove_text(&mut self, text: &str) -> Option<usize> {
        let index = self.find(text)?;
        self.tags.remove(index);
        tracing::debug!(target: targets::STORE, index, "tag removed by text");
        Some(index)
    }

    /// Index of the first tag whose text equals `text`.
    pub fn find(&self, text: &str) -> Option<usize> {
        self.tags.iter().position(|tag| tag.text == text)
    }

    /// Consume the one-shot focus request of the tag at `index`.
    ///
    /// Returns whether the flag was set.
    pub fn take_pending_focus(&mut self, index: usize) -> bool {
        self.tags
            .get_mut(index)
            .is_some_and(|tag| std::mem::take(&mut tag.pending_focus))
    }

    /// All non-empty tag texts, in order.
    pub fn visible_values(&self) -> Vec<String> {
        self.tags
            .iter()
            .filter(|tag| !tag.is_empty())
            .map(|tag| tag.text.clone())
            .collect()
    }

    /// The subset of [`visible_values`](Self::visible_values) that passes
    /// `validation`.
    pub fn valid_values(&self, validation: Option<&Validation>) -> Vec<String> {
        self.tags
            .iter()
            .filter(|tag| !tag.is_empty() && evaluate(&tag.text, validation))
            .map(|tag| tag.text.clone())
            .collect()
    }
}
