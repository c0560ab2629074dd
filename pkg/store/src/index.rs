use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use schema::{Date, DateWindow, PostId, UserId};

/// Per-owner posts ordered by `(date, post_id)`.
///
/// Entries carry only the immutable ordering key; counters live in the post
/// table and are resolved from there at query time, so like/repost updates
/// never touch this index. Buckets are dropped as soon as they empty.
#[derive(Debug, Default)]
pub(crate) struct OwnerDateIndex {
    buckets: FxHashMap<UserId, BTreeSet<(Date, PostId)>>,
}

impl OwnerDateIndex {
    pub(crate) fn insert(&mut self, owner_id: UserId, date: Date, post_id: PostId) -> bool {
        self.buckets
            .entry(owner_id)
            .or_default()
            .insert((date, post_id))
    }

    /// Remove one entry, dropping the owner's bucket when it becomes empty.
    /// Returns whether the entry was present.
    pub(crate) fn remove(&mut self, owner_id: UserId, date: Date, post_id: PostId) -> bool {
        let Some(bucket) = self.buckets.get_mut(&owner_id) else {
            return false;
        };
        let removed = bucket.remove(&(date, post_id));
        if bucket.is_empty() {
            self.buckets.remove(&owner_id);
            tracing::debug!(owner_id, "dropped empty owner bucket");
        }
        removed
    }

    /// Entries of `owner_id` whose date lies in `window`, in `(date, post_id)` order.
    pub(crate) fn range(
        &self,
        owner_id: UserId,
        window: DateWindow,
    ) -> impl Iterator<Item = (Date, PostId)> + '_ {
        // BTreeSet::range panics on inverted bounds.
        let bucket = if window.is_empty() {
            None
        } else {
            self.buckets.get(&owner_id)
        };
        bucket.into_iter().flat_map(move |bucket| {
            bucket
                .range((window.begin, PostId::MIN)..=(window.end, PostId::MAX))
                .copied()
        })
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn entry_count(&self) -> usize {
        self.buckets.values().map(|bucket| bucket.len()).sum()
    }

    pub(crate) fn bucket_len(&self, owner_id: UserId) -> usize {
        self.buckets.get(&owner_id).map(|bucket| bucket.len()).unwrap_or(0)
    }
}
