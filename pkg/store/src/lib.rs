use std::collections::hash_map::Entry;

use ranking::{Metric, post_rank_key, select_top_k, top_k_authors, totals_by_author};
use rustc_hash::FxHashMap;
use schema::{Date, DateWindow, Post, PostId, User, UserId, UserWithLikes, UserWithReposts};

pub mod config;
pub mod error;
mod index;
pub mod traits;

pub use config::StoreConfig;
pub use error::{MissingEntity, StoreError};
pub use traits::FeedStore;

use index::OwnerDateIndex;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreIndexStats {
    pub user_count: usize,
    pub post_count: usize,
    pub owner_bucket_count: usize,
    pub indexed_post_count: usize,
}

/// In-memory feed store.
///
/// Posts live in a table keyed by `(owner_id, post_id)`; a per-owner index
/// ordered by `(date, post_id)` narrows top-k queries to a date window.
/// Insert and delete keep the two in lockstep. Counter updates only touch
/// the table, and queries read counters from the table.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: FxHashMap<UserId, User>,
    posts: FxHashMap<(UserId, PostId), Post>,
    owner_index: OwnerDateIndex,
    config: StoreConfig,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            users: FxHashMap::with_capacity_and_hasher(config.expected_users, Default::default()),
            posts: FxHashMap::with_capacity_and_hasher(config.expected_posts, Default::default()),
            owner_index: OwnerDateIndex::default(),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn users_len(&self) -> usize {
        self.users.len()
    }

    pub fn posts_len(&self) -> usize {
        self.posts.len()
    }

    pub fn index_stats(&self) -> StoreIndexStats {
        StoreIndexStats {
            user_count: self.users.len(),
            post_count: self.posts.len(),
            owner_bucket_count: self.owner_index.bucket_count(),
            indexed_post_count: self.owner_index.entry_count(),
        }
    }

    /// Number of indexed posts filed under `owner_id`.
    pub fn owner_post_count(&self, owner_id: UserId) -> usize {
        self.owner_index.bucket_len(owner_id)
    }

    /// Posts of `owner_id` dated within `window`, ordered by `(date, id)`.
    pub fn posts_for_owner(&self, owner_id: UserId, window: DateWindow) -> Vec<Post> {
        self.window_posts(owner_id, window).cloned().collect()
    }

    fn window_posts(&self, owner_id: UserId, window: DateWindow) -> impl Iterator<Item = &Post> {
        self.owner_index
            .range(owner_id, window)
            .filter_map(move |(_, post_id)| self.posts.get(&(owner_id, post_id)))
    }

    fn top_k_posts(
        &self,
        k: usize,
        owner_id: UserId,
        window: DateWindow,
        metric: Metric,
    ) -> Vec<Post> {
        let top = select_top_k(self.window_posts(owner_id, window), k, |post| {
            post_rank_key(post, metric)
        });
        tracing::trace!(
            k,
            owner_id,
            date_begin = window.begin,
            date_end = window.end,
            metric = metric.as_str(),
            selected = top.len(),
            "top-k posts"
        );
        top.into_iter().cloned().collect()
    }

    fn top_k_authors(
        &self,
        k: usize,
        owner_id: UserId,
        window: DateWindow,
        metric: Metric,
    ) -> Result<Vec<(User, i64)>, StoreError> {
        let totals = totals_by_author(self.window_posts(owner_id, window), metric);
        let authors = totals.len();
        let top = top_k_authors(totals, k);
        tracing::trace!(
            k,
            owner_id,
            date_begin = window.begin,
            date_end = window.end,
            metric = metric.as_str(),
            authors,
            selected = top.len(),
            "top-k authors"
        );

        top.into_iter()
            .map(|(author_id, total)| {
                let Some(user) = self.users.get(&author_id) else {
                    tracing::warn!(
                        author_id,
                        owner_id,
                        metric = metric.as_str(),
                        "top-k author is not a registered user"
                    );
                    return Err(StoreError::user_not_found(author_id));
                };
                Ok((user.clone(), total))
            })
            .collect()
    }

    fn adjust_counter(&mut self, owner_id: UserId, post_id: PostId, metric: Metric, delta: i64) {
        let Some(post) = self.posts.get_mut(&(owner_id, post_id)) else {
            tracing::trace!(
                owner_id,
                post_id,
                metric = metric.as_str(),
                "counter update ignored for missing post"
            );
            return;
        };
        match metric {
            Metric::Likes => post.likes = post.likes.saturating_add(delta),
            Metric::Reposts => post.reposts = post.reposts.saturating_add(delta),
        }
    }
}

impl FeedStore for InMemoryStore {
    fn get_user(&self, id: UserId) -> Result<&User, StoreError> {
        self.users
            .get(&id)
            .ok_or_else(|| StoreError::user_not_found(id))
    }

    fn insert_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    fn get_post(&self, owner_id: UserId, post_id: PostId) -> Result<&Post, StoreError> {
        self.posts
            .get(&(owner_id, post_id))
            .ok_or_else(|| StoreError::post_not_found(owner_id, post_id))
    }

    fn insert_post(&mut self, post: Post) {
        match self.posts.entry(post.key()) {
            Entry::Occupied(_) => {
                tracing::debug!(
                    owner_id = post.owner_id,
                    post_id = post.id,
                    "ignored duplicate post insert"
                );
            }
            Entry::Vacant(slot) => {
                self.owner_index.insert(post.owner_id, post.date, post.id);
                tracing::debug!(
                    owner_id = post.owner_id,
                    post_id = post.id,
                    date = post.date,
                    "inserted post"
                );
                slot.insert(post);
            }
        }
    }

    fn delete_post(&mut self, owner_id: UserId, post_id: PostId) -> Result<(), StoreError> {
        let Some(post) = self.posts.remove(&(owner_id, post_id)) else {
            return Err(StoreError::post_not_found(owner_id, post_id));
        };
        let indexed = self.owner_index.remove(owner_id, post.date, post.id);
        debug_assert!(indexed, "post table and owner index out of sync");
        tracing::debug!(owner_id, post_id, date = post.date, "deleted post");
        Ok(())
    }

    fn like_post(&mut self, owner_id: UserId, post_id: PostId) {
        self.adjust_counter(owner_id, post_id, Metric::Likes, 1);
    }

    fn unlike_post(&mut self, owner_id: UserId, post_id: PostId) {
        self.adjust_counter(owner_id, post_id, Metric::Likes, -1);
    }

    fn repost_post(&mut self, owner_id: UserId, post_id: PostId) {
        self.adjust_counter(owner_id, post_id, Metric::Reposts, 1);
    }

    fn top_k_posts_by_likes(
        &self,
        k: usize,
        owner_id: UserId,
        date_begin: Date,
        date_end: Date,
    ) -> Vec<Post> {
        self.top_k_posts(k, owner_id, DateWindow::new(date_begin, date_end), Metric::Likes)
    }

    fn top_k_posts_by_reposts(
        &self,
        k: usize,
        owner_id: UserId,
        date_begin: Date,
        date_end: Date,
    ) -> Vec<Post> {
        self.top_k_posts(
            k,
            owner_id,
            DateWindow::new(date_begin, date_end),
            Metric::Reposts,
        )
    }

    fn top_k_authors_by_likes(
        &self,
        k: usize,
        owner_id: UserId,
        date_begin: Date,
        date_end: Date,
    ) -> Result<Vec<UserWithLikes>, StoreError> {
        let window = DateWindow::new(date_begin, date_end);
        Ok(self
            .top_k_authors(k, owner_id, window, Metric::Likes)?
            .into_iter()
            .map(|(user, likes)| UserWithLikes { user, likes })
            .collect())
    }

    fn top_k_authors_by_reposts(
        &self,
        k: usize,
        owner_id: UserId,
        date_begin: Date,
        date_end: Date,
    ) -> Result<Vec<UserWithReposts>, StoreError> {
        let window = DateWindow::new(date_begin, date_end);
        Ok(self
            .top_k_authors(k, owner_id, window, Metric::Reposts)?
            .into_iter()
            .map(|(user, reposts)| UserWithReposts { user, reposts })
            .collect())
    }
}
