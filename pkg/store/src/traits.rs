use schema::{Date, Post, PostId, User, UserId, UserWithLikes, UserWithReposts};

use crate::error::StoreError;

/// FeedStore is the contract for a user/post store answering top-k queries
/// over an owner's posts within an inclusive `[date_begin, date_end]` window.
///
/// Query methods never fail on an unknown owner or an empty window; they
/// return an empty sequence. Counter mutations on a missing post are no-ops.
pub trait FeedStore {
    /// Get a user by id. Returns `StoreError::NotFound` if it was never inserted.
    fn get_user(&self, id: UserId) -> Result<&User, StoreError>;

    /// Insert a user, overwriting any previous record with the same id.
    fn insert_user(&mut self, user: User);

    /// Get the authoritative record for `(owner_id, post_id)`.
    fn get_post(&self, owner_id: UserId, post_id: PostId) -> Result<&Post, StoreError>;

    /// Insert a post. A post whose `(owner_id, id)` is already present is ignored.
    fn insert_post(&mut self, post: Post);

    /// Delete a post. Returns `StoreError::NotFound` if the key is absent.
    fn delete_post(&mut self, owner_id: UserId, post_id: PostId) -> Result<(), StoreError>;

    fn like_post(&mut self, owner_id: UserId, post_id: PostId);

    fn unlike_post(&mut self, owner_id: UserId, post_id: PostId);

    fn repost_post(&mut self, owner_id: UserId, post_id: PostId);

    /// Up to `k` posts of `owner_id` dated within the window, most liked first.
    fn top_k_posts_by_likes(
        &self,
        k: usize,
        owner_id: UserId,
        date_begin: Date,
        date_end: Date,
    ) -> Vec<Post>;

    /// Up to `k` posts of `owner_id` dated within the window, most reposted first.
    fn top_k_posts_by_reposts(
        &self,
        k: usize,
        owner_id: UserId,
        date_begin: Date,
        date_end: Date,
    ) -> Vec<Post>;

    /// Up to `k` authors ranked by likes summed over the owner's posts in the window.
    /// Fails with `StoreError::NotFound` if a selected author is not a registered user.
    fn top_k_authors_by_likes(
        &self,
        k: usize,
        owner_id: UserId,
        date_begin: Date,
        date_end: Date,
    ) -> Result<Vec<UserWithLikes>, StoreError>;

    /// Up to `k` authors ranked by reposts summed over the owner's posts in the window.
    /// Fails with `StoreError::NotFound` if a selected author is not a registered user.
    fn top_k_authors_by_reposts(
        &self,
        k: usize,
        owner_id: UserId,
        date_begin: Date,
        date_end: Date,
    ) -> Result<Vec<UserWithReposts>, StoreError>;
}
