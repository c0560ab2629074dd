use std::fmt;

use schema::{PostId, UserId};
use thiserror::Error;

/// The entity a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingEntity {
    User { id: UserId },
    Post { owner_id: UserId, post_id: PostId },
}

impl fmt::Display for MissingEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User { id } => write!(f, "user {id}"),
            Self::Post { owner_id, post_id } => write!(f, "post {post_id} of owner {owner_id}"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(MissingEntity),
}

impl StoreError {
    pub fn user_not_found(id: UserId) -> Self {
        Self::NotFound(MissingEntity::User { id })
    }

    pub fn post_not_found(owner_id: UserId, post_id: PostId) -> Self {
        Self::NotFound(MissingEntity::Post { owner_id, post_id })
    }
}
