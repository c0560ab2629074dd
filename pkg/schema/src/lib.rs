// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

pub type UserId = i64;
pub type PostId = i64;

/// Ordinal date of a post (epoch-like; only the ordering matters).
pub type Date = i64;

// ---------------------------------------------------------------------------
// Core domain types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// A post filed under `owner_id`'s feed and written by `from_id`.
///
/// Identity is the `(owner_id, id)` pair; the same `id` may appear under
/// different owners.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Post {
    pub id: PostId,
    pub owner_id: UserId,
    pub from_id: UserId,
    pub date: Date,
    pub likes: i64,
    pub reposts: i64,
}

impl Post {
    pub fn key(&self) -> (UserId, PostId) {
        (self.owner_id, self.id)
    }
}

// ---------------------------------------------------------------------------
// Query output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithLikes {
    pub user: User,
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithReposts {
    pub user: User,
    pub reposts: i64,
}

// ---------------------------------------------------------------------------
// Date windows
// ---------------------------------------------------------------------------

/// Inclusive `[begin, end]` date range used to filter posts before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub begin: Date,
    pub end: Date,
}

impl DateWindow {
    pub fn new(begin: Date, end: Date) -> Self {
        Self { begin, end }
    }

    pub fn all() -> Self {
        Self {
            begin: Date::MIN,
            end: Date::MAX,
        }
    }

    /// An inverted window matches nothing.
    pub fn is_empty(&self) -> bool {
        self.begin > self.end
    }

    pub fn contains(&self, date: Date) -> bool {
        (self.begin..=self.end).contains(&date)
    }
}

/// Helper to create a `Post` with zeroed counters.
/// Used throughout tests and fixtures to avoid repetitive struct construction.
pub fn post_builder(owner_id: UserId, id: PostId, from_id: UserId, date: Date) -> Post {
    Post {
        id,
        owner_id,
        from_id,
        date,
        likes: 0,
        reposts: 0,
    }
}

pub fn user_builder(id: UserId, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
    }
}
