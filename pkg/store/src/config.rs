pub const EXPECTED_USERS_ENV: &str = "FEED_STORE_EXPECTED_USERS";
pub const EXPECTED_POSTS_ENV: &str = "FEED_STORE_EXPECTED_POSTS";

/// Capacity hints for the user registry and the post table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreConfig {
    pub expected_users: usize,
    pub expected_posts: usize,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the config through `lookup`; missing, non-numeric or zero
    /// values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            expected_users: lookup_positive_usize(&lookup, EXPECTED_USERS_ENV)
                .unwrap_or(defaults.expected_users),
            expected_posts: lookup_positive_usize(&lookup, EXPECTED_POSTS_ENV)
                .unwrap_or(defaults.expected_posts),
        }
    }
}

fn lookup_positive_usize<F>(lookup: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
}
