use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use rustc_hash::FxHashMap;
use schema::{Date, Post, PostId, UserId};

/// Counter a top-k query ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Likes,
    Reposts,
}

impl Metric {
    pub fn count(self, post: &Post) -> i64 {
        match self {
            Self::Likes => post.likes,
            Self::Reposts => post.reposts,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Likes => "likes",
            Self::Reposts => "reposts",
        }
    }
}

/// Total ranking key for a post: higher count first, then lower post id,
/// then earlier date.
pub type PostRankKey = (i64, Reverse<PostId>, Reverse<Date>);

/// Total ranking key for an author: higher total first, then lower author id.
pub type AuthorRankKey = (i64, Reverse<UserId>);

pub fn post_rank_key(post: &Post, metric: Metric) -> PostRankKey {
    (metric.count(post), Reverse(post.id), Reverse(post.date))
}

pub fn author_rank_key(author_id: UserId, total: i64) -> AuthorRankKey {
    (total, Reverse(author_id))
}

struct Ranked<K, T> {
    key: K,
    item: T,
}

impl<K: Ord, T> PartialEq for Ranked<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Ord, T> Eq for Ranked<K, T> {}

impl<K: Ord, T> PartialOrd for Ranked<K, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, T> Ord for Ranked<K, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Select the `k` items with the largest keys, returned in descending key order.
///
/// Keeps a min-heap of at most `k` entries: the heap fills up to `k`, after
/// which the current minimum is replaced only when a new key strictly exceeds
/// it. Runs in O(n log k) time and O(k) extra space. With a total key (see
/// [`post_rank_key`] and [`author_rank_key`]) the result is deterministic.
pub fn select_top_k<T, K, I, F>(items: I, k: usize, key: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    K: Ord,
    F: Fn(&T) -> K,
{
    if k == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<Ranked<K, T>>> = BinaryHeap::new();
    for item in items {
        let key = key(&item);
        if heap.len() < k {
            heap.push(Reverse(Ranked { key, item }));
            continue;
        }
        if let Some(mut min) = heap.peek_mut()
            && key > min.0.key
        {
            *min = Reverse(Ranked { key, item });
        }
    }

    // Ascending order of `Reverse` is descending order of the key.
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(ranked)| ranked.item)
        .collect()
}

/// Sum `metric` per author (`from_id`) over `posts`, saturating at the `i64` bounds.
pub fn totals_by_author<'a, I>(posts: I, metric: Metric) -> FxHashMap<UserId, i64>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut totals: FxHashMap<UserId, i64> = FxHashMap::default();
    for post in posts {
        let total = totals.entry(post.from_id).or_insert(0);
        *total = total.saturating_add(metric.count(post));
    }
    totals
}

/// Rank per-author totals and keep the best `k` as `(author_id, total)`.
pub fn top_k_authors(totals: FxHashMap<UserId, i64>, k: usize) -> Vec<(UserId, i64)> {
    select_top_k(totals, k, |(author_id, total)| {
        author_rank_key(*author_id, *total)
    })
}
