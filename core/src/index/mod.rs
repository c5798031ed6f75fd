//! Approximate key search over a level dictionary.
//!
//! The resolver only ever talks to the `FuzzyIndex` capability; the two
//! realizations (character trie with bounded-distance DFS, BK-tree on
//! edit distance) are interchangeable and must return identical result
//! sets for the same `(query, max_dist)`.

use serde::{Deserialize, Serialize};

pub mod bktree;
pub mod trie;

pub use bktree::BkTree;
pub use trie::FuzzyTrie;

/// One key found within the edit-distance budget of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The matched dictionary key (normalized form).
    pub key: String,
    /// Exact edit distance between the query and `key`.
    pub distance: usize,
}

impl Match {
    /// Similarity score in `[0, 1]`: `1 - distance / max(|query|, |key|)`.
    pub fn score(&self, query: &str) -> f32 {
        let q = query.chars().count();
        let k = self.key.chars().count();
        let denom = q.max(k).max(1);
        1.0 - self.distance as f32 / denom as f32
    }
}

/// Searchable set of normalized keys.
///
/// Invariants:
/// - every inserted key is findable with `max_dist = 0`;
/// - `search` returns exactly the keys whose edit distance to the query
///   is `<= max_dist`, each with its exact distance.
pub trait FuzzyIndex: Send + Sync {
    /// Insert a key. Empty keys and duplicates are ignored.
    fn insert(&mut self, key: &str);

    /// All keys within `max_dist` edits of `query`.
    fn search(&self, query: &str, max_dist: usize) -> Vec<Match>;

    /// Number of distinct keys stored.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which `FuzzyIndex` realization to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    #[default]
    Trie,
    BkTree,
}

/// Build an index of the requested kind over a key set.
pub fn build_index<'a, I>(kind: IndexKind, keys: I) -> Box<dyn FuzzyIndex>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: Box<dyn FuzzyIndex> = match kind {
        IndexKind::Trie => Box::new(FuzzyTrie::new()),
        IndexKind::BkTree => Box::new(BkTree::new()),
    };
    for key in keys {
        index.insert(key);
    }
    index
}
