//! BK-tree keyed on edit distance.
//!
//! Every node stores a key and a map from distance to child subtree.
//! Insertion descends along the distance to the current node until an
//! empty child slot is found. Search walks a stack and, by the triangle
//! inequality, only visits children whose distance label lies within
//! `[d - max_dist, d + max_dist]` of the query's distance `d` to the
//! node.

use ahash::AHashMap;

use super::{FuzzyIndex, Match};
use crate::distance::levenshtein;

#[derive(Debug)]
struct BkNode {
    key: String,
    children: AHashMap<usize, BkNode>,
}

impl BkNode {
    fn new(key: &str) -> Self {
        Self { key: key.to_string(), children: AHashMap::new() }
    }
}

/// BK-tree-backed fuzzy index.
#[derive(Debug, Default)]
pub struct BkTree {
    root: Option<BkNode>,
    len: usize,
}

impl BkTree {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FuzzyIndex for BkTree {
    fn insert(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        if self.root.is_none() {
            self.root = Some(BkNode::new(key));
            self.len = 1;
            return;
        }
        let mut node = self.root.as_mut().unwrap();
        loop {
            let d = levenshtein(key, &node.key);
            if d == 0 {
                return;
            }
            if node.children.contains_key(&d) {
                node = node.children.get_mut(&d).unwrap();
            } else {
                node.children.insert(d, BkNode::new(key));
                self.len += 1;
                return;
            }
        }
    }

    fn search(&self, query: &str, max_dist: usize) -> Vec<Match> {
        let mut out = Vec::new();
        let Some(root) = self.root.as_ref() else {
            return out;
        };
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let d = levenshtein(query, &node.key);
            if d <= max_dist {
                out.push(Match { key: node.key.clone(), distance: d });
            }
            let low = d.saturating_sub(max_dist);
            let high = d + max_dist;
            for (&label, child) in &node.children {
                if (low..=high).contains(&label) {
                    stack.push(child);
                }
            }
        }
        out
    }

    fn len(&self) -> usize {
        self.len
    }
}
