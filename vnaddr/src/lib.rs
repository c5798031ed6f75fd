//! vnaddr crate root
//!
//! This crate provides the Vietnamese-specific pieces of the address
//! resolver: the administrative prefix classifier, the candidate span
//! generator and the high-level `Resolver`, composed with the shared
//! matching machinery from `vnaddr-core`.
//!
//! Public API exported here:
//! - `Resolver` and `Resolution` from `resolver`
//! - `Level`, `detect_level` and `strip_display_prefix` from `prefix`
//! - `segments` and `Windows` from `segment`
//! - `ResolverConfig` from `config`
//! - loading helpers from `tables`

pub mod config;
pub mod prefix;
pub mod resolver;
pub mod segment;
pub mod tables;

// Convenience re-exports for common types used by callers.
pub use vnaddr_core::{
    build_index, lcs_len, levenshtein, normalize, BkTree, Config, DictEntry, Dictionary,
    FuzzyIndex, FuzzyTrie, IndexKind, Match, RefRecord, ReferenceGraph,
};

pub use config::ResolverConfig;
pub use prefix::{detect_level, strip_display_prefix, Level};
pub use resolver::{Resolution, Resolver};
pub use segment::{segments, Windows};
pub use tables::{
    load_dictionary, load_divisions_json, load_reference, load_resolver,
    load_resolver_from_json, AddressTables,
};
