// vnaddr/src/resolver.rs
//
// Hierarchical address resolution engine.
//
// A Resolver owns one dictionary + fuzzy index per administrative level
// and the containment reference graph. Each resolve call sweeps the
// candidate spans of the input, runs a prefix-guided search and an
// unguided search per span, and folds admissible matches into a
// three-slot state under the hierarchy rules. State is local to the
// call, so a shared Resolver can serve many threads at once.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use serde::Serialize;
use tracing::trace;

use crate::config::ResolverConfig;
use crate::prefix::{detect_level, Level};
use crate::segment::{segments, Windows};
use vnaddr_core::{build_index, lcs_len, normalize, Dictionary, FuzzyIndex, ReferenceGraph};

/// Outcome of one `resolve` call. Unresolved levels are empty strings;
/// resolved ones carry the dictionary's display originals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub ward: String,
    pub district: String,
    pub province: String,
}

/// Running best match for one level within a single call.
#[derive(Debug, Clone, Default)]
struct Slot {
    orig: String,
    key: String,
    lcs: usize,
    score: f32,
}

impl Slot {
    fn filled(&self) -> bool {
        !self.orig.is_empty()
    }

    fn clear(&mut self) {
        *self = Slot::default();
    }
}

/// Per-call resolution state: one slot per level, admitted scores only
/// ever increase (except a district cleared by a conflicting province).
#[derive(Debug, Default)]
struct ResolutionState {
    ward: Slot,
    district: Slot,
    province: Slot,
}

impl ResolutionState {
    fn slot(&self, level: Level) -> &Slot {
        match level {
            Level::Province => &self.province,
            Level::District => &self.district,
            Level::Ward => &self.ward,
        }
    }

    fn slot_mut(&mut self, level: Level) -> &mut Slot {
        match level {
            Level::Province => &mut self.province,
            Level::District => &mut self.district,
            Level::Ward => &mut self.ward,
        }
    }

    fn complete(&self) -> bool {
        self.ward.filled() && self.district.filled() && self.province.filled()
    }

    fn into_resolution(self) -> Resolution {
        Resolution {
            ward: self.ward.orig,
            district: self.district.orig,
            province: self.province.orig,
        }
    }
}

struct LevelEntry {
    dict: Dictionary,
    index: Box<dyn FuzzyIndex>,
}

/// Address resolution engine.
///
/// Built once from the three level dictionaries and the reference
/// graph; immutable afterwards apart from the result cache.
pub struct Resolver {
    province: LevelEntry,
    district: LevelEntry,
    ward: LevelEntry,
    reference: ReferenceGraph,
    config: ResolverConfig,
    cache: Mutex<LruCache<String, Resolution>>,
}

impl Resolver {
    /// Build a resolver; each level's fuzzy index is constructed from
    /// its dictionary keys using the configured backend.
    pub fn new(
        provinces: Dictionary,
        districts: Dictionary,
        wards: Dictionary,
        reference: ReferenceGraph,
        config: ResolverConfig,
    ) -> Self {
        let kind = config.base.index;
        let make_level = |dict: Dictionary| {
            let index = build_index(kind, dict.keys());
            LevelEntry { dict, index }
        };
        let capacity = NonZeroUsize::new(config.base.max_cache_size)
            .unwrap_or_else(|| NonZeroUsize::new(1024).unwrap());
        Self {
            province: make_level(provinces),
            district: make_level(districts),
            ward: make_level(wards),
            reference,
            config,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn reference(&self) -> &ReferenceGraph {
        &self.reference
    }

    fn level_entry(&self, level: Level) -> &LevelEntry {
        match level {
            Level::Province => &self.province,
            Level::District => &self.district,
            Level::Ward => &self.ward,
        }
    }

    /// Resolve one free-form input line into a (ward, district,
    /// province) triple. Never fails: unknown input yields empty
    /// strings.
    pub fn resolve(&self, input: &str) -> Resolution {
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(hit) = cache.get(input) {
                return hit.clone();
            }
        }

        let mut state = ResolutionState::default();
        'input: for segment in segments(input) {
            let norm = normalize(segment);
            let tokens: Vec<&str> = norm.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            for span in Windows::new(&tokens, self.config.max_window) {
                if state.complete() {
                    break 'input;
                }
                self.consider(&span, &mut state);
            }
        }

        let resolution = state.into_resolution();
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(input.to_string(), resolution.clone());
        }
        resolution
    }

    /// Run both search paths for one candidate span.
    fn consider(&self, span: &str, state: &mut ResolutionState) {
        let compact_len = span.chars().filter(|c| !c.is_whitespace()).count().max(1);
        let budget = self.config.base.edit_budget(compact_len);

        // Prefix-guided path: search only the level the prefix names,
        // with the bias on top.
        if let Some((skip, level)) = detect_level(span) {
            let sub = span[skip..].trim();
            if !sub.is_empty() {
                self.try_admit(sub, level, budget, self.config.prefix_bias, state);
            }
        }

        // Unguided path: the whole span against every level, no bias.
        for level in Level::ALL {
            self.try_admit(span, level, budget, 0.0, state);
        }
    }

    /// Search one level and fold the best admissible match into its
    /// slot. Returns whether the slot changed.
    fn try_admit(
        &self,
        query: &str,
        level: Level,
        budget: usize,
        bias: f32,
        state: &mut ResolutionState,
    ) -> bool {
        let entry = self.level_entry(level);
        let matches = entry.index.search(query, budget);
        if matches.is_empty() {
            return false;
        }

        let mut ranked: Vec<(f32, usize, String)> = matches
            .into_iter()
            .map(|m| {
                let score = m.score(query);
                let lcs = lcs_len(query, &m.key);
                (score, lcs, m.key)
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.1.cmp(&a.1))
        });

        let Some((score, lcs, key)) = ranked
            .into_iter()
            .find(|(_, _, key)| self.passes_hierarchy(level, key, state))
        else {
            return false;
        };

        let effective = score + bias;
        if effective <= state.slot(level).score {
            return false;
        }

        let orig = entry.dict.original_of(&key).unwrap_or_default().to_string();
        trace!(level = level.name(), query, key = key.as_str(), score = effective, "admitted");
        *state.slot_mut(level) = Slot { orig, key, lcs, score: effective };

        // A newly admitted province evicts a district it cannot
        // contain. The ward slot is deliberately left as-is.
        if level == Level::Province
            && state.district.filled()
            && !self
                .reference
                .district_in_province(&state.district.key, &state.province.key)
        {
            state.district.clear();
        }
        true
    }

    /// Containment pre-check for a candidate key against the slots
    /// already filled. Keys absent from the reference answer false, so
    /// dependent levels reject rather than contradict.
    fn passes_hierarchy(&self, level: Level, key: &str, state: &ResolutionState) -> bool {
        match level {
            Level::Province => true,
            Level::District => {
                !state.province.filled()
                    || self.reference.district_in_province(key, &state.province.key)
            }
            Level::Ward => {
                if state.province.filled() && state.district.filled() {
                    self.reference
                        .ward_in_district(key, &state.province.key, &state.district.key)
                } else if state.province.filled() {
                    self.reference.ward_in_province(key, &state.province.key)
                } else if state.district.filled() {
                    self.reference.ward_under_district(key, &state.district.key)
                } else {
                    true
                }
            }
        }
    }
}
