//! Level dictionary: normalized key -> display original.
//!
//! A dictionary is built either from a plain name list (one original per
//! line) or from compiled artifacts: an `fst` map from key to payload
//! index plus a bincode-serialized entry vector. Lookups prefer the
//! in-memory map so dynamically inserted names shadow compiled ones.
//!
//! Duplicate keys keep the earliest original seen, so the display form
//! returned for a key is stable across reloads.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use ahash::AHashMap;
use anyhow::{Context, Result};
use fst::Map;
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// One compiled dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    pub key: String,
    pub original: String,
}

/// Mapping from normalized key to the first-seen original name.
#[derive(Debug, Default)]
pub struct Dictionary {
    originals: AHashMap<String, String>,
    // Compiled path: fst keys -> index into `entries`.
    fst_map: Option<Map<Vec<u8>>>,
    entries: Option<Vec<DictEntry>>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from raw display names.
    ///
    /// Names are trimmed; empty lines and names that normalize to
    /// nothing are skipped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for name in names {
            dict.insert(name.as_ref());
        }
        tracing::debug!(keys = dict.len(), "built dictionary");
        dict
    }

    /// Insert one display name. The first original seen for a key wins.
    pub fn insert(&mut self, original: &str) {
        let original = original.trim();
        if original.is_empty() {
            return;
        }
        let key = normalize(original);
        if key.is_empty() {
            return;
        }
        self.originals
            .entry(key)
            .or_insert_with(|| original.to_string());
    }

    /// Display original for a normalized key.
    pub fn original_of(&self, key: &str) -> Option<&str> {
        if let Some(orig) = self.originals.get(key) {
            return Some(orig);
        }
        if let (Some(map), Some(entries)) = (&self.fst_map, &self.entries) {
            if let Some(idx) = map.get(key) {
                return entries.get(idx as usize).map(|e| e.original.as_str());
            }
        }
        None
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.original_of(key).is_some()
    }

    /// Iterate all normalized keys, in-memory first, then compiled.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.originals
            .keys()
            .map(String::as_str)
            .chain(self.entries.iter().flatten().map(|e| e.key.as_str()))
    }

    pub fn len(&self) -> usize {
        self.originals.len() + self.entries.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the compiled form: `fst_path` gets the key map, `bin_path`
    /// the bincode entry vector aligned with the fst values.
    pub fn save_compiled<P: AsRef<Path>>(&self, fst_path: P, bin_path: P) -> Result<()> {
        let mut pairs: Vec<(String, String)> = self
            .keys()
            .map(|k| {
                let orig = self.original_of(k).unwrap_or(k).to_string();
                (k.to_string(), orig)
            })
            .collect();
        pairs.sort();
        pairs.dedup_by(|a, b| a.0 == b.0);

        let mut builder = fst::MapBuilder::new(Vec::new())?;
        let mut entries = Vec::with_capacity(pairs.len());
        for (i, (key, original)) in pairs.into_iter().enumerate() {
            builder.insert(&key, i as u64)?;
            entries.push(DictEntry { key, original });
        }
        let fst_bytes = builder.into_inner()?;

        let fst_path = fst_path.as_ref();
        let mut out = File::create(fst_path)
            .with_context(|| format!("create fst {}", fst_path.display()))?;
        out.write_all(&fst_bytes)?;

        let bin_path = bin_path.as_ref();
        let file = File::create(bin_path)
            .with_context(|| format!("create entries {}", bin_path.display()))?;
        bincode::serialize_into(BufWriter::new(file), &entries)?;
        Ok(())
    }

    /// Load the compiled form written by [`Dictionary::save_compiled`].
    pub fn load_compiled<P: AsRef<Path>>(fst_path: P, bin_path: P) -> Result<Self> {
        let fst_path = fst_path.as_ref();
        let mut buf = Vec::new();
        File::open(fst_path)
            .with_context(|| format!("open fst {}", fst_path.display()))?
            .read_to_end(&mut buf)?;
        let map = Map::new(buf).context("parse fst map")?;

        let bin_path = bin_path.as_ref();
        let file = File::open(bin_path)
            .with_context(|| format!("open entries {}", bin_path.display()))?;
        let entries: Vec<DictEntry> =
            bincode::deserialize_from(BufReader::new(file)).context("decode entries")?;

        Ok(Self {
            originals: AHashMap::new(),
            fst_map: Some(map),
            entries: Some(entries),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seen_original_wins() {
        let dict = Dictionary::from_names(["Hà Nội", "Ha Noi", "ha noi"]);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.original_of("ha noi"), Some("Hà Nội"));
    }

    #[test]
    fn skips_blank_names() {
        let dict = Dictionary::from_names(["", "   ", "--", "Nga Sơn"]);
        assert_eq!(dict.len(), 1);
        assert!(dict.contains_key("nga son"));
    }

    #[test]
    fn keys_cover_all_entries() {
        let dict = Dictionary::from_names(["Tiền Giang", "Bình Dương"]);
        let mut keys: Vec<&str> = dict.keys().collect();
        keys.sort();
        assert_eq!(keys, ["binh duong", "tien giang"]);
    }

    #[test]
    fn compiled_roundtrip() {
        let dict = Dictionary::from_names(["Thanh Hóa", "Nghệ An", "Gò Công Tây"]);
        let dir = std::env::temp_dir();
        let fst_path = dir.join("vnaddr_dict_test.fst");
        let bin_path = dir.join("vnaddr_dict_test.bincode");
        dict.save_compiled(&fst_path, &bin_path).unwrap();

        let loaded = Dictionary::load_compiled(&fst_path, &bin_path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.original_of("thanh hoa"), Some("Thanh Hóa"));
        assert_eq!(loaded.original_of("go cong tay"), Some("Gò Công Tây"));
        let mut keys: Vec<&str> = loaded.keys().collect();
        keys.sort();
        assert_eq!(keys, ["go cong tay", "nghe an", "thanh hoa"]);

        let _ = std::fs::remove_file(fst_path);
        let _ = std::fs::remove_file(bin_path);
    }

    #[test]
    fn missing_artifacts_error() {
        let err = Dictionary::load_compiled("/nonexistent/a.fst", "/nonexistent/a.bincode");
        assert!(err.is_err());
    }
}
