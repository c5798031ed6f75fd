//! Administrative containment graph: province -> district -> wards.
//!
//! Records are inserted as display originals and normalized on the way
//! in; all queries take normalized keys. A key missing from the graph
//! simply answers `false` to every membership question, so dependent
//! filters reject rather than erroring.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// One (ward, district, province) record in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefRecord {
    pub ward: String,
    pub district: String,
    pub province: String,
}

/// Three-level containment relation with O(1) membership tests.
#[derive(Debug, Default)]
pub struct ReferenceGraph {
    provinces: AHashMap<String, AHashMap<String, AHashSet<String>>>,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from display-form records.
    pub fn from_records(records: &[RefRecord]) -> Self {
        let mut graph = Self::new();
        for r in records {
            graph.insert_record(&r.ward, &r.district, &r.province);
        }
        tracing::debug!(provinces = graph.len(), "built reference graph");
        graph
    }

    /// Insert one record given as display originals; fields are
    /// normalized here. Records with a field that normalizes to nothing
    /// are ignored.
    pub fn insert_record(&mut self, ward: &str, district: &str, province: &str) {
        let ward = normalize(ward);
        let district = normalize(district);
        let province = normalize(province);
        if ward.is_empty() || district.is_empty() || province.is_empty() {
            return;
        }
        self.provinces
            .entry(province)
            .or_default()
            .entry(district)
            .or_default()
            .insert(ward);
    }

    /// Is `district_key` a child of `province_key`?
    pub fn district_in_province(&self, district_key: &str, province_key: &str) -> bool {
        self.provinces
            .get(province_key)
            .is_some_and(|districts| districts.contains_key(district_key))
    }

    /// Is `ward_key` a child of (`province_key`, `district_key`)?
    pub fn ward_in_district(
        &self,
        ward_key: &str,
        province_key: &str,
        district_key: &str,
    ) -> bool {
        self.provinces
            .get(province_key)
            .and_then(|districts| districts.get(district_key))
            .is_some_and(|wards| wards.contains(ward_key))
    }

    /// Is `ward_key` somewhere under `province_key`, any district?
    pub fn ward_in_province(&self, ward_key: &str, province_key: &str) -> bool {
        self.provinces
            .get(province_key)
            .is_some_and(|districts| districts.values().any(|wards| wards.contains(ward_key)))
    }

    /// Is `ward_key` under `district_key` in any province?
    pub fn ward_under_district(&self, ward_key: &str, district_key: &str) -> bool {
        self.provinces.values().any(|districts| {
            districts
                .get(district_key)
                .is_some_and(|wards| wards.contains(ward_key))
        })
    }

    /// Number of provinces present.
    pub fn len(&self) -> usize {
        self.provinces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.provinces.is_empty()
    }
}

/// Persist a record list with bincode.
pub fn save_records<P: AsRef<Path>>(records: &[RefRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("create reference {}", path.display()))?;
    bincode::serialize_into(BufWriter::new(file), records)?;
    Ok(())
}

/// Load a record list written by [`save_records`].
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<RefRecord>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("open reference {}", path.display()))?;
    let records = bincode::deserialize_from(BufReader::new(file)).context("decode reference")?;
    Ok(records)
}
