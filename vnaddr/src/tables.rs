//! Table loading for the resolver.
//!
//! Three input shapes are understood:
//! - flat name lists (`list_province.txt`, `list_district.txt`,
//!   `list_ward.txt`) plus a comma-separated `reference.txt`;
//! - compiled artifacts (`<level>.fst` + `<level>.bincode`,
//!   `reference.bincode`) written by the `compile_tables` tool, which
//!   take precedence when present;
//! - a nested divisions JSON export (`{"data": [{name, level2s:
//!   [{name, level3s: [{name}]}]}]}`), from which the dictionaries and
//!   the reference graph are both derived.

use std::fs;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::prefix::strip_display_prefix;
use crate::resolver::Resolver;
use vnaddr_core::reference::{load_records, RefRecord};
use vnaddr_core::{Dictionary, ReferenceGraph};

pub const PROVINCE_LIST: &str = "list_province.txt";
pub const DISTRICT_LIST: &str = "list_district.txt";
pub const WARD_LIST: &str = "list_ward.txt";
pub const REFERENCE_FILE: &str = "reference.txt";

/// Load a flat name-list dictionary (one original per line).
pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<Dictionary> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("open dictionary {}", path.display()))?;
    Ok(Dictionary::from_names(text.lines()))
}

/// Split one reference line into (ward, district, province); lines
/// without exactly three comma-separated fields are rejected.
pub fn parse_reference_line(line: &str) -> Option<(&str, &str, &str)> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 3 {
        return None;
    }
    Some((fields[0].trim(), fields[1].trim(), fields[2].trim()))
}

/// Load `reference.txt`. Malformed lines are dropped, not errors.
pub fn load_reference<P: AsRef<Path>>(path: P) -> Result<ReferenceGraph> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("open reference {}", path.display()))?;
    let mut graph = ReferenceGraph::new();
    let mut dropped = 0usize;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_reference_line(line) {
            Some((ward, district, province)) => graph.insert_record(ward, district, province),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, "skipped malformed reference lines");
    }
    Ok(graph)
}

/// Load one level dictionary, preferring compiled artifacts when both
/// files are present in `dir`.
pub fn load_level<P: AsRef<Path>>(dir: P, stem: &str, list_name: &str) -> Result<Dictionary> {
    let dir = dir.as_ref();
    let fst_path = dir.join(format!("{stem}.fst"));
    let bin_path = dir.join(format!("{stem}.bincode"));
    if fst_path.exists() && bin_path.exists() {
        return Dictionary::load_compiled(&fst_path, &bin_path);
    }
    load_dictionary(dir.join(list_name))
}

/// Build a resolver from a data directory holding either the text
/// tables or their compiled artifacts.
pub fn load_resolver<P: AsRef<Path>>(dir: P, config: ResolverConfig) -> Result<Resolver> {
    let dir = dir.as_ref();
    let provinces = load_level(dir, "province", PROVINCE_LIST)?;
    let districts = load_level(dir, "district", DISTRICT_LIST)?;
    let wards = load_level(dir, "ward", WARD_LIST)?;

    let compiled_ref = dir.join("reference.bincode");
    let reference = if compiled_ref.exists() {
        ReferenceGraph::from_records(&load_records(&compiled_ref)?)
    } else {
        load_reference(dir.join(REFERENCE_FILE))?
    };

    info!(
        provinces = provinces.len(),
        districts = districts.len(),
        wards = wards.len(),
        "loaded address tables"
    );
    Ok(Resolver::new(provinces, districts, wards, reference, config))
}

/// Nested divisions export: provinces at the top, `level2s` districts,
/// `level3s` wards.
#[derive(Debug, Deserialize)]
pub struct DivisionsFile {
    pub data: Vec<ProvinceNode>,
}

#[derive(Debug, Deserialize)]
pub struct ProvinceNode {
    pub name: String,
    #[serde(default)]
    pub level2s: Vec<DistrictNode>,
}

#[derive(Debug, Deserialize)]
pub struct DistrictNode {
    pub name: String,
    #[serde(default)]
    pub level3s: Vec<WardNode>,
}

#[derive(Debug, Deserialize)]
pub struct WardNode {
    pub name: String,
}

/// Dictionaries plus reference records derived from one source.
pub struct AddressTables {
    pub provinces: Dictionary,
    pub districts: Dictionary,
    pub wards: Dictionary,
    pub records: Vec<RefRecord>,
}

impl AddressTables {
    pub fn reference(&self) -> ReferenceGraph {
        ReferenceGraph::from_records(&self.records)
    }
}

/// Derive all tables from a nested divisions JSON file. Display
/// prefixes are stripped from stored names the way the flat lists ship
/// them.
pub fn load_divisions_json<P: AsRef<Path>>(path: P) -> Result<AddressTables> {
    let path = path.as_ref();
    let file =
        fs::File::open(path).with_context(|| format!("open divisions {}", path.display()))?;
    let parsed: DivisionsFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("decode divisions {}", path.display()))?;

    let mut provinces = Dictionary::new();
    let mut districts = Dictionary::new();
    let mut wards = Dictionary::new();
    let mut records = Vec::new();

    for province in &parsed.data {
        let p_name = strip_display_prefix(&province.name);
        provinces.insert(p_name);
        for district in &province.level2s {
            let d_name = strip_display_prefix(&district.name);
            districts.insert(d_name);
            for ward in &district.level3s {
                let w_name = strip_display_prefix(&ward.name);
                wards.insert(w_name);
                records.push(RefRecord {
                    ward: w_name.to_string(),
                    district: d_name.to_string(),
                    province: p_name.to_string(),
                });
            }
        }
    }

    debug!(
        provinces = provinces.len(),
        districts = districts.len(),
        wards = wards.len(),
        records = records.len(),
        "parsed divisions file"
    );
    Ok(AddressTables { provinces, districts, wards, records })
}

/// Build a resolver straight from a divisions JSON file.
pub fn load_resolver_from_json<P: AsRef<Path>>(
    path: P,
    config: ResolverConfig,
) -> Result<Resolver> {
    let tables = load_divisions_json(path)?;
    let reference = tables.reference();
    Ok(Resolver::new(
        tables.provinces,
        tables.districts,
        tables.wards,
        reference,
        config,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_line_arity() {
        assert_eq!(
            parse_reference_line("Phúc Xá, Ba Đình, Hà Nội"),
            Some(("Phúc Xá", "Ba Đình", "Hà Nội"))
        );
        assert_eq!(parse_reference_line("only, two"), None);
        assert_eq!(parse_reference_line("a, b, c, d"), None);
        assert_eq!(parse_reference_line(""), None);
    }

    #[test]
    fn divisions_json_parses() {
        let json = r#"{
            "data": [
                {
                    "name": "Tỉnh Thanh Hóa",
                    "level2s": [
                        {
                            "name": "Huyện Nga Sơn",
                            "level3s": [{ "name": "Xã Nga Thạnh" }]
                        }
                    ]
                }
            ]
        }"#;
        let dir = std::env::temp_dir();
        let path = dir.join("vnaddr_divisions_test.json");
        std::fs::write(&path, json).unwrap();
        let tables = load_divisions_json(&path).unwrap();
        assert_eq!(tables.provinces.original_of("thanh hoa"), Some("Thanh Hóa"));
        assert_eq!(tables.districts.original_of("nga son"), Some("Nga Sơn"));
        assert_eq!(tables.wards.original_of("nga thanh"), Some("Nga Thạnh"));
        let graph = tables.reference();
        assert!(graph.ward_in_district("nga thanh", "thanh hoa", "nga son"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_files_are_fatal() {
        assert!(load_dictionary("/nonexistent/list.txt").is_err());
        assert!(load_reference("/nonexistent/reference.txt").is_err());
    }
}
