// Loading-path equivalence: the text tables, the compiled
// fst/bincode artifacts and the nested divisions JSON must all
// produce resolvers that answer identically.

mod common;

use std::fs;
use std::path::Path;

use vnaddr::{tables, RefRecord, ResolverConfig};

const PROBES: &[&str] = &[
    "xa loNG BinH HUyEn Go cOng tAY, tinH iEn GIANG",
    "Phường Phú Mỹ, Thà6nh phố Thủ Dầu Một, TBình Dương",
    "Hà Nội",
    "random noise 123",
];

fn write_text_tables(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(tables::PROVINCE_LIST), common::PROVINCES.join("\n")).unwrap();
    fs::write(dir.join(tables::DISTRICT_LIST), common::DISTRICTS.join("\n")).unwrap();
    fs::write(dir.join(tables::WARD_LIST), common::WARDS.join("\n")).unwrap();
    let mut reference = String::new();
    for (ward, district, province) in common::TRIPLES {
        reference.push_str(&format!("{ward}, {district}, {province}\n"));
    }
    // One malformed line; it must be dropped, not fatal.
    reference.push_str("not a valid record\n");
    fs::write(dir.join(tables::REFERENCE_FILE), reference).unwrap();
}

#[test]
fn text_and_compiled_artifacts_agree() {
    let text_dir = std::env::temp_dir().join("vnaddr_it_text");
    write_text_tables(&text_dir);
    let from_text = tables::load_resolver(&text_dir, ResolverConfig::default()).unwrap();

    let compiled_dir = std::env::temp_dir().join("vnaddr_it_compiled");
    fs::create_dir_all(&compiled_dir).unwrap();
    for (stem, list) in [
        ("province", tables::PROVINCE_LIST),
        ("district", tables::DISTRICT_LIST),
        ("ward", tables::WARD_LIST),
    ] {
        let dict = tables::load_dictionary(text_dir.join(list)).unwrap();
        dict.save_compiled(
            compiled_dir.join(format!("{stem}.fst")),
            compiled_dir.join(format!("{stem}.bincode")),
        )
        .unwrap();
    }
    let records: Vec<RefRecord> = common::TRIPLES
        .iter()
        .map(|(ward, district, province)| RefRecord {
            ward: ward.to_string(),
            district: district.to_string(),
            province: province.to_string(),
        })
        .collect();
    vnaddr_core::reference::save_records(&records, compiled_dir.join("reference.bincode"))
        .unwrap();
    let from_artifacts =
        tables::load_resolver(&compiled_dir, ResolverConfig::default()).unwrap();

    for probe in PROBES {
        assert_eq!(
            from_text.resolve(probe),
            from_artifacts.resolve(probe),
            "loading paths disagree on {probe:?}"
        );
    }

    let _ = fs::remove_dir_all(text_dir);
    let _ = fs::remove_dir_all(compiled_dir);
}

#[test]
fn divisions_json_agrees_with_flat_lists() {
    let mut provinces: Vec<serde_json::Value> = Vec::new();
    for province in common::PROVINCES {
        let districts: Vec<serde_json::Value> = common::TRIPLES
            .iter()
            .filter(|(_, _, p)| p == province)
            .map(|(ward, district, _)| {
                serde_json::json!({
                    "name": district,
                    "level3s": [{ "name": ward }],
                })
            })
            .collect();
        provinces.push(serde_json::json!({ "name": province, "level2s": districts }));
    }
    let json = serde_json::json!({ "data": provinces });

    let path = std::env::temp_dir().join("vnaddr_it_divisions.json");
    fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();

    let from_json =
        tables::load_resolver_from_json(&path, ResolverConfig::default()).unwrap();
    let from_lists = common::resolver();
    for probe in PROBES {
        assert_eq!(
            from_json.resolve(probe),
            from_lists.resolve(probe),
            "JSON ingest diverged on {probe:?}"
        );
    }

    let _ = fs::remove_file(path);
}
