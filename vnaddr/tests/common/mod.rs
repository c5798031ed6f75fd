//! Shared fixture: a small slice of real administrative data, enough
//! for every hierarchy relation the resolver exercises.
#![allow(dead_code)]

use vnaddr::{Dictionary, ReferenceGraph, Resolver, ResolverConfig};

pub const PROVINCES: &[&str] = &[
    "Tiền Giang",
    "Thanh Hóa",
    "Bình Dương",
    "Nghệ An",
    "Hà Nội",
    "Vĩnh Long",
];

pub const DISTRICTS: &[&str] = &[
    "Gò Công Tây",
    "Nga Sơn",
    "Thủ Dầu Một",
    "Con Cuông",
    "Ba Đình",
    "Mang Thít",
];

pub const WARDS: &[&str] = &[
    "Long Bình",
    "Nga Thạnh",
    "Phú Mỹ",
    "Trà Lân",
    "Phúc Xá",
    "Hòa Tịnh",
];

/// (ward, district, province)
pub const TRIPLES: &[(&str, &str, &str)] = &[
    ("Long Bình", "Gò Công Tây", "Tiền Giang"),
    ("Nga Thạnh", "Nga Sơn", "Thanh Hóa"),
    ("Phú Mỹ", "Thủ Dầu Một", "Bình Dương"),
    ("Trà Lân", "Con Cuông", "Nghệ An"),
    ("Phúc Xá", "Ba Đình", "Hà Nội"),
    ("Hòa Tịnh", "Mang Thít", "Vĩnh Long"),
];

pub fn resolver_with(config: ResolverConfig) -> Resolver {
    let provinces = Dictionary::from_names(PROVINCES.iter().copied());
    let districts = Dictionary::from_names(DISTRICTS.iter().copied());
    let wards = Dictionary::from_names(WARDS.iter().copied());
    let mut reference = ReferenceGraph::new();
    for (ward, district, province) in TRIPLES {
        reference.insert_record(ward, district, province);
    }
    Resolver::new(provinces, districts, wards, reference, config)
}

pub fn resolver() -> Resolver {
    resolver_with(ResolverConfig::default())
}
