// vnaddr/src/prefix.rs
//
// Administrative prefix classification.
// - Level: the three administrative levels
// - detect_level: classify a candidate span by its leading prefix
// - strip_display_prefix: drop a leading prefix from a display name

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use vnaddr_core::normalize;

/// One administrative level, in decreasing geographic size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Province,
    District,
    Ward,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Province, Level::District, Level::Ward];

    pub fn name(&self) -> &'static str {
        match self {
            Level::Province => "province",
            Level::District => "district",
            Level::Ward => "ward",
        }
    }
}

/// Raw prefix spellings, longest first. Diacritic and folded forms are
/// both listed; normalization collapses them (and the dotted
/// abbreviations) into one table entry each.
const RAW_PREFIXES: &[(&str, Level)] = &[
    ("thanh pho", Level::Province),
    ("thành phố", Level::Province),
    ("thi tran", Level::Ward),
    ("thị trấn", Level::Ward),
    ("thi xa", Level::District),
    ("thị xã", Level::District),
    ("phuong", Level::Ward),
    ("phường", Level::Ward),
    ("huyen", Level::District),
    ("huyện", Level::District),
    ("quan", Level::District),
    ("quận", Level::District),
    ("tinh", Level::Province),
    ("tỉnh", Level::Province),
    ("tp.", Level::Province),
    ("tx.", Level::District),
    ("tt.", Level::Ward),
    ("xa", Level::Ward),
    ("xã", Level::Ward),
    ("tp", Level::Province),
    ("tx", Level::District),
    ("tt", Level::Ward),
    ("p.", Level::Ward),
    ("q.", Level::District),
    ("t.", Level::Province),
    ("x.", Level::Ward),
    ("h.", Level::District),
    ("p", Level::Ward),
    ("q", Level::District),
    ("t", Level::Province),
    ("x", Level::Ward),
    ("h", Level::District),
];

static PREFIX_TABLE: Lazy<Vec<(String, Level)>> = Lazy::new(|| {
    let mut table: Vec<(String, Level)> = Vec::new();
    for (raw, level) in RAW_PREFIXES {
        let key = normalize(raw);
        if key.is_empty() || table.iter().any(|(k, _)| *k == key) {
            continue;
        }
        table.push((key, *level));
    }
    table
});

/// Normalized keys shorter than this only match when followed by a
/// space or the end of the span; a bare `h` must never eat the `h` of
/// `ha noi`. Word-length prefixes also match glued to the next token,
/// absorbing dropped-space noise such as `tinhthanh hoa`.
const GLUED_MIN_LEN: usize = 3;

/// Classify a normalized span by its leading administrative prefix.
///
/// Returns the number of bytes to strip (prefix plus the separating
/// space, if one was consumed) and the level the prefix denotes. The
/// table is scanned longest-first, so `thanh pho` wins over `t`.
pub fn detect_level(span: &str) -> Option<(usize, Level)> {
    for (key, level) in PREFIX_TABLE.iter() {
        if span == *key {
            return Some((span.len(), *level));
        }
        if let Some(rest) = span.strip_prefix(key.as_str()) {
            if rest.starts_with(' ') {
                return Some((key.len() + 1, *level));
            }
            if key.len() >= GLUED_MIN_LEN {
                return Some((key.len(), *level));
            }
        }
    }
    None
}

/// Display-form prefixes stripped from names arriving with their
/// administrative title attached (nested divisions exports).
const DISPLAY_PREFIXES: &[&str] = &[
    "Thành phố ",
    "Thành Phố ",
    "Thị trấn ",
    "Thị Trấn ",
    "Thị xã ",
    "Thị Xã ",
    "TP. ",
    "TP ",
    "Tỉnh ",
    "Quận ",
    "Huyện ",
    "Phường ",
    "Xã ",
];

/// Strip one leading administrative title from a display name.
pub fn strip_display_prefix(name: &str) -> &str {
    let trimmed = name.trim();
    for prefix in DISPLAY_PREFIXES {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            return rest.trim_start();
        }
    }
    trimmed
}
