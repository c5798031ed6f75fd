//! Canonical key normalization.
//!
//! Every string that enters the matching pipeline (dictionary names,
//! reference records, prefixes, user input) is reduced to the same key
//! form: lowercase ASCII letters and digits separated by single
//! spaces. Vietnamese diacritics are folded away via NFD decomposition,
//! with `đ`/`Đ` handled explicitly since it does not decompose.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a string to its canonical key.
///
/// Lowercases, strips combining marks, maps `đ` to `d`, replaces every
/// run of characters outside `[a-z0-9]` with one space and trims. The
/// function is pure and idempotent.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for ch in s.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        let ch = match ch {
            'đ' => 'd',
            'Đ' => 'D',
            other => other,
        };
        for lc in ch.to_lowercase() {
            if lc.is_ascii_alphanumeric() {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(lc);
            } else {
                pending_space = true;
            }
        }
    }
    out
}
