//! Compile the plain-text address tables into the fst + bincode
//! artifacts preferred by the resolver's loader.
//!
//! Reads `list_province.txt`, `list_district.txt`, `list_ward.txt` and
//! `reference.txt` from the input directory and writes
//! `{province,district,ward}.{fst,bincode}` plus `reference.bincode`.
//! Malformed reference lines are reported and skipped.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use vnaddr::tables::{
    self, parse_reference_line, DISTRICT_LIST, PROVINCE_LIST, REFERENCE_FILE, WARD_LIST,
};
use vnaddr_core::reference::{save_records, RefRecord};

#[derive(Parser)]
#[command(name = "compile_tables", about = "Compile address tables into fst/bincode artifacts")]
struct Args {
    /// Directory containing the plain-text tables
    #[arg(long, default_value = "data")]
    input: PathBuf,

    /// Output directory for the artifacts (defaults to the input directory)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let out = args.out.unwrap_or_else(|| args.input.clone());
    fs::create_dir_all(&out).with_context(|| format!("create {}", out.display()))?;

    for (stem, list) in [
        ("province", PROVINCE_LIST),
        ("district", DISTRICT_LIST),
        ("ward", WARD_LIST),
    ] {
        let dict = tables::load_dictionary(args.input.join(list))?;
        dict.save_compiled(
            out.join(format!("{stem}.fst")),
            out.join(format!("{stem}.bincode")),
        )?;
        println!("✓ {stem}: {} keys", dict.len());
    }

    let ref_path = args.input.join(REFERENCE_FILE);
    let text = fs::read_to_string(&ref_path)
        .with_context(|| format!("open reference {}", ref_path.display()))?;
    let mut records = Vec::new();
    let mut dropped = 0usize;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_reference_line(line) {
            Some((ward, district, province)) => records.push(RefRecord {
                ward: ward.to_string(),
                district: district.to_string(),
                province: province.to_string(),
            }),
            None => dropped += 1,
        }
    }
    save_records(&records, out.join("reference.bincode"))?;
    if dropped > 0 {
        println!("⚠ reference: {} records, {dropped} malformed lines skipped", records.len());
    } else {
        println!("✓ reference: {} records", records.len());
    }
    Ok(())
}
