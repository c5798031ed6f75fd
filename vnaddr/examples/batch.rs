//! Resolve a file of noisy addresses and print one JSON object per
//! line. Usage: `cargo run --example batch -- <data-dir> <input-file>`

use anyhow::{bail, Result};

use vnaddr::{tables, ResolverConfig};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [data_dir, input_file] = args.as_slice() else {
        bail!("usage: batch <data-dir> <input-file>");
    };

    let resolver = tables::load_resolver(data_dir, ResolverConfig::default())?;
    let inputs = std::fs::read_to_string(input_file)?;
    for line in inputs.lines() {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let resolution = resolver.resolve(input);
        println!("{}", serde_json::to_string(&resolution)?);
    }
    Ok(())
}
