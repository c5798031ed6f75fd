use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use vnaddr::{tables, Resolution, ResolverConfig};

#[derive(Parser)]
#[command(name = "vnaddr", about = "Resolve noisy Vietnamese addresses into (ward, district, province)")]
struct Args {
    /// Directory containing list_*.txt and reference.txt, or the
    /// compiled .fst/.bincode artifacts
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Optional TOML file overriding the resolver configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit one JSON object per input line instead of plain text
    #[arg(long)]
    json: bool,
}

fn print_plain(resolution: &Resolution) {
    fn show(s: &str) -> &str {
        if s.is_empty() { "-" } else { s }
    }
    println!(
        "  ward: {} | district: {} | province: {}",
        show(&resolution.ward),
        show(&resolution.district),
        show(&resolution.province)
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ResolverConfig::load_toml(path)
            .map_err(|e| anyhow::anyhow!("load config {}: {e}", path.display()))?,
        None => ResolverConfig::default(),
    };

    let resolver = tables::load_resolver(&args.data_dir, config)?;
    if !args.json {
        println!("vnaddr - type an address, one per line. Ctrl+C to exit.");
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let resolution = resolver.resolve(input);
        if args.json {
            println!("{}", serde_json::to_string(&resolution)?);
        } else {
            print_plain(&resolution);
        }
    }
    Ok(())
}
