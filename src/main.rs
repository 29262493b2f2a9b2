use std::env;
use std::path::Path;

use anyhow::Result;

use bank_unifier::{dispatch, Config};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config_path = args.get(1).map(String::as_str).unwrap_or("config.json");

    println!("🏦 Bank export unifier");

    let config = Config::load(Path::new(config_path))?;
    println!("✓ Loaded configuration ({} known source files)", config.sources.len());

    let summary = dispatch::run(&config)?;
    println!(
        "✓ Unified {} rows from {} files → {}",
        summary.rows,
        summary.files,
        config.settings.output_path.display()
    );

    Ok(())
}
