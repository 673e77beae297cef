use colored::*;
use eyre::{Context, Result};

use insayt_track::Config;

pub fn run(config: &Config) -> Result<()> {
    println!("{}", "Insayt Configuration".bold());
    println!("  collect url: {}", config.collect_url().cyan());
    println!();

    let yaml_str = serde_yaml::to_string(config).context("Failed to serialize config")?;
    print!("{}", yaml_str);

    Ok(())
}
