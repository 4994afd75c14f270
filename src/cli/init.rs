use crate::models::{SiteConfig, CONFIG_FILE};
use crate::Result;
use colored::Colorize;
use std::env;

pub fn run(force: bool) -> Result<()> {
    let path = env::current_dir()?.join(CONFIG_FILE);

    if path.exists() && !force {
        println!(
            "{}",
            format!("⚠ {} already exists (use --force to overwrite)", CONFIG_FILE).yellow()
        );
        return Ok(());
    }

    SiteConfig::default().save(&path)?;
    println!("{}", format!("✓ Wrote {}", path.display()).green());
    println!("   Add an [[admin]] entry with a token to enable the admin API.");
    Ok(())
}
