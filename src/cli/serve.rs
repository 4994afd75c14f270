use crate::models::{SiteConfig, CONFIG_FILE};
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use std::path::{Path, PathBuf};

pub async fn run(config_path: Option<&Path>, port: Option<u16>) -> Result<()> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    let mut config = SiteConfig::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(port) = port {
        config.server.port = port;
    }

    println!(
        "{}",
        format!(
            "✓ Serving {} on http://{}:{}",
            config.site.name, config.server.host, config.server.port
        )
        .green()
    );
    println!("   Data:    {}", config.storage.data_dir.display());
    println!("   Uploads: {}", config.storage.upload_dir.display());
    if config.admin.is_empty() {
        println!(
            "{}",
            "⚠ No admin tokens configured; the admin API is locked".yellow()
        );
    }

    crate::server::start_server(config).await
}
