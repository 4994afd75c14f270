use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "bridgesite.toml";

// =============================================================================
// Sections
// =============================================================================

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Quote endpoint rate limiting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RateLimitSection {
    /// Fixed window length
    pub window_secs: u64,
    /// Requests allowed per client per window
    pub max_requests: u32,
    /// How often expired windows are swept
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitSection {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_requests: 5,
            sweep_interval_secs: 300,
        }
    }
}

/// Record and uploaded file storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageSection {
    /// Directory holding one JSON file per record table
    pub data_dir: PathBuf,
    /// Directory uploaded files are written to
    pub upload_dir: PathBuf,
    /// URL prefix under which `upload_dir` is publicly served
    pub public_base_url: String,
}

impl StorageSection {
    /// Absolute base URL for stored files
    ///
    /// A root-relative `public_base_url` is resolved against the site URL so
    /// upload URLs pass the same URL checks as any other image field.
    pub fn public_url(&self, site: &SiteSection) -> String {
        let base = self.public_base_url.trim_end_matches('/');
        if base.starts_with('/') {
            format!("{}{}", site.url.trim_end_matches('/'), base)
        } else {
            base.to_string()
        }
    }
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            upload_dir: PathBuf::from("uploads"),
            public_base_url: "/uploads".to_string(),
        }
    }
}

/// Public site identity used in page metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteSection {
    pub name: String,
    pub url: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "상생 브릿지".to_string(),
            url: "https://sangsaengbridge.com".to_string(),
        }
    }
}

/// A bearer token accepted by the static auth guard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminCredential {
    pub token: String,
    pub user_id: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "admin".to_string()
}

// =============================================================================
// Site Configuration
// =============================================================================

/// Site configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub rate_limit: RateLimitSection,

    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub site: SiteSection,

    #[serde(default)]
    pub admin: Vec<AdminCredential>,
}

impl SiteConfig {
    /// Load config from a TOML file; a missing file yields defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: SiteConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config as pretty TOML
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = SiteConfig::load(&temp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.rate_limit.max_requests, 5);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "[server]\nport = 8080\n\n[[admin]]\ntoken = \"secret\"\nuser_id = \"u1\"\n",
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.admin.len(), 1);
        assert_eq!(config.admin[0].role, "admin");
        assert_eq!(config.storage.public_base_url, "/uploads");
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join(CONFIG_FILE);
        let mut config = SiteConfig::default();
        config.site.name = "Test Site".to_string();
        config.save(&path).unwrap();

        let loaded = SiteConfig::load(&path).unwrap();
        assert_eq!(loaded.site.name, "Test Site");
    }

    #[test]
    fn test_public_url_resolves_against_site() {
        let mut config = SiteConfig::default();
        config.site.url = "https://example.com/".to_string();
        assert_eq!(
            config.storage.public_url(&config.site),
            "https://example.com/uploads"
        );

        config.storage.public_base_url = "https://cdn.example.com/files/".to_string();
        assert_eq!(
            config.storage.public_url(&config.site),
            "https://cdn.example.com/files"
        );
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(SiteConfig::load(&path).is_err());
    }
}
