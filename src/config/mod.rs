//! Configuration management

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub site: SiteConfig,
}

fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Site name used in `<title>` and the header
    #[serde(default = "default_title")]
    pub title: String,

    /// Meta description
    #[serde(default)]
    pub tagline: Option<String>,

    /// Directory holding the built web client, served under /assets
    #[serde(default)]
    pub client_dir: Option<PathBuf>,

    /// Module script URL that boots the web client on every page
    #[serde(default)]
    pub client_script: Option<String>,
}

fn default_title() -> String {
    "Docs".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            tagline: None,
            client_dir: None,
            client_script: None,
        }
    }
}

/// Get config directory (DOCSITE_CONFIG_DIR, XDG_CONFIG_HOME or platform default)
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DOCSITE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join("Library/Application Support/docsite");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("docsite");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config/docsite");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("docsite");
        }
    }

    // Fallback to current directory
    PathBuf::from(".")
}

pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir();

    let mut builder = ::config::Config::builder()
        // Start with defaults
        .set_default("port", default_port() as i64)?
        .set_default("host", default_host())?
        // Load from config file if it exists (config.toml, config.yaml, ...)
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false),
        )
        // Override with environment variables (DOCSITE_HOST, DOCSITE_SITE__TITLE, etc.)
        .add_source(
            ::config::Environment::with_prefix("DOCSITE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    // Port precedence: DOCSITE_PORT > PORT > config > default
    if let Ok(port) = std::env::var("DOCSITE_PORT") {
        if let Ok(port_num) = port.parse::<u16>() {
            builder = builder.set_override("port", port_num as i64)?;
        }
    } else if let Ok(port) = std::env::var("PORT") {
        // Generic PORT used by container platforms
        if let Ok(port_num) = port.parse::<u16>() {
            builder = builder.set_override("port", port_num as i64)?;
        }
    }

    let config = builder.build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        for var in ["DOCSITE_PORT", "PORT", "DOCSITE_HOST", "DOCSITE_SITE__TITLE"] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_config_file() {
        clear_env();
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        env::set_var("DOCSITE_CONFIG_DIR", temp_dir.path());

        let config = load_config().expect("config should load");

        env::remove_var("DOCSITE_CONFIG_DIR");

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.site.title, "Docs");
        assert!(config.site.client_script.is_none());
    }

    #[test]
    #[serial]
    fn test_port_env_fallback() {
        clear_env();
        env::set_var("DOCSITE_CONFIG_DIR", "/tmp/docsite-test-nonexistent");
        env::set_var("PORT", "3000");

        let config = load_config().expect("config should load");

        env::remove_var("PORT");
        env::remove_var("DOCSITE_CONFIG_DIR");

        assert_eq!(config.port, 3000, "PORT env var should set config.port");
    }

    #[test]
    #[serial]
    fn test_docsite_port_takes_precedence_over_port() {
        clear_env();
        env::set_var("DOCSITE_CONFIG_DIR", "/tmp/docsite-test-nonexistent");
        env::set_var("DOCSITE_PORT", "5000");
        env::set_var("PORT", "3000");

        let config = load_config().expect("config should load");

        env::remove_var("DOCSITE_PORT");
        env::remove_var("PORT");
        env::remove_var("DOCSITE_CONFIG_DIR");

        assert_eq!(
            config.port, 5000,
            "DOCSITE_PORT should take precedence over PORT"
        );
    }

    #[test]
    #[serial]
    fn test_invalid_port_uses_default() {
        clear_env();
        env::set_var("DOCSITE_CONFIG_DIR", "/tmp/docsite-test-nonexistent");
        env::set_var("PORT", "not-a-number");

        let config = load_config().expect("config should load");

        env::remove_var("PORT");
        env::remove_var("DOCSITE_CONFIG_DIR");

        assert_eq!(config.port, 8080, "Invalid PORT should fall back to default");
    }

    #[test]
    #[serial]
    fn test_config_file_is_read() {
        clear_env();
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "port = 9100\n[site]\ntitle = \"Acme CLI\"\nclient_script = \"/assets/client.js\"\n",
        )
        .expect("write config");
        env::set_var("DOCSITE_CONFIG_DIR", temp_dir.path());

        let config = load_config().expect("config should load");

        env::remove_var("DOCSITE_CONFIG_DIR");

        assert_eq!(config.port, 9100);
        assert_eq!(config.site.title, "Acme CLI");
        assert_eq!(config.site.client_script.as_deref(), Some("/assets/client.js"));
    }

    #[test]
    #[serial]
    fn test_env_overrides_nested_site_title() {
        clear_env();
        env::set_var("DOCSITE_CONFIG_DIR", "/tmp/docsite-test-nonexistent");
        env::set_var("DOCSITE_SITE__TITLE", "From Env");

        let config = load_config().expect("config should load");

        env::remove_var("DOCSITE_SITE__TITLE");
        env::remove_var("DOCSITE_CONFIG_DIR");

        assert_eq!(config.site.title, "From Env");
    }

    #[test]
    #[serial]
    fn test_config_dir_env_override() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        env::set_var("DOCSITE_CONFIG_DIR", temp_dir.path());

        let dir = get_config_dir();

        env::remove_var("DOCSITE_CONFIG_DIR");

        assert_eq!(dir, temp_dir.path());
    }
}
