use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub rates: RatesConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
    /// Chat ids allowed to use the bot; empty allows everyone.
    #[serde(default)]
    pub allow_from: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RatesConfig {
    #[serde(default = "RatesConfig::default_base_url")]
    pub base_url: String,
    /// Request timeout; unset keeps the HTTP client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_secs: None,
        }
    }
}

impl RatesConfig {
    fn default_base_url() -> String {
        "https://api.exchangerate-api.com/v4/latest".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct HistoryConfig {
    /// Conversion log file; defaults to `~/valuta/conversions.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl HistoryConfig {
    pub fn resolve_path(&self) -> anyhow::Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_dir()?.join("conversions.json")),
        }
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "telegram": {
    "token": "your-telegram-bot-token-here",
    "allow_from": []
  },
  "rates": {
    "base_url": "https://api.exchangerate-api.com/v4/latest"
  },
  "history": {}
}"#;

impl Config {
    /// `~/valuta`
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("valuta"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_dir()?.join("config.json");

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'valuta init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");
        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Telegram bot token");
        println!("   2. Run 'valuta run' to start the bot");
        println!();
        println!("🔧 Configuration options:");
        println!("   - telegram.allow_from: chat ids allowed to use the bot (empty = everyone)");
        println!("   - rates.timeout_secs: timeout for rate requests");
        println!("   - history.path: where the last conversions are stored");
        println!();
        Ok(())
    }

    /// Write the template to `path`, refusing to overwrite an existing file.
    pub fn write_template(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }
        std::fs::write(path, CONFIG_TEMPLATE)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_with_defaults() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.telegram.token, "your-telegram-bot-token-here");
        assert!(config.telegram.allow_from.is_empty());
        assert_eq!(
            config.rates.base_url,
            "https://api.exchangerate-api.com/v4/latest"
        );
        assert_eq!(config.rates.timeout_secs, None);
        assert_eq!(config.history.path, None);
    }

    #[test]
    fn empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.telegram.token.is_empty());
        assert_eq!(config.rates.base_url, RatesConfig::default_base_url());
    }

    #[test]
    fn explicit_history_path_wins() {
        let config: Config =
            serde_json::from_str(r#"{"history": {"path": "/tmp/log.json"}}"#).unwrap();
        assert_eq!(
            config.history.resolve_path().unwrap(),
            PathBuf::from("/tmp/log.json")
        );
    }

    #[test]
    fn write_template_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        Config::write_template(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.telegram.token, "your-telegram-bot-token-here");

        assert!(Config::write_template(&path).is_err());
    }
}
