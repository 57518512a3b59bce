//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub adapters: AdaptersConfig,
    pub operators: OperatorsConfig,
    pub pricing: PricingConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub telegram: Option<TelegramConfig>,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TelegramConfig {
    pub enabled: bool,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

/// Human operators who fulfill orders out-of-band
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OperatorsConfig {
    /// Every recipient of order notifications
    pub recipients: Vec<i64>,
    /// Recipient of internal-error alerts; defaults to the first recipient
    pub primary: Option<i64>,
}

impl OperatorsConfig {
    pub fn primary_operator(&self) -> Option<i64> {
        self.primary.or_else(|| self.recipients.first().copied())
    }
}

/// Fixed exchange rates; no live fetching
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PricingConfig {
    /// How many CUP one USDT buys
    pub cup_per_usdt: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "tienda-bot".to_string(),
                prefix: "/".to_string(),
            },
            adapters: AdaptersConfig {
                telegram: Some(TelegramConfig {
                    enabled: false,
                    token: None,
                }),
                console: Some(ConsoleConfig { enabled: true }),
            },
            operators: OperatorsConfig {
                recipients: Vec::new(),
                primary: None,
            },
            pricing: PricingConfig { cup_per_usdt: 400.0 },
            database: DatabaseConfig {
                path: PathBuf::from("tienda-bot.db"),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.into(), content)
            .map_err(|e| ConfigError::Parse(format!("Failed to write config: {}", e)))
    }

    /// Build a configuration from environment variables
    pub fn load_env() -> Self {
        let mut config = Config::default();

        if let Ok(token) = std::env::var("BOT_TOKEN") {
            if let Some(ref mut tg) = config.adapters.telegram {
                tg.token = Some(token);
                tg.enabled = true;
            }
        }

        if let Ok(operators) = std::env::var("OPERATOR_IDS") {
            config.operators.recipients = operators
                .split(',')
                .filter_map(|id| id.trim().parse().ok())
                .collect();
        }

        if let Ok(rate) = std::env::var("CUP_PER_USDT") {
            if let Ok(rate) = rate.parse() {
                config.pricing.cup_per_usdt = rate;
            }
        }

        config
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.pricing.cup_per_usdt.is_finite() || self.pricing.cup_per_usdt <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "cup-per-usdt must be positive, got {}",
                self.pricing.cup_per_usdt
            )));
        }
        Ok(())
    }

    /// Token for the Telegram adapter, only when that adapter is enabled
    pub fn telegram_token(&self) -> Option<String> {
        self.adapters
            .telegram
            .as_ref()
            .filter(|tg| tg.enabled)
            .and_then(|tg| tg.token.clone())
    }

    /// Whether the console fallback may run; an absent section means yes
    pub fn console_enabled(&self) -> bool {
        self.adapters.console.as_ref().map_or(true, |c| c.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_yaml() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.bot.name, "tienda-bot");
        assert_eq!(parsed.pricing.cup_per_usdt, 400.0);
    }

    #[test]
    fn primary_operator_falls_back_to_first_recipient() {
        let operators = OperatorsConfig {
            recipients: vec![11, 22],
            primary: None,
        };
        assert_eq!(operators.primary_operator(), Some(11));

        let operators = OperatorsConfig {
            recipients: vec![11, 22],
            primary: Some(22),
        };
        assert_eq!(operators.primary_operator(), Some(22));

        let operators = OperatorsConfig {
            recipients: Vec::new(),
            primary: None,
        };
        assert_eq!(operators.primary_operator(), None);
    }

    #[test]
    fn disabled_telegram_adapter_keeps_its_token_out_of_use() {
        let mut config = Config::default();
        config.adapters.telegram = Some(TelegramConfig {
            enabled: false,
            token: Some("secret".to_string()),
        });
        assert_eq!(config.telegram_token(), None);

        config.adapters.telegram = Some(TelegramConfig {
            enabled: true,
            token: Some("secret".to_string()),
        });
        assert_eq!(config.telegram_token(), Some("secret".to_string()));

        // Enabled without a token still yields nothing to connect with
        config.adapters.telegram = Some(TelegramConfig {
            enabled: true,
            token: None,
        });
        assert_eq!(config.telegram_token(), None);
    }

    #[test]
    fn console_fallback_honors_its_enabled_flag() {
        let mut config = Config::default();
        assert!(config.console_enabled());

        config.adapters.console = Some(ConsoleConfig { enabled: false });
        assert!(!config.console_enabled());

        config.adapters.console = None;
        assert!(config.console_enabled());
    }

    #[test]
    fn non_positive_rate_is_rejected() {
        let mut config = Config::default();
        config.pricing.cup_per_usdt = 0.0;
        assert!(config.validate().is_err());
        config.pricing.cup_per_usdt = -5.0;
        assert!(config.validate().is_err());
    }
}
