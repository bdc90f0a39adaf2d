use std::path::Path;
use std::fs;
use anyhow::{Result, Context};
use serde::{Deserialize, Serialize};
use ethwire_abi::ParserOptions;

/// Tool configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Type parser configuration
    pub parser: ParserConfig,
    /// Logging configuration
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Treat unknown scalar names as `uint8` enums instead of failing
    pub lenient_enum_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context("Failed to read configuration file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        fs::write(path, content)
            .context("Failed to write configuration file")?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let level = self.log.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!("Unknown log level: {}", self.log.level);
        }

        Ok(())
    }

    /// Options handed to `ParamType::parse_with`
    pub fn parser_options(&self) -> ParserOptions {
        if self.parser.lenient_enum_fallback {
            ParserOptions::lenient()
        } else {
            ParserOptions::strict()
        }
    }
}
