pub mod cli;
pub mod toml_config;

use crate::core::client::DEFAULT_BASE_URL;
use crate::core::ConfigProvider;
use crate::ui::notification::DEFAULT_DISMISS_AFTER;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

pub const DEFAULT_STORAGE_PATH: &str = "./.hair-studio";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "hair-studio")]
#[command(about = "Browse services and book appointments at the Hair Studio")]
pub struct CliConfig {
    #[arg(long, help = "API base address, e.g. http://127.0.0.1:8000/api")]
    pub api_base: Option<String>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Directory holding the local selection storage")]
    pub storage_path: Option<String>,

    #[arg(long, help = "Request timeout in seconds (none by default)")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all services
    Services,
    /// Show one service
    Service { id: i64 },
    /// Free time slots on a date (YYYY-MM-DD)
    Times {
        #[arg(long)]
        date: String,
    },
    /// Remember a service for the next booking
    Select { id: i64 },
    /// Book an appointment
    Book {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
        #[arg(long, help = "Service id; defaults to the one picked with `select`")]
        service: Option<String>,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Send a message to the studio
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

/// Effective settings: CLI flags over the TOML file over defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub storage_path: String,
    pub request_timeout_seconds: Option<u64>,
    pub dismiss_after_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            storage_path: DEFAULT_STORAGE_PATH.to_string(),
            request_timeout_seconds: None,
            dismiss_after_seconds: DEFAULT_DISMISS_AFTER.as_secs(),
        }
    }
}

impl Settings {
    pub fn from_toml(file: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: file.api.base_url.clone().unwrap_or(defaults.api_base_url),
            storage_path: file.storage.path.clone().unwrap_or(defaults.storage_path),
            request_timeout_seconds: file.api.timeout_seconds,
            dismiss_after_seconds: file
                .notifications
                .dismiss_after_seconds
                .unwrap_or(defaults.dismiss_after_seconds),
        }
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Self::from_toml(&file)
            }
            None => Self::default(),
        };

        if let Some(base) = &cli.api_base {
            settings.api_base_url = base.clone();
        }
        if let Some(path) = &cli.storage_path {
            settings.storage_path = path.clone();
        }
        if cli.timeout.is_some() {
            settings.request_timeout_seconds = cli.timeout;
        }
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_path("storage_path", &self.storage_path)?;
        if let Some(timeout) = self.request_timeout_seconds {
            validate_positive_number("request_timeout_seconds", timeout, 1)?;
        }
        validate_positive_number("dismiss_after_seconds", self.dismiss_after_seconds, 1)
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }

    fn request_timeout_seconds(&self) -> Option<u64> {
        self.request_timeout_seconds
    }

    fn dismiss_after_seconds(&self) -> u64 {
        self.dismiss_after_seconds
    }
}
