pub mod config;
pub mod core;
pub mod domain;
pub mod ui;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::cli::{LocalStorage, MemoryStorage};
pub use config::Settings;
pub use core::{app::App, client::HairStudioClient};
pub use utils::error::{Result, StudioError};
