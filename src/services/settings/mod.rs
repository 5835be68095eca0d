//! Engine configuration stored as TOML.

mod service;

pub use service::{default_config_path, default_data_path, resolve_data_path, SettingsService};
