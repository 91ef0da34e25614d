//! Configuration loading for lnviz
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/lnviz/config.toml` on Linux) or at an explicit `--config`
//! path. Every key is optional.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, load_settings, parse_settings, CONFIG_FILENAME};
pub use types::*;
