//! Loads a [`ParserConfig`] from a TOML file.
//!
//! Grounded on `math-core-cli/src/config_file.rs`'s `load_config_file`
//! (`toml::from_str` plus a small `ConfigError` enum covering the read and
//! the parse failure separately).

use std::fmt;
use std::path::Path;

use latex_ast::ParserConfig;

#[derive(Debug)]
pub enum ConfigError {
    Read(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(e) => write!(f, "could not read config file: {e}"),
            ConfigError::Parse(e) => write!(f, "could not parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load_config_file(path: &Path) -> Result<ParserConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
    toml::from_str(&text).map_err(ConfigError::Parse)
}
