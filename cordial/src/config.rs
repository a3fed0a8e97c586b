use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_MAX_LINE_LENGTH: usize = 510;

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub address: String,
    pub port: u16,
    pub nickname: String,
    pub username: String,
    pub realname: String,
    pub password: Option<String>,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Answer to CTCP VERSION requests, they are ignored when unset.
    pub ctcp_version: Option<String>,
}

impl Config {
    pub fn load_from_str(str: &str) -> Result<Self, anyhow::Error> {
        let config: Config = serde_yml::from_str(str)?;
        if config.nickname.is_empty() {
            anyhow::bail!("the nickname cannot be empty");
        }
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, anyhow::Error> {
        let string = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {path:?}"))?;
        Config::load_from_str(string.as_str())
            .with_context(|| format!("parsing config file {path:?}"))
    }
}
