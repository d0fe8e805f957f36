//! Configuration file structures for the Luna bot.
//!
//! The configuration is read from a YAML file and can be overridden with
//! environment variables prefixed by `LUNA_`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! # Word that calls the bot, e.g. `luna help`
//! alias: "luna"
//!
//! # Author id of the bot itself, its own messages are ignored
//! bot_id: "luna"
//!
//! # Channels where commands can be written without the alias
//! aliasless_channels: ["luna"]
//!
//! # Channels the bot never answers in
//! excluded_channels: ["announcements"]
//!
//! # Author ids allowed to use moderation commands
//! moderators: ["alice"]
//!
//! # Highest volume accepted by the `volume` command, in percent
//! maximum_volume: 200
//!
//! # Repeat every message that is not a command
//! echo: false
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Prefix of the environment variables overriding the configuration file.
const ENV_PREFIX: &str = "LUNA_";

/// Root configuration structure for the Luna bot.
///
/// Only `alias` and `bot_id` are mandatory, every other field has a default.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Invocation alias, matched case-insensitively against the first word.
    pub alias: String,

    /// Author id of the bot account.
    pub bot_id: String,

    /// Channels where the alias is not required to call a command.
    #[serde(default)]
    pub aliasless_channels: Vec<String>,

    /// Channels where messages are ignored.
    ///
    /// Names are compared without their non-alphanumeric characters.
    #[serde(default)]
    pub excluded_channels: Vec<String>,

    /// Author ids allowed to run restricted commands.
    #[serde(default)]
    pub moderators: Vec<String>,

    /// Highest volume, in percent, accepted by the `volume` command.
    #[serde(default = "default_maximum_volume")]
    pub maximum_volume: u32,

    /// Registers the `$echo` singleton command.
    #[serde(default)]
    pub echo: bool,
}

fn default_maximum_volume() -> u32 {
    200
}

impl Config {
    /// Loads the configuration from a YAML file, then applies overrides.
    ///
    /// Environment variables prefixed with `LUNA_` take precedence over the
    /// file, e.g. `LUNA_ALIAS=moon` or `LUNA_MODERATORS=[alice,bob]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or a
    /// mandatory field is missing from both sources.
    pub fn load(path: &str) -> Result<Config, anyhow::Error> {
        let config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Ok(config)
    }
}
