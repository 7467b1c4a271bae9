use card_counting::{CountingSystem, Error};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: ConfigSession,
    #[serde(default)]
    pub trainer: ConfigTrainer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSession {
    #[serde(default = "default_counting_system")]
    pub counting_system: String,
    #[serde(default = "default_number_of_decks")]
    pub number_of_decks: u8,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ConfigSession {
    fn default() -> Self {
        ConfigSession {
            counting_system: default_counting_system(),
            number_of_decks: default_number_of_decks(),
            seed: None,
        }
    }
}

fn default_counting_system() -> String {
    CountingSystem::default().to_string()
}

fn default_number_of_decks() -> u8 {
    6
}

/// Validated parameters for starting a counting session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub counting_system: CountingSystem,
    pub number_of_decks: u8,
    pub seed: Option<u64>,
}

impl TryInto<SessionSettings> for ConfigSession {
    type Error = Error;

    fn try_into(self) -> Result<SessionSettings, Self::Error> {
        let counting_system = CountingSystem::from_name(&self.counting_system)?;
        if self.number_of_decks == 0 {
            return Err(Error::InvalidConfiguration(String::from(
                "number_of_decks must be at least 1",
            )));
        }
        Ok(SessionSettings {
            counting_system,
            number_of_decks: self.number_of_decks,
            seed: self.seed,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigTrainer {
    #[serde(default = "default_number_of_deals")]
    pub number_of_deals: u64,
    /// Pause between automatic deals. Zero deals back to back.
    #[serde(default = "default_deal_interval_ms")]
    pub deal_interval_ms: u64,
    #[serde(default = "default_show_card_values")]
    pub show_card_values: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub switch_system: Option<ConfigSystemSwitch>,
}

impl Default for ConfigTrainer {
    fn default() -> Self {
        ConfigTrainer {
            number_of_deals: default_number_of_deals(),
            deal_interval_ms: default_deal_interval_ms(),
            show_card_values: default_show_card_values(),
            log_level: default_log_level(),
            switch_system: None,
        }
    }
}

fn default_number_of_deals() -> u64 {
    52
}

fn default_deal_interval_ms() -> u64 {
    1000
}

fn default_show_card_values() -> bool {
    true
}

fn default_log_level() -> String {
    String::from("info")
}

/// Changes the counting system once the trainer has taken `after_deals`
/// steps. The running count carries over unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSystemSwitch {
    pub after_deals: u64,
    pub counting_system: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemSwitch {
    pub after_deals: u64,
    pub counting_system: CountingSystem,
}

impl TryInto<SystemSwitch> for ConfigSystemSwitch {
    type Error = Error;

    fn try_into(self) -> Result<SystemSwitch, Self::Error> {
        Ok(SystemSwitch {
            after_deals: self.after_deals,
            counting_system: CountingSystem::from_name(&self.counting_system)?,
        })
    }
}

/// Values given on the command line. Each one replaces its config entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub counting_system: Option<String>,
    pub number_of_decks: Option<u8>,
    pub seed: Option<u64>,
    pub number_of_deals: Option<u64>,
    pub deal_interval_ms: Option<u64>,
    pub switch_system: Option<String>,
    pub switch_after_deals: Option<u64>,
}

impl Config {
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(counting_system) = overrides.counting_system {
            self.session.counting_system = counting_system;
        }
        if let Some(number_of_decks) = overrides.number_of_decks {
            self.session.number_of_decks = number_of_decks;
        }
        if let Some(seed) = overrides.seed {
            self.session.seed = Some(seed);
        }
        if let Some(number_of_deals) = overrides.number_of_deals {
            self.trainer.number_of_deals = number_of_deals;
        }
        if let Some(deal_interval_ms) = overrides.deal_interval_ms {
            self.trainer.deal_interval_ms = deal_interval_ms;
        }
        if let Some(counting_system) = overrides.switch_system {
            let after_deals = self
                .trainer
                .switch_system
                .as_ref()
                .map_or(0, |switch| switch.after_deals);
            self.trainer.switch_system = Some(ConfigSystemSwitch {
                after_deals,
                counting_system,
            });
        }
        if let Some(after_deals) = overrides.switch_after_deals {
            if let Some(switch) = self.trainer.switch_system.as_mut() {
                switch.after_deals = after_deals;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Reads the content of a given config file and parses it to a Config.
///
/// Values are not validated here, since command-line overrides may still
/// replace them. Convert to `SessionSettings` once they are applied.
pub fn parse_config_from_file(filename: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = filename.as_ref().to_path_buf();
    let file_content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    parse_config(&file_content).map_err(|source| ConfigError::Parse { path, source })
}

pub fn parse_config(content: &str) -> Result<Config, serde_yaml::Error> {
    serde_yaml::from_str(content)
}
