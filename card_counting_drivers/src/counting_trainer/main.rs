mod trainer;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use card_counting::CountingSystem;
use card_counting_drivers::{
    parse_config_from_file, Config, ConfigOverrides, SessionSettings, SystemSwitch,
};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use strum::IntoEnumIterator;
use tracing::info;
use tracing_subscriber::EnvFilter;

use self::trainer::{ConsoleHandler, Trainer};

const DEFAULT_CONFIG_PATH: &str = "~/.card_counting.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Counting system to use, e.g. hi-lo or omega-ii
    #[arg(short, long)]
    system: Option<String>,

    /// Number of decks in the shoe
    #[arg(short, long)]
    decks: Option<u8>,

    /// Number of deals before exiting
    #[arg(short = 'n', long)]
    deals: Option<u64>,

    /// Milliseconds between automatic deals
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Seed for shuffling, for reproducible shoes
    #[arg(long)]
    seed: Option<u64>,

    /// Counting system to switch to partway through the run
    #[arg(long)]
    switch_to: Option<String>,

    /// Number of deals before switching counting systems
    #[arg(long)]
    switch_after: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = CommandLineArgs::parse();
    let mut config = load_config(&args.config)?;
    config.apply_overrides(ConfigOverrides {
        counting_system: args.system,
        number_of_decks: args.decks,
        seed: args.seed,
        number_of_deals: args.deals,
        deal_interval_ms: args.interval_ms,
        switch_system: args.switch_to,
        switch_after_deals: args.switch_after,
    });

    init_logging(&config.trainer.log_level);

    let settings: SessionSettings = config
        .session
        .clone()
        .try_into()
        .with_context(|| format!("invalid session settings (known systems: {})", known_systems()))?;
    let switch: Option<SystemSwitch> = match config.trainer.switch_system.clone() {
        Some(switch) => Some(switch.try_into().with_context(|| {
            format!("invalid system switch (known systems: {})", known_systems())
        })?),
        None => None,
    };
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut trainer = Trainer::new(
        &settings,
        rng,
        Duration::from_millis(config.trainer.deal_interval_ms),
    )?;
    let mut handler = ConsoleHandler::new(config.trainer.show_card_values);
    trainer.run(config.trainer.number_of_deals, switch, &mut handler)?;
    info!(
        dealt = trainer.get_state().get_dealt_cards().len(),
        "trainer finished"
    );
    Ok(())
}

fn known_systems() -> String {
    CountingSystem::iter()
        .map(|system| system.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Loads the config file. A missing file at the default location means
/// built-in defaults; a missing explicit path is an error.
fn load_config(config: &str) -> anyhow::Result<Config> {
    if config != DEFAULT_CONFIG_PATH {
        return parse_config_from_file(config).map_err(anyhow::Error::from);
    }

    let home_dir = home::home_dir().context("Cannot find home directory")?;
    let config_file_path: PathBuf = home_dir.join(".card_counting.yml");
    if !config_file_path.exists() {
        return Ok(Config::default());
    }
    if config_file_path.is_dir() {
        bail!(
            "{} should be a file rather than a directory",
            config_file_path.display()
        );
    }
    Ok(parse_config_from_file(&config_file_path)?)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
