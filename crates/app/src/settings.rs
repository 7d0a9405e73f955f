//! Settings for the `splitter` binary.
//!
//! Values are layered: defaults, then `config/splitter.toml` (or the file
//! given with `--config`), then `SPLITTER_*` environment variables, then
//! command line flags.
use engine::{Currency, Participant};
use serde::Deserialize;

use crate::{cli::GlobalArgs, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/splitter.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Id of the user operating the draft.
    pub acting_user: String,
    pub acting_user_name: Option<String>,
    pub currency: String,
    /// Log level for the `tracing` filter.
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            acting_user: "me".to_string(),
            acting_user_name: None,
            currency: "USD".to_string(),
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn currency(&self) -> Result<Currency> {
        Ok(Currency::try_from(self.currency.as_str())?)
    }

    /// The acting user as the first participant of a new draft.
    pub fn acting_participant(&self) -> Participant {
        let participant = Participant::new(self.acting_user.as_str());
        match &self.acting_user_name {
            Some(name) => participant.name(name.as_str()),
            None => participant,
        }
    }
}

pub fn load(args: &GlobalArgs) -> Result<Settings> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPLITTER"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(acting_user) = &args.acting_user {
        settings.acting_user = acting_user.clone();
    }
    if let Some(currency) = &args.currency {
        settings.currency = currency.clone();
    }
    if let Some(level) = &args.level {
        settings.level = level.clone();
    }

    Ok(settings)
}
