use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use engine::{EngineError, SplitStrategy};

#[derive(Parser, Debug)]
#[command(name = "splitter")]
#[command(about = "Split an expense between participants and check it adds up")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the acting user id.
    #[arg(long, global = true)]
    pub acting_user: Option<String>,
    /// Override the currency code (USD, EUR).
    #[arg(long, global = true)]
    pub currency: Option<String>,
    /// Override the log level.
    #[arg(long, global = true)]
    pub level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a draft from flags.
    Split(SplitArgs),
    /// Replay a JSON array of draft events.
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Total amount, as typed (e.g. `12,50`).
    #[arg(long, default_value = "")]
    pub total: String,
    /// equal, amount, percentage or shares.
    #[arg(long, value_parser = parse_strategy, default_value = "equal")]
    pub strategy: SplitStrategy,
    /// Participant as `id` or `id=value`; repeatable.
    #[arg(long = "participant", value_parser = parse_participant)]
    pub participants: Vec<ParticipantArg>,
    /// Id of whoever paid (defaults to the acting user).
    #[arg(long)]
    pub payer: Option<String>,
    #[arg(long, default_value = "")]
    pub description: String,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// JSON file holding the events.
    pub path: PathBuf,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Print the createTransaction request body instead of the split.
    #[arg(long, conflicts_with = "json")]
    pub payload: bool,
    /// Print the split as JSON.
    #[arg(long)]
    pub json: bool,
    /// Fail when the expense cannot be saved.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantArg {
    pub id: String,
    pub value: Option<String>,
}

fn parse_strategy(raw: &str) -> Result<SplitStrategy, String> {
    raw.parse::<SplitStrategy>()
        .map_err(|err: EngineError| err.to_string())
}

fn parse_participant(raw: &str) -> Result<ParticipantArg, String> {
    let (id, value) = match raw.split_once('=') {
        Some((id, value)) => (id.trim(), Some(value.trim().to_string())),
        None => (raw.trim(), None),
    };
    if id.is_empty() {
        return Err(format!("participant id must not be empty: {raw}"));
    }
    Ok(ParticipantArg {
        id: id.to_string(),
        value,
    })
}
