use clap::Parser;
use engine::{DraftEvent, ExpenseDraft, Participant, ParticipantId};

use crate::{
    cli::{Cli, Command, OutputArgs, ReplayArgs, SplitArgs},
    error::{AppError, Result},
    settings::Settings,
};

mod cli;
mod error;
mod settings;
mod views;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = settings::load(&cli.global)?;
    let currency = settings.currency()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "splitter={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let (draft, output) = match cli.command {
        Command::Split(args) => (build_draft(&settings, &args), args.output),
        Command::Replay(args) => (replay(&settings, &args)?, args.output),
    };
    tracing::info!(
        participants = draft.participants().len(),
        total = %draft.total(),
        strategy = %draft.strategy(),
        conserves = draft.conserves(),
        "draft ready"
    );

    print(&draft, currency, &output)
}

fn build_draft(settings: &Settings, args: &SplitArgs) -> ExpenseDraft {
    let mut draft = ExpenseDraft::open(settings.acting_participant());
    for participant in &args.participants {
        if !draft.add_participant(Participant::new(participant.id.as_str())) {
            tracing::warn!(id = %participant.id, "participant listed twice");
        }
    }
    draft.set_total_input(&args.total);
    draft.set_strategy(args.strategy);

    for participant in &args.participants {
        if let Some(value) = &participant.value {
            let id = ParticipantId::new(participant.id.as_str());
            draft.set_raw_value_input(&id, value);
        }
    }
    if let Some(payer) = &args.payer
        && !draft.set_payer(&ParticipantId::new(payer.as_str()))
    {
        tracing::warn!(
            %payer,
            acting_user = %draft.acting_user(),
            "payer is not a participant, keeping the default"
        );
    }
    draft.set_description(args.description.as_str());
    draft
}

fn replay(settings: &Settings, args: &ReplayArgs) -> Result<ExpenseDraft> {
    let raw = std::fs::read_to_string(&args.path)?;
    let events: Vec<DraftEvent> = serde_json::from_str(&raw)?;
    tracing::info!(path = %args.path.display(), events = events.len(), "replaying draft");

    let mut draft = ExpenseDraft::open(settings.acting_participant());
    for (index, event) in events.into_iter().enumerate() {
        let description = format!("{event:?}");
        if !draft.apply(event) {
            tracing::warn!(index, event = %description, "event refused");
        }
    }
    Ok(draft)
}

fn print(draft: &ExpenseDraft, currency: engine::Currency, output: &OutputArgs) -> Result<()> {
    if output.strict
        && let Some(issue) = draft.issue()
    {
        return Err(AppError::NotReady(issue));
    }

    if output.payload {
        let submission = draft.submission()?;
        let body = views::create_transaction(&submission);
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else if output.json {
        let view = views::split_view(draft, currency);
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", views::render(draft, currency));
    }
    Ok(())
}
