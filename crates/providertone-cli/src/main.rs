use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use providertone_application::ToneSession;
use providertone_core::track::Track;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "providertone")]
#[command(about = "ProviderTone CLI - capture a medical provider's writing style", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show progress of both tracks
    Status,
    /// Merge answers into one section, e.g. `answer messaging values '{"warmth": 8}'`
    Answer {
        track: Track,
        /// Section name as stored, e.g. coldResponses or pairSelections
        section: String,
        /// JSON object holding only the fields to change
        patch: String,
    },
    /// List what is still missing before leaving a step
    Gate { track: Track, step: u32 },
    /// Move a track's step cursor
    SetStep { track: Track, step: u32 },
    /// Draft all three edit-capture scenarios of a track
    GenerateDrafts { track: Track },
    /// Synthesize the style profile of a track
    GenerateProfile { track: Track },
    /// Mark a track as completed
    Complete { track: Track },
    /// Write completed tracks to a JSON file
    Export {
        /// Defaults to provider-style-profile-YYYY-MM-DD.json in the current directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Discard every answer and start over
    Reset,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands, session: &ToneSession) -> Result<()> {
    match command {
        Commands::Status => commands::wizard::status(session),
        Commands::Answer {
            track,
            section,
            patch,
        } => commands::wizard::answer(session, track, &section, &patch),
        Commands::Gate { track, step } => commands::wizard::gate(session, track, step),
        Commands::SetStep { track, step } => commands::wizard::set_step(session, track, step),
        Commands::GenerateDrafts { track } => commands::generate::drafts(session, track).await,
        Commands::GenerateProfile { track } => commands::generate::profile(session, track).await,
        Commands::Complete { track } => commands::wizard::complete(session, track),
        Commands::Export { output } => commands::export::run(session, output),
        Commands::Reset => commands::wizard::reset(session),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let session = ToneSession::open_default().await?;
    let result = run(cli.command, &session).await;
    // Persist whatever the command changed, even if it failed part-way.
    session.close().await?;
    result
}
