//! Reel CLI - Interactive Video Catalog Browser
//!
//! Features:
//! - Playback simulation (play, pause, continue, stop, random)
//! - Title and tag search with play-by-number follow-up
//! - Video flagging
//! - Playlist management
//! - Text or JSON output

use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use reel_core::{PlaybackSession, SessionConfig, VideoLibrary, DEFAULT_FLAG_REASON};
use std::path::PathBuf;

mod commands;
mod output;
mod repl;

/// Reel CLI - Video catalog browser
#[derive(Parser)]
#[command(name = "reel")]
#[command(author = "Purple Squirrel Media")]
#[command(version)]
#[command(about = "Browse, play, flag and organise a video catalog", long_about = None)]
struct Cli {
    /// Enable verbose logging (to stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Catalog file with `title | id | #tag , #tag` lines (default: bundled list)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Seed for PLAY_RANDOM, for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// Reason recorded when FLAG_VIDEO is given none
    #[arg(long, default_value = DEFAULT_FLAG_REASON)]
    default_flag_reason: String,

    /// Maximum number of session events kept for HISTORY
    #[arg(long, default_value = "256")]
    max_events: usize,

    /// Disable the session event log
    #[arg(long)]
    no_events: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();

    reel_core::init();

    let library = match cli.catalog {
        Some(ref path) => VideoLibrary::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => VideoLibrary::bundled(),
    };

    let config = SessionConfig {
        default_flag_reason: cli.default_flag_reason.clone(),
        record_events: !cli.no_events,
        max_event_history: cli.max_events,
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut session = PlaybackSession::new(library, config);
    tracing::info!(
        session_id = %session.id(),
        videos = session.number_of_videos(),
        "Session ready"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    repl::run(
        &mut session,
        &mut rng,
        stdin.lock(),
        stdout.lock(),
        output::OutputFormat::from(cli.format.as_str()),
    )
}
