use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use nav_core::{
    Collaborators, CompositionInput, ConversationView, DirectorySnapshot, FocusManager, KeyResult,
    MemoryDirectory, Navigator, SelectionState,
};
use shared::domain::ChannelId;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, log_warnings, DEFAULT_CONFIG_PATH};

/// Builds the navigation tree from a directory snapshot and replays key presses against it.
#[derive(Parser, Debug)]
struct Cli {
    /// JSON directory snapshot.
    #[arg(long)]
    snapshot: PathBuf,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Key names such as `Rune[j]` or `Enter`, or `reveal:<channel_id>`.
    #[arg(long, num_args = 0..)]
    script: Vec<String>,
}

struct StdoutSurface;

impl ConversationView for StdoutSurface {
    fn reset(&mut self) {
        println!("conversation: reset");
    }

    fn display_conversation(&mut self, channel_id: ChannelId) {
        println!("conversation: display {}", channel_id.0);
    }

    fn set_title(&mut self, title: &str) {
        println!("conversation: title {title}");
    }
}

impl CompositionInput for StdoutSurface {
    fn reset(&mut self) {
        println!("composition: reset");
    }
}

impl FocusManager for StdoutSurface {
    fn request_focus(&mut self, surface: &str) {
        println!("focus: {surface}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (settings, warnings) = load_settings(&cli.config);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    log_warnings(&warnings);

    let raw = fs::read_to_string(&cli.snapshot)
        .with_context(|| format!("failed to read snapshot: {}", cli.snapshot.display()))?;
    let snapshot: DirectorySnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("invalid snapshot: {}", cli.snapshot.display()))?;
    let directory = MemoryDirectory::from_snapshot(snapshot);
    let placements = directory.placements().to_vec();

    let collaborators = Collaborators {
        conversation: Box::new(StdoutSurface),
        composition: Box::new(StdoutSurface),
        focus: Box::new(StdoutSurface),
    };
    let mut navigator = Navigator::build(
        Arc::new(directory),
        &placements,
        settings.navigator_options(),
        collaborators,
    )
    .await;
    info!(placements = placements.len(), "navigation tree built");

    for token in &cli.script {
        run_token(&mut navigator, token).await;
        navigator.settle().await;
    }

    let selected = navigator.selected();
    for row in navigator.root().visible_rows() {
        let marker = if Some(row.id) == selected { ">" } else { " " };
        println!("{marker} {}{}", "  ".repeat(row.depth), row.label);
    }
    println!("state: {}", describe(navigator.state()));
    Ok(())
}

async fn run_token(navigator: &mut Navigator, token: &str) {
    if let Some(raw_id) = token.strip_prefix("reveal:") {
        match raw_id.parse::<i64>() {
            Ok(id) => {
                if !navigator.reveal_channel(ChannelId(id)).await {
                    warn!(channel_id = id, "channel could not be revealed");
                }
            }
            Err(_) => warn!(token, "reveal expects a numeric channel id"),
        }
        return;
    }

    if let KeyResult::PassThrough(name) = navigator.handle_key(token) {
        info!(key = name.as_str(), "key not bound to navigation");
    }
}

fn describe(state: SelectionState) -> String {
    match state {
        SelectionState::Idle => "idle".into(),
        SelectionState::GuildOpen(guild_id) => format!("guild {} open", guild_id.0),
        SelectionState::ChannelActive(channel_id) => {
            format!("channel {} active", channel_id.0)
        }
    }
}
