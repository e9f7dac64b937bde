//! Interactive session: stdin commands and replayed fixes drive the coordinator.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::display::TerminalSink;
use crate::cli::icons::{error, success, warning};
use crate::cli::input::{parse_command, SessionCommand, HELP};
use crate::client::RecommendationClient;
use crate::config::Settings;
use crate::coordinator::{Coordinator, UiEvent};
use crate::map::HeadlessMap;
use crate::tracker::{ReplaySource, TrackingState};

/// How long to wait for outstanding fetches when the session ends.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SessionArgs {
    pub replay: Option<PathBuf>,
    pub interval: Duration,
    /// Pre-answered location prompt.
    pub permission: Option<bool>,
    pub html_out: Option<PathBuf>,
}

pub async fn cmd_session(settings: &Settings, args: SessionArgs) -> anyhow::Result<()> {
    let source = match &args.replay {
        Some(path) => ReplaySource::from_file(path, args.interval)?,
        None => ReplaySource::new(Vec::new(), args.interval),
    };
    if source.is_empty() {
        debug!("No replay track; location requests will report unavailable");
    }

    let map = HeadlessMap::new(&settings.map.container, settings.map_options()?);
    let client = RecommendationClient::new(
        &settings.backend.base_url,
        settings.backend.timeout(),
        settings.backend.user_agent.as_deref(),
    )?;

    let mut coordinator = Coordinator::new(
        settings.coordinator_options(),
        Arc::new(source),
        map,
        Arc::new(client),
        TerminalSink::new(args.html_out.clone()),
    );
    coordinator.boot();

    let (ui_tx, ui_rx) = mpsc::channel(32);

    match args.permission {
        Some(answer) => {
            let _ = ui_tx.send(UiEvent::PermissionDecision(answer)).await;
        }
        None if settings.tracking.prompt_on_boot => {
            println!("{} 현재 위치를 사용하시겠습니까? (yes/no)", warning());
        }
        None => {}
    }

    let reader = tokio::spawn(read_commands(ui_tx));

    coordinator.run(ui_rx).await;
    let quit = reader.await.unwrap_or(true);

    if !quit && coordinator.tracking() == TrackingState::Watching {
        info!("Input closed; following location updates until the track ends");
        coordinator.follow_tracking().await;
    }

    if coordinator.in_flight() > 0 {
        debug!("Waiting for {} outstanding fetches", coordinator.in_flight());
        if tokio::time::timeout(SETTLE_TIMEOUT, coordinator.settle())
            .await
            .is_err()
        {
            warn!("Gave up waiting for outstanding fetches");
        }
    }

    let marker = coordinator
        .marker_position()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "none".to_string());
    println!(
        "\n{} Session ended (tracking {}, marker {})",
        success(),
        coordinator.tracking(),
        marker
    );
    Ok(())
}

/// Forward parsed stdin commands until EOF or `quit`.
///
/// Returns `true` when the user quit explicitly.
async fn read_commands(ui_tx: mpsc::Sender<UiEvent>) -> bool {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return false,
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                return false;
            }
        };
        match parse_command(&line) {
            Ok(Some(SessionCommand::Ui(event))) => {
                if ui_tx.send(event).await.is_err() {
                    return true;
                }
            }
            Ok(Some(SessionCommand::Help)) => println!("{}", HELP),
            Ok(Some(SessionCommand::Quit)) => return true,
            Ok(None) => {}
            Err(e) => println!("{} {}", error(), e),
        }
    }
}
