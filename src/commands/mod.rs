//! Command dispatch and handlers.

pub mod files;
pub mod generate;
pub mod repos;
pub mod serve;
pub mod summarize;

use serde::Serialize;
use tracing::info;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::AppConfig;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// `REPOTEST_REPLAY` replays cassettes instead of calling live services.
/// Otherwise, when `REPOTEST_RECORD` names a directory, every port
/// interaction is recorded to per-port cassette files under it.
///
/// # Errors
///
/// Returns an error string if the context cannot be built or the selected
/// command handler fails.
pub async fn dispatch(command: Command, config: &AppConfig) -> Result<(), String> {
    let (ctx, session) = build_context(config)?;

    // The context must be dropped before the recording session finishes.
    let result = dispatch_with_context(command, ctx, config.port).await;

    if let Some(session) = session {
        finish_recording(session)?;
    }

    result
}

fn build_context(config: &AppConfig) -> Result<(ServiceContext, Option<RecordingSession>), String> {
    if let Some(path) = &config.replay_path {
        info!(path = %path.display(), "replaying cassettes");
        return Ok((ServiceContext::replaying_path(path)?, None));
    }
    if let Some(root) = &config.record_dir {
        let session = RecordingSession::new(root)?;
        info!(dir = %session.output_dir().display(), "recording port interactions");
        return Ok((ServiceContext::recording(config, &session), Some(session)));
    }
    Ok((ServiceContext::live(config), None))
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(
    command: Command,
    ctx: ServiceContext,
    default_port: u16,
) -> Result<(), String> {
    match command {
        Command::Serve { port } => serve::run(ctx, port.unwrap_or(default_port)).await,
        Command::Repos => repos::run(&ctx).await,
        Command::Files { owner, repo } => files::run(&ctx, &owner, &repo).await,
        Command::Summarize { paths } => summarize::run(&ctx, &paths).await,
        Command::Generate {
            path,
            summary_id,
            summary_text,
        } => {
            generate::run(&ctx, &path, summary_id, summary_text).await
        }
    }
}

/// Pretty-print a success body to stdout.
fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize output: {e}"))?;
    println!("{text}");
    Ok(())
}

/// Read a local file the way an uploaded file would be presented.
fn read_source(path: &std::path::Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
