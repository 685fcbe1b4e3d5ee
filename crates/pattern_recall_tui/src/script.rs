//! Headless replay of a recorded command script.

use anyhow::{Context, Result};
use pattern_recall::{Catalog, Command, Session, SessionView};
use std::path::Path;
use tracing::{info, instrument};

/// Replays the JSON command array in `path` from a fresh standard session.
#[instrument]
pub fn run_file(path: &Path) -> Result<SessionView> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    run_str(&contents)
}

/// Replays a JSON command array from a fresh standard session.
pub fn run_str(contents: &str) -> Result<SessionView> {
    let commands: Vec<Command> =
        serde_json::from_str(contents).context("Script is not a JSON array of commands")?;
    let session = Session::replay(Catalog::standard(), &commands)?;
    info!(
        commands = commands.len(),
        level = session.level_index(),
        score = session.score(),
        "Script replayed"
    );
    Ok(session.view())
}
