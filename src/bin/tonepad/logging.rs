//! File logging - the terminal belongs to the UI, so tracing writes to disk

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use std::{fs::File, path::Path, sync::Mutex};
use tracing_subscriber::EnvFilter;

/// Install a global subscriber writing plain-text events to `path`.
///
/// Filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init(path: impl AsRef<Path>) -> EyreResult<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {e}"))
}
