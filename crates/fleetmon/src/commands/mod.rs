//! Command handlers and shared dispatch plumbing.

pub mod config_cmd;
pub mod devices;
pub mod list;
pub mod sync_cmd;
pub mod transfer;

use std::path::PathBuf;

use fleetmon_core::{SyncClient, SyncConfig};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::persist::Workspace;

/// Dispatch a parsed command.
pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        Command::List(args) => list::handle(&args, global),
        Command::Add(args) => devices::add(args, global),
        Command::Remove(args) => devices::remove(&args, global),
        Command::Edit(args) => devices::edit(args, global),
        Command::Import(args) => transfer::import(&args, global).await,
        Command::Export(args) => transfer::export(&args, global).await,
        Command::Pull(args) => sync_cmd::pull(&args, global).await,
        Command::Commit => sync_cmd::commit(global).await,
        Command::Push => sync_cmd::push(global).await,
        // Config and completions are handled in main before dispatch.
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

// ── Shared context ──────────────────────────────────────────────────

/// Resolve the data directory: flag/env first, then config, then the
/// platform default.
pub fn data_dir(global: &GlobalOpts) -> PathBuf {
    if let Some(ref dir) = global.data_dir {
        return dir.clone();
    }
    let config = fleetmon_config::load_config_or_default();
    fleetmon_config::data_dir(&config)
}

/// Load the on-disk workspace for this invocation.
pub fn workspace(global: &GlobalOpts) -> Result<Workspace, CliError> {
    Workspace::load(&data_dir(global))
}

/// Build a sync client from config plus CLI overrides.
pub fn sync_client(global: &GlobalOpts) -> Result<SyncClient, CliError> {
    let config = fleetmon_config::load_config_or_default();

    let mut remote = match (config.remote, &global.host) {
        (Some(remote), _) => remote,
        // No config file section, but a host flag is enough to proceed.
        (None, Some(host)) => fleetmon_config::RemoteConfig {
            host: host.clone(),
            port: global.port.unwrap_or(8080),
            https: false,
            api_key: None,
            api_key_env: None,
            timeout: 30,
            insecure: false,
        },
        (None, None) => return Err(CliError::NoRemote),
    };

    if let Some(ref host) = global.host {
        remote.host.clone_from(host);
    }
    if let Some(port) = global.port {
        remote.port = port;
    }
    if let Some(ref key) = global.api_key {
        remote.api_key = Some(key.clone());
    }
    if global.insecure {
        remote.insecure = true;
    }

    let sync_config: SyncConfig = fleetmon_config::to_sync_config(&remote)?;
    SyncClient::new(&sync_config).map_err(CliError::from)
}

// ── Interactive helpers ─────────────────────────────────────────────

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
