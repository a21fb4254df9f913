//! `config` subcommand handlers.

use std::fmt::Write;

use fleetmon_config::{Config, RemoteConfig};

use crate::cli::{ConfigArgs, ConfigCommand, ConfigSetArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    if let Some(ref dir) = cfg.defaults.data_dir {
        let _ = writeln!(out, "data_dir = \"{}\"", dir.display());
    }

    if let Some(ref remote) = cfg.remote {
        let _ = writeln!(out);
        let _ = writeln!(out, "[remote]");
        let _ = writeln!(out, "host = \"{}\"", remote.host);
        let _ = writeln!(out, "port = {}", remote.port);
        let _ = writeln!(out, "https = {}", remote.https);
        if remote.api_key.is_some() {
            let _ = writeln!(out, "api_key = \"****\"");
        }
        if let Some(ref env) = remote.api_key_env {
            let _ = writeln!(out, "api_key_env = \"{env}\"");
        }
        let _ = writeln!(out, "timeout = {}", remote.timeout);
        let _ = writeln!(out, "insecure = {}", remote.insecure);
    }

    out.trim_end().to_string()
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match &args.command {
        ConfigCommand::Show => {
            let cfg = fleetmon_config::load_config_or_default();
            output::print_output(&format_config_redacted(&cfg), global.quiet);
            Ok(())
        }
        ConfigCommand::Path => {
            output::print_output(
                &fleetmon_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }
        ConfigCommand::Set(set) => set_remote(set, global),
    }
}

fn set_remote(args: &ConfigSetArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if args.host.trim().is_empty() {
        return Err(CliError::Validation {
            field: "host".into(),
            reason: "must not be empty".into(),
        });
    }

    let mut cfg = fleetmon_config::load_config_or_default();
    cfg.remote = Some(RemoteConfig {
        host: args.host.clone(),
        port: args.port,
        https: args.https,
        api_key: args.api_key.clone(),
        api_key_env: args.api_key_env.clone(),
        timeout: args.timeout,
        insecure: false,
    });
    fleetmon_config::save_config(&cfg)?;

    output::print_output(
        &format!("Remote set to {}:{}", args.host, args.port),
        global.quiet,
    );
    Ok(())
}
