//! `import` and `export` handlers.

use std::path::Path;

use fleetmon_core::{Device, interchange, merge_into};

use crate::cli::{ExportArgs, FileFormat, GlobalOpts, ImportArgs};
use crate::db;
use crate::error::CliError;
use crate::output;
use crate::resolve::PolicyResolver;

/// Infer the file format from the extension when `--format` is absent.
fn resolve_format(explicit: Option<&FileFormat>, path: &Path) -> Result<FileFormat, CliError> {
    if let Some(format) = explicit {
        return Ok(format.clone());
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(FileFormat::Json),
        Some("db" | "sqlite" | "sqlite3") => Ok(FileFormat::Sqlite),
        _ => Err(CliError::Validation {
            field: "format".into(),
            reason: format!(
                "cannot infer format from '{}'; pass --format json|sqlite",
                path.display()
            ),
        }),
    }
}

pub async fn import(args: &ImportArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut ws = super::workspace(global)?;

    let batch: Vec<Device> = match resolve_format(args.format.as_ref(), &args.path)? {
        FileFormat::Json => {
            let raw = std::fs::read_to_string(&args.path)?;
            interchange::devices_from_json(&raw).map_err(CliError::from)?
        }
        FileFormat::Sqlite => db::import_devices(&args.path).await?,
    };
    let total = batch.len();

    let mut resolver = PolicyResolver::from_policy(&args.on_conflict);
    let applied = merge_into(&mut ws.store, batch, &mut resolver)?;
    ws.save()?;

    output::print_output(
        &format!("Imported {applied} of {total} device(s)"),
        global.quiet,
    );
    Ok(())
}

pub async fn export(args: &ExportArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let ws = super::workspace(global)?;

    let devices: Vec<Device> = if args.serial.is_empty() {
        ws.store.snapshot()
    } else {
        let subset: Vec<Device> = ws
            .store
            .snapshot()
            .into_iter()
            .filter(|d| args.serial.iter().any(|s| d.serial_matches(s)))
            .collect();
        if subset.is_empty() {
            return Err(CliError::NotFound {
                serial: args.serial.join(", "),
            });
        }
        subset
    };

    match resolve_format(args.format.as_ref(), &args.path)? {
        FileFormat::Json => {
            let json = interchange::devices_to_json(&devices).map_err(CliError::from)?;
            std::fs::write(&args.path, json)?;
        }
        FileFormat::Sqlite => db::export_devices(&args.path, &devices).await?,
    }

    output::print_output(
        &format!("Exported {} device(s) to {}", devices.len(), args.path.display()),
        global.quiet,
    );
    Ok(())
}
