//! `add`, `remove`, and `edit` handlers.

use chrono::Local;

use fleetmon_core::{Device, DeviceId, DeviceStore, EditSession};

use crate::cli::{AddArgs, EditArgs, GlobalOpts, RemoveArgs};
use crate::error::CliError;
use crate::output;

use super::list::DeviceRow;

fn find_by_serial(store: &DeviceStore, serial: &str) -> Result<DeviceId, CliError> {
    store
        .find_by_serial(serial)
        .ok_or_else(|| CliError::NotFound {
            serial: serial.into(),
        })
}

pub fn add(args: AddArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut ws = super::workspace(global)?;

    let device = Device {
        category: args.category,
        name: args.name,
        serial_number: args.serial,
        install_date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        status: args.status,
    };
    ws.store.add(device.clone())?;
    ws.save()?;

    let rendered = output::render_single(
        &global.output,
        &device,
        |d| format!("Added '{}'", d.name),
        |d| d.name.clone(),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

pub fn remove(args: &RemoveArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut ws = super::workspace(global)?;

    let id = find_by_serial(&ws.store, &args.serial)?;
    let removed = ws.store.remove(id).ok_or_else(|| CliError::NotFound {
        serial: args.serial.clone(),
    })?;
    ws.save()?;

    output::print_output(&format!("Removed '{}'", removed.name), global.quiet);
    Ok(())
}

pub fn edit(args: EditArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut ws = super::workspace(global)?;

    let id = find_by_serial(&ws.store, &args.serial)?;
    let mut session = EditSession::begin(&ws.store, id).ok_or_else(|| CliError::NotFound {
        serial: args.serial.clone(),
    })?;

    {
        let draft = session.draft_mut();
        if let Some(name) = args.name {
            draft.name = name;
        }
        if let Some(category) = args.category {
            draft.category = category;
        }
        if let Some(serial) = args.new_serial {
            draft.serial_number = serial;
        }
        if let Some(date) = args.date {
            draft.install_date = date;
        }
        if let Some(status) = args.status {
            draft.status = status;
        }
    }

    if !session.has_unsaved_changes() {
        output::print_output("Nothing to change", global.quiet);
        return Ok(());
    }

    session.save(&mut ws.store)?;
    ws.save()?;

    let rendered = output::render_list(
        &global.output,
        std::slice::from_ref(session.draft()),
        |d| DeviceRow::from(d),
        |d| d.name.clone(),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}
