//! `fleetmon list` handler.

use tabled::Tabled;

use fleetmon_core::{Device, Projected, ViewProjection};

use crate::cli::{GlobalOpts, ListArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Installed")]
    installed: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            name: d.name.clone(),
            category: d.category.to_string(),
            serial: d.serial_number.clone(),
            installed: d.install_date.format("%Y-%m-%d").to_string(),
            status: d.status.to_string(),
        }
    }
}

pub fn handle(args: &ListArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let ws = super::workspace(global)?;

    let mut projection = ViewProjection::new(&ws.settings);
    if let Some(sort) = args.sort {
        projection.set_sort_field(sort);
    }
    if args.group {
        projection.set_use_groups(true);
    } else if args.flat {
        projection.set_use_groups(false);
    }
    projection.filter.set_status(args.status);
    projection.filter.set_category(args.category);
    if let Some(ref text) = args.search {
        projection.filter.set_text(text.clone());
    }
    projection.filter.set_date_from(args.from);
    projection.filter.set_date_to(args.to);

    let rendered = match projection.project(&ws.store) {
        Projected::Flat(devices) => output::render_list(
            &global.output,
            &devices,
            |d| DeviceRow::from(d),
            |d| d.name.clone(),
        ),
        Projected::Grouped(groups) => render_groups(&global.output, &groups),
    };
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn render_groups(format: &OutputFormat, groups: &[fleetmon_core::DeviceGroup]) -> String {
    match format {
        OutputFormat::Table => {
            let mut sections = Vec::with_capacity(groups.len());
            for group in groups {
                let table = output::render_list(
                    format,
                    &group.devices,
                    |d| DeviceRow::from(d),
                    |d| d.name.clone(),
                );
                sections.push(format!(
                    "{} ({})\n{table}",
                    group.key,
                    group.devices.len()
                ));
            }
            sections.join("\n\n")
        }
        OutputFormat::Json | OutputFormat::JsonCompact => {
            let value: Vec<serde_json::Value> = groups
                .iter()
                .map(|g| {
                    serde_json::json!({
                        "key": g.key,
                        "devices": g.devices,
                    })
                })
                .collect();
            if matches!(format, OutputFormat::Json) {
                serde_json::to_string_pretty(&value).unwrap_or_default()
            } else {
                serde_json::to_string(&value).unwrap_or_default()
            }
        }
        OutputFormat::Plain => groups
            .iter()
            .flat_map(|g| g.devices.iter().map(|d| d.name.clone()))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
