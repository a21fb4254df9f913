//! `pull`, `commit`, and `push` handlers.

use tabled::Tabled;

use fleetmon_core::EtlStep;

use crate::cli::{GlobalOpts, PullArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "Step")]
    step: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl From<&EtlStep> for StepRow {
    fn from(s: &EtlStep) -> Self {
        Self {
            step: s.step.clone(),
            status: s.status.clone(),
            details: s.details.clone().unwrap_or_default(),
        }
    }
}

pub async fn pull(args: &PullArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut ws = super::workspace(global)?;

    if !ws.store.is_empty() && !args.force {
        let message = format!(
            "Replace all {} local device(s) with the remote set?",
            ws.store.len()
        );
        if !super::confirm(&message, global.yes)? {
            output::print_output("Pull cancelled", global.quiet);
            return Ok(());
        }
    }

    let client = super::sync_client(global)?;
    let count = client.pull(&mut ws.store).await?;
    ws.save()?;

    output::print_output(&format!("Pulled {count} device(s)"), global.quiet);
    Ok(())
}

pub async fn commit(global: &GlobalOpts) -> Result<(), CliError> {
    let ws = super::workspace(global)?;
    let client = super::sync_client(global)?;

    let result = client.commit(&ws.store).await?;

    let rendered = output::render_single(
        &global.output,
        &result,
        |r| {
            format!(
                "Committed: {} inserted, {} updated, {} rejected",
                r.inserted, r.updated, r.rejected
            )
        },
        |r| format!("{} {} {}", r.inserted, r.updated, r.rejected),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

pub async fn push(global: &GlobalOpts) -> Result<(), CliError> {
    let client = super::sync_client(global)?;

    let steps = client.push().await?;

    let rendered = output::render_list(&global.output, &steps, |s| StepRow::from(s), |s| {
        format!("{} {}", s.step, s.status)
    });
    output::print_output(&rendered, global.quiet);
    Ok(())
}
