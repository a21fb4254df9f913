// ── Import merge ──
//
// Folds a batch of imported devices into the store, keyed by serial
// number. Conflict handling is delegated to a resolver so interactive
// and fixed-policy callers share one engine.

use tracing::debug;

use crate::error::CoreError;
use crate::model::Device;
use crate::store::DeviceStore;

/// What to do with one incoming record that collides on serial number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictAction {
    /// Replace the stored device with the incoming one.
    Overwrite,
    /// Keep the stored device and also add the incoming one.
    KeepBoth,
    /// Drop the incoming record.
    Skip,
}

/// A resolver's answer for one conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictDecision {
    pub action: ConflictAction,
    /// Reuse this action for every later conflict in the same batch.
    pub apply_to_all: bool,
}

impl ConflictDecision {
    pub fn once(action: ConflictAction) -> Self {
        Self {
            action,
            apply_to_all: false,
        }
    }

    pub fn for_rest(action: ConflictAction) -> Self {
        Self {
            action,
            apply_to_all: true,
        }
    }
}

/// Decides conflicts during [`merge_into`]. Returning `None` means the
/// caller cancelled: the record is dropped without counting as skipped.
pub trait ConflictResolver {
    fn resolve(&mut self, existing: &Device, incoming: &Device) -> Option<ConflictDecision>;
}

/// Non-interactive resolver applying one action to every conflict.
#[derive(Debug, Clone, Copy)]
pub struct FixedPolicy(pub ConflictAction);

impl ConflictResolver for FixedPolicy {
    fn resolve(&mut self, _existing: &Device, _incoming: &Device) -> Option<ConflictDecision> {
        Some(ConflictDecision::once(self.0))
    }
}

/// Merge `batch` into `store` in order, resolving serial-number
/// collisions through `resolver`. Returns the number of devices added
/// or overwritten. Records with empty serials never collide and are
/// always added.
pub fn merge_into<R: ConflictResolver>(
    store: &mut DeviceStore,
    batch: Vec<Device>,
    resolver: &mut R,
) -> Result<usize, CoreError> {
    let mut applied = 0;
    let mut sticky: Option<ConflictAction> = None;

    for incoming in batch {
        let existing = store
            .find_by_serial(&incoming.serial_number)
            .and_then(|id| store.get(id).map(|device| (id, device.clone())));

        let Some((id, existing)) = existing else {
            store.add(incoming)?;
            applied += 1;
            continue;
        };

        let action = match sticky {
            Some(action) => action,
            None => match resolver.resolve(&existing, &incoming) {
                Some(decision) => {
                    if decision.apply_to_all {
                        sticky = Some(decision.action);
                    }
                    decision.action
                }
                // Cancelled: not counted, not even as a skip.
                None => continue,
            },
        };

        debug!(serial = %incoming.serial_number, ?action, "resolving import conflict");
        match action {
            ConflictAction::Overwrite => {
                // The stored serial is the match key; its casing
                // survives, everything else comes from the incoming
                // record.
                let mut replacement = incoming;
                replacement.serial_number = existing.serial_number;
                store.update(id, replacement)?;
                applied += 1;
            }
            ConflictAction::KeepBoth => {
                store.add(incoming)?;
                applied += 1;
            }
            ConflictAction::Skip => {}
        }
    }

    Ok(applied)
}
