// ── Device store ──
//
// The authoritative, insertion-ordered collection of inventory records
// for a session. Pure in-memory state plus change notification; no
// remote I/O happens here. A single owner drives all mutation -- the
// store itself is not meant to be shared across threads.

use tokio::sync::broadcast;

use crate::error::CoreError;
use crate::model::{Device, DeviceId};

const EVENT_CHANNEL_SIZE: usize = 256;

/// Discrete change event emitted on every mutation.
///
/// Subscribers (e.g. a projection cache) react by recomputing; field
/// values are not carried in the event, the store is re-read instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Added(DeviceId),
    Removed(DeviceId),
    /// A field-level mutation of an existing record.
    Updated(DeviceId),
    /// The full sequence was discarded and replaced.
    ReplacedAll,
}

struct Entry {
    id: DeviceId,
    device: Device,
}

/// The authoritative ordered collection of [`Device`] records.
///
/// Insertion order is the canonical order; [`snapshot`](Self::snapshot)
/// hands out immutable ordered copies for collaborators that must not
/// observe subsequent mutation (commit, export).
pub struct DeviceStore {
    entries: Vec<Entry>,
    events: broadcast::Sender<StoreEvent>,
}

impl Default for DeviceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        Self {
            entries: Vec::new(),
            events,
        }
    }

    /// Seed a store from an already-validated sequence (startup load).
    pub fn with_devices(devices: Vec<Device>) -> Self {
        let mut store = Self::new();
        store.entries = devices
            .into_iter()
            .map(|device| Entry {
                id: DeviceId::new(),
                device,
            })
            .collect();
        store
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Append a record. Fails if the display name is empty.
    pub fn add(&mut self, device: Device) -> Result<DeviceId, CoreError> {
        if device.name.trim().is_empty() {
            return Err(CoreError::validation("device name must not be empty"));
        }
        let id = DeviceId::new();
        self.entries.push(Entry { id, device });
        self.notify(StoreEvent::Added(id));
        Ok(id)
    }

    /// Remove a record by identity. No-op (returns `None`) if absent.
    pub fn remove(&mut self, id: DeviceId) -> Option<Device> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        let entry = self.entries.remove(pos);
        self.notify(StoreEvent::Removed(id));
        Some(entry.device)
    }

    /// Overwrite all fields of an existing record in place, preserving
    /// its identity and position.
    pub fn update(&mut self, id: DeviceId, device: Device) -> Result<(), CoreError> {
        if device.name.trim().is_empty() {
            return Err(CoreError::validation("device name must not be empty"));
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CoreError::DeviceNotFound {
                identifier: id.to_string(),
            })?;
        entry.device = device;
        self.notify(StoreEvent::Updated(id));
        Ok(())
    }

    /// Atomically discard the current sequence and install a new one.
    ///
    /// The only operation that changes the full sequence without going
    /// through per-item merge logic (used by Pull and explicit
    /// import-overwrite). Incoming records are trusted as-is.
    pub fn replace_all(&mut self, devices: Vec<Device>) {
        self.entries = devices
            .into_iter()
            .map(|device| Entry {
                id: DeviceId::new(),
                device,
            })
            .collect();
        self.notify(StoreEvent::ReplacedAll);
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Immutable ordered copy of the current sequence.
    pub fn snapshot(&self) -> Vec<Device> {
        self.entries.iter().map(|e| e.device.clone()).collect()
    }

    pub fn get(&self, id: DeviceId) -> Option<&Device> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.device)
    }

    /// Iterate `(id, device)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (DeviceId, &Device)> {
        self.entries.iter().map(|e| (e.id, &e.device))
    }

    /// First record whose non-empty serial matches `serial`
    /// case-insensitively. An empty `serial` never matches.
    pub fn find_by_serial(&self, serial: &str) -> Option<DeviceId> {
        if serial.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.device.serial_matches(serial))
            .map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Subscribe to change events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn notify(&self, event: StoreEvent) {
        // Lagging or absent receivers are fine; mutation never blocks
        // on observers.
        let _ = self.events.send(event);
    }
}
