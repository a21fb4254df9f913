//! Buffered edit session for a single device. Changes accumulate in a
//! draft copy and reach the store only on save.

use crate::error::CoreError;
use crate::model::{Device, DeviceId};
use crate::store::DeviceStore;

#[derive(Debug, Clone)]
pub struct EditSession {
    id: DeviceId,
    committed: Device,
    draft: Device,
}

impl EditSession {
    /// Open a session for the device with the given id, or `None` if it
    /// is not in the store.
    pub fn begin(store: &DeviceStore, id: DeviceId) -> Option<Self> {
        let committed = store.get(id)?.clone();
        Some(Self {
            id,
            draft: committed.clone(),
            committed,
        })
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn draft(&self) -> &Device {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Device {
        &mut self.draft
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.draft != self.committed
    }

    /// Write the draft back to the store. The committed snapshot
    /// advances so the session can keep editing.
    pub fn save(&mut self, store: &mut DeviceStore) -> Result<(), CoreError> {
        store.update(self.id, self.draft.clone())?;
        self.committed = self.draft.clone();
        Ok(())
    }

    /// Throw away draft changes, reverting to the last saved state.
    pub fn discard(&mut self) {
        self.draft = self.committed.clone();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::DeviceStatus;

    fn store_with_one() -> (DeviceStore, DeviceId) {
        let mut store = DeviceStore::new();
        let id = store
            .add(Device {
                name: "router".into(),
                serial_number: "R-1".into(),
                ..Device::default()
            })
            .unwrap();
        (store, id)
    }

    #[test]
    fn draft_edits_do_not_touch_the_store() {
        let (store, id) = store_with_one();
        let mut session = EditSession::begin(&store, id).unwrap();

        session.draft_mut().status = DeviceStatus::Broken;

        assert!(session.has_unsaved_changes());
        assert_eq!(store.get(id).unwrap().status, DeviceStatus::Working);
    }

    #[test]
    fn save_applies_the_draft_and_resets_dirtiness() {
        let (mut store, id) = store_with_one();
        let mut session = EditSession::begin(&store, id).unwrap();

        session.draft_mut().name = "edge-router".into();
        session.save(&mut store).unwrap();

        assert!(!session.has_unsaved_changes());
        assert_eq!(store.get(id).unwrap().name, "edge-router");
    }

    #[test]
    fn discard_reverts_to_last_saved_state() {
        let (mut store, id) = store_with_one();
        let mut session = EditSession::begin(&store, id).unwrap();

        session.draft_mut().name = "first".into();
        session.save(&mut store).unwrap();
        session.draft_mut().name = "second".into();
        session.discard();

        assert_eq!(session.draft().name, "first");
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn save_rejects_an_emptied_name() {
        let (mut store, id) = store_with_one();
        let mut session = EditSession::begin(&store, id).unwrap();

        session.draft_mut().name = "  ".into();
        assert!(session.save(&mut store).is_err());
        assert_eq!(store.get(id).unwrap().name, "router");
    }

    #[test]
    fn begin_returns_none_for_unknown_id() {
        let (store, id) = store_with_one();
        let (other_store, other_id) = store_with_one();
        drop(other_store);

        assert!(EditSession::begin(&store, id).is_some());
        assert!(EditSession::begin(&store, other_id).is_none());
    }
}
