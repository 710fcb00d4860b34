use log::{debug, info};
use thiserror::Error;

use crate::{
    confirmer::Confirmer,
    notice::{Notice, NoticeKind, Toast, SCHEDULE_TOAST_LIFETIME},
    storage::{read_json, remove_key, write_json, KeyValueStore, SCHEDULE_SLOTS_KEY},
};

use super::models::{
    hours, Day, DragGesture, ScheduleSlot, SlotKey, SlotMap, StagedSlot, PAINTED_SESSION_NAME,
};

const RESET_PROMPT: &str =
    "Are you sure you want to reset the entire schedule? This cannot be undone.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("no slot is open in the session editor")]
    NothingStaged,
}

/// Owns the booking map for one session and persists it through `S`.
#[derive(Debug)]
pub struct ScheduleStore<S: KeyValueStore> {
    storage: S,
    slots: SlotMap,
    staged: Option<StagedSlot>,
    gesture: DragGesture,
    toast: Toast,
}

impl<S: KeyValueStore> ScheduleStore<S> {
    pub fn new(storage: S) -> Self {
        let mut store = Self {
            storage,
            slots: SlotMap::new(),
            staged: None,
            gesture: DragGesture::Idle,
            toast: Toast::new(SCHEDULE_TOAST_LIFETIME),
        };
        store.slots = store.load();
        store
    }

    /// Stored map, or an empty one when nothing usable is stored.
    pub fn load(&self) -> SlotMap {
        let slots: SlotMap = read_json(&self.storage, SCHEDULE_SLOTS_KEY).unwrap_or_default();
        info!("Found {} booked slot(s) in storage", slots.len());
        slots
    }

    pub fn slots(&self) -> &SlotMap {
        &self.slots
    }

    pub fn slot(&self, key: SlotKey) -> Option<&ScheduleSlot> {
        self.slots.get(&key)
    }

    /// Cell text: session name, "Booked" or empty.
    pub fn label(&self, key: SlotKey) -> &str {
        self.slot(key).map(ScheduleSlot::label).unwrap_or_default()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn staged(&self) -> Option<&StagedSlot> {
        self.staged.as_ref()
    }

    pub fn gesture(&self) -> DragGesture {
        self.gesture
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.toast.current()
    }

    /// Stages `key` with its current name for editing.
    pub fn open_slot_editor(&mut self, key: SlotKey) {
        let name = self
            .slots
            .get(&key)
            .and_then(|slot| slot.name.clone())
            .unwrap_or_default();
        debug!("Editing slot {} (current name {:?})", key, name);
        self.staged = Some(StagedSlot { key, name });
    }

    /// Updates the name typed into the editor.
    pub fn set_session_name(&mut self, name: impl Into<String>) -> Result<(), ScheduleError> {
        let staged = self.staged.as_mut().ok_or(ScheduleError::NothingStaged)?;
        staged.name = name.into();
        Ok(())
    }

    /// Books the staged slot under `name`. Any name is accepted, empty included.
    pub fn save_session(&mut self, name: impl Into<String>) -> Result<SlotKey, ScheduleError> {
        let staged = self.staged.take().ok_or(ScheduleError::NothingStaged)?;
        self.slots.insert(staged.key, ScheduleSlot::booked(name));
        self.persist();
        self.toast
            .notify("Session saved successfully", NoticeKind::Success);
        Ok(staged.key)
    }

    /// Books the staged slot under the name typed into the editor.
    pub fn save_staged(&mut self) -> Result<SlotKey, ScheduleError> {
        let name = self
            .staged
            .as_ref()
            .map(|staged| staged.name.clone())
            .ok_or(ScheduleError::NothingStaged)?;
        self.save_session(name)
    }

    /// Unbooks the staged slot, even one that was booked before editing.
    pub fn cancel_session(&mut self) -> Result<SlotKey, ScheduleError> {
        let staged = self.staged.take().ok_or(ScheduleError::NothingStaged)?;
        self.slots.remove(&staged.key);
        self.persist();
        self.toast.notify("Session removed", NoticeKind::Info);
        Ok(staged.key)
    }

    pub fn pointer_down(&mut self, key: SlotKey) {
        debug!("Drag started at {}", key);
        self.gesture = DragGesture::Dragging;
    }

    pub fn pointer_up(&mut self) {
        self.gesture = DragGesture::Idle;
    }

    /// Pointer left the grid.
    pub fn pointer_leave(&mut self) {
        self.gesture = DragGesture::Idle;
    }

    pub fn pointer_enter(&mut self, key: SlotKey) -> bool {
        self.drag_paint(key)
    }

    /// Books `key` as a generic session while dragging. Returns whether the
    /// cell was painted.
    pub fn drag_paint(&mut self, key: SlotKey) -> bool {
        if self.gesture != DragGesture::Dragging {
            return false;
        }
        self.slots
            .insert(key, ScheduleSlot::booked(PAINTED_SESSION_NAME));
        self.persist();
        true
    }

    /// Clears every booking once the prompt is accepted.
    pub fn reset_all<C>(&mut self, confirmer: &mut C) -> bool
    where
        C: Confirmer + ?Sized,
    {
        if !confirmer.confirm(RESET_PROMPT) {
            return false;
        }
        self.slots.clear();
        self.staged = None;
        remove_key(&mut self.storage, SCHEDULE_SLOTS_KEY);
        self.toast
            .notify("Schedule reset successfully", NoticeKind::Error);
        true
    }

    /// Booked cells on `day`, counted from the map each time.
    pub fn summary(&self, day: Day) -> usize {
        hours()
            .filter_map(|hour| SlotKey::new(day, hour).ok())
            .filter(|key| self.slots.get(key).is_some_and(|slot| slot.booked))
            .count()
    }

    pub fn weekly_summary(&self) -> [(Day, usize); 7] {
        Day::ALL.map(|day| (day, self.summary(day)))
    }

    fn persist(&mut self) {
        write_json(&mut self.storage, SCHEDULE_SLOTS_KEY, &self.slots);
    }
}
