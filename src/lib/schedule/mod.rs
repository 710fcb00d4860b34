//! Weekly teaching schedule: click booking, cancel-to-unbook and drag-paint.
pub mod models;
pub mod store;

pub use models::{hours, Day, DragGesture, ScheduleSlot, SlotKey, SlotKeyError, SlotMap, StagedSlot};
pub use store::{ScheduleError, ScheduleStore};

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
