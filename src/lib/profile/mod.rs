//! Teacher profile: the record, its editable cards and their commit rules.
pub mod models;
pub mod store;

pub use models::{Card, Field, Qualification, QualificationKind, Teacher};
pub use store::{move_item, EditError, ProfileStore};

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
