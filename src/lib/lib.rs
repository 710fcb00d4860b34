//! State core of the teacher portal: the profile store, the weekly schedule
//! store and the collaborators they persist and prompt through.

pub mod cli;
pub mod clipboard;
pub mod confirmer;
pub mod notice;
pub mod profile;
pub mod schedule;
pub mod storage;
pub mod validation;
