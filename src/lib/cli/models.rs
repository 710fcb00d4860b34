use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::{
    profile::{Card, Field, QualificationKind},
    schedule::Day,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Teacher details, contact and qualifications
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Weekly teaching schedule
    #[command(subcommand)]
    Schedule(ScheduleCommand),
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    Show,
    /// Edit one field and save its card
    Set {
        #[arg(value_enum)]
        field: Field,
        value: String,
    },
    AddQualification {
        #[arg(value_enum)]
        kind: QualificationKind,
        name: String,
        rate: f64,
    },
    /// Move a qualification to another position
    MoveQualification {
        #[arg(value_enum)]
        kind: QualificationKind,
        from: usize,
        to: usize,
    },
    DeleteQualification {
        #[arg(value_enum)]
        kind: QualificationKind,
        index: usize,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Copy a contact value: email, phone or address
    Copy {
        #[arg(value_parser = parse_contact_field)]
        field: Field,
    },
    /// Go back to the default record
    Reset,
}

fn parse_contact_field(value: &str) -> Result<Field, String> {
    let field = <Field as ValueEnum>::from_str(value, false)?;
    if field.card() == Card::Contact {
        Ok(field)
    } else {
        Err(format!("{} is not a contact value", field))
    }
}

#[derive(Subcommand, Debug)]
pub enum ScheduleCommand {
    Show,
    Book {
        #[arg(value_enum)]
        day: Day,
        hour: u8,
        name: Option<String>,
    },
    /// Remove a booking
    Unbook {
        #[arg(value_enum)]
        day: Day,
        hour: u8,
    },
    /// Book a run of hours on one day as generic sessions
    Paint {
        #[arg(value_enum)]
        day: Day,
        from: u8,
        to: u8,
    },
    Summary,
    /// Remove every booking
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

/// A model for describing configuration of the tool.
/// Consists of:
/// 1. Path of the JSON file used as key-value storage
/// 2. Optional path of a JSON teacher record used instead of the built-in default
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub storage_path: PathBuf,
    pub seed_teacher_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("portal_storage.json"),
            seed_teacher_path: None,
        }
    }
}
