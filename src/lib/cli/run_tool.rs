use std::{fs::File, io::BufReader, io::Write};

use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use log::{debug, info};
use thiserror::Error;

use crate::{
    clipboard::Clipboard,
    confirmer::{Confirmer, FixedAnswer},
    profile::{EditError, ProfileStore, QualificationKind, Teacher},
    schedule::{hours, Day, ScheduleError, ScheduleStore, SlotKey, SlotKeyError},
    storage::KeyValueStore,
    validation::ValidationError,
};

use super::models::{Args, Command, Config, ProfileCommand, ScheduleCommand};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("could not read configuration: {0}")]
    Config(#[from] Box<figment::Error>),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed teacher record: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Slot(#[from] SlotKeyError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Defaults, then `config.json`, then `PORTAL_*` environment variables.
pub fn read_config(args: &Args) -> Result<Config, RunError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Json::file(&args.config_json_path))
        .merge(Env::prefixed("PORTAL_"))
        .extract()
        .map_err(Box::new)?;
    debug!("Using configuration {:?}", config);
    Ok(config)
}

/// Teacher record a fresh or reset profile starts from.
pub fn get_seed_teacher(config: &Config) -> Result<Teacher, RunError> {
    let Some(path) = &config.seed_teacher_path else {
        return Ok(Teacher::default());
    };
    info!(
        "Reading seed teacher from {}",
        std::path::absolute(path)?.display()
    );
    let seed_file = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(seed_file)?)
}

pub fn run<S, C, B, W>(
    args: &Args,
    config: &Config,
    storage: S,
    confirmer: &mut C,
    clipboard: &mut B,
    out: &mut W,
) -> Result<(), RunError>
where
    S: KeyValueStore,
    C: Confirmer + ?Sized,
    B: Clipboard + ?Sized,
    W: Write,
{
    match &args.command {
        Command::Profile(command) => {
            let seed = get_seed_teacher(config)?;
            let mut store = ProfileStore::new(storage, seed);
            run_profile(&mut store, command, confirmer, clipboard, out)?;
            if let Some(notice) = store.notice() {
                writeln!(out, "{}", notice)?;
            }
        }
        Command::Schedule(command) => {
            let mut store = ScheduleStore::new(storage);
            run_schedule(&mut store, command, confirmer, out)?;
            if let Some(notice) = store.notice() {
                writeln!(out, "{}", notice)?;
            }
        }
    }
    Ok(())
}

fn run_profile<S, C, B, W>(
    store: &mut ProfileStore<S>,
    command: &ProfileCommand,
    confirmer: &mut C,
    clipboard: &mut B,
    out: &mut W,
) -> Result<(), RunError>
where
    S: KeyValueStore,
    C: Confirmer + ?Sized,
    B: Clipboard + ?Sized,
    W: Write,
{
    match command {
        ProfileCommand::Show => write_teacher(out, store.teacher())?,
        ProfileCommand::Set { field, value } => {
            let card = field.card();
            store.begin_edit(card);
            store.update_field(*field, value.as_str())?;
            store.commit_edit(card)?;
        }
        ProfileCommand::AddQualification { kind, name, rate } => {
            store.begin_edit(kind.card());
            store.add_qualification(*kind)?;
            let index = store.teacher().qualifications(*kind).len() - 1;
            store.update_qualification_name(*kind, index, name.as_str())?;
            store.update_qualification_rate(*kind, index, *rate)?;
            store.commit_edit(kind.card())?;
        }
        ProfileCommand::MoveQualification { kind, from, to } => {
            store.begin_edit(kind.card());
            if !store.reorder_qualification(*kind, *from, *to)? {
                writeln!(out, "Nothing to move")?;
            }
            store.commit_edit(kind.card())?;
        }
        ProfileCommand::DeleteQualification { kind, index, yes } => {
            store.begin_edit(kind.card());
            let deleted = if *yes {
                store.delete_qualification(*kind, *index, &mut FixedAnswer(true))?
            } else {
                store.delete_qualification(*kind, *index, confirmer)?
            };
            if deleted {
                store.commit_edit(kind.card())?;
            } else {
                writeln!(out, "Kept {} qualification {}", kind, index)?;
            }
        }
        ProfileCommand::Copy { field } => store.copy_contact(*field, clipboard)?,
        ProfileCommand::Reset => store.reset(),
    }
    Ok(())
}

fn run_schedule<S, C, W>(
    store: &mut ScheduleStore<S>,
    command: &ScheduleCommand,
    confirmer: &mut C,
    out: &mut W,
) -> Result<(), RunError>
where
    S: KeyValueStore,
    C: Confirmer + ?Sized,
    W: Write,
{
    match command {
        ScheduleCommand::Show => write_grid(out, store)?,
        ScheduleCommand::Book { day, hour, name } => {
            store.open_slot_editor(SlotKey::new(*day, *hour)?);
            store.save_session(name.clone().unwrap_or_default())?;
        }
        ScheduleCommand::Unbook { day, hour } => {
            store.open_slot_editor(SlotKey::new(*day, *hour)?);
            store.cancel_session()?;
        }
        ScheduleCommand::Paint { day, from, to } => {
            let (first, last) = if from <= to { (*from, *to) } else { (*to, *from) };
            let keys = (first..=last)
                .map(|hour| SlotKey::new(*day, hour))
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(start) = keys.first() {
                store.pointer_down(*start);
            }
            let painted = keys.into_iter().filter(|key| store.pointer_enter(*key)).count();
            store.pointer_up();
            writeln!(out, "Painted {} slot(s) on {}", painted, day)?;
        }
        ScheduleCommand::Summary => {
            for (day, booked) in store.weekly_summary() {
                writeln!(out, "{}: {} booked", day, booked)?;
            }
        }
        ScheduleCommand::Reset { yes } => {
            let reset = if *yes {
                store.reset_all(&mut FixedAnswer(true))
            } else {
                store.reset_all(confirmer)
            };
            if !reset {
                writeln!(out, "Schedule kept")?;
            }
        }
    }
    Ok(())
}

fn write_teacher<W: Write>(out: &mut W, teacher: &Teacher) -> std::io::Result<()> {
    writeln!(out, "Name: {}", teacher.name)?;
    writeln!(out, "Role: {}", teacher.role)?;
    writeln!(
        out,
        "Birth Date: {}",
        teacher.birth_date.as_deref().unwrap_or("N/A")
    )?;
    writeln!(out, "Email: {}", teacher.email)?;
    writeln!(out, "Phone: {}", teacher.phone)?;
    writeln!(out, "Address: {}", teacher.address)?;
    for kind in [QualificationKind::Private, QualificationKind::Group] {
        writeln!(out, "{} qualifications:", kind)?;
        let qualifications = teacher.qualifications(kind);
        if qualifications.is_empty() {
            writeln!(out, "  No qualifications listed.")?;
        }
        for (index, qualification) in qualifications.iter().enumerate() {
            writeln!(
                out,
                "  {}. {} ${}/hr",
                index, qualification.name, qualification.rate
            )?;
        }
    }
    Ok(())
}

fn write_grid<S, W>(out: &mut W, store: &ScheduleStore<S>) -> std::io::Result<()>
where
    S: KeyValueStore,
    W: Write,
{
    write!(out, "{:>6}", "Time")?;
    for (day, booked) in store.weekly_summary() {
        write!(out, " | {:<14}", format!("{} ({})", day, booked))?;
    }
    writeln!(out)?;
    for hour in hours() {
        write!(out, "{:>6}", format!("{}:00", hour))?;
        for day in Day::ALL {
            let label = SlotKey::new(day, hour)
                .map(|key| store.label(key))
                .unwrap_or_default();
            write!(out, " | {:<14}", label)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
