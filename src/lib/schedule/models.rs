//! Weekly grid model: days, hour rows and the sparse booking map.
use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// First bookable hour of a day.
pub const FIRST_HOUR: u8 = 8;
/// Last bookable hour of a day, inclusive.
pub const LAST_HOUR: u8 = 19;

/// Generic name given to cells booked by dragging across them.
pub const PAINTED_SESSION_NAME: &str = "Session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Day {
    #[value(name = "Mon", alias = "mon")]
    Mon,
    #[value(name = "Tue", alias = "tue")]
    Tue,
    #[value(name = "Wed", alias = "wed")]
    Wed,
    #[value(name = "Thu", alias = "thu")]
    Thu,
    #[value(name = "Fri", alias = "fri")]
    Fri,
    #[value(name = "Sat", alias = "sat")]
    Sat,
    #[value(name = "Sun", alias = "sun")]
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every hour row of the grid.
pub fn hours() -> impl Iterator<Item = u8> + Clone {
    FIRST_HOUR..=LAST_HOUR
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotKeyError {
    #[error("slot key {0:?} is not of the form Day-Hour")]
    Shape(String),
    #[error("unknown day {0:?}")]
    Day(String),
    #[error("hour {0} is outside 8..=19")]
    Hour(u8),
}

/// Address of one grid cell, written `"{day}-{hour}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotKey {
    day: Day,
    hour: u8,
}

impl SlotKey {
    pub fn new(day: Day, hour: u8) -> Result<Self, SlotKeyError> {
        if !(FIRST_HOUR..=LAST_HOUR).contains(&hour) {
            return Err(SlotKeyError::Hour(hour));
        }
        Ok(Self { day, hour })
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// All 84 keys, day-major.
    pub fn all() -> impl Iterator<Item = SlotKey> {
        Day::ALL
            .into_iter()
            .flat_map(|day| hours().map(move |hour| SlotKey { day, hour }))
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day, self.hour)
    }
}

impl FromStr for SlotKey {
    type Err = SlotKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, hour) = s
            .split_once('-')
            .ok_or_else(|| SlotKeyError::Shape(s.to_owned()))?;
        let day = Day::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == day)
            .ok_or_else(|| SlotKeyError::Day(day.to_owned()))?;
        // Only the text `Display` writes: plain digits, no sign, no leading zero.
        if hour.is_empty() || hour.starts_with('0') || !hour.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SlotKeyError::Shape(s.to_owned()));
        }
        let hour = hour
            .parse::<u8>()
            .map_err(|_| SlotKeyError::Shape(s.to_owned()))?;
        SlotKey::new(day, hour)
    }
}

impl TryFrom<String> for SlotKey {
    type Error = SlotKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotKey> for String {
    fn from(key: SlotKey) -> Self {
        key.to_string()
    }
}

/// Booking stored for a cell. Unbooked cells have no entry at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub booked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ScheduleSlot {
    pub fn booked(name: impl Into<String>) -> Self {
        Self {
            booked: true,
            name: Some(name.into()),
        }
    }

    /// Text shown in the cell: the session name, or "Booked" for an unnamed booking.
    pub fn label(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ if self.booked => "Booked",
            _ => "",
        }
    }
}

/// Model for the `scheduleSlots` record.
pub type SlotMap = BTreeMap<SlotKey, ScheduleSlot>;

/// Pointer gesture over the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragGesture {
    #[default]
    Idle,
    Dragging,
}

/// Slot opened in the session editor, with the name being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedSlot {
    pub key: SlotKey,
    pub name: String,
}
