use log::{debug, info, warn};
use similar::TextDiff;
use thiserror::Error;

use crate::{
    clipboard::Clipboard,
    confirmer::Confirmer,
    notice::{Notice, NoticeKind, Toast, PROFILE_TOAST_LIFETIME, TOOLTIP_LIFETIME},
    storage::{read_json, remove_key, KeyValueStore, TEACHER_DETAILS_KEY},
    validation::{validate_fields, validate_qualifications, ValidationError},
};

use super::models::{Card, Field, Qualification, QualificationKind, Teacher};

const DELETE_QUALIFICATION_PROMPT: &str = "Are you sure you want to delete this qualification?";

/// Why a working-copy edit was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("the {0} card is not open for editing")]
    NotEditing(Card),
    #[error("no {kind} qualification at position {index}")]
    OutOfRange {
        kind: QualificationKind,
        index: usize,
    },
    #[error("Rate must be positive")]
    NegativeRate,
    #[error("Rate must be a number")]
    NonFiniteRate,
    #[error("only contact values can be copied, not {0}")]
    NotContact(Field),
}

/// Moves the element at `from` to `to`, shifting everything in between by
/// one. Returns `false` without touching the list when the indices are equal
/// or out of range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Owns the teacher record for one session and persists it through `S`.
#[derive(Debug)]
pub struct ProfileStore<S: KeyValueStore> {
    storage: S,
    seed: Teacher,
    teacher: Teacher,
    active_card: Option<Card>,
    toast: Toast,
    tooltip: Toast<&'static str>,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub fn new(storage: S, seed: Teacher) -> Self {
        let mut store = Self {
            storage,
            teacher: seed.clone(),
            seed,
            active_card: None,
            toast: Toast::new(PROFILE_TOAST_LIFETIME),
            tooltip: Toast::new(TOOLTIP_LIFETIME),
        };
        store.teacher = store.load();
        store
    }

    /// Stored record, or the seed when nothing usable is stored.
    pub fn load(&self) -> Teacher {
        match read_json(&self.storage, TEACHER_DETAILS_KEY) {
            Some(teacher) => {
                debug!("Loaded teacher details from storage");
                teacher
            }
            None => {
                info!("Starting from the default teacher record");
                self.seed.clone()
            }
        }
    }

    pub fn teacher(&self) -> &Teacher {
        &self.teacher
    }

    pub fn seed(&self) -> &Teacher {
        &self.seed
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn active_card(&self) -> Option<Card> {
        self.active_card
    }

    pub fn is_editing(&self, card: Card) -> bool {
        self.active_card == Some(card)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.toast.current()
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.current().copied()
    }

    /// Opens `card` for editing. Any other open card is closed.
    pub fn begin_edit(&mut self, card: Card) {
        if let Some(previous) = self.active_card.replace(card) {
            if previous != card {
                debug!("Closing {} card to edit {}", previous, card);
            }
        }
    }

    pub fn update_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), EditError> {
        self.ensure_editing(field.card())?;
        self.teacher.set_field(field, value.into());
        Ok(())
    }

    pub fn add_qualification(&mut self, kind: QualificationKind) -> Result<(), EditError> {
        self.ensure_editing(kind.card())?;
        self.teacher
            .qualifications_mut(kind)
            .push(Qualification::placeholder());
        Ok(())
    }

    pub fn update_qualification_name(
        &mut self,
        kind: QualificationKind,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), EditError> {
        self.qualification_mut(kind, index)?.name = name.into();
        Ok(())
    }

    /// Negative and non-finite rates are refused outright; zero is left for
    /// commit to catch.
    pub fn update_qualification_rate(
        &mut self,
        kind: QualificationKind,
        index: usize,
        rate: f64,
    ) -> Result<(), EditError> {
        self.ensure_editing(kind.card())?;
        let refused = if !rate.is_finite() {
            Some(EditError::NonFiniteRate)
        } else if rate < 0.0 {
            Some(EditError::NegativeRate)
        } else {
            None
        };
        if let Some(err) = refused {
            self.toast.notify(err.to_string(), NoticeKind::Error);
            return Err(err);
        }
        self.qualification_mut(kind, index)?.rate = rate;
        Ok(())
    }

    /// Returns whether anything moved.
    pub fn reorder_qualification(
        &mut self,
        kind: QualificationKind,
        from: usize,
        to: usize,
    ) -> Result<bool, EditError> {
        self.ensure_editing(kind.card())?;
        let moved = move_item(self.teacher.qualifications_mut(kind), from, to);
        if moved {
            debug!("Moved {} qualification {} -> {}", kind, from, to);
        }
        Ok(moved)
    }

    /// Returns `Ok(false)` when the prompt was declined.
    pub fn delete_qualification<C>(
        &mut self,
        kind: QualificationKind,
        index: usize,
        confirmer: &mut C,
    ) -> Result<bool, EditError>
    where
        C: Confirmer + ?Sized,
    {
        self.ensure_editing(kind.card())?;
        if index >= self.teacher.qualifications(kind).len() {
            return Err(EditError::OutOfRange { kind, index });
        }
        if !confirmer.confirm(DELETE_QUALIFICATION_PROMPT) {
            return Ok(false);
        }
        let removed = self.teacher.qualifications_mut(kind).remove(index);
        debug!("Deleted {} qualification {:?}", kind, removed.name);
        self.toast.notify("Qualification deleted", NoticeKind::Error);
        Ok(true)
    }

    /// Validates `card`, persists the whole record and closes the card.
    pub fn commit_edit(&mut self, card: Card) -> Result<(), ValidationError> {
        let checked = self.validate_card(card);
        self.report(card, checked)?;
        self.persist();
        let message = match card.qualification_kind() {
            Some(_) => "Qualifications saved",
            None => "Saved successfully",
        };
        self.toast.notify(message, NoticeKind::Success);
        self.close(card);
        Ok(())
    }

    /// Validates and closes `card` without persisting. Edits made while the
    /// card was open stay in the working copy.
    pub fn cancel_edit(&mut self, card: Card) -> Result<(), ValidationError> {
        let checked = self.validate_card(card).map_err(|err| match err {
            ValidationError::IncompleteQualifications(kind) => {
                ValidationError::InvalidQualifications(kind)
            }
            other => other,
        });
        self.report(card, checked)?;
        self.close(card);
        Ok(())
    }

    /// Back to the seed record, with storage cleared.
    pub fn reset(&mut self) {
        self.teacher = self.seed.clone();
        remove_key(&mut self.storage, TEACHER_DETAILS_KEY);
        self.active_card = None;
        self.toast.notify("Reset to default", NoticeKind::Error);
    }

    /// Only fields of the contact card can be copied.
    pub fn copy_contact<C>(&mut self, field: Field, clipboard: &mut C) -> Result<(), EditError>
    where
        C: Clipboard + ?Sized,
    {
        if field.card() != Card::Contact {
            return Err(EditError::NotContact(field));
        }
        clipboard.write_text(self.teacher.field(field).unwrap_or_default());
        self.tooltip.show("Copied!");
        self.toast.notify("Copied to clipboard", NoticeKind::Info);
        Ok(())
    }

    pub fn validate_card(&self, card: Card) -> Result<(), ValidationError> {
        match card.qualification_kind() {
            Some(kind) => validate_qualifications(kind, self.teacher.qualifications(kind)),
            None => validate_fields(
                card.fields()
                    .iter()
                    .map(|&field| (field, self.teacher.field(field))),
            ),
        }
    }

    fn report(
        &mut self,
        card: Card,
        checked: Result<(), ValidationError>,
    ) -> Result<(), ValidationError> {
        checked.inspect_err(|err| {
            debug!("{} card rejected: {}", card, err);
            self.toast.notify(err.to_string(), NoticeKind::Error);
        })
    }

    fn close(&mut self, card: Card) {
        if self.active_card == Some(card) {
            self.active_card = None;
        }
    }

    fn ensure_editing(&self, card: Card) -> Result<(), EditError> {
        if self.is_editing(card) {
            Ok(())
        } else {
            Err(EditError::NotEditing(card))
        }
    }

    fn qualification_mut(
        &mut self,
        kind: QualificationKind,
        index: usize,
    ) -> Result<&mut Qualification, EditError> {
        self.ensure_editing(kind.card())?;
        self.teacher
            .qualifications_mut(kind)
            .get_mut(index)
            .ok_or(EditError::OutOfRange { kind, index })
    }

    /// Overwrites the stored blob with the whole record.
    fn persist(&mut self) {
        let current = match serde_json::to_string_pretty(&self.teacher) {
            Ok(current) => current,
            Err(err) => {
                warn!("Could not encode teacher details: {}", err);
                return;
            }
        };
        if let Ok(Some(previous)) = self.storage.get(TEACHER_DETAILS_KEY) {
            let diff = TextDiff::from_lines(&previous, &current);
            if diff.ratio() != 1.0 {
                debug!("Changes in teacher details:\n{}", diff.unified_diff());
            }
        }
        match self.storage.set(TEACHER_DETAILS_KEY, current) {
            Ok(()) => info!("Saved teacher details"),
            Err(err) => warn!("Could not write teacher details: {}", err),
        }
    }
}
