use crate::{
    clipboard::MemoryClipboard,
    confirmer::FixedAnswer,
    notice::NoticeKind,
    storage::{KeyValueStore, MemoryStore, TEACHER_DETAILS_KEY},
    validation::ValidationError,
};

use super::*;

fn fresh_store() -> (MemoryStore, ProfileStore<MemoryStore>) {
    let storage = MemoryStore::new();
    let store = ProfileStore::new(storage.clone(), Teacher::default());
    (storage, store)
}

fn names(teacher: &Teacher, kind: QualificationKind) -> Vec<String> {
    teacher
        .qualifications(kind)
        .iter()
        .map(|q| q.name.clone())
        .collect()
}

fn stored_teacher(storage: &MemoryStore) -> Option<Teacher> {
    storage
        .get(TEACHER_DETAILS_KEY)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

#[test]
fn load_without_storage_returns_seed() {
    let (storage, store) = fresh_store();
    assert_eq!(store.teacher(), &Teacher::default());
    assert!(storage.is_empty());
}

#[test]
fn load_with_malformed_storage_returns_seed() {
    let mut storage = MemoryStore::new();
    storage
        .set(TEACHER_DETAILS_KEY, "{\"name\": 12".to_owned())
        .unwrap();
    let store = ProfileStore::new(storage.clone(), Teacher::default());
    assert_eq!(store.teacher(), &Teacher::default());

    storage
        .set(TEACHER_DETAILS_KEY, "[1, 2, 3]".to_owned())
        .unwrap();
    assert_eq!(store.load(), Teacher::default());
}

#[test]
fn contact_commit_with_ten_digit_phone_succeeds() {
    let (storage, mut store) = fresh_store();
    store.begin_edit(Card::Contact);
    assert_eq!(store.commit_edit(Card::Contact), Ok(()));
    assert_eq!(store.active_card(), None);
    assert_eq!(stored_teacher(&storage), Some(Teacher::default()));
    assert_eq!(
        store.notice().map(|n| (n.message.as_str(), n.kind)),
        Some(("Saved successfully", NoticeKind::Success))
    );
}

#[test]
fn contact_commit_with_short_phone_fails() {
    let (storage, mut store) = fresh_store();
    store.begin_edit(Card::Contact);
    store.update_field(Field::Phone, "123").unwrap();

    assert_eq!(
        store.commit_edit(Card::Contact),
        Err(ValidationError::InvalidPhone)
    );
    assert!(store.is_editing(Card::Contact));
    assert!(stored_teacher(&storage).is_none());
    assert_eq!(
        store.notice().map(|n| (n.message.as_str(), n.kind)),
        Some(("Phone must be 10 digits", NoticeKind::Error))
    );
}

#[test]
fn details_commit_checks_fields_in_order() {
    let (_, mut store) = fresh_store();
    store.begin_edit(Card::Details);
    store.update_field(Field::Role, "  ").unwrap();
    store.update_field(Field::BirthDate, "not a date").unwrap();
    assert_eq!(
        store.commit_edit(Card::Details),
        Err(ValidationError::Empty(Field::Role))
    );

    store.update_field(Field::Role, "Vocal coach").unwrap();
    assert_eq!(
        store.commit_edit(Card::Details),
        Err(ValidationError::InvalidBirthDate)
    );

    store.update_field(Field::BirthDate, "1990-05-17").unwrap();
    assert_eq!(store.commit_edit(Card::Details), Ok(()));
    assert_eq!(store.teacher().birth_date.as_deref(), Some("1990-05-17"));
}

#[test]
fn only_one_card_is_open_at_a_time() {
    let (_, mut store) = fresh_store();
    store.begin_edit(Card::Details);
    store.begin_edit(Card::Private);
    assert_eq!(store.active_card(), Some(Card::Private));
    assert!(!store.is_editing(Card::Details));
    assert_eq!(
        store.update_field(Field::Name, "Someone"),
        Err(EditError::NotEditing(Card::Details))
    );
}

#[test]
fn edits_need_an_open_card() {
    let (_, mut store) = fresh_store();
    assert_eq!(
        store.add_qualification(QualificationKind::Group),
        Err(EditError::NotEditing(Card::Group))
    );
    assert!(store.teacher().group_qualifications.is_empty());
}

#[test]
fn placeholder_blocks_commit_until_filled() {
    let (storage, mut store) = fresh_store();
    store.begin_edit(Card::Group);
    store.add_qualification(QualificationKind::Group).unwrap();
    assert_eq!(
        store.teacher().group_qualifications,
        vec![Qualification::new("", 0.0)]
    );

    assert_eq!(
        store.commit_edit(Card::Group),
        Err(ValidationError::IncompleteQualifications(
            QualificationKind::Group
        ))
    );
    assert!(store.is_editing(Card::Group));

    store
        .update_qualification_name(QualificationKind::Group, 0, "Choir")
        .unwrap();
    store
        .update_qualification_rate(QualificationKind::Group, 0, 15.0)
        .unwrap();
    assert_eq!(store.commit_edit(Card::Group), Ok(()));

    let saved = stored_teacher(&storage).unwrap();
    assert_eq!(saved.group_qualifications, vec![Qualification::new("Choir", 15.0)]);
    assert!(saved
        .group_qualifications
        .iter()
        .chain(saved.private_qualifications.iter())
        .all(|q| !q.name.trim().is_empty() && q.rate > 0.0));
}

#[test]
fn negative_rate_is_refused() {
    let (_, mut store) = fresh_store();
    store.begin_edit(Card::Private);
    assert_eq!(
        store.update_qualification_rate(QualificationKind::Private, 0, -3.0),
        Err(EditError::NegativeRate)
    );
    assert_eq!(store.teacher().private_qualifications[0].rate, 28.0);
    assert_eq!(
        store.notice().map(|n| n.message.as_str()),
        Some("Rate must be positive")
    );
    assert_eq!(
        store.update_qualification_rate(QualificationKind::Private, 9, 3.0),
        Err(EditError::OutOfRange {
            kind: QualificationKind::Private,
            index: 9
        })
    );
}

#[test]
fn non_finite_rate_is_refused() {
    for rate in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let (_, mut store) = fresh_store();
        store.begin_edit(Card::Private);
        assert_eq!(
            store.update_qualification_rate(QualificationKind::Private, 0, rate),
            Err(EditError::NonFiniteRate)
        );
        assert_eq!(store.teacher().private_qualifications[0].rate, 28.0);
        assert_eq!(
            store.notice().map(|n| n.message.as_str()),
            Some("Rate must be a number")
        );
    }
}

#[test]
fn non_finite_rate_never_reaches_storage() {
    let (storage, mut store) = fresh_store();
    store.begin_edit(Card::Details);
    store.update_field(Field::Name, "Changed Name").unwrap();
    store.commit_edit(Card::Details).unwrap();

    store.begin_edit(Card::Group);
    store.add_qualification(QualificationKind::Group).unwrap();
    store
        .update_qualification_name(QualificationKind::Group, 0, "Choir")
        .unwrap();
    assert!(store
        .update_qualification_rate(QualificationKind::Group, 0, f64::INFINITY)
        .is_err());
    assert!(store
        .update_qualification_rate(QualificationKind::Group, 0, f64::NAN)
        .is_err());
    assert_eq!(
        store.commit_edit(Card::Group),
        Err(ValidationError::IncompleteQualifications(
            QualificationKind::Group
        ))
    );

    store
        .update_qualification_rate(QualificationKind::Group, 0, 18.0)
        .unwrap();
    store.commit_edit(Card::Group).unwrap();
    let reopened = ProfileStore::new(storage.clone(), Teacher::default());
    assert_eq!(reopened.teacher(), store.teacher());
    assert_eq!(reopened.teacher().name, "Changed Name");
}

#[test]
fn reorder_moves_one_entry_and_keeps_the_rest_in_order() {
    let (_, mut store) = fresh_store();
    store.begin_edit(Card::Private);

    assert_eq!(
        store.reorder_qualification(QualificationKind::Private, 0, 2),
        Ok(true)
    );
    assert_eq!(
        names(store.teacher(), QualificationKind::Private),
        ["Vocal Core", "Vocal Plus", "Vocal Contemporary", "Instrument"]
    );

    assert_eq!(
        store.reorder_qualification(QualificationKind::Private, 3, 0),
        Ok(true)
    );
    assert_eq!(
        names(store.teacher(), QualificationKind::Private),
        ["Instrument", "Vocal Core", "Vocal Plus", "Vocal Contemporary"]
    );
}

#[test]
fn reorder_out_of_range_or_same_index_is_a_no_op() {
    let (_, mut store) = fresh_store();
    store.begin_edit(Card::Private);
    let before = store.teacher().clone();
    assert_eq!(
        store.reorder_qualification(QualificationKind::Private, 1, 1),
        Ok(false)
    );
    assert_eq!(
        store.reorder_qualification(QualificationKind::Private, 1, 4),
        Ok(false)
    );
    assert_eq!(
        store.reorder_qualification(QualificationKind::Private, 7, 0),
        Ok(false)
    );
    assert_eq!(store.teacher(), &before);
}

#[test]
fn move_item_preserves_multiset_and_relative_order() {
    for from in 0..5 {
        for to in 0..5 {
            let mut items: Vec<u32> = (0..5).collect();
            assert_eq!(move_item(&mut items, from, to), from != to);
            let mut sorted = items.clone();
            sorted.sort();
            assert_eq!(sorted, (0..5).collect::<Vec<_>>());
            assert_eq!(items[to], from as u32);
            let rest: Vec<u32> = items.iter().copied().filter(|&x| x != from as u32).collect();
            assert!(rest.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn delete_declined_leaves_list_unchanged() {
    let (_, mut store) = fresh_store();
    store.begin_edit(Card::Private);
    let mut prompts = Vec::new();
    let mut decline = |prompt: &str| {
        prompts.push(prompt.to_owned());
        false
    };
    assert_eq!(
        store.delete_qualification(QualificationKind::Private, 1, &mut decline),
        Ok(false)
    );
    assert_eq!(store.teacher().private_qualifications.len(), 4);
    assert_eq!(
        prompts,
        ["Are you sure you want to delete this qualification?"]
    );
}

#[test]
fn delete_confirmed_removes_exactly_one_entry() {
    let (_, mut store) = fresh_store();
    store.begin_edit(Card::Private);
    assert_eq!(
        store.delete_qualification(QualificationKind::Private, 1, &mut FixedAnswer(true)),
        Ok(true)
    );
    assert_eq!(
        names(store.teacher(), QualificationKind::Private),
        ["Vocal Contemporary", "Vocal Plus", "Instrument"]
    );
    assert_eq!(
        store.delete_qualification(QualificationKind::Private, 3, &mut FixedAnswer(true)),
        Err(EditError::OutOfRange {
            kind: QualificationKind::Private,
            index: 3
        })
    );
}

#[test]
fn cancel_validates_and_closes_without_persisting() {
    let (storage, mut store) = fresh_store();
    store.begin_edit(Card::Contact);
    store.update_field(Field::Email, "broken").unwrap();
    assert_eq!(
        store.cancel_edit(Card::Contact),
        Err(ValidationError::InvalidEmail)
    );
    assert!(store.is_editing(Card::Contact));

    store
        .update_field(Field::Email, "alynia@studio.example")
        .unwrap();
    assert_eq!(store.cancel_edit(Card::Contact), Ok(()));
    assert_eq!(store.active_card(), None);
    assert_eq!(store.teacher().email, "alynia@studio.example");
    assert!(stored_teacher(&storage).is_none());
}

#[test]
fn cancel_reports_invalid_qualifications_in_its_own_words() {
    let (_, mut store) = fresh_store();
    store.begin_edit(Card::Group);
    store.add_qualification(QualificationKind::Group).unwrap();
    assert_eq!(
        store.cancel_edit(Card::Group),
        Err(ValidationError::InvalidQualifications(
            QualificationKind::Group
        ))
    );
    assert_eq!(
        store.notice().map(|n| n.message.as_str()),
        Some("Please complete or remove invalid qualifications")
    );
    assert!(store.is_editing(Card::Group));

    assert_eq!(
        store.commit_edit(Card::Group),
        Err(ValidationError::IncompleteQualifications(
            QualificationKind::Group
        ))
    );
    assert_eq!(
        store.notice().map(|n| n.message.as_str()),
        Some("Please remove or complete empty qualifications")
    );
}

#[test]
fn commit_of_another_card_keeps_open_card_open() {
    let (_, mut store) = fresh_store();
    store.begin_edit(Card::Details);
    assert_eq!(store.commit_edit(Card::Contact), Ok(()));
    assert_eq!(store.active_card(), Some(Card::Details));
}

#[test]
fn persisted_record_round_trips() {
    let (storage, mut store) = fresh_store();
    store.begin_edit(Card::Details);
    store.update_field(Field::BirthDate, "1988-11-02").unwrap();
    store.commit_edit(Card::Details).unwrap();
    store.begin_edit(Card::Private);
    store
        .reorder_qualification(QualificationKind::Private, 2, 0)
        .unwrap();
    store.add_qualification(QualificationKind::Private).unwrap();
    store
        .update_qualification_name(QualificationKind::Private, 4, "Piano")
        .unwrap();
    store
        .update_qualification_rate(QualificationKind::Private, 4, 32.5)
        .unwrap();
    store.commit_edit(Card::Private).unwrap();

    let reopened = ProfileStore::new(storage.clone(), Teacher::default());
    assert_eq!(reopened.teacher(), store.teacher());
}

#[test]
fn stored_json_uses_camel_case_keys() {
    let (storage, mut store) = fresh_store();
    store.commit_edit(Card::Details).unwrap();
    let raw = storage.get(TEACHER_DETAILS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.get("privateQualifications").is_some());
    assert!(value.get("groupQualifications").is_some());
    assert!(value.get("birthDate").is_none());
}

#[test]
fn reset_restores_seed_and_clears_storage() {
    let (storage, mut store) = fresh_store();
    store.begin_edit(Card::Details);
    store.update_field(Field::Name, "Somebody Else").unwrap();
    store.commit_edit(Card::Details).unwrap();
    store.begin_edit(Card::Contact);
    assert!(storage.contains(TEACHER_DETAILS_KEY));

    store.reset();
    assert_eq!(store.teacher(), &Teacher::default());
    assert_eq!(store.active_card(), None);
    assert!(!storage.contains(TEACHER_DETAILS_KEY));
    assert_eq!(
        store.notice().map(|n| (n.message.as_str(), n.kind)),
        Some(("Reset to default", NoticeKind::Error))
    );
}

#[test]
fn copy_contact_writes_clipboard() {
    let (_, mut store) = fresh_store();
    let mut clipboard = MemoryClipboard::default();
    store.copy_contact(Field::Phone, &mut clipboard).unwrap();
    assert_eq!(clipboard.contents.as_deref(), Some("4168489057"));
    assert_eq!(store.tooltip(), Some("Copied!"));
    assert_eq!(
        store.notice().map(|n| (n.message.as_str(), n.kind)),
        Some(("Copied to clipboard", NoticeKind::Info))
    );
}

#[test]
fn copy_refuses_fields_outside_the_contact_card() {
    let (_, mut store) = fresh_store();
    let mut clipboard = MemoryClipboard::default();
    for field in [Field::Name, Field::Role, Field::BirthDate] {
        assert_eq!(
            store.copy_contact(field, &mut clipboard),
            Err(EditError::NotContact(field))
        );
    }
    assert_eq!(clipboard.contents, None);
    assert_eq!(store.tooltip(), None);
    assert_eq!(store.notice(), None);

    store.copy_contact(Field::Address, &mut clipboard).unwrap();
    assert_eq!(
        clipboard.contents.as_deref(),
        Some("56 Oswald De Santos Cr, North York, Ontario, Canada")
    );
}
