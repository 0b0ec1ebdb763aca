#![forbid(unsafe_code)]

mod common;

use common::{FakeTerminator, ProcessTable, engine, entry, pid, record};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use taskmon_core::TerminateError;
use taskmon_core::domain::{LifecycleLabel, RawStatus, SnapshotEntry};

#[test]
fn first_tick_labels_everything_new_then_by_status() {
    let table = ProcessTable::with(vec![
        entry(1, "a", RawStatus::Running),
        entry(2, "b", RawStatus::Sleeping),
    ]);
    let mut engine = engine(&table, &FakeTerminator::default());

    assert_eq!(
        engine.tick(),
        vec![
            record(1, "a", LifecycleLabel::New, false),
            record(2, "b", LifecycleLabel::New, false),
        ]
    );
    assert!(engine.state().seen.contains(pid(1)));
    assert!(engine.state().seen.contains(pid(2)));

    assert_eq!(
        engine.tick(),
        vec![
            record(1, "a", LifecycleLabel::Running, false),
            record(2, "b", LifecycleLabel::Waiting, false),
        ]
    );
}

#[test]
fn unchanged_table_keeps_identifiers_and_order() {
    let table = ProcessTable::with(vec![
        entry(3, "zsh", RawStatus::Sleeping),
        entry(9, "cron", RawStatus::Idle),
        entry(4, "bash", RawStatus::Zombie),
    ]);
    let mut engine = engine(&table, &FakeTerminator::default());

    let first = engine.tick();
    let second = engine.tick();

    let ids = |records: &[taskmon_core::domain::DisplayRecord]| {
        records.iter().map(|r| r.id).collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));
    assert!(second.iter().all(|r| r.label != LifecycleLabel::New));
    assert_eq!(
        second,
        vec![
            record(4, "bash", LifecycleLabel::Terminated, false),
            record(9, "cron", LifecycleLabel::Idle, false),
            record(3, "zsh", LifecycleLabel::Waiting, false),
        ]
    );
}

#[test]
fn newcomers_are_new_among_known_processes() {
    let table = ProcessTable::with(vec![entry(1, "init", RawStatus::Sleeping)]);
    let mut engine = engine(&table, &FakeTerminator::default());
    engine.tick();

    table.set(vec![
        entry(1, "init", RawStatus::Sleeping),
        entry(2, "sshd", RawStatus::Running),
    ]);

    assert_eq!(
        engine.tick(),
        vec![
            record(1, "init", LifecycleLabel::Waiting, false),
            record(2, "sshd", LifecycleLabel::New, false),
        ]
    );
}

#[test]
fn unknown_status_is_passed_through() {
    let table = ProcessTable::with(vec![entry(5, "dd", RawStatus::Other("disk-sleep".into()))]);
    let mut engine = engine(&table, &FakeTerminator::default());
    engine.tick();

    let records = engine.tick();

    assert_eq!(records[0].label, LifecycleLabel::Unknown("disk-sleep".into()));
}

#[test]
fn selection_survives_while_process_lives() {
    let table = ProcessTable::with(vec![
        entry(1, "a", RawStatus::Running),
        entry(2, "b", RawStatus::Running),
    ]);
    let mut engine = engine(&table, &FakeTerminator::default());
    engine.tick();

    assert_eq!(engine.toggle_selection(pid(1)), Some(true));
    let records = engine.tick();

    assert_eq!(
        records,
        vec![
            record(1, "a", LifecycleLabel::Running, true),
            record(2, "b", LifecycleLabel::Running, false),
        ]
    );
    assert!(engine.selected().contains(&pid(1)));
}

#[test]
fn selection_of_exited_process_is_dropped() {
    let table = ProcessTable::with(vec![
        entry(1, "a", RawStatus::Running),
        entry(2, "b", RawStatus::Running),
    ]);
    let mut engine = engine(&table, &FakeTerminator::default());
    engine.tick();
    engine.toggle_selection(pid(1));

    table.set(vec![entry(2, "b", RawStatus::Running)]);
    let records = engine.tick();

    assert!(records.iter().all(|r| r.id != pid(1)));
    assert!(engine.selected().is_empty());

    // the pid comes back: seen before, so not new, and not selected either
    table.set(vec![entry(1, "a", RawStatus::Running)]);
    assert_eq!(
        engine.tick(),
        vec![record(1, "a", LifecycleLabel::Running, false)]
    );
}

#[test]
fn toggling_unlisted_process_is_ignored() {
    let table = ProcessTable::with(vec![entry(1, "a", RawStatus::Running)]);
    let mut engine = engine(&table, &FakeTerminator::default());

    assert_eq!(engine.toggle_selection(pid(1)), None);
    engine.tick();
    assert_eq!(engine.toggle_selection(pid(42)), None);
    assert!(engine.selected().is_empty());
}

#[test]
fn selected_is_always_seen() {
    let table = ProcessTable::with(vec![
        entry(1, "a", RawStatus::Running),
        entry(2, "b", RawStatus::Running),
    ]);
    let mut engine = engine(&table, &FakeTerminator::default());
    engine.tick();
    engine.toggle_selection(pid(1));
    engine.toggle_selection(pid(2));
    table.set(vec![entry(2, "b", RawStatus::Running)]);
    engine.tick();

    for id in engine.selected() {
        assert!(engine.state().seen.contains(id));
    }
}

#[test]
fn reused_identifier_is_not_new() {
    let table = ProcessTable::with(vec![entry(500, "editor", RawStatus::Running)]);
    let mut engine = engine(&table, &FakeTerminator::default());
    engine.tick();

    table.set(Vec::new());
    assert!(engine.tick().is_empty());

    // an unrelated process receives the same pid
    table.set(vec![entry(500, "compiler", RawStatus::Sleeping)]);
    assert_eq!(
        engine.tick(),
        vec![record(500, "compiler", LifecycleLabel::Waiting, false)]
    );
}

#[test]
fn unreadable_entries_are_skipped_but_remembered_nowhere() {
    let table = ProcessTable::with(vec![
        entry(1, "a", RawStatus::Running),
        SnapshotEntry::Unreadable(pid(2)),
    ]);
    let mut engine = engine(&table, &FakeTerminator::default());

    let records = engine.tick();

    assert_eq!(records, vec![record(1, "a", LifecycleLabel::New, false)]);
    assert!(!engine.state().seen.contains(pid(2)));
    assert_eq!(engine.toggle_selection(pid(2)), None);
}

#[test]
fn duplicate_pid_in_snapshot_is_emitted_once() {
    let table = ProcessTable::with(vec![
        entry(1, "a", RawStatus::Running),
        entry(1, "a", RawStatus::Running),
    ]);
    let mut engine = engine(&table, &FakeTerminator::default());

    assert_eq!(engine.tick().len(), 1);
}

#[test]
fn ordering_ignores_snapshot_order() {
    let entries = vec![
        entry(7, "same", RawStatus::Running),
        entry(3, "same", RawStatus::Running),
        entry(5, "alpha", RawStatus::Running),
    ];
    let mut reversed = entries.clone();
    reversed.reverse();

    let mut forward = engine(&ProcessTable::with(entries), &FakeTerminator::default());
    let mut backward = engine(&ProcessTable::with(reversed), &FakeTerminator::default());

    let records = forward.tick();
    assert_eq!(records, backward.tick());
    assert_eq!(
        records.iter().map(|r| r.id.as_u32()).collect::<Vec<_>>(),
        vec![5, 3, 7]
    );
}

#[test]
fn terminate_reports_each_identifier() {
    let terminator = FakeTerminator::alive(&[10, 12]);
    terminator.protect(12);
    let engine = engine(&ProcessTable::default(), &terminator);

    let report = engine.terminate([pid(10), pid(11), pid(12)]);

    assert_eq!(
        report,
        BTreeMap::from([
            (pid(10), Ok(())),
            (pid(11), Err(TerminateError::NotFound)),
            (pid(12), Err(TerminateError::AccessDenied)),
        ])
    );
    assert_eq!(terminator.signalled(), vec![pid(10)]);
}

#[test]
fn failure_does_not_abort_the_batch() {
    let terminator = FakeTerminator::alive(&[10]);
    let engine = engine(&ProcessTable::default(), &terminator);

    let report = engine.terminate([pid(11), pid(10)]);

    assert_eq!(report[&pid(10)], Ok(()));
    assert_eq!(report[&pid(11)], Err(TerminateError::NotFound));
    assert_eq!(terminator.signalled(), vec![pid(10)]);
}
