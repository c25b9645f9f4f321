//! Acceptance pipeline: gates, labels, rollback and collaborator calls

use crate::fixtures::{
    CountingHook, FailingSink, PrintCall, RecordingPrinter, memory_session, record,
};
use devlabel::io::backup::FileBackup;
use devlabel::models::{DeviceCategory, ScanInput};
use devlabel::services::sink::DeviceLogSink;
use devlabel::services::sink::csv_file::CsvSink;
use devlabel::services::sink::memory::MemorySink;
use devlabel::{Rejection, Session};
use tempfile::TempDir;

#[test]
fn test_gates_run_in_order() {
    let mut session = memory_session(vec![record("FP001", "AA:BB")]);

    let cases = [
        (ScanInput::new("", "", ""), Rejection::MissingSite),
        (ScanInput::new("  ", "FP001", "AA:BB"), Rejection::MissingSite),
        (ScanInput::new("Lab1", "   ", ""), Rejection::MissingSerial),
        (
            ScanInput::new("Lab1", "FP009", ""),
            Rejection::MissingMacForAccessPoint,
        ),
        (ScanInput::new("Lab1", "X1", "AA:BB"), Rejection::InvalidSerial),
        (ScanInput::new("Lab1", "FP001", "CC:DD"), Rejection::DuplicateDevice),
    ];

    for (input, expected) in cases {
        assert_eq!(session.accept(&input).unwrap_err(), expected, "{input:?}");
    }
}

#[test]
fn test_rejection_leaves_state_untouched() {
    let mut session = memory_session(vec![record("FP001", "AA:BB")]);

    let _ = session.accept(&ScanInput::new("Lab1", "FP001", "AA:BB"));
    let _ = session.accept(&ScanInput::new("Lab1", "FP002", "AA:BB"));
    let _ = session.accept(&ScanInput::new("Lab1", "Q1", ""));
    let _ = session.accept(&ScanInput::new("Lab1", "FP003", ""));

    assert!(session.ledger().is_empty());
    assert_eq!(session.counters().ap(), 1);
    assert_eq!(session.counters().switch(), 'A');
    assert_eq!(session.sink().len(), 1);
    assert!(session.printer().calls.is_empty());
}

#[test]
fn test_clears_input_only_for_invalid_and_duplicate() {
    assert!(Rejection::InvalidSerial.clears_input());
    assert!(Rejection::DuplicateDevice.clears_input());
    assert!(!Rejection::MissingSite.clears_input());
    assert!(!Rejection::MissingSerial.clears_input());
    assert!(!Rejection::MissingMacForAccessPoint.clears_input());
    assert!(!Rejection::PersistenceFailure("x".to_string()).clears_input());
}

#[test]
fn test_three_access_points_get_sequential_labels() {
    let mut session = memory_session(Vec::new());

    let labels: Vec<String> = ["FP001", "FP002", "FP003"]
        .iter()
        .enumerate()
        .map(|(i, serial)| {
            let mac = format!("00:00:00:00:00:0{i}");
            session
                .accept(&ScanInput::new("Lab1", *serial, mac))
                .expect("accepted")
                .entry
                .label
        })
        .collect();

    assert_eq!(labels, vec!["AP-01", "AP-02", "AP-03"]);
    assert_eq!(session.counters().ap(), 4);
}

#[test]
fn test_switches_get_letters_and_need_no_mac() {
    let mut session = memory_session(Vec::new());

    let first = session.accept(&ScanInput::new("Lab1", "S100", "")).unwrap();
    let second = session.accept(&ScanInput::new("Lab1", "s200", "")).unwrap();

    assert_eq!(first.entry.label, "A");
    assert_eq!(second.entry.label, "B");
    assert_eq!(second.entry.category, DeviceCategory::Switch);
    assert_eq!(session.counters().switch(), 'C');
    assert_eq!(
        session.printer().calls,
        vec![
            PrintCall::Switch {
                label: "A".to_string(),
                serial: "S100".to_string(),
            },
            PrintCall::Switch {
                label: "B".to_string(),
                serial: "s200".to_string(),
            },
        ]
    );
}

#[test]
fn test_same_switch_twice_is_duplicate() {
    let mut session = memory_session(Vec::new());
    session.accept(&ScanInput::new("Lab1", "S100", "")).unwrap();

    let again = session.accept(&ScanInput::new("Lab1", "S100", ""));
    assert_eq!(again.unwrap_err(), Rejection::DuplicateDevice);
    assert_eq!(session.ledger().len(), 1);
}

#[test]
fn test_remove_last_keeps_log_row() {
    let mut session = memory_session(Vec::new());
    session
        .accept(&ScanInput::new("Lab1", "FP010", "00:11:22:33:44:55"))
        .unwrap();
    assert_eq!(session.counters().ap(), 2);

    let removed = session.remove_last().expect("entry removed");
    assert_eq!(removed.label, "AP-01");
    assert_eq!(session.counters().ap(), 1);
    assert!(session.ledger().is_empty());

    let rows = session.sink().records().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label, "AP-01");

    // the device is still logged, so rescanning it is a duplicate
    let rescan = session.accept(&ScanInput::new("Lab1", "FP010", "00:11:22:33:44:55"));
    assert_eq!(rescan.unwrap_err(), Rejection::DuplicateDevice);
}

#[test]
fn test_remove_last_on_empty_session() {
    let mut session = memory_session(Vec::new());
    assert!(session.remove_last().is_none());
}

#[test]
fn test_clear_resets_counters_but_not_log() {
    let mut session = memory_session(Vec::new());
    session.accept(&ScanInput::new("Lab1", "FP001", "AA:01")).unwrap();
    session.accept(&ScanInput::new("Lab1", "S001", "")).unwrap();

    session.clear();

    assert!(session.ledger().is_empty());
    assert_eq!(session.counters().ap(), 1);
    assert_eq!(session.counters().switch(), 'A');
    assert_eq!(session.sink().len(), 2);

    let next = session.accept(&ScanInput::new("Lab1", "FP002", "AA:02")).unwrap();
    assert_eq!(next.entry.label, "AP-01");
}

#[test]
fn test_print_failure_does_not_roll_back() {
    let mut session =
        Session::open(MemorySink::new(), CountingHook::default(), RecordingPrinter::failing())
            .unwrap();

    let accepted = session
        .accept(&ScanInput::new("Lab1", "FP010", "00:11:22:33:44:55"))
        .expect("accepted despite print failure");

    assert!(!accepted.printed);
    assert!(accepted.status().contains("printing failed"));
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(session.counters().ap(), 2);
    assert_eq!(session.sink().len(), 1);
}

#[test]
fn test_log_failure_aborts_acceptance() {
    let mut session = Session::open(
        FailingSink::default(),
        CountingHook::default(),
        RecordingPrinter::new(),
    )
    .unwrap();

    let outcome = session.accept(&ScanInput::new("Lab1", "FP010", "00:11:22:33:44:55"));

    match outcome {
        Err(Rejection::PersistenceFailure(msg)) => assert!(msg.contains("disk full")),
        other => panic!("expected persistence failure, got {other:?}"),
    }
    assert!(session.ledger().is_empty());
    assert_eq!(session.counters().ap(), 1);
    assert!(session.printer().calls.is_empty());
    assert!(!session.is_logged("FP010", ""));
}

#[test]
fn test_history_from_previous_sessions_blocks_duplicates() {
    let mut session = memory_session(vec![record("FP001", "AA:BB")]);

    assert!(session.is_logged("FP001", ""));
    let by_mac = session.accept(&ScanInput::new("Lab1", "FP002", "AA:BB"));
    assert_eq!(by_mac.unwrap_err(), Rejection::DuplicateDevice);

    let fresh = session.accept(&ScanInput::new("Lab1", "FP002", "CC:DD")).unwrap();
    assert_eq!(fresh.entry.label, "AP-01");
}

#[test]
fn test_end_to_end_with_csv_log_and_backup() {
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("device_log.csv");
    let backup_dir = temp.path().join("backups");

    let sink = CsvSink::open(&log_path).unwrap();
    let hook = FileBackup::new(&log_path, &backup_dir);
    let mut session = Session::open(sink, hook, RecordingPrinter::new()).unwrap();

    let accepted = session
        .accept(&ScanInput::new("Lab1", "FP010", "00:11:22:33:44:55"))
        .expect("accepted");

    assert_eq!(accepted.entry.label, "AP-01");
    assert!(accepted.printed);
    assert_eq!(session.counters().ap(), 2);

    let rows = session.sink().records().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].site, "Lab1");
    assert_eq!(rows[0].serial, "FP010");
    assert_eq!(rows[0].mac, "00:11:22:33:44:55");

    let backup = accepted.backup.expect("backup written");
    assert!(backup.starts_with(&backup_dir));
    assert_eq!(
        std::fs::read_to_string(&backup).unwrap(),
        std::fs::read_to_string(&log_path).unwrap()
    );

    assert_eq!(
        session.printer().calls,
        vec![PrintCall::AccessPoint {
            label: "AP-01".to_string(),
            mac: "00:11:22:33:44:55".to_string(),
            serial: "FP010".to_string(),
        }]
    );
}

#[test]
fn test_hook_runs_once_per_accepted_scan() {
    let mut session =
        Session::open(MemorySink::new(), CountingHook::default(), RecordingPrinter::new())
            .unwrap();

    session.accept(&ScanInput::new("Lab1", "S1", "")).unwrap();
    let _ = session.accept(&ScanInput::new("Lab1", "S1", ""));
    session.accept(&ScanInput::new("Lab1", "S2", "")).unwrap();

    assert_eq!(session.hook().calls, 2);
    assert_eq!(session.sink().len(), 2);
}

#[test]
fn test_back_to_back_accepts_keep_separate_backups() {
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("device_log.csv");
    let backup_dir = temp.path().join("backups");

    let sink = CsvSink::open(&log_path).unwrap();
    let hook = FileBackup::new(&log_path, &backup_dir);
    let mut session = Session::open(sink, hook, RecordingPrinter::new()).unwrap();

    let first = session.accept(&ScanInput::new("Lab1", "S100", "")).unwrap();
    let second = session.accept(&ScanInput::new("Lab1", "S200", "")).unwrap();

    let first_backup = first.backup.expect("first backup");
    let second_backup = second.backup.expect("second backup");
    assert_ne!(first_backup, second_backup);
    assert_eq!(std::fs::read_dir(&backup_dir).unwrap().count(), 2);

    // header plus the one row logged at the time
    let first_lines = std::fs::read_to_string(&first_backup).unwrap();
    assert_eq!(first_lines.lines().count(), 2);
    let second_lines = std::fs::read_to_string(&second_backup).unwrap();
    assert_eq!(second_lines.lines().count(), 3);
}

#[test]
fn test_backup_failure_still_accepts() {
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("device_log.csv");
    let not_a_dir = temp.path().join("backups");
    std::fs::write(&not_a_dir, b"").unwrap();

    let sink = CsvSink::open(&log_path).unwrap();
    let hook = FileBackup::new(&log_path, &not_a_dir);
    let mut session = Session::open(sink, hook, RecordingPrinter::new()).unwrap();

    let accepted = session
        .accept(&ScanInput::new("Lab1", "FP010", "00:11:22:33:44:55"))
        .expect("accepted without backup");

    assert!(accepted.backup.is_none());
    assert!(accepted.printed);
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(session.counters().ap(), 2);
    let rows = session.sink().records().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].serial, "FP010");
}

#[test]
fn test_remove_last_switch_rolls_letter_back() {
    let mut session = memory_session(Vec::new());
    session.accept(&ScanInput::new("Lab1", "FP001", "AA:01")).unwrap();
    session.accept(&ScanInput::new("Lab1", "S100", "")).unwrap();
    session.accept(&ScanInput::new("Lab1", "S200", "")).unwrap();
    assert_eq!(session.counters().switch(), 'C');

    let removed = session.remove_last().expect("switch removed");
    assert_eq!(removed.label, "B");
    assert_eq!(removed.category, DeviceCategory::Switch);
    assert_eq!(session.counters().switch(), 'B');
    assert_eq!(session.counters().ap(), 2);

    let next = session.accept(&ScanInput::new("Lab1", "S300", "")).unwrap();
    assert_eq!(next.entry.label, "B");
    assert_eq!(session.sink().len(), 4);
}
