//! Attendance log behaviour over memory and filesystem storage

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{NaiveDate, TimeZone, Utc};
use pointage_attendance::{
    format_date_time, utc_offset, AttendanceKind, AttendanceLog, DateRange, LocalAttendanceLog,
    NewAttendance, QrPayload,
};
use pointage_effects::FilesystemStorageHandler;
use pointage_testkit::{MemoryStorageHandler, MockRandomHandler, MockTimeHandler};
use std::sync::Arc;
use std::time::Duration;

const HOUR: Duration = Duration::from_secs(3600);

fn ms(y: i32, m: u32, d: u32, h: u32) -> u64 {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .unwrap()
        .timestamp_millis() as u64
}

fn log_with_clock(clock: Arc<MockTimeHandler>) -> LocalAttendanceLog {
    LocalAttendanceLog::new(
        Arc::new(MemoryStorageHandler::new()),
        clock,
        Arc::new(MockRandomHandler::deterministic()),
    )
}

#[tokio::test]
async fn test_history_is_newest_first_per_user() {
    let clock = Arc::new(MockTimeHandler::at(ms(2024, 5, 1, 8)));
    let log = log_with_clock(clock.clone());

    let first = log
        .record(NewAttendance::new("alice", AttendanceKind::CheckIn))
        .await
        .unwrap();
    clock.advance(HOUR);
    log.record(NewAttendance::new("bob", AttendanceKind::CheckIn))
        .await
        .unwrap();
    clock.advance(8 * HOUR);
    let last = log
        .record(NewAttendance::new("alice", AttendanceKind::CheckOut))
        .await
        .unwrap();

    let history = log.history("alice", None).await.unwrap();
    let ids: Vec<&str> = history.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec![last.as_str(), first.as_str()]);
    assert_eq!(history[0].kind, AttendanceKind::CheckOut);
    assert!(log.history("carol", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_history_honours_date_bounds() {
    let clock = Arc::new(MockTimeHandler::at(ms(2024, 5, 1, 9)));
    let log = log_with_clock(clock.clone());
    for _ in 0..3 {
        log.record(NewAttendance::new("alice", AttendanceKind::CheckIn))
            .await
            .unwrap();
        clock.advance(24 * HOUR);
    }

    let utc = utc_offset(0).unwrap();
    let may_2 = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
    let may_3 = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();

    let one_day = DateRange::local_days(may_2, may_2, utc).unwrap();
    let history = log.history("alice", Some(one_day)).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(format_date_time(history[0].timestamp, utc), "02/05/2024 à 09:00");

    let two_days = DateRange::local_days(may_2, may_3, utc).unwrap();
    assert_eq!(log.history("alice", Some(two_days)).await.unwrap().len(), 2);

    let open_ended = DateRange::new(Some(Utc.with_ymd_and_hms(2024, 5, 3, 0, 0, 0).unwrap()), None)
        .unwrap();
    assert_eq!(log.history("alice", Some(open_ended)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_today_uses_local_calendar_day() {
    // 23:30 UTC on 1 May
    let clock = Arc::new(MockTimeHandler::at(ms(2024, 5, 1, 23) + 30 * 60 * 1000));
    let log = log_with_clock(clock.clone());
    log.record(NewAttendance::new("alice", AttendanceKind::CheckIn))
        .await
        .unwrap();
    clock.advance(HOUR);
    log.record(NewAttendance::new("alice", AttendanceKind::CheckOut))
        .await
        .unwrap();

    // In UTC the two events fall on different days
    let utc = utc_offset(0).unwrap();
    assert_eq!(log.today("alice", utc).await.unwrap().len(), 1);

    // In UTC+2 both are on 2 May
    let plus_two = utc_offset(120).unwrap();
    assert_eq!(log.today("alice", plus_two).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_scanned_payload_is_kept_verbatim() {
    let clock = Arc::new(MockTimeHandler::new());
    let log = log_with_clock(clock.clone());
    let payload = QrPayload::for_location("hq-1", "Siège", "acme", clock.as_ref()).await;

    log.record(
        NewAttendance::new("alice", AttendanceKind::CheckIn)
            .qr_code_data(payload.encode())
            .location(48.8566, 2.3522),
    )
    .await
    .unwrap();

    let record = log.history("alice", None).await.unwrap().remove(0);
    let scanned = QrPayload::parse(record.qr_code_data.as_deref().unwrap()).unwrap();
    assert_eq!(scanned, payload);
}

#[tokio::test]
async fn test_filesystem_log_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(MockTimeHandler::new());
    let open = || {
        LocalAttendanceLog::new(
            Arc::new(FilesystemStorageHandler::new(dir.path())),
            clock.clone(),
            Arc::new(MockRandomHandler::with_seed(9)),
        )
    };

    open()
        .record(NewAttendance::new("alice", AttendanceKind::CheckIn))
        .await
        .unwrap();
    let history = open().history("alice", None).await.unwrap();
    assert_eq!(history.len(), 1);
    assert!(dir.path().join("attendance_log.dat").exists());
}
