use chrono::NaiveDate;
use tempfile::TempDir;
use worklog_sources::{SessionSource, TranscriptSource};
use worklog_testing::TranscriptFixture;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_fixture(root: &TempDir, project_dir: &str, file_name: &str, fixture: TranscriptFixture) {
    let dest = root.path().join(project_dir).join(file_name);
    fixture.write_to(&dest).unwrap();
}

#[test]
fn extracts_one_session_per_date_bucket() {
    let root = TempDir::new().unwrap();
    write_fixture(
        &root,
        "-home-dev-billing",
        "session-1.jsonl",
        TranscriptFixture::new()
            .user_message("2025-03-03T09:00:00Z", "/home/dev/billing", "wire up the payment webhook")
            .completed_todos("2025-03-03T09:30:00Z", &["add webhook route"])
            .record("2025-03-03T10:00:00Z", "/home/dev/billing")
            // Same file, next day.
            .user_message("2025-03-04T14:00:00Z", "/home/dev/billing", "handle retries on 5xx responses")
            .record("2025-03-04T14:20:00Z", "/home/dev/billing"),
    );

    let source = TranscriptSource::new(root.path());
    let worklog = source.extract(date(2025, 3, 3), date(2025, 3, 7)).unwrap();

    assert_eq!(worklog.sessions.len(), 2);

    let first = &worklog.sessions[0];
    assert_eq!(first.project_name, "billing");
    assert_eq!(first.project_path, "/home/dev/billing");
    assert_eq!(first.session_id, "session-1");
    assert_eq!(first.date, date(2025, 3, 3));
    assert_eq!(first.duration_minutes, 60);
    assert_eq!(first.summaries, vec!["wire up the payment webhook"]);
    assert_eq!(first.todos, vec!["add webhook route"]);

    let second = &worklog.sessions[1];
    assert_eq!(second.date, date(2025, 3, 4));
    assert_eq!(second.duration_minutes, 20);
}

#[test]
fn corrupt_lines_do_not_abort_extraction() {
    let root = TempDir::new().unwrap();
    write_fixture(
        &root,
        "-home-dev-api",
        "session-1.jsonl",
        TranscriptFixture::new()
            .corrupt_line()
            .record("2025-03-03T09:00:00Z", "/home/dev/api")
            .record("2025-03-03T09:30:00Z", "/home/dev/api"),
    );

    let source = TranscriptSource::new(root.path());
    let worklog = source.extract(date(2025, 3, 3), date(2025, 3, 3)).unwrap();

    assert_eq!(worklog.sessions.len(), 1);
    assert_eq!(worklog.sessions[0].duration_minutes, 30);
}

#[test]
fn untimestamped_records_are_ignored() {
    let root = TempDir::new().unwrap();
    write_fixture(
        &root,
        "-home-dev-api",
        "session-1.jsonl",
        TranscriptFixture::new()
            .untimestamped()
            .record("2025-03-03T09:00:00Z", "/home/dev/api")
            .record("2025-03-03T09:10:00Z", "/home/dev/api"),
    );

    let source = TranscriptSource::new(root.path());
    let worklog = source.extract(date(2025, 3, 3), date(2025, 3, 3)).unwrap();
    assert_eq!(worklog.sessions.len(), 1);
}

#[test]
fn short_buckets_are_dropped_as_noise() {
    let root = TempDir::new().unwrap();
    write_fixture(
        &root,
        "-home-dev-api",
        "session-1.jsonl",
        TranscriptFixture::new()
            .record("2025-03-03T09:00:00Z", "/home/dev/api")
            .record("2025-03-03T09:03:00Z", "/home/dev/api"),
    );

    let source = TranscriptSource::new(root.path());
    let worklog = source.extract(date(2025, 3, 3), date(2025, 3, 3)).unwrap();
    assert!(worklog.sessions.is_empty());
}

#[test]
fn agent_prefixed_files_are_skipped() {
    let root = TempDir::new().unwrap();
    write_fixture(
        &root,
        "-home-dev-api",
        "agent-side-task.jsonl",
        TranscriptFixture::new()
            .record("2025-03-03T09:00:00Z", "/home/dev/api")
            .record("2025-03-03T10:00:00Z", "/home/dev/api"),
    );

    let source = TranscriptSource::new(root.path());
    let worklog = source.extract(date(2025, 3, 3), date(2025, 3, 3)).unwrap();
    assert!(worklog.sessions.is_empty());
}

#[test]
fn records_outside_range_are_excluded() {
    let root = TempDir::new().unwrap();
    write_fixture(
        &root,
        "-home-dev-api",
        "session-1.jsonl",
        TranscriptFixture::new()
            .record("2025-03-01T09:00:00Z", "/home/dev/api")
            .record("2025-03-01T10:00:00Z", "/home/dev/api")
            .record("2025-03-05T09:00:00Z", "/home/dev/api")
            .record("2025-03-05T10:00:00Z", "/home/dev/api"),
    );

    let source = TranscriptSource::new(root.path());
    let worklog = source.extract(date(2025, 3, 4), date(2025, 3, 7)).unwrap();

    assert_eq!(worklog.sessions.len(), 1);
    assert_eq!(worklog.sessions[0].date, date(2025, 3, 5));
}

#[test]
fn available_dates_newest_first_with_limit() {
    let root = TempDir::new().unwrap();
    write_fixture(
        &root,
        "-home-dev-api",
        "session-1.jsonl",
        TranscriptFixture::new().record("2025-03-03T09:00:00Z", "/home/dev/api"),
    );
    write_fixture(
        &root,
        "-home-dev-api",
        "session-2.jsonl",
        TranscriptFixture::new().record("2025-03-05T09:00:00Z", "/home/dev/api"),
    );
    write_fixture(
        &root,
        "-home-dev-billing",
        "session-3.jsonl",
        TranscriptFixture::new().record("2025-03-04T09:00:00Z", "/home/dev/billing"),
    );

    let source = TranscriptSource::new(root.path());
    let dates = source.available_dates(10).unwrap();
    assert_eq!(
        dates,
        vec![date(2025, 3, 5), date(2025, 3, 4), date(2025, 3, 3)]
    );

    let dates = source.available_dates(2).unwrap();
    assert_eq!(dates, vec![date(2025, 3, 5), date(2025, 3, 4)]);
}
