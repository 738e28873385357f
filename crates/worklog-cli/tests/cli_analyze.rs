use worklog_testing::{TestWorld, TranscriptFixture};

fn world_with_week_of_work() -> TestWorld {
    TestWorld::new()
        .with_transcript(
            "-home-dev-billing",
            "session-1.jsonl",
            TranscriptFixture::new()
                .user_message(
                    "2025-03-03T09:00:00Z",
                    "/home/dev/billing",
                    "wire up the payment webhook",
                )
                .completed_todos("2025-03-03T10:00:00Z", &["add webhook route"])
                .record("2025-03-03T11:00:00Z", "/home/dev/billing"),
        )
        .with_transcript(
            "-home-dev-api",
            "session-2.jsonl",
            TranscriptFixture::new()
                .record("2025-03-03T13:00:00Z", "/home/dev/api")
                .record("2025-03-03T14:00:00Z", "/home/dev/api"),
        )
}

#[test]
fn analyze_renders_projects_and_preview() {
    let world = world_with_week_of_work();
    let result = world
        .run(&["analyze", "--start", "2025-03-03", "--end", "2025-03-09"])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("billing"));
    assert!(result.stdout().contains("api"));
    assert!(result.stdout().contains("Done: add webhook route"));
    assert!(result.stdout().contains("Submission preview:"));
}

#[test]
fn analyze_json_normalizes_each_date_to_budget() {
    let world = world_with_week_of_work();
    let result = world
        .run(&[
            "analyze",
            "--start",
            "2025-03-03",
            "--end",
            "2025-03-09",
            "--format",
            "json",
        ])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let report = result.json().unwrap();
    let entries = report["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);

    let normalized: i64 = entries
        .iter()
        .map(|e| e["normalized_minutes"].as_i64().unwrap())
        .sum();
    assert_eq!(normalized, 480);
    for entry in entries {
        assert_eq!(entry["normalized_minutes"].as_i64().unwrap() % 30, 0);
    }
}

#[test]
fn analyze_no_normalize_leaves_entries_raw() {
    let world = world_with_week_of_work();
    let result = world
        .run(&[
            "analyze",
            "--start",
            "2025-03-03",
            "--end",
            "2025-03-09",
            "--no-normalize",
            "--format",
            "json",
        ])
        .unwrap();
    assert!(result.success());

    let report = result.json().unwrap();
    for entry in report["entries"].as_array().unwrap() {
        assert!(entry["normalized_minutes"].is_null());
    }
}

#[test]
fn analyze_attaches_mapped_issue_keys() {
    let world = world_with_week_of_work();
    assert!(world.run(&["map", "set", "billing", "PROJ-12"]).unwrap().success());

    let result = world
        .run(&[
            "analyze",
            "--start",
            "2025-03-03",
            "--end",
            "2025-03-09",
            "--format",
            "json",
        ])
        .unwrap();
    assert!(result.success());

    let report = result.json().unwrap();
    let billing = report["projects"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["project_name"] == "billing")
        .unwrap();
    assert_eq!(billing["issue_key"], "PROJ-12");
}

#[test]
fn analyze_rejects_inverted_range() {
    let world = world_with_week_of_work();
    let result = world
        .run(&["analyze", "--start", "2025-03-09", "--end", "2025-03-03"])
        .unwrap();

    assert!(!result.success());
    assert!(result.stderr().contains("after end date"));
}

#[test]
fn analyze_empty_range_reports_no_evidence() {
    let world = world_with_week_of_work();
    let result = world
        .run(&["analyze", "--start", "2025-06-02", "--end", "2025-06-08"])
        .unwrap();

    assert!(result.success());
    assert!(result.stdout().contains("No work evidence"));
}

#[test]
fn dates_lists_recent_evidence() {
    let world = world_with_week_of_work();
    let result = world.run(&["dates"]).unwrap();

    assert!(result.success());
    assert!(result.stdout().contains("2025-03-03"));
}
