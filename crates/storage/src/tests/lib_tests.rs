use super::*;
use serde_json::json;

fn temp_log() -> (tempfile::TempDir, EventLog) {
    let dir = tempfile::tempdir().expect("tempdir");
    let log = EventLog::new(dir.path().join("logs.json"));
    (dir, log)
}

#[tokio::test]
async fn appends_preserve_submission_order() {
    let (_dir, log) = temp_log();
    for response in ["A", "B", "C"] {
        log.append(json!({ "response": response }))
            .await
            .expect("append");
    }

    let records = log.read_all().await.expect("read");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["response"], "A");
    assert_eq!(records[1]["response"], "B");
    assert_eq!(records[2]["response"], "C");
}

#[tokio::test]
async fn missing_file_reads_as_empty() {
    let (_dir, log) = temp_log();
    assert!(log.read_all().await.expect("read").is_empty());
}

#[tokio::test]
async fn blank_file_reads_as_empty_and_accepts_appends() {
    let (_dir, log) = temp_log();
    std::fs::write(log.path(), "  \n").expect("seed blank file");

    assert!(log.read_all().await.expect("read").is_empty());
    let len = log.append(json!({ "response": "A" })).await.expect("append");
    assert_eq!(len, 1);
}

#[tokio::test]
async fn corrupted_log_is_reported_and_left_untouched() {
    let (_dir, log) = temp_log();
    std::fs::write(log.path(), "{ not json").expect("seed corrupt file");

    let error = log
        .append(json!({ "response": "A" }))
        .await
        .expect_err("append must fail");
    assert!(error.to_string().contains("not a valid JSON array"));

    let raw = std::fs::read_to_string(log.path()).expect("read back");
    assert_eq!(raw, "{ not json");
}

#[tokio::test]
async fn creates_parent_directories_on_first_append() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("data").join("logs.json");
    let log = EventLog::new(&path);

    log.append(json!({ "response": "A" })).await.expect("append");
    assert!(path.exists());
}

#[tokio::test]
async fn concurrent_appends_lose_nothing() {
    let (_dir, log) = temp_log();
    let mut handles = Vec::new();
    for i in 0..8 {
        let log = log.clone();
        handles.push(tokio::spawn(
            async move { log.append(json!({ "i": i })).await },
        ));
    }
    for handle in handles {
        handle.await.expect("join").expect("append");
    }

    assert_eq!(log.len().await.expect("len"), 8);
}
