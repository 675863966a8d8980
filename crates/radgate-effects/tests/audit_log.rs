//! Concurrent audit appends land as whole, separate lines

#![allow(clippy::unwrap_used, clippy::expect_used)]

use radgate_core::audit::parse_audit_line;
use radgate_core::{AuditEffects, AuditEncoder, Decision};
use radgate_effects::FileAuditHandler;
use radgate_testkit::FixedClock;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_appends_never_interleave() {
    const REQUESTS: usize = 200;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let handler = Arc::new(
        FileAuditHandler::open(&path, 8, Arc::new(FixedClock::default()))
            .await
            .unwrap(),
    );
    let encoder = AuditEncoder::default();

    let mut tasks = Vec::new();
    for i in 0..REQUESTS {
        let handler = handler.clone();
        tasks.push(tokio::spawn(async move {
            // Long qualifiers make torn writes visible if they happen.
            let org = "x".repeat(512 + i);
            let decision = if i % 2 == 0 { Decision::Accept } else { Decision::Reject };
            handler
                .append(encoder.encode(decision, &format!("user{i}"), &org, "pw"))
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }
    handler.shutdown().await;

    let contents = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(contents.ends_with('\n'));

    let mut users = HashSet::new();
    for line in contents.lines() {
        let (_, value) = parse_audit_line(line).unwrap();
        let user = value["userID"].as_str().unwrap().to_string();
        let index: usize = user.trim_start_matches("user").parse().unwrap();
        assert_eq!(value["domain"].as_str().unwrap().len(), 512 + index);
        users.insert(user);
    }
    assert_eq!(contents.lines().count(), REQUESTS);
    assert_eq!(users.len(), REQUESTS);
}

#[tokio::test]
async fn serialized_appends_keep_arrival_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let handler = FileAuditHandler::open(&path, 2, Arc::new(FixedClock::default()))
        .await
        .unwrap();
    let encoder = AuditEncoder::default();

    for i in 0..10 {
        handler
            .append(encoder.encode(Decision::Reject, &format!("user{i}"), "", "pw"))
            .await
            .unwrap();
    }
    handler.shutdown().await;

    let contents = tokio::fs::read_to_string(&path).await.unwrap();
    let users: Vec<String> = contents
        .lines()
        .map(|line| parse_audit_line(line).unwrap().1["userID"].as_str().unwrap().to_string())
        .collect();
    let expected: Vec<String> = (0..10).map(|i| format!("user{i}")).collect();
    assert_eq!(users, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn timestamps_follow_file_order_under_load() {
    const REQUESTS: usize = 100;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    let clock = Arc::new(FixedClock::default());
    let handler = Arc::new(FileAuditHandler::open(&path, 4, clock.clone()).await.unwrap());
    let encoder = AuditEncoder::default();

    let ticker = {
        let clock = clock.clone();
        tokio::spawn(async move {
            for _ in 0..REQUESTS {
                clock.advance(chrono::Duration::seconds(1));
                tokio::task::yield_now().await;
            }
        })
    };

    let mut tasks = Vec::new();
    for i in 0..REQUESTS {
        let handler = handler.clone();
        tasks.push(tokio::spawn(async move {
            handler
                .append(encoder.encode(Decision::Accept, &format!("user{i}"), "", "pw"))
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }
    ticker.await.unwrap();
    handler.shutdown().await;

    let contents = tokio::fs::read_to_string(&path).await.unwrap();
    let stamps: Vec<_> = contents
        .lines()
        .map(|line| parse_audit_line(line).unwrap().0)
        .collect();
    assert_eq!(stamps.len(), REQUESTS);
    assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));
}
