// tests/archive_run.rs
//! Whole runs against a scripted API: enumeration, both passes, idempotent
//! re-runs and the error classes.

mod common;

use common::{answer_ref, page, page_with_backoff, question, site, RecordingPause, ScriptedApi};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::json;
use stack2md::{archive_account, AccountId, AppError, ArchiveConfig};
use std::fs;
use std::path::Path;
use std::time::Duration;

const STATS: &str = "stats.stackexchange.com";
const META: &str = "stats.meta.stackexchange.com";

fn config(root: &Path, page_size: u32) -> ArchiveConfig {
    let mut config = ArchiveConfig::for_account(AccountId::new(1234).unwrap(), root).unwrap();
    config.page_size = page_size;
    config
}

fn sorted_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Two sites: stats has asked and answered content, its meta site has none.
fn two_site_api() -> ScriptedApi {
    ScriptedApi::new()
        .with_filters()
        .respond(
            "users/1234/associated",
            None,
            Some(1),
            page(
                vec![
                    site("https://stats.stackexchange.com", 11),
                    site("https://stats.meta.stackexchange.com", 12),
                ],
                false,
            ),
        )
        .respond(
            "users/11/questions",
            Some(STATS),
            Some(1),
            page(vec![question(STATS, 1), question(STATS, 2)], true),
        )
        .respond(
            "users/11/questions",
            Some(STATS),
            Some(2),
            page(vec![question(STATS, 3)], false),
        )
        .respond(
            "users/11/answers",
            Some(STATS),
            Some(1),
            page(vec![answer_ref(2), answer_ref(40)], false),
        )
        .respond(
            "questions/2;40",
            Some(STATS),
            Some(1),
            page(vec![question(STATS, 2), question(STATS, 40)], false),
        )
        .respond("users/12/questions", Some(META), Some(1), page(vec![], false))
        .respond("users/12/answers", Some(META), Some(1), page(vec![], false))
}

#[tokio::test]
async fn test_two_sites_end_to_end() {
    let temp = tempfile::tempdir().unwrap();
    let api = two_site_api();
    let pause = RecordingPause::default();

    let report = archive_account(&config(temp.path(), 2), &api, &pause)
        .await
        .unwrap();

    let stats = temp.path().join(STATS);
    assert_eq!(sorted_files(&stats.join("questions")), vec!["1.md", "2.md", "3.md"]);
    assert_eq!(sorted_files(&stats.join("answers")), vec!["2.md", "40.md"]);
    // Nothing was written for the meta site, so it has no directory at all.
    assert!(!temp.path().join(META).exists());
    assert_eq!(sorted_files(temp.path()), vec![STATS.to_string()]);

    assert_eq!(report.written(), 5);
    assert_eq!(report.skipped(), 0);
    let stats_report = report.site(STATS).unwrap();
    assert_eq!(stats_report.asked.written, 3);
    assert_eq!(stats_report.answered.written, 2);
    assert_eq!(report.site(META).unwrap().written(), 0);
    assert!(pause.pauses().is_empty());
}

#[tokio::test]
async fn test_self_answered_question_lands_in_both_directories() {
    let temp = tempfile::tempdir().unwrap();
    let api = two_site_api();

    archive_account(&config(temp.path(), 2), &api, &RecordingPause::default())
        .await
        .unwrap();

    let stats = temp.path().join(STATS);
    let asked = fs::read_to_string(stats.join("questions").join("2.md")).unwrap();
    let answered = fs::read_to_string(stats.join("answers").join("2.md")).unwrap();
    assert_eq!(asked, answered);
    assert!(asked.contains("# Question 2"));
}

#[tokio::test]
async fn test_same_ids_on_two_sites_stay_apart() {
    const MATH: &str = "math.stackexchange.com";
    let mut api = ScriptedApi::new().with_filters().respond(
        "users/1234/associated",
        None,
        Some(1),
        page(
            vec![
                site("https://stats.stackexchange.com", 11),
                site("https://math.stackexchange.com", 21),
            ],
            false,
        ),
    );
    for (host, user) in [(STATS, 11), (MATH, 21)] {
        api = api
            .respond(
                &format!("users/{}/questions", user),
                Some(host),
                Some(1),
                page(vec![question(host, 1)], false),
            )
            .respond(
                &format!("users/{}/answers", user),
                Some(host),
                Some(1),
                page(vec![answer_ref(2)], false),
            )
            .respond("questions/2", Some(host), Some(1), page(vec![question(host, 2)], false));
    }

    let temp = tempfile::tempdir().unwrap();
    let report = archive_account(&config(temp.path(), 100), &api, &RecordingPause::default())
        .await
        .unwrap();

    assert_eq!(sorted_files(temp.path()), vec![MATH.to_string(), STATS.to_string()]);
    for host in [STATS, MATH] {
        let site_dir = temp.path().join(host);
        assert_eq!(sorted_files(&site_dir.join("questions")), vec!["1.md"]);
        assert_eq!(sorted_files(&site_dir.join("answers")), vec!["2.md"]);
        for (collection, id) in [("questions", 1), ("answers", 2)] {
            let doc = fs::read_to_string(site_dir.join(collection).join(format!("{}.md", id))).unwrap();
            assert!(
                doc.contains(&format!("https://{}/q/{}", host, id)),
                "{}/{}/{}.md links the wrong site:\n{}",
                host,
                collection,
                id,
                doc
            );
        }
    }
    assert_eq!(report.written(), 4);
    assert_eq!(report.site(STATS).unwrap().written(), 2);
    assert_eq!(report.site(MATH).unwrap().written(), 2);
}

#[tokio::test]
async fn test_rerun_skips_existing_documents() {
    let temp = tempfile::tempdir().unwrap();
    let api = two_site_api();
    let config = config(temp.path(), 2);

    archive_account(&config, &api, &RecordingPause::default())
        .await
        .unwrap();
    let document = temp.path().join(STATS).join("questions").join("1.md");
    let before = fs::read_to_string(&document).unwrap();

    let report = archive_account(&config, &api, &RecordingPause::default())
        .await
        .unwrap();

    assert_eq!(report.written(), 0);
    assert_eq!(report.skipped(), 5);
    assert_eq!(fs::read_to_string(&document).unwrap(), before);
}

#[tokio::test]
async fn test_run_resumes_after_partial_archive() {
    let temp = tempfile::tempdir().unwrap();
    let questions = temp.path().join(STATS).join("questions");
    fs::create_dir_all(&questions).unwrap();
    fs::write(questions.join("1.md"), "kept from an earlier run").unwrap();

    let report = archive_account(&config(temp.path(), 2), &two_site_api(), &RecordingPause::default())
        .await
        .unwrap();

    let stats_report = report.site(STATS).unwrap();
    assert_eq!(stats_report.asked.written, 2);
    assert_eq!(stats_report.asked.skipped, 1);
    assert_eq!(
        fs::read_to_string(questions.join("1.md")).unwrap(),
        "kept from an earlier run"
    );
}

#[tokio::test]
async fn test_account_without_sites_is_a_notice() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("archive");
    let api = ScriptedApi::new().with_filters().respond(
        "users/1234/associated",
        None,
        Some(1),
        page(vec![], false),
    );

    let result = archive_account(&config(&root, 100), &api, &RecordingPause::default()).await;

    match result {
        Err(err @ AppError::NoAssociatedSites { .. }) => {
            assert!(!err.is_fatal());
            assert!(err.to_string().contains("1234"));
        }
        other => panic!("expected NoAssociatedSites, got {:?}", other),
    }
    assert!(!root.exists());
}

#[tokio::test]
async fn test_backoff_hints_are_honoured_between_steps() {
    let temp = tempfile::tempdir().unwrap();
    let api = ScriptedApi::new()
        .with_filters()
        .respond(
            "users/1234/associated",
            None,
            Some(1),
            page(vec![site("https://stats.stackexchange.com", 11)], false),
        )
        .respond(
            "users/11/questions",
            Some(STATS),
            Some(1),
            page(vec![], false),
        )
        .respond(
            "users/11/answers",
            Some(STATS),
            Some(1),
            page_with_backoff(vec![answer_ref(5)], false, 3),
        )
        .respond(
            "questions/5",
            Some(STATS),
            Some(1),
            page_with_backoff(vec![question(STATS, 5)], false, 7),
        );
    let pause = RecordingPause::default();

    let report = archive_account(&config(temp.path(), 100), &api, &pause)
        .await
        .unwrap();

    assert_eq!(pause.pauses(), vec![Duration::from_secs(8)]);
    assert_eq!(report.total_paused, Duration::from_secs(8));
}

#[tokio::test]
async fn test_schema_mismatch_aborts_run() {
    let temp = tempfile::tempdir().unwrap();
    let api = ScriptedApi::new()
        .with_filters()
        .respond(
            "users/1234/associated",
            None,
            Some(1),
            page(vec![site("https://stats.stackexchange.com", 11)], false),
        )
        .respond(
            "users/11/questions",
            Some(STATS),
            Some(1),
            json!({"items": [{"question_id": 1, "title": "no body"}], "has_more": false}),
        );

    let err = archive_account(&config(temp.path(), 100), &api, &RecordingPause::default())
        .await
        .unwrap_err();

    assert!(err.is_schema());
    assert!(err.is_fatal());
    assert!(!temp.path().join(STATS).exists());
}

#[tokio::test]
async fn test_transport_failure_aborts_run_and_keeps_written_files() {
    let temp = tempfile::tempdir().unwrap();
    let api = ScriptedApi::new()
        .with_filters()
        .respond(
            "users/1234/associated",
            None,
            Some(1),
            page(vec![site("https://stats.stackexchange.com", 11)], false),
        )
        .respond(
            "users/11/questions",
            Some(STATS),
            Some(1),
            page(vec![question(STATS, 1)], true),
        )
        .reply(
            "users/11/questions",
            Some(STATS),
            Some(2),
            StatusCode::SERVICE_UNAVAILABLE,
            "<html>upstream unavailable</html>",
        );

    let err = archive_account(&config(temp.path(), 1), &api, &RecordingPause::default())
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(err.is_fatal());
    assert!(temp.path().join(STATS).join("questions").join("1.md").is_file());
    // The answers pass never started.
    assert!(!api.endpoints().iter().any(|e| e == "users/11/answers"));
}

#[tokio::test]
async fn test_throttle_violation_is_reported_with_resume_hint() {
    let temp = tempfile::tempdir().unwrap();
    let api = ScriptedApi::new().with_filters().reply(
        "users/1234/associated",
        None,
        Some(1),
        StatusCode::BAD_REQUEST,
        json!({
            "error_id": 502,
            "error_name": "throttle_violation",
            "error_message": "too many requests from this IP, more requests available in 600 seconds"
        })
        .to_string(),
    );

    let err = archive_account(&config(temp.path(), 100), &api, &RecordingPause::default())
        .await
        .unwrap_err();

    assert!(err.is_transport());
    let message = err.to_string();
    assert!(message.contains("throttle_violation"), "{}", message);
    assert!(message.contains("re-run later"), "{}", message);
}
