// tests/pagination.rs
//! Paged traversal completeness and backoff handling.

mod common;

use common::{page, page_with_backoff, RecordingPause, ScriptedApi};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use stack2md::{fetch_all, merge_backoff, pages, BackoffGovernor, ResourceQuery};
use std::time::Duration;

const PAGE_SIZE: u32 = 3;

/// Scripts `total` numbered items split into pages of `PAGE_SIZE`.
fn scripted_items(total: u32) -> ScriptedApi {
    let items: Vec<Value> = (1..=total).map(|n| json!({ "n": n })).collect();
    let chunks: Vec<Vec<Value>> = if items.is_empty() {
        vec![Vec::new()]
    } else {
        items
            .chunks(PAGE_SIZE as usize)
            .map(|chunk| chunk.to_vec())
            .collect()
    };

    let last = chunks.len();
    chunks
        .into_iter()
        .enumerate()
        .fold(ScriptedApi::new(), |api, (index, chunk)| {
            let number = index as u32 + 1;
            api.respond("things", None, Some(number), page(chunk, index + 1 < last))
        })
}

fn query() -> ResourceQuery {
    ResourceQuery::new("things").with_page_size(PAGE_SIZE)
}

async fn collect_numbers(total: u32) -> (Vec<u64>, u32) {
    let api = scripted_items(total);
    let pause = RecordingPause::default();
    let mut governor = BackoffGovernor::new(&pause);

    let batch = fetch_all::<Value>(&api, query(), &mut governor).await.unwrap();
    let numbers = batch
        .items
        .iter()
        .map(|item| item["n"].as_u64().unwrap())
        .collect();
    (numbers, batch.pages_fetched)
}

#[tokio::test]
async fn test_every_item_returned_once_in_order() {
    // Empty, exactly one page, one page plus one item, exactly two pages.
    for (total, expected_pages) in [(0, 1), (3, 1), (4, 2), (6, 2)] {
        let (numbers, pages_fetched) = collect_numbers(total).await;
        let expected: Vec<u64> = (1..=total as u64).collect();
        assert_eq!(numbers, expected, "total = {}", total);
        assert_eq!(pages_fetched, expected_pages, "total = {}", total);
    }
}

#[tokio::test]
async fn test_page_indices_start_at_one_and_carry_page_size() {
    let api = scripted_items(7);
    let pause = RecordingPause::default();
    let mut governor = BackoffGovernor::new(&pause);

    fetch_all::<Value>(&api, query(), &mut governor).await.unwrap();

    let requested: Vec<Option<u32>> = api.requests().iter().map(|r| r.page()).collect();
    assert_eq!(requested, vec![Some(1), Some(2), Some(3)]);
    assert!(api
        .requests()
        .iter()
        .all(|r| r.param("pagesize") == Some("3")));
}

#[tokio::test]
async fn test_stream_is_lazy() {
    let api = scripted_items(9);

    let mut stream = std::pin::pin!(pages::<Value>(&api, query()));
    let first = stream.try_next().await.unwrap().unwrap();

    assert_eq!(first.items.len(), 3);
    assert!(first.has_more);
    assert_eq!(api.requests().len(), 1);
}

#[tokio::test]
async fn test_traversal_restarts_on_each_call() {
    let api = scripted_items(4);
    let pause = RecordingPause::default();
    let mut governor = BackoffGovernor::new(&pause);

    let first = fetch_all::<Value>(&api, query(), &mut governor).await.unwrap();
    let second = fetch_all::<Value>(&api, query(), &mut governor).await.unwrap();

    assert_eq!(first.items, second.items);
    assert_eq!(api.requests().len(), 4);
}

#[tokio::test]
async fn test_backoff_between_pages_gates_next_page() {
    let api = ScriptedApi::new()
        .respond("things", None, Some(1), page_with_backoff(vec![json!({"n": 1})], true, 4))
        .respond("things", None, Some(2), page_with_backoff(vec![json!({"n": 2})], false, 2));
    let pause = RecordingPause::default();
    let mut governor = BackoffGovernor::new(&pause);

    let batch = fetch_all::<Value>(&api, query(), &mut governor).await.unwrap();

    assert_eq!(batch.items.len(), 2);
    assert_eq!(pause.pauses(), vec![Duration::from_secs(5)]);
    // The final page's hint is left for the caller's next step.
    assert_eq!(governor.pending(), Some(2));
}

#[tokio::test]
async fn test_backoffs_in_one_step_merge_into_single_pause() {
    let pause = RecordingPause::default();
    let mut governor = BackoffGovernor::new(&pause);

    governor.observe(Some(3));
    governor.observe(None);
    governor.observe(Some(7));
    let taken = governor.settle().await;

    assert_eq!(taken, Some(Duration::from_secs(8)));
    assert_eq!(pause.pauses(), vec![Duration::from_secs(8)]);
    assert_eq!(governor.settle().await, None);
    assert_eq!(merge_backoff(Some(3), Some(7)), Some(7));
    assert_eq!(merge_backoff(None, None), None);
}

#[tokio::test]
async fn test_error_page_stops_traversal() {
    let api = ScriptedApi::new().respond("things", None, Some(1), page(vec![json!({"n": 1})], true));
    let pause = RecordingPause::default();
    let mut governor = BackoffGovernor::new(&pause);

    let err = fetch_all::<Value>(&api, query(), &mut governor)
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(api.requests().len(), 2);
}
