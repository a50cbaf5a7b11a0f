// src/api/pagination.rs
//! Lazy page-by-page traversal of list resources.

use super::backoff::BackoffGovernor;
use super::parser::parse_page;
use super::types::{PageResult, ResourceQuery, RetrievalBatch};
use super::ApiTransport;
use crate::error::AppError;
use futures::{Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use std::pin::pin;

/// Walks a list resource one page at a time.
///
/// Page indices start at 1 and grow by one per request. The stream ends after
/// the first page that reports no further pages, so an empty first page ends
/// it immediately. Backoff hints are handed to the caller on each page; the
/// stream never sleeps. Each traversal issues fresh requests.
pub fn pages<'a, T>(
    transport: &'a dyn ApiTransport,
    query: ResourceQuery,
) -> impl Stream<Item = Result<PageResult<T>, AppError>> + 'a
where
    T: DeserializeOwned + 'a,
{
    futures::stream::try_unfold(Some(1u32), move |next_page| {
        let request = next_page.map(|page| query.request_for_page(page));
        async move {
            let Some(request) = request else {
                return Ok(None);
            };
            let page_index = request.page().unwrap_or(1);

            let response = transport.get(&request).await?;
            let page: PageResult<T> = parse_page(response)?;
            log::debug!(
                "{} page {}: {} items (has_more: {})",
                request.endpoint,
                page_index,
                page.items.len(),
                page.has_more
            );

            let following = page.has_more.then_some(page_index + 1);
            Ok::<_, AppError>(Some((page, following)))
        }
    })
}

/// Collects every page of a query into one batch.
///
/// Between pages the governor settles any pending backoff, since the next
/// request hits the same method. The last page's hint stays pending so the
/// caller can merge it with the rest of its step.
pub async fn fetch_all<T>(
    transport: &dyn ApiTransport,
    query: ResourceQuery,
    governor: &mut BackoffGovernor<'_>,
) -> Result<RetrievalBatch<T>, AppError>
where
    T: DeserializeOwned,
{
    let mut stream = pin!(pages::<T>(transport, query));
    let mut batch = RetrievalBatch::default();

    while let Some(page) = stream.try_next().await? {
        governor.observe(page.backoff);
        let has_more = page.has_more;
        batch.absorb(page);
        if has_more {
            governor.settle().await;
        }
    }

    Ok(batch)
}
