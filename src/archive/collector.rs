// src/archive/collector.rs
//! Archives everything a user touched on one site.
//!
//! Two passes run per site, strictly one request at a time:
//!
//! 1. **Asked**: every question the user asked, written to `questions/`.
//! 2. **Answered**: every answer the user wrote is reduced to its parent
//!    question id; the distinct parents are looked up in bulk and written to
//!    `answers/`.
//!
//! A question the user both asked and answered lands in both directories.

use super::report::SiteReport;
use crate::api::pagination::{fetch_all, pages};
use crate::api::{ApiTransport, BackoffGovernor, FieldSet, FilterSet, ResourceQuery};
use crate::constants::API_MAX_IDS_PER_REQUEST;
use crate::error::AppError;
use crate::formatting::DocumentRenderer;
use crate::model::{AnswerRef, Question, SiteIdentity};
use crate::output::{materialize, ArchiveLayout, Collection, CollectionTally};
use crate::types::QuestionId;
use futures::TryStreamExt;
use indexmap::IndexSet;
use std::pin::pin;

/// Runs both passes for one site at a time.
pub struct Archiver<'a> {
    transport: &'a dyn ApiTransport,
    filters: &'a FilterSet,
    layout: &'a ArchiveLayout,
    renderer: &'a DocumentRenderer,
    page_size: u32,
}

/// Parent questions returned by a bulk lookup, plus the ids that were not.
#[derive(Debug)]
struct ParentLookup {
    questions: Vec<Question>,
    missing: Vec<QuestionId>,
}

impl<'a> Archiver<'a> {
    pub fn new(
        transport: &'a dyn ApiTransport,
        filters: &'a FilterSet,
        layout: &'a ArchiveLayout,
        renderer: &'a DocumentRenderer,
        page_size: u32,
    ) -> Self {
        Self {
            transport,
            filters,
            layout,
            renderer,
            page_size,
        }
    }

    /// Archives one site: the asked pass, then the answered pass.
    pub async fn archive_site(
        &self,
        site: &SiteIdentity,
        governor: &mut BackoffGovernor<'_>,
    ) -> Result<SiteReport, AppError> {
        log::info!("Archiving {} (user {})", site.site_name, site.site_user_id);
        let mut report = SiteReport::new(site.site_name.clone());

        report.asked = self.archive_asked(site, governor).await?;
        let (answered, missing) = self.archive_answered(site, governor).await?;
        report.answered = answered;
        report.missing_parents = missing;

        log::info!(
            "Finished {}: questions {} written / {} present, answers {} written / {} present",
            site.site_name,
            report.asked.written,
            report.asked.skipped,
            report.answered.written,
            report.answered.skipped
        );
        Ok(report)
    }

    /// Pass 1: the user's own questions, page by page.
    async fn archive_asked(
        &self,
        site: &SiteIdentity,
        governor: &mut BackoffGovernor<'_>,
    ) -> Result<CollectionTally, AppError> {
        let dir = self.layout.collection_dir(&site.site_name, Collection::Questions);
        let query = ResourceQuery::user_questions(
            &site.site_name,
            site.site_user_id,
            self.filters.token(FieldSet::Questions),
        )
        .with_page_size(self.page_size);

        let mut tally = CollectionTally::default();
        let mut stream = pin!(pages::<Question>(self.transport, query));

        while let Some(page) = stream.try_next().await? {
            governor.observe(page.backoff);
            for question in &page.items {
                tally.record(&materialize(&dir, question, self.renderer)?);
            }
            governor.settle().await;
        }

        Ok(tally)
    }

    /// Pass 2: parents of the user's answers, looked up once each.
    ///
    /// Returns the tally and how many parents the server did not return.
    async fn archive_answered(
        &self,
        site: &SiteIdentity,
        governor: &mut BackoffGovernor<'_>,
    ) -> Result<(CollectionTally, usize), AppError> {
        let dir = self.layout.collection_dir(&site.site_name, Collection::Answers);
        let query = ResourceQuery::user_answers(
            &site.site_name,
            site.site_user_id,
            self.filters.token(FieldSet::AnswerRefs),
        )
        .with_page_size(self.page_size);

        let mut tally = CollectionTally::default();
        let mut missing = 0;
        let mut requested: IndexSet<QuestionId> = IndexSet::new();
        let mut stream = pin!(pages::<AnswerRef>(self.transport, query));

        while let Some(page) = stream.try_next().await? {
            governor.observe(page.backoff);

            let parents: Vec<QuestionId> = page
                .items
                .iter()
                .map(|answer| answer.question_id)
                .filter(|id| requested.insert(*id))
                .collect();

            if !parents.is_empty() {
                let lookup = self.fetch_parents(site, &parents, governor).await?;
                for id in &lookup.missing {
                    log::warn!(
                        "Question {} on {} was not returned (deleted or inaccessible)",
                        id,
                        site.site_name
                    );
                }
                missing += lookup.missing.len();
                for question in &lookup.questions {
                    tally.record(&materialize(&dir, question, self.renderer)?);
                }
            }

            governor.settle().await;
        }

        log::debug!(
            "{}: {} distinct parent question(s) looked up",
            site.site_name,
            requested.len()
        );
        Ok((tally, missing))
    }

    /// Looks up questions by id, at most [`API_MAX_IDS_PER_REQUEST`] per request.
    async fn fetch_parents(
        &self,
        site: &SiteIdentity,
        ids: &[QuestionId],
        governor: &mut BackoffGovernor<'_>,
    ) -> Result<ParentLookup, AppError> {
        let mut questions: Vec<Question> = Vec::with_capacity(ids.len());

        for (index, chunk) in ids.chunks(API_MAX_IDS_PER_REQUEST).enumerate() {
            if index > 0 {
                governor.settle().await;
            }
            let query = ResourceQuery::questions_by_id(
                &site.site_name,
                chunk,
                self.filters.token(FieldSet::Questions),
            )
            .with_page_size(self.page_size);
            let batch = fetch_all::<Question>(self.transport, query, governor).await?;
            questions.extend(batch.items);
        }

        let returned: IndexSet<QuestionId> = questions.iter().map(|q| q.question_id).collect();
        let missing = ids
            .iter()
            .filter(|id| !returned.contains(*id))
            .copied()
            .collect();

        Ok(ParentLookup { questions, missing })
    }
}
