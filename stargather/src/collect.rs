// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Collection job: fetch trending records, assemble the daily quota and
/// write the daily document.
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rand::Rng;
use tracing::{info, warn};

use crate::{
    assemble::assemble,
    config::Quota,
    curated::CuratedCatalog,
    error::Error,
    extract::extract_trending,
    fetch::PageSource,
    record::Record,
    render::{DailySummary, write_daily},
    retry::{RetryConfig, retry_with_delay},
};

/// Outcome of one collection run.
#[derive(Debug, Clone,)]
pub struct CollectionReport
{
    /// Records in rendering order.
    pub records: Vec<Record,>,
    /// Header statistics of the rendered document.
    pub summary: DailySummary,
    /// Daily document path, `None` for dry runs.
    pub path:    Option<PathBuf,>,
}

/// Downloads and parses the trending page with the fixed-delay retry.
///
/// Each attempt performs the full fetch-and-parse sequence, so a page that
/// downloads fine but yields no records is retried as well.
///
/// # Errors
///
/// Returns the last [`Error::Fetch`] or [`Error::Extraction`] once all
/// attempts failed.
pub async fn fetch_trending<S,>(
    source: &S,
    limit: usize,
    retry: &RetryConfig,
) -> Result<Vec<Record,>, Error,>
where
    S: PageSource,
{
    retry_with_delay(retry, "trending fetch", move || async move {
        let markup = source.fetch_page().await?;
        extract_trending(&markup, limit,)
    },)
    .await
}

/// Produces the record list for one day.
///
/// Trending failures never abort the job: after the retries are exhausted the
/// error is logged and assembly proceeds with zero trending records.
pub async fn collect_records<S, R,>(
    source: &S,
    catalog: &CuratedCatalog,
    quota: &Quota,
    retry: &RetryConfig,
    rng: &mut R,
) -> Vec<Record,>
where
    S: PageSource,
    R: Rng + ?Sized,
{
    let trending = match fetch_trending(source, quota.trending, retry,).await {
        Ok(records,) => records,
        Err(error,) => {
            warn!("continuing without trending repositories: {error}");
            Vec::new()
        }
    };

    assemble(trending, catalog, quota, rng,)
}

/// Runs the whole collection job and writes the document under `root`.
///
/// With `dry_run` set the document is not written and the report carries no
/// path.
///
/// # Errors
///
/// Returns [`Error::Io`] when the daily document cannot be written.
#[allow(clippy::too_many_arguments)]
pub async fn run_collection<S, R,>(
    source: &S,
    catalog: &CuratedCatalog,
    quota: &Quota,
    retry: &RetryConfig,
    rng: &mut R,
    root: &Path,
    date: NaiveDate,
    dry_run: bool,
) -> Result<CollectionReport, Error,>
where
    S: PageSource,
    R: Rng + ?Sized,
{
    let records = collect_records(source, catalog, quota, retry, rng,).await;
    let summary = DailySummary::from_records(&records,);
    info!(
        "collected {} repositories for {} (trending/curated {})",
        summary.total,
        date,
        summary.source_breakdown()
    );

    let path = if dry_run { None } else { Some(write_daily(root, date, &records,)?,) };

    Ok(CollectionReport {
        records,
        summary,
        path,
    },)
}

#[cfg(test)]
mod tests
{
    use std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
        fs,
    };

    use rand::{SeedableRng, rngs::StdRng};
    use tempfile::tempdir;

    use super::*;
    use crate::{curated::default_catalog, extract::fixtures, record::Provenance};

    /// Replays canned responses and counts requests.
    struct ScriptedSource
    {
        responses: RefCell<VecDeque<Result<String, Error,>,>,>,
        calls:     Cell<u32,>,
    }

    impl ScriptedSource
    {
        fn new(responses: Vec<Result<String, Error,>,>,) -> Self
        {
            Self {
                responses: RefCell::new(responses.into(),), calls: Cell::new(0,),
            }
        }

        fn failing() -> Self
        {
            Self::new(Vec::new(),)
        }
    }

    impl PageSource for ScriptedSource
    {
        async fn fetch_page(&self,) -> Result<String, Error,>
        {
            self.calls.set(self.calls.get() + 1,);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(Error::fetch("connection refused",),),)
        }
    }

    fn fast_retry() -> RetryConfig
    {
        RetryConfig {
            max_attempts: 3, delay_ms: 1,
        }
    }

    fn date() -> NaiveDate
    {
        NaiveDate::from_ymd_opt(2026, 1, 20,).expect("valid date",)
    }

    #[tokio::test]
    async fn full_trending_page_renders_eight_and_seven()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let source = ScriptedSource::new(vec![Ok(fixtures::page_with(25,),)],);
        let catalog = default_catalog().expect("embedded catalog should parse",);
        let mut rng = StdRng::seed_from_u64(1,);

        let report = run_collection(
            &source,
            &catalog,
            &Quota::default(),
            &fast_retry(),
            &mut rng,
            dir.path(),
            date(),
            false,
        )
        .await
        .expect("collection failed",);

        assert_eq!(source.calls.get(), 1);
        assert_eq!(report.records.len(), 15);
        assert_eq!(report.summary.source_breakdown(), "8/7");

        let path = report.path.expect("document path",);
        let document = fs::read_to_string(&path,).expect("failed to read document",);
        assert_eq!(document.matches("\n### ",).count(), 15);
        assert!(document.contains("**Sources (trending/curated)**: 8/7"));
    }

    #[tokio::test]
    async fn failing_fetch_degrades_to_all_curated_after_three_attempts()
    {
        let source = ScriptedSource::failing();
        let catalog = default_catalog().expect("embedded catalog should parse",);
        let mut rng = StdRng::seed_from_u64(2,);

        let records =
            collect_records(&source, &catalog, &Quota::default(), &fast_retry(), &mut rng,).await;

        assert_eq!(source.calls.get(), 3);
        assert_eq!(records.len(), 15);
        assert!(records.iter().all(|record| record.provenance == Provenance::Curated));
    }

    #[tokio::test]
    async fn garbage_page_is_retried_and_recovers()
    {
        let source = ScriptedSource::new(vec![
            Ok("<html><body>Whoa there!</body></html>".to_owned(),),
            Ok(fixtures::page_with(8,),),
        ],);

        let records = fetch_trending(&source, 8, &fast_retry(),).await.expect("should recover",);
        assert_eq!(source.calls.get(), 2);
        assert_eq!(records.len(), 8);
    }

    #[tokio::test]
    async fn missing_title_link_skips_one_entry_and_job_succeeds()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let mut entries: Vec<String,> = (0..8)
            .map(|i| fixtures::entry(&format!("owner{i}/repo{i}"), Some("Rust",), "10", "1", None,),)
            .collect();
        entries[0] = entries[0].replace("<a href=\"/owner0/repo0\" class=\"Link\">", "<a class=\"Link\">",);
        let source = ScriptedSource::new(vec![Ok(fixtures::page(&entries,),)],);
        let catalog = default_catalog().expect("embedded catalog should parse",);
        let mut rng = StdRng::seed_from_u64(3,);

        let report = run_collection(
            &source,
            &catalog,
            &Quota::default(),
            &fast_retry(),
            &mut rng,
            dir.path(),
            date(),
            false,
        )
        .await
        .expect("collection failed",);

        assert_eq!(source.calls.get(), 1);
        assert_eq!(report.summary.trending, 7);
        assert_eq!(report.records.len(), 15);
        assert!(report.path.is_some_and(|path| path.exists()));
    }

    #[tokio::test]
    async fn dry_run_writes_nothing()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let source = ScriptedSource::new(vec![Ok(fixtures::page_with(8,),)],);
        let catalog = default_catalog().expect("embedded catalog should parse",);
        let mut rng = StdRng::seed_from_u64(4,);

        let report = run_collection(
            &source,
            &catalog,
            &Quota::default(),
            &fast_retry(),
            &mut rng,
            dir.path(),
            date(),
            true,
        )
        .await
        .expect("collection failed",);

        assert!(report.path.is_none());
        assert!(fs::read_dir(dir.path(),).expect("tempdir readable",).next().is_none());
    }
}
