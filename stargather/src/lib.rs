//! Daily digest of trending and curated GitHub repositories.
//!
//! The library scrapes the GitHub Trending page, merges the result with a
//! curated catalog into a fixed quota of records, renders the records into a
//! dated Markdown document and maintains month and all-time rollups of the
//! generated documents. Extraction degrades per record and the collection job
//! degrades to curated records when the trending page is unavailable.

mod assemble;
mod collect;
mod config;
mod curated;
mod error;
mod extract;
mod fetch;
mod index;
mod layout;
mod record;
mod render;
mod retry;

pub use assemble::{assemble, validate};
pub use collect::{CollectionReport, collect_records, fetch_trending, run_collection};
pub use config::{CatalogConfig, CatalogEntry, Quota};
pub use curated::{CuratedCatalog, default_catalog, load_catalog, parse_catalog};
pub use error::{Error, io_error};
pub use extract::extract_trending;
pub use fetch::{DEFAULT_TIMEOUT_SECS, DEFAULT_TRENDING_URL, HttpPageSource, PageSource};
pub use index::{
    DaySummary, IndexReport, MonthRollup, RootRollup, render_month_readme, render_root_readme,
    scan_month, scan_root, update_indexes, write_month_readme, write_root_readme,
};
pub use layout::{daily_path, month_dir};
pub use record::{NO_DESCRIPTION, NOT_AVAILABLE, Provenance, Record, UNKNOWN_LANGUAGE};
pub use render::{DailySummary, render_daily, write_daily};
pub use retry::{RetryConfig, retry_with_delay};
