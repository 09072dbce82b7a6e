// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Renders daily Markdown documents from assembled records.
///
/// Rendering is a pure function of the record list and the date. The index
/// aggregator parses two lines of every section back, so the heading
/// (`### <n>. [`) and the language label (`**Language**: `) formats are part
/// of the on-disk contract.
use std::{collections::BTreeSet, fmt::Write as _, fs, path::{Path, PathBuf}};

use chrono::NaiveDate;
use tracing::info;

use crate::{
    error::{self, Error},
    layout,
    record::{Provenance, Record}
};

/// Summary statistics shown in the document header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    /// Number of rendered records.
    pub total:     usize,
    /// Records scraped from the trending page.
    pub trending:  usize,
    /// Records drawn from the curated catalog.
    pub curated:   usize,
    /// Distinct known languages in alphabetical order.
    pub languages: Vec<String>
}

impl DailySummary {
    /// Computes header statistics for `records`.
    pub fn from_records(records: &[Record]) -> Self {
        let trending = records
            .iter()
            .filter(|record| record.provenance == Provenance::Trending)
            .count();
        let languages: BTreeSet<&str> = records
            .iter()
            .filter(|record| record.has_language())
            .map(|record| record.primary_language.trim())
            .collect();

        Self {
            total: records.len(),
            trending,
            curated: records.len() - trending,
            languages: languages.into_iter().map(str::to_owned).collect()
        }
    }

    /// Source breakdown in `trending/curated` form, e.g. `8/7`.
    pub fn source_breakdown(&self) -> String {
        format!("{}/{}", self.trending, self.curated)
    }
}

/// Renders the daily document for `records` collected on `date`.
///
/// Optional lines are omitted rather than rendered as placeholders: stars and
/// forks only when they differ from `N/A`, the daily delta only when present.
pub fn render_daily(records: &[Record], date: NaiveDate) -> String {
    let summary = DailySummary::from_records(records);
    let date_str = date.format("%Y-%m-%d").to_string();
    let languages = if summary.languages.is_empty() {
        "-".to_owned()
    } else {
        summary.languages.join(", ")
    };

    let mut content = String::with_capacity(512 + records.len() * 384);
    let _ = write!(
        content,
        "# 🌟 GitHub Star Projects Digest\n\n\
         **Collected on**: {date_str}  \n\
         **Projects**: {total}  \n\
         **Sources (trending/curated)**: {breakdown}  \n\
         **Languages**: {languages}\n\n\
         ---\n\n\
         ## 📊 Projects\n\n",
        total = summary.total,
        breakdown = summary.source_breakdown()
    );

    for (index, record) in records.iter().enumerate() {
        render_section(&mut content, index + 1, record);
    }

    let _ = write!(
        content,
        "\n## 📝 About\n\n\
         This digest collects popular open-source repositories from GitHub:\n\
         - **🔥 Trending**: repositories on today's GitHub Trending page\n\
         - **⭐ Curated**: all-time favourites from a hand-maintained list\n\n\
         ---\n\n\
         **Last updated**: {date_str}  \n\
         **Collected by**: stargather  \n\
         **Sources**: GitHub Trending & curated catalog\n"
    );

    content
}

fn render_section(content: &mut String, position: usize, record: &Record) {
    let _ = write!(
        content,
        "### {position}. [{identifier}]({locator})\n\n\
         **Language**: `{language}` | **Source**: {badge}  \n",
        identifier = record.identifier,
        locator = record.locator,
        language = record.primary_language,
        badge = record.provenance.badge()
    );

    if record.has_stars() {
        let _ = writeln!(content, "**⭐ Stars**: {}  ", record.star_count);
    }
    if record.has_forks() {
        let _ = writeln!(content, "**🔀 Forks**: {}  ", record.fork_count);
    }
    if let Some(delta) = record.daily_delta.as_deref().filter(|delta| !delta.trim().is_empty()) {
        let _ = writeln!(content, "**📈 Today**: {delta}  ");
    }

    let _ = write!(
        content,
        "\n**Description**: {description}\n\n\
         **Link**: {locator}\n\n\
         ---\n\n",
        description = record.description,
        locator = record.locator
    );
}

/// Writes the daily document under `root` and returns its path.
///
/// Parent directories are created as needed and an existing document for the
/// same date is overwritten.
///
/// # Errors
///
/// Returns [`Error::Io`] when directories cannot be created or the file cannot
/// be written.
pub fn write_daily(root: &Path, date: NaiveDate, records: &[Record]) -> Result<PathBuf, Error> {
    let path = layout::daily_path(root, date);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| error::io_error(parent, source))?;
    }

    fs::write(&path, render_daily(records, date)).map_err(|source| error::io_error(&path, source))?;
    info!("daily document written to {}", path.display());
    Ok(path)
}
