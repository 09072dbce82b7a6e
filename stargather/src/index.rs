// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Rebuilds the month and all-time rollup documents.
///
/// Rollups are derived data: every run rescans the daily documents on disk,
/// counts their record sections and language labels, and rewrites
/// `<root>/<YYYY>/<MM>-<MonthName>/README.md` and `<root>/README.md`.
use std::{
    collections::BTreeMap,
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock
};

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::{
    error::{self, Error},
    layout,
    record::UNKNOWN_LANGUAGE
};

static SECTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### \d+\. \[").expect("valid section pattern"));
static LANGUAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\*\*Language\*\*: `([^`]+)`").expect("valid language pattern"));

/// Statistics recovered from one daily document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    /// Collection date encoded in the file name.
    pub date:      NaiveDate,
    /// Number of record sections in the document.
    pub projects:  usize,
    /// Known language labels and their counts.
    pub languages: BTreeMap<String, usize>,
    /// Sections labeled `Unknown` or blank, left out of `languages`.
    pub unlabeled: usize
}

impl DaySummary {
    /// Parses the statistics of a daily document.
    pub fn from_document(date: NaiveDate, content: &str) -> Self {
        let projects = SECTION_PATTERN.find_iter(content).count();
        let mut languages = BTreeMap::new();
        let mut unlabeled = 0;
        for captures in LANGUAGE_PATTERN.captures_iter(content) {
            let label = captures[1].trim();
            if label.is_empty() || label == UNKNOWN_LANGUAGE {
                unlabeled += 1;
                continue;
            }
            *languages.entry(label.to_owned()).or_insert(0) += 1;
        }

        Self {
            date,
            projects,
            languages,
            unlabeled
        }
    }
}

/// Rollup of one month directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRollup {
    /// Year directory name, e.g. `2026`.
    pub year:  String,
    /// Month directory name, e.g. `01-January`.
    pub month: String,
    /// Daily summaries sorted by date.
    pub days:  Vec<DaySummary>
}

impl MonthRollup {
    /// Number of daily documents.
    pub fn total_days(&self) -> usize {
        self.days.len()
    }

    /// Number of record sections across all daily documents.
    pub fn total_projects(&self) -> usize {
        self.days.iter().map(|day| day.projects).sum()
    }

    /// Language frequency sorted by descending count, then name.
    pub fn language_frequency(&self) -> Vec<(String, usize)> {
        sorted_frequency(merge_languages(self.days.iter()))
    }

    /// Sections without a known language.
    pub fn unlabeled_projects(&self) -> usize {
        self.days.iter().map(|day| day.unlabeled).sum()
    }

    /// Human readable title, e.g. `January 2026`.
    pub fn title(&self) -> String {
        let name = self
            .month
            .split_once('-')
            .map_or(self.month.as_str(), |(_, name)| name);
        format!("{name} {}", self.year)
    }

    /// Path of the month directory relative to the root.
    pub fn relative_dir(&self) -> String {
        format!("{}/{}", self.year, self.month)
    }
}

/// All-time rollup over every month directory under the root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RootRollup {
    /// Month rollups in chronological order.
    pub months: Vec<MonthRollup>
}

impl RootRollup {
    /// Number of daily documents across all months.
    pub fn total_days(&self) -> usize {
        self.months.iter().map(MonthRollup::total_days).sum()
    }

    /// Number of record sections across all months.
    pub fn total_projects(&self) -> usize {
        self.months.iter().map(MonthRollup::total_projects).sum()
    }

    /// All-time language frequency sorted by descending count, then name.
    pub fn language_frequency(&self) -> Vec<(String, usize)> {
        sorted_frequency(merge_languages(self.months.iter().flat_map(|month| month.days.iter())))
    }

    /// Sections without a known language across all months.
    pub fn unlabeled_projects(&self) -> usize {
        self.months.iter().map(MonthRollup::unlabeled_projects).sum()
    }

    /// Most recent month that contains at least one daily document.
    pub fn latest_month(&self) -> Option<&MonthRollup> {
        self.months.iter().rev().find(|month| !month.days.is_empty())
    }
}

/// Paths rewritten by [`update_indexes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReport {
    /// Month rollups that were rewritten.
    pub month_readmes: Vec<PathBuf>,
    /// The all-time rollup.
    pub root_readme:   PathBuf
}

fn merge_languages<'a>(days: impl Iterator<Item = &'a DaySummary>) -> BTreeMap<String, usize> {
    let mut merged = BTreeMap::new();
    for day in days {
        for (language, count) in &day.languages {
            *merged.entry(language.clone()).or_insert(0) += count;
        }
    }
    merged
}

fn sorted_frequency(languages: BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut frequency: Vec<(String, usize)> = languages.into_iter().collect();
    frequency.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    frequency
}

/// Scans a `<YYYY>/<MM>-<MonthName>` directory.
///
/// Only files named `YYYY-MM-DD.md` are considered; the month's own
/// `README.md` and unrelated files are ignored.
///
/// # Errors
///
/// Returns [`Error::Io`] when the directory or a daily document cannot be
/// read, and [`Error::Validation`] when the path has no year/month segments.
pub fn scan_month(dir: &Path) -> Result<MonthRollup, Error> {
    let month = file_name(dir)
        .ok_or_else(|| Error::validation(format!("{} is not a month directory", dir.display())))?;
    let year = dir
        .parent()
        .and_then(file_name)
        .ok_or_else(|| Error::validation(format!("{} has no year directory", dir.display())))?;

    let mut days = Vec::new();
    for entry in fs::read_dir(dir).map_err(|source| error::io_error(dir, source))? {
        let entry = entry.map_err(|source| error::io_error(dir, source))?;
        let path = entry.path();
        let Some(date) = file_name(&path).as_deref().and_then(layout::parse_daily_file_name) else {
            continue;
        };
        if !path.is_file() {
            continue;
        }

        let content = fs::read_to_string(&path).map_err(|source| error::io_error(&path, source))?;
        let summary = DaySummary::from_document(date, &content);
        debug!("{}: {} projects", path.display(), summary.projects);
        days.push(summary);
    }

    days.sort_by_key(|day| day.date);
    Ok(MonthRollup {
        year,
        month,
        days
    })
}

/// Walks every `<YYYY>/<MM>-<MonthName>` directory below `root`.
///
/// # Errors
///
/// Returns [`Error::Io`] when a directory or document cannot be read.
pub fn scan_root(root: &Path) -> Result<RootRollup, Error> {
    let mut months = Vec::new();

    for year_dir in sorted_subdirs(root, is_year_segment)? {
        for month_dir in sorted_subdirs(&year_dir, layout::is_month_segment)? {
            months.push(scan_month(&month_dir)?);
        }
    }

    Ok(RootRollup {
        months
    })
}

fn sorted_subdirs(dir: &Path, accept: fn(&str) -> bool) -> Result<Vec<PathBuf>, Error> {
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(|source| error::io_error(dir, source))? {
        let entry = entry.map_err(|source| error::io_error(dir, source))?;
        let path = entry.path();
        if path.is_dir() && file_name(&path).is_some_and(|name| accept(&name)) {
            subdirs.push(path);
        }
    }
    subdirs.sort();
    Ok(subdirs)
}

fn is_year_segment(name: &str) -> bool {
    name.len() == 4 && name.chars().all(|ch| ch.is_ascii_digit())
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
}

/// Renders the month rollup document.
pub fn render_month_readme(rollup: &MonthRollup) -> String {
    let mut content = String::with_capacity(1024 + rollup.days.len() * 64);
    let _ = write!(
        content,
        "# 📅 {title} - GitHub Project Collection\n\n\
         ## Monthly statistics\n\n\
         - **Days collected**: {days}\n\
         - **Total projects**: {projects}\n\
         - **Status**: 🟢 Active\n\n\
         ## 📋 Daily records\n\n\
         | Date | Projects | File |\n\
         |------|----------|------|\n",
        title = rollup.title(),
        days = rollup.total_days(),
        projects = rollup.total_projects()
    );

    for day in &rollup.days {
        let date = day.date.format("%Y-%m-%d");
        let _ = writeln!(content, "| {date} | {} | [Details](./{date}.md) |", day.projects);
    }

    content.push_str("\n## 🔥 Languages this month\n\n");
    push_language_table(&mut content, &rollup.language_frequency(), rollup.unlabeled_projects());
    content.push_str("\n---\n\n**Back**: [Home](../../README.md)\n");
    content
}

/// Renders the all-time rollup document.
pub fn render_root_readme(rollup: &RootRollup, updated: NaiveDate) -> String {
    let projects = rollup.total_projects();
    let mut content = String::with_capacity(2048 + rollup.months.len() * 96);
    let _ = write!(
        content,
        "# 🌟 Awesome GitHub Stars Collection\n\n\
         ![Auto Update](https://img.shields.io/badge/Auto%20Update-Daily-brightgreen)\n\
         ![Projects](https://img.shields.io/badge/Projects-{projects}-blue)\n\n\
         ## 📖 About\n\n\
         Every day this repository collects **15 popular GitHub repositories**:\n\n\
         - 🔥 **GitHub Trending**: today's hottest repositories\n\
         - ⭐ **Curated**: all-time favourites with the most stars\n\n\
         ## 📊 Statistics\n\n\
         - **Days collected**: {days}\n\
         - **Total projects**: {projects}\n\
         - **Months covered**: {months}\n\n\
         ## 📂 Layout\n\n\
         ```\n\
         README.md                 # this file\n\
         <YYYY>/\n\
         └── <MM>-<Month>/\n    \
             ├── README.md         # monthly index\n    \
             └── <YYYY-MM-DD>.md   # daily digest\n\
         ```\n\n\
         ## 🗓️ Months\n\n",
        days = rollup.total_days(),
        months = rollup.months.len()
    );

    if rollup.months.is_empty() {
        content.push_str("No collections yet.\n");
    } else {
        content.push_str("| Month | Days | Projects |\n|-------|------|----------|\n");
        for month in rollup.months.iter().rev() {
            let _ = writeln!(
                content,
                "| [{title}](./{dir}/) | {days} | {projects} |",
                title = month.title(),
                dir = month.relative_dir(),
                days = month.total_days(),
                projects = month.total_projects()
            );
        }
    }

    content.push_str("\n## 🔥 Languages\n\n");
    push_language_table(&mut content, &rollup.language_frequency(), rollup.unlabeled_projects());

    if let Some(latest) = rollup.latest_month() {
        let _ = write!(
            content,
            "\n## 🔗 Latest collection\n\n[{title}](./{dir}/)\n",
            title = latest.title(),
            dir = latest.relative_dir()
        );
    }

    let _ = write!(
        content,
        "\n---\n\n\
         **Last updated**: {updated}  \n\
         **Sources**: GitHub Trending & curated catalog\n",
        updated = updated.format("%Y-%m-%d")
    );
    content
}

fn push_language_table(content: &mut String, frequency: &[(String, usize)], unlabeled: usize) {
    if frequency.is_empty() {
        content.push_str("No language data yet.\n");
    } else {
        content.push_str("| Language | Projects |\n|----------|----------|\n");
        for (language, count) in frequency {
            let _ = writeln!(content, "| {language} | {count} |");
        }
    }

    if unlabeled > 0 {
        let _ = writeln!(content, "\n_{unlabeled} project(s) without a known language are not listed._");
    }
}

/// Rescans a month directory and rewrites its `README.md`.
///
/// # Errors
///
/// Propagates scan errors and returns [`Error::Io`] when the rollup cannot be
/// written.
pub fn write_month_readme(dir: &Path) -> Result<PathBuf, Error> {
    let rollup = scan_month(dir)?;
    let path = dir.join(layout::README_FILE);
    fs::write(&path, render_month_readme(&rollup)).map_err(|source| error::io_error(&path, source))?;
    info!(
        "month index {} updated: {} days, {} projects",
        path.display(),
        rollup.total_days(),
        rollup.total_projects()
    );
    Ok(path)
}

/// Rescans the whole root and rewrites `<root>/README.md`.
///
/// # Errors
///
/// Propagates scan errors and returns [`Error::Io`] when the rollup cannot be
/// written.
pub fn write_root_readme(root: &Path, updated: NaiveDate) -> Result<PathBuf, Error> {
    let rollup = scan_root(root)?;
    let path = root.join(layout::README_FILE);
    fs::write(&path, render_root_readme(&rollup, updated))
        .map_err(|source| error::io_error(&path, source))?;
    info!(
        "root index {} updated: {} days, {} projects",
        path.display(),
        rollup.total_days(),
        rollup.total_projects()
    );
    Ok(path)
}

/// Regenerates the rollups after a collection run.
///
/// Rewrites the month containing `date` (or every month when `all_months` is
/// set) and then the all-time rollup. A missing month directory is logged and
/// skipped.
///
/// # Errors
///
/// Returns [`Error::Io`] when the root cannot be read or a rollup cannot be
/// written.
pub fn update_indexes(root: &Path, date: NaiveDate, all_months: bool) -> Result<IndexReport, Error> {
    let mut month_readmes = Vec::new();

    if all_months {
        for year_dir in sorted_subdirs(root, is_year_segment)? {
            for month_dir in sorted_subdirs(&year_dir, layout::is_month_segment)? {
                month_readmes.push(write_month_readme(&month_dir)?);
            }
        }
    } else {
        let month_dir = layout::month_dir(root, date);
        if month_dir.is_dir() {
            month_readmes.push(write_month_readme(&month_dir)?);
        } else {
            warn!("month directory {} does not exist, skipping month index", month_dir.display());
        }
    }

    let root_readme = write_root_readme(root, date)?;
    Ok(IndexReport {
        month_readmes,
        root_readme
    })
}
