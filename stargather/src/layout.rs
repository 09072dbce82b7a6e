// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// On-disk layout of generated documents.
///
/// ```text
/// <root>/README.md
/// <root>/<YYYY>/<MM>-<MonthName>/README.md
/// <root>/<YYYY>/<MM>-<MonthName>/<YYYY-MM-DD>.md
/// ```
///
/// The index aggregator relies on this exact segmentation.
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// File name of rollup documents.
pub const README_FILE: &str = "README.md";
/// Extension of daily documents.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Directory segment for the year, e.g. `2026`.
pub fn year_segment(date: NaiveDate) -> String {
    date.format("%Y").to_string()
}

/// Directory segment for the month, e.g. `01-January`.
pub fn month_segment(date: NaiveDate) -> String {
    date.format("%m-%B").to_string()
}

/// Base name of a daily document, e.g. `2026-01-20.md`.
pub fn daily_file_name(date: NaiveDate) -> String {
    format!("{}.{DOCUMENT_EXTENSION}", date.format("%Y-%m-%d"))
}

/// Directory holding all daily documents of the month containing `date`.
pub fn month_dir(root: &Path, date: NaiveDate) -> PathBuf {
    root.join(year_segment(date)).join(month_segment(date))
}

/// Path of the daily document for `date`.
pub fn daily_path(root: &Path, date: NaiveDate) -> PathBuf {
    month_dir(root, date).join(daily_file_name(date))
}

/// Parses a daily document file name back into its date.
///
/// Returns `None` for rollups and any other file.
pub fn parse_daily_file_name(name: &str) -> Option<NaiveDate> {
    let stem = name.strip_suffix(".md")?;
    if stem.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
}

/// Checks that a month directory name has the `MM-MonthName` shape.
pub fn is_month_segment(name: &str) -> bool {
    let Some((number, month)) = name.split_once('-') else {
        return false;
    };
    number.len() == 2
        && number.chars().all(|ch| ch.is_ascii_digit())
        && !month.is_empty()
        && month.chars().all(|ch| ch.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn daily_path_encodes_year_month_and_date() {
        let path = daily_path(Path::new("/data"), date(2026, 1, 20));
        assert_eq!(path, PathBuf::from("/data/2026/01-January/2026-01-20.md"));
    }

    #[test]
    fn month_segment_uses_english_month_name() {
        assert_eq!(month_segment(date(2025, 9, 3)), "09-September");
        assert_eq!(month_segment(date(2025, 12, 31)), "12-December");
    }

    #[test]
    fn parses_daily_file_names_only() {
        assert_eq!(parse_daily_file_name("2026-01-20.md"), Some(date(2026, 1, 20)));
        assert_eq!(parse_daily_file_name("README.md"), None);
        assert_eq!(parse_daily_file_name("2026-01-20.txt"), None);
        assert_eq!(parse_daily_file_name("2026-02-30.md"), None);
        assert_eq!(parse_daily_file_name("2026-1-2.md"), None);
    }

    #[test]
    fn recognizes_month_segments() {
        assert!(is_month_segment("01-January"));
        assert!(!is_month_segment("logs"));
        assert!(!is_month_segment("1-January"));
        assert!(!is_month_segment("01-"));
    }

    #[test]
    fn file_name_round_trips_through_parser() {
        let day = date(2024, 2, 29);
        assert_eq!(parse_daily_file_name(&daily_file_name(day)), Some(day));
    }
}
