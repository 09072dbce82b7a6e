// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Normalized repository records shared by the extractor, the curated
//! catalog and the renderer.

use serde::Serialize;

/// Host prepended to repository identifiers to build locators.
pub const GITHUB_BASE_URL: &str = "https://github.com";
/// Placeholder used when a repository has no description.
pub const NO_DESCRIPTION: &str = "No description";
/// Placeholder used when the primary language is unknown.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";
/// Placeholder used when a star or fork count is unavailable.
pub const NOT_AVAILABLE: &str = "N/A";

/// Origin of a record.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash,)]
#[serde(rename_all = "snake_case")]
pub enum Provenance
{
    /// Scraped from the trending page.
    Trending,
    /// Drawn from the curated catalog.
    Curated,
}

impl Provenance
{
    /// Badge rendered next to the record in daily documents.
    pub fn badge(self,) -> &'static str
    {
        match self {
            Self::Trending => "🔥 Trending",
            Self::Curated => "⭐ Curated",
        }
    }
}

/// One normalized repository entry.
///
/// Star and fork counts keep their group separators (`"12,345"`) and are never
/// parsed; the [`NOT_AVAILABLE`] sentinel marks a missing value.
#[derive(Debug, Serialize, Clone, PartialEq, Eq,)]
pub struct Record
{
    /// `owner/name` path of the repository.
    pub identifier:       String,
    /// Fully-qualified repository URL.
    pub locator:          String,
    /// Free-text description or [`NO_DESCRIPTION`].
    pub description:      String,
    /// Language label or [`UNKNOWN_LANGUAGE`].
    pub primary_language: String,
    /// Total stars or [`NOT_AVAILABLE`].
    pub star_count:       String,
    /// Total forks or [`NOT_AVAILABLE`].
    pub fork_count:       String,
    /// Stars gained today, only for trending records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_delta:      Option<String,>,
    /// Where the record came from.
    pub provenance:       Provenance,
}

impl Record
{
    /// Builds the canonical locator for an `owner/name` identifier.
    pub fn locator_for(identifier: &str,) -> String
    {
        format!("{GITHUB_BASE_URL}/{identifier}")
    }

    /// Returns `true` when both the identifier and the locator are present.
    pub fn is_valid(&self,) -> bool
    {
        !self.identifier.trim().is_empty() && !self.locator.trim().is_empty()
    }

    /// Whether the star count carries a real value.
    pub fn has_stars(&self,) -> bool
    {
        has_count(&self.star_count,)
    }

    /// Whether the fork count carries a real value.
    pub fn has_forks(&self,) -> bool
    {
        has_count(&self.fork_count,)
    }

    /// Whether the language label is known.
    pub fn has_language(&self,) -> bool
    {
        let language = self.primary_language.trim();
        !language.is_empty() && language != UNKNOWN_LANGUAGE
    }
}

fn has_count(value: &str,) -> bool
{
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != NOT_AVAILABLE
}
