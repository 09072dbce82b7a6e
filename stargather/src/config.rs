// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Configuration types for the collection job.
//!
//! The curated catalog mirrors the structure of `curated.yaml`. Optional
//! values stay optional here and are replaced by record sentinels during
//! catalog normalization.

use serde::{Deserialize, Serialize};

/// Root document of the curated catalog.
///
/// # Examples
///
/// ```
/// use stargather::CatalogConfig;
///
/// let yaml = r#"
/// repositories:
///   - repository: rust-lang/rust
///     language: Rust
///     stars: "101,245"
/// "#;
/// let config: CatalogConfig = serde_yaml::from_str(yaml,).expect("valid catalog",);
/// assert_eq!(config.repositories.len(), 1);
/// ```
#[derive(Debug, Deserialize, Serialize,)]
pub struct CatalogConfig
{
    /// Hand-maintained pool of well-known repositories.
    #[serde(default)]
    pub repositories: Vec<CatalogEntry,>,
}

/// Raw catalog entry before normalization.
#[derive(Debug, Deserialize, Serialize, Clone,)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry
{
    /// `owner/name` path of the repository.
    #[serde(alias = "repo", alias = "name")]
    pub repository: String,

    /// Optional one-line description.
    #[serde(default)]
    pub description: Option<String,>,

    /// Optional primary language label.
    #[serde(default, alias = "lang")]
    pub language: Option<String,>,

    /// Optional star count with group separators.
    #[serde(default)]
    pub stars: Option<String,>,

    /// Optional fork count with group separators.
    #[serde(default)]
    pub forks: Option<String,>,
}

/// Record counts requested from each source for one collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct Quota
{
    /// Exact number of records rendered per day.
    pub total:    usize,
    /// Records requested from the trending page.
    pub trending: usize,
    /// Records requested from the curated catalog before top-up.
    pub curated:  usize,
}

impl Default for Quota
{
    fn default() -> Self
    {
        Self {
            total: 15, trending: 8, curated: 7,
        }
    }
}
