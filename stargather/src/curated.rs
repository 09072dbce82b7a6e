// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Curated catalog loading and sampling.
//!
//! The catalog is data, not logic: it lives in `curated.yaml`, is embedded
//! into the binary as the default pool and can be replaced at runtime. Entries
//! are normalized into [`Record`]s once, then every run shuffles the pool and
//! draws from the front.

use std::{collections::HashSet, fs, path::Path};

use rand::{Rng, seq::SliceRandom};
use tracing::debug;

use crate::{
    config::{CatalogConfig, CatalogEntry},
    error::{self, Error},
    record::{NO_DESCRIPTION, NOT_AVAILABLE, Provenance, Record, UNKNOWN_LANGUAGE},
};

/// Catalog shipped with the crate.
const EMBEDDED_CATALOG: &str = include_str!("../curated.yaml");

/// Normalized, validated pool of curated records.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct CuratedCatalog
{
    records: Vec<Record,>,
}

impl CuratedCatalog
{
    /// Number of records in the pool.
    pub fn len(&self,) -> usize
    {
        self.records.len()
    }

    /// Whether the pool is empty. Validated catalogs never are.
    pub fn is_empty(&self,) -> bool
    {
        self.records.is_empty()
    }

    /// Records in catalog order.
    pub fn records(&self,) -> &[Record]
    {
        &self.records
    }

    /// Shuffles a copy of the pool and returns its first `count` records.
    ///
    /// Requests larger than the pool return the whole pool.
    pub fn sample<R,>(&self, count: usize, rng: &mut R,) -> Vec<Record,>
    where
        R: Rng + ?Sized,
    {
        let mut pool = self.records.clone();
        pool.shuffle(rng,);
        pool.truncate(count,);
        debug!("drew {} of {} curated repositories", pool.len(), self.records.len());
        pool
    }
}

/// Returns the catalog embedded in the binary.
///
/// # Errors
///
/// Propagates the same errors as [`parse_catalog`]; the shipped catalog is
/// covered by tests.
pub fn default_catalog() -> Result<CuratedCatalog, Error,>
{
    parse_catalog(EMBEDDED_CATALOG,)
}

/// Loads the catalog from a YAML file.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and the errors of
/// [`parse_catalog`] otherwise.
pub fn load_catalog(path: &Path,) -> Result<CuratedCatalog, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_catalog(&contents,)
}

/// Parses and validates a catalog from a YAML document string.
///
/// # Errors
///
/// Returns [`Error::Parse`](Error::Parse) when the YAML cannot be decoded and
/// [`Error::Validation`](Error::Validation) when the pool is empty, an
/// identifier is not `owner/name`, or an identifier appears twice.
pub fn parse_catalog(contents: &str,) -> Result<CuratedCatalog, Error,>
{
    let config: CatalogConfig = serde_yaml::from_str(contents,)?;
    if config.repositories.is_empty() {
        return Err(Error::validation("curated catalog must include at least one repository",),);
    }

    let mut records = Vec::with_capacity(config.repositories.len(),);
    let mut seen = HashSet::with_capacity(config.repositories.len(),);

    for entry in &config.repositories {
        let record = normalize_entry(entry,)?;
        if !seen.insert(record.identifier.to_ascii_lowercase(),) {
            return Err(Error::validation(format!(
                "duplicate curated repository '{}'",
                record.identifier
            ),),);
        }
        records.push(record,);
    }

    Ok(CuratedCatalog {
        records,
    },)
}

fn normalize_entry(entry: &CatalogEntry,) -> Result<Record, Error,>
{
    let identifier = normalize_identifier(&entry.repository,)?;

    Ok(Record {
        locator: Record::locator_for(&identifier,),
        identifier,
        description: non_blank(entry.description.as_deref(),)
            .unwrap_or_else(|| NO_DESCRIPTION.to_owned(),),
        primary_language: non_blank(entry.language.as_deref(),)
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_owned(),),
        star_count: non_blank(entry.stars.as_deref(),).unwrap_or_else(|| NOT_AVAILABLE.to_owned(),),
        fork_count: non_blank(entry.forks.as_deref(),).unwrap_or_else(|| NOT_AVAILABLE.to_owned(),),
        daily_delta: None,
        provenance: Provenance::Curated,
    },)
}

fn normalize_identifier(value: &str,) -> Result<String, Error,>
{
    let trimmed = value.trim().trim_matches('/',);
    let mut parts = trimmed.split('/',);

    let well_formed = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(owner), Some(name), None) if is_segment(owner) && is_segment(name)
    );

    if !well_formed {
        return Err(Error::validation(format!(
            "curated repository '{value}' must have the form owner/name"
        ),),);
    }

    Ok(trimmed.to_owned(),)
}

fn is_segment(value: &str,) -> bool
{
    !value.is_empty() && !value.contains(char::is_whitespace,)
}

fn non_blank(value: Option<&str,>,) -> Option<String,>
{
    value.map(str::trim,).filter(|value| !value.is_empty(),).map(str::to_owned,)
}
