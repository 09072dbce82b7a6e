// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Extraction of repository records from trending page markup.
//!
//! Every listing entry is parsed independently and every field of an entry is
//! extracted by its own helper that falls back to a documented default when
//! the markup lacks the expected structure. Only a missing title link makes an
//! entry unusable; such entries are logged and skipped while the rest of the
//! page is still processed.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::{
    error::Error,
    record::{GITHUB_BASE_URL, NO_DESCRIPTION, NOT_AVAILABLE, Provenance, Record, UNKNOWN_LANGUAGE},
};

/// Compiled selectors describing the trending page structure.
struct ListingSelectors
{
    primary:     Selector,
    fallback:    Selector,
    title_link:  Selector,
    description: Selector,
    stars_link:  Selector,
    forks_link:  Selector,
    star_icon:   Selector,
    fork_icon:   Selector,
    language:    Selector,
    daily_delta: Selector,
}

impl ListingSelectors
{
    fn compile() -> Self
    {
        Self {
            primary:     selector("article.Box-row",),
            fallback:    selector("article",),
            title_link:  selector("h2 a",),
            description: selector("p.col-9",),
            stars_link:  selector("a[href$=\"/stargazers\"]",),
            forks_link:  selector("a[href$=\"/forks\"]",),
            star_icon:   selector(".octicon-star",),
            fork_icon:   selector(".octicon-repo-forked",),
            language:    selector("span[itemprop=\"programmingLanguage\"]",),
            daily_delta: selector("span.d-inline-block.float-sm-right",),
        }
    }
}

fn selector(css: &str,) -> Selector
{
    Selector::parse(css,).expect("valid listing selector",)
}

static SELECTORS: LazyLock<ListingSelectors,> = LazyLock::new(ListingSelectors::compile,);

/// Leading number with optional group separators, e.g. `12,345`.
static COUNT_PATTERN: LazyLock<Regex,> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*",).expect("valid count pattern",),);

/// Extracts at most `limit` trending records from the page markup.
///
/// Records keep the document order, which is the ranking published by the
/// page. Candidates beyond `limit` are never parsed.
///
/// # Errors
///
/// Returns [`Error::Extraction`] when no candidate produced a record, which
/// usually means the page layout changed or the response was not the listing.
///
/// # Example
///
/// ```
/// use stargather::extract_trending;
///
/// let markup = r#"<article class="Box-row"><h2><a href="/octocat/hello">hello</a></h2></article>"#;
/// let records = extract_trending(markup, 8,)?;
/// assert_eq!(records[0].identifier, "octocat/hello");
/// assert_eq!(records[0].star_count, "N/A");
/// # Ok::<(), stargather::Error>(())
/// ```
pub fn extract_trending(markup: &str, limit: usize,) -> Result<Vec<Record,>, Error,>
{
    let document = Html::parse_document(markup,);
    let candidates = listing_candidates(&document,);
    let considered = candidates.len().min(limit,);
    debug!("found {} listing candidates, parsing {}", candidates.len(), considered);

    let mut records = Vec::with_capacity(considered,);
    for (index, candidate,) in candidates.into_iter().take(limit,).enumerate() {
        match parse_candidate(candidate,) {
            Ok(record,) => records.push(record,),
            Err(error,) => {
                warn!(position = index + 1, "skipping trending entry: {error}");
            }
        }
    }

    if records.is_empty() {
        return Err(Error::extraction(format!(
            "no usable entries among {considered} listing candidates"
        ),),);
    }

    info!("extracted {} trending repositories", records.len());
    Ok(records,)
}

fn listing_candidates(document: &Html,) -> Vec<ElementRef<'_,>,>
{
    let primary: Vec<ElementRef<'_,>,> = document.select(&SELECTORS.primary,).collect();
    if !primary.is_empty() {
        return primary;
    }

    debug!("primary listing container matched nothing, falling back to bare articles");
    document.select(&SELECTORS.fallback,).collect()
}

fn parse_candidate(entry: ElementRef<'_,>,) -> Result<Record, Error,>
{
    let identifier = title_identifier(entry,)?;
    let locator = Record::locator_for(&identifier,);

    Ok(Record {
        locator,
        description: first_text(entry, &SELECTORS.description,)
            .unwrap_or_else(|| NO_DESCRIPTION.to_owned(),),
        primary_language: first_text(entry, &SELECTORS.language,)
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_owned(),),
        star_count: link_count(entry, &SELECTORS.stars_link, &SELECTORS.star_icon,)
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned(),),
        fork_count: link_count(entry, &SELECTORS.forks_link, &SELECTORS.fork_icon,)
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned(),),
        daily_delta: first_text(entry, &SELECTORS.daily_delta,),
        provenance: Provenance::Trending,
        identifier,
    },)
}

/// Reads the `owner/name` path from the entry title link.
fn title_identifier(entry: ElementRef<'_,>,) -> Result<String, Error,>
{
    let link = entry
        .select(&SELECTORS.title_link,)
        .next()
        .ok_or_else(|| Error::extraction("entry has no title link",),)?;

    let href = link.value().attr("href",).map(str::trim,).unwrap_or_default();
    let path = href.strip_prefix(GITHUB_BASE_URL,).unwrap_or(href,);
    let identifier = path.trim_matches('/',);

    if identifier.is_empty() {
        return Err(Error::extraction("title link has an empty href",),);
    }

    Ok(identifier.to_owned(),)
}

/// Text of the first element matching `selector`, or `None` when absent or
/// blank.
fn first_text(scope: ElementRef<'_,>, selector: &Selector,) -> Option<String,>
{
    scope.select(selector,).next().map(collapsed_text,).filter(|text| !text.is_empty(),)
}

/// Count of the counter link (`.../stargazers`, `.../forks`), falling back
/// to the first icon whose parent shows a number.
fn link_count(scope: ElementRef<'_,>, link: &Selector, icon: &Selector,) -> Option<String,>
{
    scope
        .select(link,)
        .next()
        .and_then(|anchor| leading_count(&collapsed_text(anchor,),),)
        .or_else(|| icon_count(scope, icon,),)
}

/// The logged-out "Star" button carries the same icon as the stargazers link
/// and the daily delta, so parents without a number and the delta span are
/// skipped.
fn icon_count(scope: ElementRef<'_,>, icon: &Selector,) -> Option<String,>
{
    scope
        .select(icon,)
        .filter_map(|icon| icon.parent().and_then(ElementRef::wrap,),)
        .filter(|parent| !SELECTORS.daily_delta.matches(parent,),)
        .find_map(|parent| leading_count(&collapsed_text(parent,),),)
}

fn leading_count(text: &str,) -> Option<String,>
{
    COUNT_PATTERN.find(text,).map(|found| found.as_str().trim_end_matches(',',).to_owned(),)
}

fn collapsed_text(element: ElementRef<'_,>,) -> String
{
    element.text().flat_map(str::split_whitespace,).collect::<Vec<_,>>().join(" ",)
}
