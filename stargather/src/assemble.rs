// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Record validation and the quota assembly policy.
//!
//! Assembly always aims at exactly [`Quota::total`] records: trending and
//! curated records are merged, invalid and duplicate entries are dropped and
//! any shortfall is topped up from a re-shuffled curated draw. A day without
//! trending data therefore renders an all-curated document instead of failing.

use std::collections::HashSet;

use rand::Rng;
use tracing::{info, warn};

use crate::{config::Quota, curated::CuratedCatalog, record::Record};

/// Drops records without an identifier or a locator, preserving order.
///
/// Every dropped record is logged so extraction regressions remain visible.
pub fn validate(records: Vec<Record,>,) -> Vec<Record,>
{
    let mut valid = Vec::with_capacity(records.len(),);

    for (index, record,) in records.into_iter().enumerate() {
        if record.is_valid() {
            valid.push(record,);
        } else {
            warn!(
                position = index + 1,
                provenance = ?record.provenance,
                identifier = %record.identifier,
                locator = %record.locator,
                "dropping record without identifier or locator"
            );
        }
    }

    valid
}

/// Merges trending records with curated draws into exactly `quota.total`
/// records whenever the curated pool allows it.
///
/// Trending records come first and keep their ranking. Identifiers are unique
/// in the result (compared case-insensitively); the first occurrence wins.
pub fn assemble<R,>(
    trending: Vec<Record,>,
    catalog: &CuratedCatalog,
    quota: &Quota,
    rng: &mut R,
) -> Vec<Record,>
where
    R: Rng + ?Sized,
{
    let trending_count = trending.len();
    let mut combined = trending;
    combined.extend(catalog.sample(quota.curated, rng,),);

    let mut seen = HashSet::with_capacity(quota.total,);
    let mut assembled = Vec::with_capacity(quota.total,);
    for record in validate(combined,) {
        if seen.insert(identity(&record,),) {
            assembled.push(record,);
        } else {
            warn!(identifier = %record.identifier, "dropping duplicate record");
        }
    }

    if assembled.len() < quota.total {
        let shortfall = quota.total - assembled.len();
        warn!(
            "only {} of {} records available ({} trending), topping up {} from curated catalog",
            assembled.len(),
            quota.total,
            trending_count,
            shortfall
        );

        for record in catalog.sample(catalog.len(), rng,) {
            if assembled.len() >= quota.total {
                break;
            }
            if seen.insert(identity(&record,),) {
                assembled.push(record,);
            }
        }

        if assembled.len() < quota.total {
            warn!(
                "curated catalog of {} repositories cannot fill the quota, rendering {} of {}",
                catalog.len(),
                assembled.len(),
                quota.total
            );
        }
    }

    assembled.truncate(quota.total,);
    info!("assembled {} records", assembled.len());
    assembled
}

fn identity(record: &Record,) -> String
{
    record.identifier.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        curated::{default_catalog, parse_catalog},
        record::{NO_DESCRIPTION, NOT_AVAILABLE, Provenance, UNKNOWN_LANGUAGE},
    };

    fn trending(identifier: &str,) -> Record
    {
        Record {
            identifier:       identifier.to_owned(),
            locator:          if identifier.is_empty() {
                String::new()
            } else {
                Record::locator_for(identifier,)
            },
            description:      NO_DESCRIPTION.to_owned(),
            primary_language: UNKNOWN_LANGUAGE.to_owned(),
            star_count:       NOT_AVAILABLE.to_owned(),
            fork_count:       NOT_AVAILABLE.to_owned(),
            daily_delta:      Some("5 stars today".to_owned(),),
            provenance:       Provenance::Trending,
        }
    }

    fn trending_batch(count: usize,) -> Vec<Record,>
    {
        (0..count).map(|i| trending(&format!("trend{i}/repo{i}"),),).collect()
    }

    #[test]
    fn validate_drops_invalid_records_and_keeps_order()
    {
        let mut missing_locator = trending("c/d",);
        missing_locator.locator.clear();
        let records = vec![trending("a/b",), trending("",), missing_locator, trending("e/f",)];

        let valid = validate(records,);
        let identifiers: Vec<&str,> = valid.iter().map(|r| r.identifier.as_str(),).collect();
        assert_eq!(identifiers, vec!["a/b", "e/f"]);
    }

    #[test]
    fn full_trending_yields_eight_plus_seven()
    {
        let catalog = default_catalog().expect("embedded catalog should parse",);
        let mut rng = StdRng::seed_from_u64(42,);

        let records = assemble(trending_batch(8,), &catalog, &Quota::default(), &mut rng,);
        assert_eq!(records.len(), 15);

        let trending_count =
            records.iter().filter(|r| r.provenance == Provenance::Trending,).count();
        assert_eq!(trending_count, 8);
        assert!(records[..8].iter().all(|r| r.provenance == Provenance::Trending));
        assert_eq!(records[0].identifier, "trend0/repo0");
    }

    #[test]
    fn total_trending_failure_degrades_to_all_curated()
    {
        let catalog = default_catalog().expect("embedded catalog should parse",);
        let mut rng = StdRng::seed_from_u64(3,);

        let records = assemble(Vec::new(), &catalog, &Quota::default(), &mut rng,);
        assert_eq!(records.len(), 15);
        assert!(records.iter().all(|r| r.provenance == Provenance::Curated));

        let unique: HashSet<&str,> = records.iter().map(|r| r.identifier.as_str(),).collect();
        assert_eq!(unique.len(), 15);
    }

    #[test]
    fn duplicates_between_sources_are_replaced_by_top_up()
    {
        let catalog = parse_catalog(
            "repositories:\n  - repository: a/one\n  - repository: a/two\n  - repository: a/three\n",
        )
        .expect("catalog should parse",);
        let quota = Quota {
            total: 3, trending: 1, curated: 2,
        };
        let mut rng = StdRng::seed_from_u64(9,);

        let records = assemble(vec![trending("A/One",)], &catalog, &quota, &mut rng,);
        let identifiers: HashSet<String,> =
            records.iter().map(|r| r.identifier.to_ascii_lowercase(),).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(identifiers.len(), 3);
        assert_eq!(records[0].provenance, Provenance::Trending);
    }

    #[test]
    fn small_pool_leaves_quota_short()
    {
        let catalog = parse_catalog("repositories:\n  - repository: only/one\n",)
            .expect("catalog should parse",);
        let mut rng = StdRng::seed_from_u64(5,);

        let records = assemble(trending_batch(2,), &catalog, &Quota::default(), &mut rng,);
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn surplus_is_truncated_to_quota()
    {
        let catalog = default_catalog().expect("embedded catalog should parse",);
        let mut rng = StdRng::seed_from_u64(11,);

        let records = assemble(trending_batch(20,), &catalog, &Quota::default(), &mut rng,);
        assert_eq!(records.len(), 15);
        assert!(records.iter().all(|r| r.provenance == Provenance::Trending));
    }

    proptest! {
        #[test]
        fn any_trending_count_fills_the_quota(count in 0usize..=8, seed in any::<u64>()) {
            let catalog = default_catalog().expect("embedded catalog should parse");
            let mut rng = StdRng::seed_from_u64(seed);

            let records = assemble(trending_batch(count), &catalog, &Quota::default(), &mut rng);
            prop_assert_eq!(records.len(), 15);
            prop_assert!(records.iter().all(Record::is_valid));
            let trending_kept = records.iter().filter(|r| r.provenance == Provenance::Trending).count();
            prop_assert_eq!(trending_kept, count);
        }

        #[test]
        fn validate_only_keeps_valid_records(blanks in proptest::collection::vec(any::<bool>(), 0..24)) {
            let records: Vec<Record> = blanks
                .iter()
                .enumerate()
                .map(|(i, blank)| if *blank { trending("") } else { trending(&format!("o{i}/r{i}")) })
                .collect();

            let valid = validate(records);
            prop_assert_eq!(valid.len(), blanks.iter().filter(|blank| !**blank).count());
            prop_assert!(valid.iter().all(Record::is_valid));
            let positions: Vec<usize> = valid
                .iter()
                .map(|r| r.identifier[1..].split('/').next().and_then(|n| n.parse().ok()).unwrap_or(0))
                .collect();
            prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
