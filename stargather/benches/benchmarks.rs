// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng};
use stargather::{Quota, assemble, default_catalog, extract_trending, render_daily};

fn trending_page(count: usize,) -> String
{
    let entries: String = (0..count)
        .map(|i| {
            format!(
                r#"<article class="Box-row">
  <h2 class="h3 lh-condensed"><a href="/owner{i}/repo{i}" class="Link">owner{i} / repo{i}</a></h2>
  <p class="col-9 color-fg-muted my-1 pr-4">Repository number {i}</p>
  <div class="f6 color-fg-muted mt-2">
    <span itemprop="programmingLanguage">Rust</span>
    <a href="/owner{i}/repo{i}/stargazers"><svg class="octicon octicon-star"></svg> 1,{i:03}</a>
    <a href="/owner{i}/repo{i}/forks"><svg class="octicon octicon-repo-forked"></svg> {i}</a>
    <span class="d-inline-block float-sm-right"><svg class="octicon octicon-star"></svg> {i} stars today</span>
  </div>
</article>"#
            )
        },)
        .collect();

    format!("<html><body><div class=\"Box\">{entries}</div></body></html>")
}

fn benchmark_extract_trending(c: &mut Criterion,)
{
    let page = trending_page(25,);

    c.bench_function("extract_trending_25", |b| {
        b.iter(|| extract_trending(black_box(&page,), black_box(8,),).expect("extract failed",),)
    },);
}

fn benchmark_render_daily(c: &mut Criterion,)
{
    let catalog = default_catalog().expect("embedded catalog should parse",);
    let trending = extract_trending(&trending_page(25,), 8,).expect("extract failed",);
    let mut rng = StdRng::seed_from_u64(7,);
    let records = assemble(trending, &catalog, &Quota::default(), &mut rng,);
    let date = NaiveDate::from_ymd_opt(2026, 1, 20,).expect("valid date",);

    c.bench_function("render_daily_15", |b| {
        b.iter(|| render_daily(black_box(&records,), black_box(date,),),)
    },);
}

criterion_group!(benches, benchmark_extract_trending, benchmark_render_daily);
criterion_main!(benches);
