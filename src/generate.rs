//! End-to-end generation of one profile.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{info, warn};

use crate::aggregator::DomainAggregator;
use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::profile::Profile;
use crate::types::RenderMeta;
use crate::writer::validate_and_write;

/// Offset used for the `Updated:` header (Beijing time)
const HEADER_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Summary of a successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub profile: String,
    pub output: PathBuf,
    pub local_count: usize,
    pub remote_count: usize,
    pub total_count: usize,
    /// Upstreams were configured but contributed nothing
    pub local_only: bool,
}

/// Current time in the header timezone
pub fn header_now() -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(HEADER_UTC_OFFSET_SECS)
        .expect("HEADER_UTC_OFFSET_SECS: hardcoded offset is out of range");
    Utc::now().with_timezone(&offset)
}

/// Collect, merge, render and write the rule file for `profile`.
pub fn generate(
    profile: &Profile,
    fetcher: &Fetcher,
    now: DateTime<FixedOffset>,
) -> Result<GenerateReport> {
    info!(profile = %profile.name, "generating rules");

    let aggregator = DomainAggregator::new(&profile.local_domains, fetcher);
    let local = aggregator.collect_local();

    let remote = fetcher.fetch_all(&profile.upstream_urls);

    let local_only = !profile.upstream_urls.is_empty() && remote.is_empty();
    if local_only {
        warn!(profile = %profile.name, "no upstream data, falling back to local list");
    }

    let merged = DomainAggregator::merge([&local, &remote]);
    info!(profile = %profile.name, total = merged.len(), "domains collected");

    let meta = RenderMeta {
        title: profile.title.clone(),
        source_label: profile.source_label.clone(),
        generated_at: now,
        keywords: profile.keywords.clone(),
    };
    let doc = DomainAggregator::render(&merged, &meta);
    validate_and_write(&doc, &profile.output, profile.min_count)?;

    Ok(GenerateReport {
        profile: profile.name.clone(),
        output: profile.output.clone(),
        local_count: local.len(),
        remote_count: remote.len(),
        total_count: merged.len(),
        local_only,
    })
}
