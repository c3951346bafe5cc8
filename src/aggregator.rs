//! Domain aggregation and rule rendering.

use crate::fetcher::Fetcher;
use crate::types::{
    DomainSet, RenderMeta, RuleDocument, RuleLine, HEADER_SOURCE, HEADER_TOTAL, HEADER_UPDATED,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Merges a fixed local domain set with upstream lists and renders rule files.
pub struct DomainAggregator<'a> {
    local: DomainSet,
    fetcher: &'a Fetcher,
}

impl<'a> DomainAggregator<'a> {
    pub fn new<I, S>(local_domains: I, fetcher: &'a Fetcher) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            local: local_domains.into_iter().collect(),
            fetcher,
        }
    }

    /// The mandatory baseline domains. Never fails.
    pub fn collect_local(&self) -> DomainSet {
        self.local.clone()
    }

    /// Domains from one upstream; empty if the fetch failed.
    pub fn fetch_remote(&self, source: &str) -> DomainSet {
        self.fetcher.fetch(source)
    }

    /// Set union of all inputs
    pub fn merge<'s, I>(sets: I) -> DomainSet
    where
        I: IntoIterator<Item = &'s DomainSet>,
    {
        let mut merged = DomainSet::new();
        for set in sets {
            merged.extend_from(set);
        }
        merged
    }

    /// Render header comments, sorted suffix rules, then keyword rules.
    pub fn render(domains: &DomainSet, meta: &RenderMeta) -> RuleDocument {
        let mut lines = Vec::with_capacity(domains.len() + meta.keywords.len() + 5);

        lines.push(RuleLine::Comment(meta.title.clone()));
        lines.push(RuleLine::Comment(format!(
            "{} {} (UTC{})",
            HEADER_UPDATED,
            meta.generated_at.format(TIMESTAMP_FORMAT),
            meta.generated_at.offset()
        )));
        lines.push(RuleLine::Comment(format!("{} {}", HEADER_SOURCE, meta.source_label)));
        lines.push(RuleLine::Comment(format!("{} {}", HEADER_TOTAL, domains.len())));
        lines.push(RuleLine::Blank);

        // DomainSet iterates in ascending order
        lines.extend(domains.iter().map(|d| RuleLine::DomainSuffix(d.clone())));
        lines.extend(meta.keywords.iter().map(|k| RuleLine::DomainKeyword(k.clone())));

        RuleDocument::new(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn meta(keywords: &[&str]) -> RenderMeta {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        RenderMeta {
            title: "Test Rules".to_string(),
            source_label: "Local".to_string(),
            generated_at: tz.with_ymd_and_hms(2026, 10, 19, 12, 30, 0).unwrap(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_collect_local() {
        let fetcher = Fetcher::new();
        let agg = DomainAggregator::new(["b.com", "a.com", "a.com"], &fetcher);
        let local = agg.collect_local();
        assert_eq!(local.len(), 2);
        assert!(local.contains("a.com"));
    }

    #[test]
    fn test_merge_dedupes() {
        let a: DomainSet = ["a.com", "b.com"].into_iter().collect();
        let b: DomainSet = ["b.com", "c.com"].into_iter().collect();
        let merged = DomainAggregator::merge([&a, &b]);
        let items: Vec<_> = merged.iter().cloned().collect();
        assert_eq!(items, vec!["a.com", "b.com", "c.com"]);
    }

    #[test]
    fn test_merge_nothing() {
        assert!(DomainAggregator::merge(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_render_layout() {
        let domains: DomainSet = ["z.com", "x.com", "y.com"].into_iter().collect();
        let doc = DomainAggregator::render(&domains, &meta(&["masterduel", "yugioh"]));
        let text = doc.to_text();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "# Test Rules",
                "# Updated: 2026-10-19 12:30:00 (UTC+08:00)",
                "# Source: Local",
                "# Total Domains: 3",
                "",
                "DOMAIN-SUFFIX,x.com",
                "DOMAIN-SUFFIX,y.com",
                "DOMAIN-SUFFIX,z.com",
                "DOMAIN-KEYWORD,masterduel",
                "DOMAIN-KEYWORD,yugioh",
            ]
        );
        assert_eq!(doc.domain_count(), 3);
        assert_eq!(doc.header_count(), Some(3));
    }

    #[test]
    fn test_render_empty_set() {
        let doc = DomainAggregator::render(&DomainSet::new(), &meta(&[]));
        assert_eq!(doc.domain_count(), 0);
        assert_eq!(doc.header_count(), Some(0));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Strategy to generate simple lowercase domain strings
    fn domain_strategy() -> impl Strategy<Value = String> {
        "[a-z0-9]{1,8}\\.(com|net|jp|co\\.jp)"
    }

    fn domain_set_strategy(max_size: usize) -> impl Strategy<Value = DomainSet> {
        prop::collection::vec(domain_strategy(), 0..max_size)
            .prop_map(|v| v.into_iter().collect::<DomainSet>())
    }

    fn meta() -> RenderMeta {
        RenderMeta {
            title: "Prop".to_string(),
            source_label: "Local".to_string(),
            generated_at: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
                .unwrap(),
            keywords: vec![],
        }
    }

    proptest! {
        /// Merge result does not depend on argument order
        #[test]
        fn prop_merge_commutative(a in domain_set_strategy(30), b in domain_set_strategy(30), c in domain_set_strategy(30)) {
            let abc = DomainAggregator::merge([&a, &b, &c]);
            let cba = DomainAggregator::merge([&c, &b, &a]);
            prop_assert_eq!(abc, cba);
        }

        /// Merge is exactly the set union of its inputs
        #[test]
        fn prop_merge_is_union(a in domain_set_strategy(30), b in domain_set_strategy(30)) {
            let merged = DomainAggregator::merge([&a, &b]);
            let expected: HashSet<_> = a.iter().chain(b.iter()).cloned().collect();
            let got: HashSet<_> = merged.iter().cloned().collect();
            prop_assert_eq!(got, expected);
        }

        /// Rendered suffix lines are strictly ascending
        #[test]
        fn prop_render_strictly_sorted(a in domain_set_strategy(50)) {
            let doc = DomainAggregator::render(&a, &meta());
            let domains: Vec<_> = doc.domains().collect();
            prop_assert!(domains.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(domains.len(), a.len());
        }
    }
}
