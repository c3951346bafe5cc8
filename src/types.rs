use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, FixedOffset};

/// Prefix of the rule that matches a domain and all of its subdomains
pub const DOMAIN_SUFFIX: &str = "DOMAIN-SUFFIX";
/// Prefix of the rule that matches any hostname containing a substring
pub const DOMAIN_KEYWORD: &str = "DOMAIN-KEYWORD";

/// Header label carrying the domain count
pub const HEADER_TOTAL: &str = "Total Domains:";
/// Header label carrying the generation time
pub const HEADER_UPDATED: &str = "Updated:";
/// Header label carrying the source description
pub const HEADER_SOURCE: &str = "Source:";

/// Set of lowercase domains with suffix-match semantics.
///
/// Backed by a `BTreeSet`, so iteration is always ascending byte-wise order
/// and duplicates collapse on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSet {
    domains: BTreeSet<String>,
}

impl DomainSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a domain, normalizing whitespace and case.
    /// Returns false for empty input or duplicates.
    pub fn insert(&mut self, domain: &str) -> bool {
        let domain = domain.trim();
        if domain.is_empty() {
            return false;
        }
        self.domains.insert(domain.to_lowercase())
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(&domain.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Iterate in ascending order
    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.domains.iter()
    }

    /// Add every domain of `other` to this set
    pub fn extend_from(&mut self, other: &DomainSet) {
        self.domains.extend(other.domains.iter().cloned());
    }
}

impl<S: AsRef<str>> FromIterator<S> for DomainSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = DomainSet::new();
        for domain in iter {
            set.insert(domain.as_ref());
        }
        set
    }
}

impl<'a> IntoIterator for &'a DomainSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.domains.iter()
    }
}

/// One line of a rule file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleLine {
    /// `# text`
    Comment(String),
    /// Empty separator line
    Blank,
    /// `DOMAIN-SUFFIX,<domain>`
    DomainSuffix(String),
    /// `DOMAIN-KEYWORD,<keyword>`
    DomainKeyword(String),
}

impl fmt::Display for RuleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleLine::Comment(text) => write!(f, "# {}", text),
            RuleLine::Blank => Ok(()),
            RuleLine::DomainSuffix(domain) => write!(f, "{},{}", DOMAIN_SUFFIX, domain),
            RuleLine::DomainKeyword(keyword) => write!(f, "{},{}", DOMAIN_KEYWORD, keyword),
        }
    }
}

/// Header metadata passed to the renderer
#[derive(Debug, Clone)]
pub struct RenderMeta {
    /// Title shown on the first header line
    pub title: String,
    /// Where the domains came from, e.g. "Local + v2fly/domain-list-community"
    pub source_label: String,
    pub generated_at: DateTime<FixedOffset>,
    /// Emitted as `DOMAIN-KEYWORD` lines after the suffix rules
    pub keywords: Vec<String>,
}

/// Rendered rule file: header comments followed by rule lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleDocument {
    pub lines: Vec<RuleLine>,
}

impl RuleDocument {
    pub fn new(lines: Vec<RuleLine>) -> Self {
        Self { lines }
    }

    /// Number of `DOMAIN-SUFFIX` lines
    pub fn domain_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, RuleLine::DomainSuffix(_)))
            .count()
    }

    /// Domains of the `DOMAIN-SUFFIX` lines, in document order
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|l| match l {
            RuleLine::DomainSuffix(d) => Some(d.as_str()),
            _ => None,
        })
    }

    /// Keywords of the `DOMAIN-KEYWORD` lines, in document order
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|l| match l {
            RuleLine::DomainKeyword(k) => Some(k.as_str()),
            _ => None,
        })
    }

    /// Value of the `Total Domains:` header line, if present
    pub fn header_count(&self) -> Option<usize> {
        self.lines.iter().find_map(|l| match l {
            RuleLine::Comment(text) => text
                .strip_prefix(HEADER_TOTAL)
                .and_then(|n| n.trim().parse().ok()),
            _ => None,
        })
    }

    /// Lines joined with a single `\n`, no trailing newline
    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_set_normalizes() {
        let mut set = DomainSet::new();
        assert!(set.insert("  Example.COM "));
        assert!(!set.insert("example.com"));
        assert!(!set.insert("   "));
        assert_eq!(set.len(), 1);
        assert!(set.contains("EXAMPLE.com"));
    }

    #[test]
    fn test_domain_set_iterates_sorted() {
        let set: DomainSet = ["z.com", "a.com", "m.com"].into_iter().collect();
        let items: Vec<_> = set.iter().cloned().collect();
        assert_eq!(items, vec!["a.com", "m.com", "z.com"]);
    }

    #[test]
    fn test_rule_line_display() {
        assert_eq!(RuleLine::DomainSuffix("a.com".into()).to_string(), "DOMAIN-SUFFIX,a.com");
        assert_eq!(RuleLine::DomainKeyword("yugioh".into()).to_string(), "DOMAIN-KEYWORD,yugioh");
        assert_eq!(RuleLine::Comment("hi".into()).to_string(), "# hi");
        assert_eq!(RuleLine::Blank.to_string(), "");
    }

    #[test]
    fn test_document_counts_only_suffix_lines() {
        let doc = RuleDocument::new(vec![
            RuleLine::Comment("Total Domains: 2".into()),
            RuleLine::Blank,
            RuleLine::DomainSuffix("a.com".into()),
            RuleLine::DomainSuffix("b.com".into()),
            RuleLine::DomainKeyword("kw".into()),
        ]);
        assert_eq!(doc.domain_count(), 2);
        assert_eq!(doc.header_count(), Some(2));
        assert_eq!(doc.keywords().collect::<Vec<_>>(), vec!["kw"]);
        assert_eq!(
            doc.to_text(),
            "# Total Domains: 2\n\nDOMAIN-SUFFIX,a.com\nDOMAIN-SUFFIX,b.com\nDOMAIN-KEYWORD,kw"
        );
    }
}
