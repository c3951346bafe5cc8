//! Domain Rules - aggregates domain lists into routing rule files
//!
//! This library builds Shadowrocket/Surge style rule lists:
//! - A fixed local baseline of domains per profile
//! - Optional upstream lists (v2fly domain-list-community format)
//! - Deduplicated, sorted `DOMAIN-SUFFIX` rules
//! - Static `DOMAIN-KEYWORD` rules appended after the suffixes
//! - A safety threshold that refuses to overwrite a good file with a degraded one
//!
//! # Example
//!
//! ```rust
//! use domain_rules::{DomainAggregator, DomainSet, Fetcher, RenderMeta};
//! use domain_rules::parser::parse_domain_list;
//! use domain_rules::generate::header_now;
//!
//! let fetcher = Fetcher::new();
//! let aggregator = DomainAggregator::new(["z.com"], &fetcher);
//!
//! // Upstream bodies are parsed line by line
//! let remote = parse_domain_list("x.com\n# comment\n\ny.com @ads\n");
//! let merged = DomainAggregator::merge([&aggregator.collect_local(), &remote]);
//!
//! let meta = RenderMeta {
//!     title: "Example Rules".to_string(),
//!     source_label: "Local + upstream".to_string(),
//!     generated_at: header_now(),
//!     keywords: vec!["example".to_string()],
//! };
//! let doc = DomainAggregator::render(&merged, &meta);
//! assert_eq!(doc.domains().collect::<Vec<_>>(), vec!["x.com", "y.com", "z.com"]);
//! ```
//!
//! # Output Format
//!
//! ```text
//! # <title>
//! # Updated: 2026-10-19 12:30:00 (UTC+08:00)
//! # Source: <source label>
//! # Total Domains: <n>
//!
//! DOMAIN-SUFFIX,<domain>
//! DOMAIN-KEYWORD,<keyword>
//! ```
//!
//! ## Upstream Line Syntax
//!
//! | Line | Result |
//! |------|--------|
//! | `example.com` | `example.com` |
//! | `example.com @ads` | `example.com` |
//! | `domain:example.com` | `example.com` |
//! | `full:www.example.com` | `www.example.com` |
//! | `keyword:example` | skipped |
//! | `regexp:^ex.*$` | skipped |
//! | `include:other` | skipped |
//! | `# comment` | skipped |

pub mod aggregator;
pub mod error;
pub mod fetcher;
pub mod generate;
pub mod parser;
pub mod profile;
pub mod types;
pub mod writer;

// Re-export commonly used items
pub use aggregator::DomainAggregator;
pub use error::{FetchErrorKind, Result, RuleError};
pub use fetcher::{Fetcher, DEFAULT_TIMEOUT};
pub use generate::{generate, GenerateReport};
pub use parser::{parse_document, parse_domain_list};
pub use profile::{
    builtin_profiles, find_profile, load_profiles, Profile, DEFAULT_MIN_COUNT, DEFAULT_OUTPUT_DIR,
};
pub use types::{DomainSet, RenderMeta, RuleDocument, RuleLine};
pub use writer::validate_and_write;
