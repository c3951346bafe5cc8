use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{DomainSet, RuleDocument, RuleLine, DOMAIN_KEYWORD, DOMAIN_SUFFIX};

/// Regex for the first token of an upstream line
/// Format: [type:]value[@attr...]
/// The value may not contain `:`, so a bare prefix never parses as a domain.
static ENTRY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(domain|full|keyword|regexp):)?([^@\s:]+)(?:@.*)?$")
        .expect("ENTRY_PATTERN: hardcoded regex is invalid")
});

/// Directive that pulls in another v2fly list; not followed.
const INCLUDE_PREFIX: &str = "include:";

/// Parse an upstream domain list into a `DomainSet`.
///
/// Blank lines, `#` comments and `include:` directives are skipped. For the
/// remaining lines only the first whitespace-delimited token is kept, which
/// drops trailing attributes like `@ads`.
pub fn parse_domain_list(text: &str) -> DomainSet {
    text.lines().filter_map(parse_entry).collect()
}

/// Parse one upstream line into a suffix domain.
///
/// `domain:` and `full:` prefixes are stripped. `keyword:` and `regexp:`
/// entries are not suffixes and yield `None`.
pub fn parse_entry(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with(INCLUDE_PREFIX) {
        return None;
    }

    let token = line.split_whitespace().next()?;
    let captures = ENTRY_PATTERN.captures(token)?;

    match captures.get(1).map(|m| m.as_str()) {
        Some("keyword") | Some("regexp") => {
            tracing::debug!(entry = token, "skipping non-suffix entry");
            None
        }
        _ => Some(captures.get(2)?.as_str().to_lowercase()),
    }
}

/// Read a written rule file back into a `RuleDocument`.
///
/// Lines that are neither comments nor known rules are kept as comments.
pub fn parse_document(text: &str) -> RuleDocument {
    let lines = text
        .lines()
        .map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return RuleLine::Blank;
            }
            if let Some(comment) = line.strip_prefix('#') {
                return RuleLine::Comment(comment.trim_start().to_string());
            }
            match line.split_once(',') {
                Some((DOMAIN_SUFFIX, value)) => RuleLine::DomainSuffix(value.trim().to_string()),
                Some((DOMAIN_KEYWORD, value)) => RuleLine::DomainKeyword(value.trim().to_string()),
                _ => RuleLine::Comment(line.to_string()),
            }
        })
        .collect();

    RuleDocument::new(lines)
}
