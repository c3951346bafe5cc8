use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, RuleError};
use crate::parser::parse_document;
use crate::types::RuleDocument;

/// Write `doc` to `path` unless it holds fewer than `min_count` domains.
///
/// On a low count nothing on disk is touched, so a previously good file
/// survives a degraded run. The file is written to a sibling `.tmp` path and
/// renamed into place.
pub fn validate_and_write(doc: &RuleDocument, path: impl AsRef<Path>, min_count: usize) -> Result<()> {
    let path = path.as_ref();
    let count = doc.domain_count();

    if count < min_count {
        return Err(RuleError::BelowThreshold {
            count,
            min: min_count,
        });
    }

    log_previous_count(path, count);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    let written = write_file(&tmp_path, doc.to_text().as_bytes())
        .and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    info!(path = %path.display(), count, "rule file written");
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.flush()
}

/// Log how the domain count changed against an existing output file
fn log_previous_count(path: &Path, count: usize) {
    let previous = match fs::read_to_string(path) {
        Ok(text) => parse_document(&text).domain_count(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no previous rule file");
            return;
        }
    };
    let delta = count as i64 - previous as i64;
    info!(path = %path.display(), previous, count, delta, "replacing existing rule file");
}
