use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleError};

/// Minimum domain count below which a rule file is not written
pub const DEFAULT_MIN_COUNT: usize = 5;

/// Directory rule files are written to
pub const DEFAULT_OUTPUT_DIR: &str = "rules";

/// Upstream v2fly community list for Konami
pub const KONAMI_UPSTREAM: &str =
    "https://raw.githubusercontent.com/v2fly/domain-list-community/master/data/konami";

/// Definition of one generated rule file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Short name used on the command line
    pub name: String,
    /// First header line
    pub title: String,
    /// `Source:` header value
    pub source_label: String,
    /// Baseline domains always included
    #[serde(default)]
    pub local_domains: Vec<String>,
    /// Fetched sequentially; failures fall back to an empty contribution
    #[serde(default)]
    pub upstream_urls: Vec<String>,
    /// Emitted as `DOMAIN-KEYWORD` rules, in order
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Output file path
    pub output: PathBuf,
    #[serde(default = "default_min_count")]
    pub min_count: usize,
}

fn default_min_count() -> usize {
    DEFAULT_MIN_COUNT
}

impl Profile {
    /// Move the output file into `dir`, keeping its file name
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let file_name = self
            .output
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("{}.list", self.name)));
        self.output = dir.as_ref().join(file_name);
        self
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Konami & Master Duel rules: local baseline plus the v2fly list
pub fn konami() -> Profile {
    Profile {
        name: "konami".to_string(),
        title: "Konami & Master Duel Rules for Shadowrocket".to_string(),
        source_label: "Local + v2fly/domain-list-community".to_string(),
        local_domains: strings(&[
            "konami-md.jp",
            "md-game.konami.net",
            "md-info.konami.net",
            "p.eagate.573.jp",
            "duellinks.konami.net",
            "yugioh-card.com",
            "konami.net",
        ]),
        upstream_urls: vec![KONAMI_UPSTREAM.to_string()],
        keywords: strings(&["masterduel", "yugioh"]),
        output: Path::new(DEFAULT_OUTPUT_DIR).join("konami.list"),
        min_count: DEFAULT_MIN_COUNT,
    }
}

/// FANZA/DMM and studio domains, static only
pub fn jav() -> Profile {
    Profile {
        name: "jav".to_string(),
        title: "JAV Professional Rules".to_string(),
        source_label: "Local".to_string(),
        local_domains: strings(&[
            "dmm.co.jp",
            "dmm.com",
            "fanza.co.jp",
            "fanzatv.jp",
            "dmm-extension.com",
            "dmmapis.com",
            "api-p.dmm.com",
            "cc.dmm.co.jp",
            "pics.dmm.co.jp",
            "image.dmm.co.jp",
            "i3.img.dmm.com",
            "mgstage.com",
            "mgsops.net",
            "sod.co.jp",
            "s1s1s1.com",
            "moodyz.com",
            "av-e-body.com",
            "madonna-av.com",
            "unext.co.jp",
            "unext.jp",
            "faleno.jp",
            "prestige-av.com",
            "ideapocket.com",
        ]),
        upstream_urls: Vec::new(),
        keywords: Vec::new(),
        output: Path::new(DEFAULT_OUTPUT_DIR).join("JAV.list"),
        min_count: DEFAULT_MIN_COUNT,
    }
}

/// All built-in profiles
pub fn builtin_profiles() -> Vec<Profile> {
    vec![konami(), jav()]
}

/// Look up a built-in profile by name (case-insensitive)
pub fn find_profile(name: &str) -> Result<Profile> {
    builtin_profiles()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| RuleError::Config(format!("Unknown profile: {}", name)))
}

/// Load profiles from a JSON array file
pub fn load_profiles(path: impl AsRef<Path>) -> Result<Vec<Profile>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        RuleError::Config(format!(
            "Failed to read profiles file '{}': {}",
            path.display(),
            e
        ))
    })?;
    let profiles: Vec<Profile> = serde_json::from_str(&text)?;
    if profiles.is_empty() {
        return Err(RuleError::Config(format!(
            "No profiles defined in '{}'",
            path.display()
        )));
    }
    Ok(profiles)
}
