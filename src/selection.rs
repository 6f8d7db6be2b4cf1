// Bootstrap config selection
//
// Finds the newest `envoy*.json` in the config directory. File contents are
// never read; the version lives in the file name.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::version;

/// Glob of the form `<prefix>*<suffix>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigPattern {
    pub prefix: String,
    pub suffix: String,
}

impl Default for ConfigPattern {
    fn default() -> Self {
        Self {
            prefix: "envoy".to_string(),
            suffix: ".json".to_string(),
        }
    }
}

impl ConfigPattern {
    pub fn matches(&self, name: &str) -> bool {
        // `*` may be empty, but prefix and suffix must not overlap
        name.len() >= self.prefix.len() + self.suffix.len()
            && name.starts_with(&self.prefix)
            && name.ends_with(&self.suffix)
    }
}

impl fmt::Display for ConfigPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}", self.prefix, self.suffix)
    }
}

/// List the file names in `dir` matching `pattern`, in directory order.
///
/// A missing or unreadable directory behaves like an empty one.
pub fn list_candidates(dir: &Path, pattern: &ConfigPattern) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read config directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                debug!("Skipping non UTF-8 file name {:?}", raw);
                continue;
            }
        };
        if !pattern.matches(&name) {
            continue;
        }

        // Follows symlinks, so a link to a generated config still counts
        if entry.path().is_dir() {
            debug!("Skipping directory {}", name);
            continue;
        }

        names.push(name);
    }

    names
}

/// The greatest name under version ordering, if any.
pub fn select_latest<I, S>(candidates: I) -> Option<S>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .max_by(|a, b| version::compare(a.as_ref(), b.as_ref()))
}

/// Full path of the newest config in `dir`, or `None` when nothing matches.
pub fn find_latest_config(dir: &Path, pattern: &ConfigPattern) -> Option<PathBuf> {
    let candidates = list_candidates(dir, pattern);
    debug!(
        "Found {} candidate(s) for {} in {}",
        candidates.len(),
        pattern,
        dir.display()
    );

    select_latest(candidates).map(|name| dir.join(name))
}
