//! Exclusion set: base-name glob patterns skipped during traversal.
//!
//! Patterns use shell-glob syntax (`*`, `?`, `[...]`) and are matched against
//! an entry's base name only, never its full path, at every depth. A matching
//! entry is dropped entirely: not descended into, not counted, not reported.

use crate::error::DigestError;
use glob::Pattern;

/// Built-in patterns: the macOS Finder metadata file and the Synology
/// resource-fork directory.
pub const DEFAULT_EXCLUDES: &[&str] = &[".DS_Store", "@eaDir"];

/// Compiled set of exclusion patterns
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    patterns: Vec<Pattern>,
}

impl ExclusionSet {
    /// Compile a list of glob patterns.
    ///
    /// Fails on the first pattern that is not valid glob syntax.
    pub fn new<I, S>(patterns: I) -> Result<Self, DigestError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Pattern::new(p).map_err(|e| {
                    DigestError::Config(format!("Invalid exclusion pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// A set that excludes nothing
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Whether an entry with this base name is excluded
    pub fn is_excluded(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    /// The source patterns, in configuration order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Pattern::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        let patterns = DEFAULT_EXCLUDES
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect();
        Self { patterns }
    }
}
