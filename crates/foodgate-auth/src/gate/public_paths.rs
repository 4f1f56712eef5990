//! Public-path allowlist matching.

/// One allowlist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathPattern {
    /// Matches the path exactly.
    Exact(String),
    /// `prefix/**`: the prefix itself and everything below it.
    Subtree(String),
    /// `prefix*`: any path starting with the prefix.
    Prefix(String),
}

impl PathPattern {
    fn parse(pattern: &str) -> Self {
        let pattern = pattern.trim();
        if let Some(prefix) = pattern.strip_suffix("/**") {
            Self::Subtree(prefix.to_string())
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            Self::Prefix(prefix.to_string())
        } else {
            Self::Exact(pattern.to_string())
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => path == exact,
            Self::Subtree(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            Self::Prefix(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

/// Decides which request paths skip authentication.
#[derive(Debug, Clone, Default)]
pub struct PublicPathMatcher {
    patterns: Vec<PathPattern>,
}

impl PublicPathMatcher {
    /// Compiles the configured patterns.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .filter(|p| !p.as_ref().trim().is_empty())
                .map(|p| PathPattern::parse(p.as_ref()))
                .collect(),
        }
    }

    /// Whether `path` is on the allowlist.
    pub fn is_public(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(path))
    }
}
