//! Template tree manifest (`template.yaml`) and exclude patterns

use serde::{Deserialize, Serialize};

/// File name of the manifest at the root of every template tree
pub const MANIFEST_FILE: &str = "template.yaml";

/// Marker for variant source files, which the generic pass skips
pub const DEFAULT_EXCLUDE: &str = "_*.*";

fn default_exclude() -> Vec<String> {
    vec![DEFAULT_EXCLUDE.to_string()]
}

/// Root manifest of a template tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    #[serde(default)]
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// File name patterns left out of the generic copy pass
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl TemplateManifest {
    pub fn exclude_patterns(&self) -> ExcludePatterns {
        ExcludePatterns::new(self.exclude.iter().cloned())
    }
}

/// Wildcard patterns matched against a file's name
///
/// `*` matches any run of characters, so `_*.*` matches `_webpack.config.js`
/// and `*.map` matches `bundle.js.map`. Patterns without `*` must match the
/// whole name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludePatterns {
    patterns: Vec<String>,
}

impl ExcludePatterns {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Check a slash-separated relative path against every pattern
    pub fn matches(&self, file_path: &str) -> bool {
        let filename = file_path.rsplit('/').next().unwrap_or(file_path);
        self.patterns
            .iter()
            .any(|pattern| wildcard_match(pattern, filename))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

fn wildcard_match(pattern: &str, name: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    let (first, last) = match parts.as_slice() {
        [exact] => return *exact == name,
        [first, .., last] => (*first, *last),
        [] => return false,
    };

    if first.len() + last.len() > name.len() || !name.starts_with(first) || !name.ends_with(last)
    {
        return false;
    }

    // Middle pieces must appear in order between the fixed prefix and suffix
    let mut rest = &name[first.len()..name.len() - last.len()];
    for piece in &parts[1..parts.len() - 1] {
        match rest.find(piece) {
            Some(idx) => rest = &rest[idx + piece.len()..],
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_marker_pattern() {
        let patterns = ExcludePatterns::new([DEFAULT_EXCLUDE]);

        assert!(patterns.matches("webpack/less/_webpack.config.js"));
        assert!(patterns.matches("_package.json"));
        assert!(!patterns.matches("webpack.config.js"));
        assert!(!patterns.matches("src/main/index.jsx"));
        // no extension, not a variant source
        assert!(!patterns.matches("_notes"));
    }

    #[test]
    fn test_pattern_matches_file_name_not_directory() {
        let patterns = ExcludePatterns::new([DEFAULT_EXCLUDE]);
        assert!(!patterns.matches("_drafts/readme.md"));
    }

    #[test]
    fn test_suffix_prefix_and_exact() {
        let patterns = ExcludePatterns::new(["*.map", "tmp*", ".DS_Store"]);

        assert!(patterns.matches("public/bundle.js.map"));
        assert!(patterns.matches("tmp-output.txt"));
        assert!(patterns.matches("nested/.DS_Store"));
        assert!(!patterns.matches("map.js"));
        assert!(!patterns.matches("my.DS_Store"));
    }

    #[test]
    fn test_overlapping_prefix_and_suffix() {
        assert!(!wildcard_match("ab*ba", "aba"));
        assert!(wildcard_match("ab*ba", "abba"));
        assert!(wildcard_match("*", ""));
    }

    #[test]
    fn test_manifest_default_exclude() {
        let yaml = "name: React Stack\nversion: 0.1.0\n";
        let manifest: TemplateManifest = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(manifest.exclude, vec![DEFAULT_EXCLUDE.to_string()]);
        assert!(manifest.description.is_empty());
        assert!(manifest.exclude_patterns().matches("_webpack.config.js"));
    }

    #[test]
    fn test_manifest_custom_exclude() {
        let yaml = "name: x\nversion: 1.0.0\nexclude:\n  - \"*.orig\"\n";
        let manifest: TemplateManifest = serde_yaml::from_str(yaml).unwrap();

        assert!(manifest.exclude_patterns().matches("a.orig"));
        assert!(!manifest.exclude_patterns().matches("_webpack.config.js"));
    }
}
