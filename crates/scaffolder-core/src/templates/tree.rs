//! Template tree loading from the embedded bundle or a local directory
//!
//! Both sources load into the same in-memory [`TemplateTree`], so rendering
//! behaves identically during development (`--template-dir`) and from an
//! installed binary.

use super::manifest::{TemplateManifest, MANIFEST_FILE};
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use include_dir::{Dir, DirEntry};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Template source - either bundled into the binary or a local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Embedded(&'static Dir<'static>),
    Local(PathBuf),
}

impl TemplateSource {
    /// Pick the source for a product: explicit directory, then the
    /// environment override, then the embedded tree
    pub fn from_config<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Self {
        if let Some(path) = template_dir {
            return Self::Local(path);
        }
        match std::env::var(config.template_dir_env()) {
            Ok(path) if !path.trim().is_empty() => Self::Local(PathBuf::from(path)),
            _ => Self::Embedded(config.embedded_templates()),
        }
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Embedded(_) => "bundled templates".to_string(),
            TemplateSource::Local(path) => format!("local templates from {}", path.display()),
        }
    }
}

/// A loaded template tree: its manifest and every file keyed by relative path
#[derive(Debug, Clone)]
pub struct TemplateTree {
    manifest: TemplateManifest,
    files: BTreeMap<String, Vec<u8>>,
}

impl TemplateTree {
    /// Build a tree from already-loaded parts
    pub fn new(manifest: TemplateManifest, files: BTreeMap<String, Vec<u8>>) -> Self {
        Self { manifest, files }
    }

    pub async fn load(source: &TemplateSource) -> Result<Self> {
        match source {
            TemplateSource::Embedded(dir) => Self::from_embedded(dir),
            TemplateSource::Local(path) => Self::from_local(path).await,
        }
    }

    /// Read every file under `root`, dotfiles included
    pub async fn from_local(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            anyhow::bail!("Template directory not found: {}", root.display());
        }

        let mut files = BTreeMap::new();
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry
                .with_context(|| format!("Failed to walk template directory {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = relative_key(root, entry.path())?;
            let content = fs::read(entry.path())
                .await
                .with_context(|| format!("Failed to read {}", entry.path().display()))?;
            files.insert(relative, content);
        }

        Self::from_files(files)
            .with_context(|| format!("Invalid template directory {}", root.display()))
    }

    pub fn from_embedded(dir: &'static Dir<'static>) -> Result<Self> {
        let mut files = BTreeMap::new();
        collect_embedded(dir, &mut files);
        Self::from_files(files).context("Invalid bundled templates")
    }

    /// Split the manifest out of a flat file map
    fn from_files(mut files: BTreeMap<String, Vec<u8>>) -> Result<Self> {
        let raw = files
            .remove(MANIFEST_FILE)
            .ok_or_else(|| anyhow::anyhow!("{} not found at template root", MANIFEST_FILE))?;
        let manifest: TemplateManifest = serde_yaml::from_slice(&raw)
            .with_context(|| format!("Failed to parse {}", MANIFEST_FILE))?;
        Ok(Self { manifest, files })
    }

    pub fn manifest(&self) -> &TemplateManifest {
        &self.manifest
    }

    /// Files in path order, manifest excluded
    pub fn files(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_slice()))
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn collect_embedded(dir: &'static Dir<'static>, files: &mut BTreeMap<String, Vec<u8>>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                let key = path_key(file.path());
                files.insert(key, file.contents().to_vec());
            }
            DirEntry::Dir(subdir) => collect_embedded(subdir, files),
        }
    }
}

fn relative_key(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("{} is outside {}", path.display(), root.display()))?;
    Ok(path_key(relative))
}

/// Slash-separated key, independent of the host separator
fn path_key(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
