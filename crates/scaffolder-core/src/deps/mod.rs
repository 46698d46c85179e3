//! Dependency fragments and the manifest merger
//!
//! A project's dependencies are assembled from a base fragment plus any
//! optional fragments whose predicate holds for the current answers.
//! Merging is last-write-wins per package: a later fragment replaces the
//! version constraint of an earlier one, constraints are never combined.

pub mod catalog;
pub mod package_json;

use crate::answers::AnswerSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use catalog::{base_fragment, optional_fragments, resolve_manifest};
pub use package_json::extend_package_json;

/// Which section of the manifest a package belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    /// Always installed (`dependencies`)
    Runtime,
    /// Build-time only (`devDependencies`)
    Development,
}

/// A named, immutable bundle of package/version pairs
#[derive(Debug, Clone, Copy)]
pub struct DependencyFragment {
    pub name: &'static str,
    pub dependencies: &'static [(&'static str, &'static str)],
    pub dev_dependencies: &'static [(&'static str, &'static str)],
}

impl DependencyFragment {
    /// Iterate over every entry tagged with its kind
    pub fn entries(&self) -> impl Iterator<Item = (DependencyKind, &'static str, &'static str)> {
        let (dependencies, dev_dependencies) = (self.dependencies, self.dev_dependencies);
        let runtime = dependencies
            .iter()
            .map(|(pkg, ver)| (DependencyKind::Runtime, *pkg, *ver));
        let dev = dev_dependencies
            .iter()
            .map(|(pkg, ver)| (DependencyKind::Development, *pkg, *ver));
        runtime.chain(dev)
    }
}

/// Predicate deciding whether an optional fragment applies
pub type Predicate = fn(&AnswerSet) -> bool;

/// An optional fragment guarded by a predicate over the answers
#[derive(Clone, Copy)]
pub struct OptionalFragment {
    pub when: Predicate,
    pub fragment: DependencyFragment,
}

/// Merged dependency declaration for the generated project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl Manifest {
    /// Merge a fragment into this manifest, replacing existing constraints
    pub fn extend_from(&mut self, fragment: &DependencyFragment) {
        for (kind, package, version) in fragment.entries() {
            self.section_mut(kind)
                .insert(package.to_string(), version.to_string());
        }
    }

    pub fn section(&self, kind: DependencyKind) -> &BTreeMap<String, String> {
        match kind {
            DependencyKind::Runtime => &self.dependencies,
            DependencyKind::Development => &self.dev_dependencies,
        }
    }

    fn section_mut(&mut self, kind: DependencyKind) -> &mut BTreeMap<String, String> {
        match kind {
            DependencyKind::Runtime => &mut self.dependencies,
            DependencyKind::Development => &mut self.dev_dependencies,
        }
    }

    /// Version constraint for a package in either section
    pub fn get(&self, package: &str) -> Option<&str> {
        self.dependencies
            .get(package)
            .or_else(|| self.dev_dependencies.get(package))
            .map(String::as_str)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.get(package).is_some()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Merge the base fragment with every optional fragment whose predicate holds
///
/// Fragments are applied in slice order, so the declaration order decides
/// which constraint survives when two selected fragments name the same
/// package.
pub fn merge(
    base: &DependencyFragment,
    optional: &[OptionalFragment],
    answers: &AnswerSet,
) -> Manifest {
    let mut manifest = Manifest::default();
    manifest.extend_from(base);

    for candidate in optional {
        if (candidate.when)(answers) {
            manifest.extend_from(&candidate.fragment);
        }
    }

    manifest
}
