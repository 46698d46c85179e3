//! Product configuration trait for CLI binaries
//!
//! The core knows how to scaffold a project; the binary decides what it is
//! called, which template tree ships inside it and what to tell the user
//! afterwards.

use crate::runtime::installer::InstallerConfig;
use include_dir::Dir;
use std::path::Path;

/// Configuration trait for scaffolding CLI products
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Template tree bundled into the binary
    fn embedded_templates(&self) -> &'static Dir<'static>;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Documentation link shown after project creation
    fn docs_url(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, installed: bool) -> Vec<String>;

    /// Package installer run against the generated manifest
    fn installer(&self) -> InstallerConfig {
        InstallerConfig::npm()
    }
}
