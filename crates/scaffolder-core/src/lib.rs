//! Scaffolder Core - Shared library for the React Stack project generator
//!
//! This library turns a set of answers into a project directory: it merges
//! the dependency manifest, picks variant configuration files, renders the
//! template tree and hands off to the package installer.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Decisions** - Pure functions over an [`AnswerSet`]: dependency
//!   merging ([`deps`]) and variant selection ([`variant`])
//! - **Layer 2: Assembly** - Template loading and rendering ([`templates`]),
//!   the linear pipeline ([`scaffold`]) and the installer ([`runtime`])
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{scaffold, AnswerSet, CssPreprocessor, TemplateSource, TemplateTree};
//!
//! let answers = AnswerSet {
//!     repo_name: "shop".into(),
//!     css_preprocessor: CssPreprocessor::Less,
//!     ..AnswerSet::default()
//! };
//! let tree = TemplateTree::load(&TemplateSource::local("templates/react-stack".into())).await?;
//! let (report, _) = scaffold::scaffold(&tree, "shop".as_ref(), &answers, None).await?;
//! ```

pub mod answers;
pub mod deps;
pub mod product;
pub mod runtime;
pub mod scaffold;
pub mod templates;
pub mod variant;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{AnswerSet, CssPreprocessor, Token};
pub use deps::{merge, DependencyFragment, Manifest, OptionalFragment};
pub use product::ProductConfig;
pub use runtime::{InstallOutcome, Installer, InstallerConfig};
pub use scaffold::{ScaffoldError, ScaffoldPlan, ScaffoldReport, Step};
pub use templates::{render, ExcludePatterns, TemplateManifest, TemplateSource, TemplateTree};
pub use variant::{resolve_all, select_variant, TemplateId, VariantSlot};

#[cfg(feature = "tui")]
pub use tui::run;
