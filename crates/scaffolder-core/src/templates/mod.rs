//! Template loading, rendering, and version checks
//!
//! This module provides:
//! - The template tree manifest (`template.yaml`) and exclude patterns
//! - Loading a tree from the embedded bundle or a local directory
//! - Rendering with placeholder substitution and variant placement
//! - Version compatibility checking

pub mod manifest;
pub mod renderer;
pub mod tree;
pub mod version;

use crate::product::ProductConfig;
use crate::variant::VariantSlot;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

pub use manifest::{ExcludePatterns, TemplateManifest};
pub use renderer::{place_variants, render};
pub use tree::{TemplateSource, TemplateTree};
pub use version::check_compatibility;

/// Print the template manifest and the variant candidates of every slot
pub async fn describe<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Result<()> {
    let source = TemplateSource::from_config(config, template_dir);
    let tree = TemplateTree::load(&source).await?;
    let manifest = tree.manifest();

    println!(
        "{}",
        format!("{} templates", config.display_name()).cyan().bold()
    );
    println!("  {} {}", "source:".dimmed(), source.describe());
    println!("  {} {}", "name:".dimmed(), manifest.name);
    if !manifest.description.is_empty() {
        println!("  {} {}", "description:".dimmed(), manifest.description);
    }
    println!("  {} {}", "version:".dimmed(), manifest.version);
    println!("  {} {}", "files:".dimmed(), tree.len());
    println!("  {} {}", "exclude:".dimmed(), manifest.exclude.join(", "));
    println!();

    for slot in VariantSlot::ALL {
        println!("{} {}", "->".blue(), slot.destination().bold());
        for candidate in slot.candidates() {
            let status = if tree.get(candidate.path()).is_some() {
                "ok".green()
            } else {
                "missing".red()
            };
            println!("     {} [{}]", candidate, status);
        }
    }

    Ok(())
}
