//! Template rendering: generic copy pass and variant placement

use crate::answers::AnswerSet;
use crate::templates::manifest::ExcludePatterns;
use crate::templates::tree::TemplateTree;
use crate::variant::Resolution;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::path::Path;
use tokio::fs;

/// Render every non-excluded file of `tree` into `target_dir`
///
/// UTF-8 files get placeholder tokens substituted; anything else is copied
/// as-is. Values inserted into `.json` files are JSON-escaped so the
/// document stays parseable whatever the answers contain. Returns the relative paths written, in tree order. The first
/// failure aborts the pass; files already written stay on disk.
pub async fn render(
    tree: &TemplateTree,
    target_dir: &Path,
    answers: &AnswerSet,
    exclude: &ExcludePatterns,
) -> Result<Vec<String>> {
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut rendered = Vec::new();

    for (file_path, content) in tree.files() {
        if exclude.matches(file_path) {
            continue;
        }

        let output = match std::str::from_utf8(content) {
            Ok(text) if is_json(file_path) => {
                answers.substitute_with(text, json_escape).into_bytes()
            }
            Ok(text) => answers.substitute(text).into_bytes(),
            Err(_) => content.to_vec(),
        };

        write_file(target_dir, file_path, &output).await?;
        rendered.push(file_path.to_string());
    }

    Ok(rendered)
}

/// Copy each resolved variant source byte-for-byte to its destination
pub async fn place_variants(
    tree: &TemplateTree,
    target_dir: &Path,
    resolutions: &[Resolution],
) -> Result<Vec<String>> {
    let mut placed = Vec::new();

    for resolution in resolutions {
        let source = resolution.source.path();
        let content = tree.get(source).ok_or_else(|| {
            anyhow::anyhow!(
                "Variant source '{}' for {} not found in template",
                source,
                resolution.slot
            )
        })?;

        write_file(target_dir, resolution.destination(), content).await?;
        placed.push(resolution.destination().to_string());
    }

    Ok(placed)
}

fn is_json(file_path: &str) -> bool {
    file_path.ends_with(".json")
}

/// Escape a value for use inside a JSON string literal
fn json_escape(value: &str) -> Cow<'_, str> {
    match serde_json::to_string(value) {
        Ok(quoted) => Cow::Owned(quoted[1..quoted.len() - 1].to_string()),
        Err(_) => Cow::Borrowed(value),
    }
}

async fn write_file(target_dir: &Path, relative: &str, content: &[u8]) -> Result<()> {
    let target_path = target_dir.join(relative);
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(&target_path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", target_path.display()))
}
