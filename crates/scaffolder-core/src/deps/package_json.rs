//! Read-merge-write of the destination `package.json`

use super::{DependencyKind, Manifest};
use crate::answers::AnswerSet;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

/// Merge `manifest` into the JSON document at `path`
///
/// Unrelated top-level keys of an existing file are kept. Within
/// `dependencies` and `devDependencies` the manifest's constraint replaces
/// any existing one for the same package; other packages are kept.
/// A missing file is treated as an empty object. Project fields taken from
/// `answers` are filled in where the document has none.
pub async fn extend_package_json(
    path: &Path,
    manifest: &Manifest,
    answers: &AnswerSet,
) -> Result<()> {
    let mut document = match fs::read_to_string(path).await {
        Ok(content) => parse_object(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    fill_project_fields(&mut document, answers);
    merge_into(&mut document, manifest)
        .with_context(|| format!("Failed to merge dependencies into {}", path.display()))?;

    let mut output = serde_json::to_string_pretty(&Value::Object(document))
        .context("Failed to serialize package.json")?;
    output.push('\n');

    fs::write(path, output)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn parse_object(content: &str) -> Result<Map<String, Value>> {
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(content)? {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("expected a JSON object at the top level"),
    }
}

/// `name`, `description` and `author` as derived from the answers
pub fn project_fields(answers: &AnswerSet) -> Vec<(&'static str, Value)> {
    let mut fields = vec![
        ("name", Value::String(answers.repo_name.clone())),
        ("description", Value::String(answers.description.clone())),
    ];

    let author = match (answers.author_name.trim(), answers.author_email.trim()) {
        ("", "") => None,
        (name, "") => Some(name.to_string()),
        ("", email) => Some(format!("<{}>", email)),
        (name, email) => Some(format!("{} <{}>", name, email)),
    };
    if let Some(author) = author {
        fields.push(("author", Value::String(author)));
    }

    fields
}

/// Put missing project fields at the top of the document
///
/// Fields already present are left alone, so an existing project keeps
/// its identity.
pub fn fill_project_fields(document: &mut Map<String, Value>, answers: &AnswerSet) {
    let mut filled = Map::new();
    for (key, value) in project_fields(answers) {
        if !document.contains_key(key) {
            filled.insert(key.to_string(), value);
        }
    }
    if filled.is_empty() {
        return;
    }

    filled.append(document);
    *document = filled;
}

/// Merge both manifest sections into an in-memory document
pub fn merge_into(document: &mut Map<String, Value>, manifest: &Manifest) -> Result<()> {
    for (key, kind) in [
        ("dependencies", DependencyKind::Runtime),
        ("devDependencies", DependencyKind::Development),
    ] {
        let section = manifest.section(kind);
        if section.is_empty() {
            continue;
        }

        let entry = document
            .entry(key)
            .or_insert_with(|| Value::Object(Map::new()));
        let existing = entry
            .as_object_mut()
            .ok_or_else(|| anyhow::anyhow!("'{}' is not an object", key))?;

        for (package, version) in section {
            existing.insert(package.clone(), Value::String(version.clone()));
        }

        existing.sort_keys();
    }
    Ok(())
}
