//! Scaffold pipeline: answers in, project directory out
//!
//! The pipeline is strictly linear:
//!
//! 1. collect answers (prompt layer)
//! 2. compute the dependency manifest and stage it for `package.json`
//! 3. resolve every variant slot
//! 4. render the generic template tree
//! 5. place the resolved variant files
//! 6. hand off to the package installer
//!
//! Prompting belongs to the caller; [`scaffold`] runs steps 2 to 6 for an
//! answer set it is handed. A failure stops the pipeline where it happened
//! and nothing already written is removed.

use crate::answers::AnswerSet;
use crate::deps::{self, Manifest};
use crate::runtime::{InstallOutcome, Installer};
use crate::templates::{renderer, TemplateTree};
use crate::variant::{self, Resolution};
use std::fmt;
use std::path::Path;

/// Name of the dependency manifest in the generated project
pub const PACKAGE_JSON: &str = "package.json";

/// Pipeline steps in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    CollectAnswers,
    ComputeManifest,
    ResolveVariants,
    RenderTemplates,
    PlaceVariants,
    Install,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::CollectAnswers,
        Step::ComputeManifest,
        Step::ResolveVariants,
        Step::RenderTemplates,
        Step::PlaceVariants,
        Step::Install,
    ];

    /// 1-based position in the pipeline
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::CollectAnswers => "collect answers",
            Step::ComputeManifest => "compute dependency manifest",
            Step::ResolveVariants => "resolve variant files",
            Step::RenderTemplates => "render templates",
            Step::PlaceVariants => "place variant files",
            Step::Install => "install dependencies",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}] {}", self.number(), Step::ALL.len(), self.name())
    }
}

/// A pipeline failure, tagged with the step it happened in
///
/// [`Step::ComputeManifest`] covers both computing the manifest and
/// committing it to `package.json`. The commit runs after steps 4 and 5,
/// so a "step 2" failure can leave rendered and placed files behind.
#[derive(Debug, thiserror::Error)]
#[error("failed during step {} ({})", .step.number(), .step.name())]
pub struct ScaffoldError {
    pub step: Step,
    #[source]
    pub source: anyhow::Error,
}

impl ScaffoldError {
    pub fn new(step: Step, source: anyhow::Error) -> Self {
        Self { step, source }
    }
}

/// Everything derived from the answers before touching the disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub manifest: Manifest,
    pub resolutions: Vec<Resolution>,
}

impl ScaffoldPlan {
    /// Steps 2 and 3: pure functions of the answers
    pub fn from_answers(answers: &AnswerSet) -> Self {
        Self {
            manifest: deps::resolve_manifest(answers),
            resolutions: variant::resolve_all(answers),
        }
    }
}

/// What the write phase produced
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    /// Files written by the generic render pass
    pub rendered: Vec<String>,
    /// Variant destinations written
    pub placed: Vec<String>,
    pub plan: ScaffoldPlan,
}

impl ScaffoldReport {
    /// Distinct files touched, `package.json` included
    pub fn file_count(&self) -> usize {
        let mut files: Vec<&str> = self
            .rendered
            .iter()
            .chain(self.placed.iter())
            .map(String::as_str)
            .chain(std::iter::once(PACKAGE_JSON))
            .collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }
}

/// Run the write phase (steps 4 and 5) for a plan made in steps 2 and 3
///
/// The staged manifest is committed to `package.json` after the variant
/// files are placed, so a `package.json` coming from the template tree, or
/// one already in the directory, is extended rather than replaced. The
/// project name, description and author are filled in at the same time.
pub async fn write_project(
    tree: &TemplateTree,
    target_dir: &Path,
    answers: &AnswerSet,
    plan: ScaffoldPlan,
) -> Result<ScaffoldReport, ScaffoldError> {
    let rendered = renderer::render(
        tree,
        target_dir,
        answers,
        &tree.manifest().exclude_patterns(),
    )
    .await
    .map_err(|e| ScaffoldError::new(Step::RenderTemplates, e))?;

    let placed = renderer::place_variants(tree, target_dir, &plan.resolutions)
        .await
        .map_err(|e| ScaffoldError::new(Step::PlaceVariants, e))?;

    deps::extend_package_json(&target_dir.join(PACKAGE_JSON), &plan.manifest, answers)
        .await
        .map_err(|e| ScaffoldError::new(Step::ComputeManifest, e))?;

    Ok(ScaffoldReport {
        rendered,
        placed,
        plan,
    })
}

/// Steps 2 through 6 for an answer set that is already complete
///
/// Installation runs only when an installer is given; its outcome is
/// returned alongside the report and never turns into an error.
pub async fn scaffold(
    tree: &TemplateTree,
    target_dir: &Path,
    answers: &AnswerSet,
    installer: Option<&Installer>,
) -> Result<(ScaffoldReport, InstallOutcome), ScaffoldError> {
    let plan = ScaffoldPlan::from_answers(answers);
    let report = write_project(tree, target_dir, answers, plan).await?;

    let outcome = match installer {
        Some(installer) => installer.install(target_dir).await,
        None => InstallOutcome::Skipped("no installer".to_string()),
    };

    Ok((report, outcome))
}
