//! Charm-style CLI prompts using cliclack

use crate::answers::{AnswerSet, CssPreprocessor};
use crate::product::ProductConfig;
use crate::runtime::{check, InstallOutcome, Installer};
use crate::scaffold::{self, ScaffoldError, ScaffoldPlan, ScaffoldReport, Step};
use crate::templates::{version, TemplateSource, TemplateTree};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,

    /// Project directory to create
    pub directory: Option<PathBuf>,

    pub repo_name: Option<String>,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub github_username: Option<String>,
    pub css_preprocessor: Option<CssPreprocessor>,
    pub stylelint: Option<bool>,

    /// Write the files but don't run the installer
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let tree = load_templates(config, &args, cli_version).await?;

    let project_dir = select_directory(&args)?;

    // Step 1
    let answers = collect_answers(&args, &project_dir)?;

    // Steps 2 and 3
    let plan = ScaffoldPlan::from_answers(&answers);
    show_plan(&plan)?;

    // Steps 4 and 5
    let report = create_project(&tree, &project_dir, &answers, plan).await?;

    // Step 6
    let outcome = install_dependencies(config, &args, &project_dir).await?;

    print_next_steps(config, &project_dir, &report, &outcome)?;

    Ok(())
}

async fn load_templates<C: ProductConfig>(
    config: &C,
    args: &CreateArgs,
    cli_version: &str,
) -> Result<TemplateTree> {
    let source = TemplateSource::from_config(config, args.template_dir.clone());
    cliclack::log::info(format!("Using {}", source.describe()))?;

    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    let tree = match TemplateTree::load(&source).await {
        Ok(tree) => tree,
        Err(e) => {
            spinner.stop("Failed to load templates");
            return Err(e);
        }
    };

    spinner.stop(format!(
        "Template: {} ({} files)",
        tree.manifest().name,
        tree.len()
    ));

    if let Some(warning) = version::check_compatibility(
        cli_version,
        &tree.manifest().version,
        config.upgrade_command(),
    ) {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    Ok(tree)
}

fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use --directory flag if provided
    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.yes {
        current_dir
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir
        } else {
            let p = PathBuf::from(&input);
            if p.is_absolute() {
                p
            } else {
                current_dir.join(p)
            }
        }
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    // Warn if directory exists and has files
    if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                // Auto-confirm with --yes flag
                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

/// Read a value from the local git config, empty when unavailable
fn git_config(key: &str) -> String {
    std::process::Command::new("git")
        .args(["config", "--get", key])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Prompt for a text answer unless a flag or --yes already decided it
fn text_answer(
    prompt: &str,
    preset: &Option<String>,
    default: &str,
    required: bool,
    yes: bool,
) -> Result<String> {
    if let Some(value) = preset {
        return Ok(value.clone());
    }
    if yes {
        return Ok(default.to_string());
    }

    let mut input = cliclack::input(prompt).required(required);
    if !default.is_empty() {
        input = input.default_input(default);
    }
    let value: String = input.interact()?;
    Ok(value.trim().to_string())
}

fn collect_answers(args: &CreateArgs, project_dir: &Path) -> Result<AnswerSet> {
    let dir_name = project_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let git_name = git_config("user.name");
    let git_email = git_config("user.email");

    let repo_name = text_answer("Git repo name", &args.repo_name, &dir_name, true, args.yes)?;
    if repo_name.is_empty() {
        anyhow::bail!("A repository name is required (pass --repo-name)");
    }
    let description = text_answer("Description", &args.description, "", false, args.yes)?;
    let author_name = text_answer("Author's name", &args.author_name, &git_name, false, args.yes)?;
    let author_email = text_answer(
        "Author's email",
        &args.author_email,
        &git_email,
        false,
        args.yes,
    )?;
    let github_username = text_answer(
        "GitHub username",
        &args.github_username,
        &git_name,
        false,
        args.yes,
    )?;

    let css_preprocessor = match args.css_preprocessor {
        Some(css) => css,
        None if args.yes => CssPreprocessor::default(),
        None => {
            let mut select = cliclack::select("Select a CSS preprocessor");
            for css in CssPreprocessor::ALL {
                select = select.item(css, css.display_name(), css.tag());
            }
            select.initial_value(CssPreprocessor::default()).interact()?
        }
    };

    let stylelint = match args.stylelint {
        Some(value) => value,
        None if args.yes => false,
        None => cliclack::confirm("Would you like to use stylelint?")
            .initial_value(false)
            .interact()?,
    };

    let answers = AnswerSet {
        repo_name,
        description,
        author_name,
        author_email,
        github_username,
        css_preprocessor,
        stylelint,
    };

    cliclack::log::success(format!(
        "{} with {}{}",
        answers.repo_name,
        answers.css_preprocessor.display_name(),
        if answers.stylelint { " + stylelint" } else { "" }
    ))?;

    Ok(answers)
}

fn show_plan(plan: &ScaffoldPlan) -> Result<()> {
    cliclack::log::info(format!(
        "Dependencies: {} runtime, {} build-time",
        plan.manifest.dependencies.len(),
        plan.manifest.dev_dependencies.len()
    ))?;
    for resolution in &plan.resolutions {
        cliclack::log::info(format!(
            "{} <- {}",
            resolution.destination(),
            resolution.source
        ))?;
    }
    Ok(())
}

async fn create_project(
    tree: &TemplateTree,
    project_dir: &Path,
    answers: &AnswerSet,
    plan: ScaffoldPlan,
) -> Result<ScaffoldReport> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let result: Result<ScaffoldReport, ScaffoldError> =
        scaffold::write_project(tree, project_dir, answers, plan).await;

    match result {
        Ok(report) => {
            spinner.stop(format!(
                "Created {} files in {}",
                report.file_count(),
                project_dir.display()
            ));
            Ok(report)
        }
        Err(e) => {
            spinner.stop(e.to_string());
            cliclack::log::error(format!("{:#}", e.source))?;
            cliclack::log::warning(format!(
                "{} may contain a partial project",
                project_dir.display()
            ))?;
            Err(e.into())
        }
    }
}

async fn install_dependencies<C: ProductConfig>(
    config: &C,
    args: &CreateArgs,
    project_dir: &Path,
) -> Result<InstallOutcome> {
    if args.skip_install {
        cliclack::log::info("Skipping dependency installation")?;
        return Ok(InstallOutcome::Skipped("--skip-install".to_string()));
    }

    let installer = Installer::new(config.installer());

    let runtimes = check::check_runtimes();
    let summary: Vec<String> = runtimes.iter().map(ToString::to_string).collect();
    cliclack::log::info(format!("Detected runtimes: {}", summary.join(", ")))?;

    let absent = check::missing(&runtimes);
    if !absent.is_empty() {
        cliclack::log::warning(format!(
            "{} not found; the project needs it to build and run",
            absent.join(" and ")
        ))?;
    }

    if !installer.is_available() {
        let name = installer.config().display_name;
        cliclack::log::warning(format!("{} is not installed", name))?;

        if !args.yes {
            let open_docs: bool = cliclack::confirm(format!("Open the {} download page?", name))
                .initial_value(false)
                .interact()?;
            if open_docs {
                installer.open_docs()?;
            }
        }
        return Ok(InstallOutcome::Skipped(format!("{} not found", name)));
    }

    cliclack::log::step(Step::Install.to_string())?;
    let outcome = installer.install(project_dir).await;

    match &outcome {
        InstallOutcome::Installed => {
            cliclack::log::success("Dependencies installed")?;
        }
        InstallOutcome::Failed(reason) => {
            // The project files are complete; a failed install is not a failed scaffold
            cliclack::log::warning(format!("Dependency installation failed: {}", reason))?;
        }
        InstallOutcome::Skipped(_) => {}
    }

    Ok(outcome)
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    report: &ScaffoldReport,
    outcome: &InstallOutcome,
) -> Result<()> {
    let steps = config.next_steps(project_dir, outcome.is_installed());

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    if report.plan.manifest.contains("stylelint") {
        println!();
        println!("  stylelint was added; configure it with a .stylelintrc");
    }

    println!();
    println!("  Docs: {}", config.docs_url());

    cliclack::outro("Happy coding!")?;

    Ok(())
}
