//! React Stack CLI - Project scaffolding for React + Express + webpack apps

use anyhow::Result;
use clap::{Parser, Subcommand};
use include_dir::{include_dir, Dir};
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::{CssPreprocessor, ProductConfig};
use std::path::{Path, PathBuf};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

static TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// React Stack product configuration
#[derive(Clone)]
pub struct ReactStackConfig;

impl ProductConfig for ReactStackConfig {
    fn display_name(&self) -> &'static str {
        "React Stack"
    }

    fn embedded_templates(&self) -> &'static Dir<'static> {
        &TEMPLATES
    }

    fn template_dir_env(&self) -> &'static str {
        "REACT_STACK_TEMPLATE_DIR"
    }

    fn docs_url(&self) -> &'static str {
        "https://react.dev/learn"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install react-stack --force"
    }

    fn next_steps(&self, dir: &Path, installed: bool) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Install dependencies if the installer didn't
        if !installed {
            steps.push("npm install".to_string());
        }

        // Step 3: Configure the server
        steps.push("cp .env.example .env".to_string());

        // Step 4: Start dev server
        steps.push("npm run dev".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-react-stack")]
#[command(about = "CLI for scaffolding React + Express + webpack projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new React Stack project
    Create(CliCreateArgs),
    /// Show the template tree and the variant files each option selects
    Templates(TemplatesArgs),
}

#[derive(Parser, Debug, Default)]
pub struct CliCreateArgs {
    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Project directory to create
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Git repository name
    #[arg(long)]
    pub repo_name: Option<String>,

    /// Project description
    #[arg(long)]
    pub description: Option<String>,

    /// Author's name (defaults to git user.name)
    #[arg(long)]
    pub author_name: Option<String>,

    /// Author's email (defaults to git user.email)
    #[arg(long)]
    pub author_email: Option<String>,

    /// GitHub username (defaults to git user.name)
    #[arg(long)]
    pub github_username: Option<String>,

    /// CSS preprocessor
    #[arg(long, value_enum)]
    pub css: Option<CssPreprocessor>,

    /// Add stylelint to the project
    #[arg(long)]
    pub stylelint: bool,

    /// Write the project without running npm install
    #[arg(long)]
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            directory: args.directory,
            repo_name: args.repo_name,
            description: args.description,
            author_name: args.author_name,
            author_email: args.author_email,
            github_username: args.github_username,
            css_preprocessor: args.css,
            // Without the flag the prompt asks (or --yes declines)
            stylelint: args.stylelint.then_some(true),
            skip_install: args.skip_install,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct TemplatesArgs {
    /// Local directory containing templates to inspect (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = ReactStackConfig;

    match args.command {
        Some(Command::Templates(templates_args)) => {
            scaffolder_core::templates::describe(&config, templates_args.template_dir).await
        }
        command => {
            // No subcommand provided, default to create behavior (interactive mode)
            let create_args = match command {
                Some(Command::Create(create_args)) => create_args.into(),
                _ => CreateArgs::default(),
            };
            let result = scaffolder_core::run(&config, create_args, CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
