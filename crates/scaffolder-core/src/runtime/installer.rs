//! Package installer invocation
//!
//! Runs the installer (npm by default) inside the generated project and
//! streams its output. Whether the install succeeds is reported back to the
//! caller but never affects the files already written.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Configuration for a package installer
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// Binary to run (e.g., "npm")
    pub program: &'static str,
    /// Arguments passed to the binary
    pub args: &'static [&'static str],
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Where to send users who don't have the installer
    pub docs_url: &'static str,
}

impl InstallerConfig {
    pub fn npm() -> Self {
        Self {
            program: "npm",
            args: &["install"],
            display_name: "npm",
            docs_url: "https://nodejs.org/en/download",
        }
    }
}

/// What happened when the install step ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Failed(String),
    Skipped(String),
}

impl InstallOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, InstallOutcome::Installed)
    }
}

/// Runs the configured installer in a project directory
pub struct Installer {
    config: InstallerConfig,
}

impl Installer {
    pub fn new(config: InstallerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InstallerConfig {
        &self.config
    }

    /// The command line as shown to the user
    pub fn command_line(&self) -> String {
        std::iter::once(self.config.program)
            .chain(self.config.args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the installer is available in PATH
    pub fn is_available(&self) -> bool {
        std::process::Command::new(self.config.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Run the installer in `dir`, streaming its output
    pub async fn install(&self, dir: &Path) -> InstallOutcome {
        match self.run(dir).await {
            Ok(()) => InstallOutcome::Installed,
            Err(e) => InstallOutcome::Failed(format!("{:#}", e)),
        }
    }

    async fn run(&self, dir: &Path) -> Result<()> {
        let cmd = self.command_line();
        println!();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        println!();

        let mut child = TokioCommand::new(self.config.program)
            .args(self.config.args)
            .current_dir(dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start {}", cmd))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("Failed to capture stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow::anyhow!("Failed to capture stderr"))?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();
        let mut stdout_open = true;
        let mut stderr_open = true;

        while stdout_open || stderr_open {
            tokio::select! {
                line = stdout_reader.next_line(), if stdout_open => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => stdout_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            stdout_open = false;
                        }
                    }
                }
                line = stderr_reader.next_line(), if stderr_open => {
                    match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        Ok(None) => stderr_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                            stderr_open = false;
                        }
                    }
                }
            }
        }

        let status = child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for {}", cmd))?;
        println!();

        if status.success() {
            Ok(())
        } else {
            anyhow::bail!(
                "{} exited with code {}. Run it manually inside {}",
                cmd,
                status.code().unwrap_or(-1),
                dir.display()
            );
        }
    }

    /// Open the installer's download page in the default browser
    pub fn open_docs(&self) -> Result<()> {
        println!(
            "{}",
            format!(
                "Opening {} download page in your browser...",
                self.config.display_name
            )
            .cyan()
        );
        open::that(self.config.docs_url)?;
        Ok(())
    }
}
