//! Runtime detection for Node.js and npm

use std::fmt;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl fmt::Display for RuntimeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.available {
            write!(
                f,
                "{} ({})",
                self.name,
                self.version.as_deref().unwrap_or("unknown")
            )
        } else {
            write!(f, "{} (not installed)", self.name)
        }
    }
}

/// Run `<program> --version` and report what came back
pub fn check_program(name: &'static str, program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    check_program("Node.js", "node")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    check_program("npm", "npm")
}

/// Everything the generated project needs to install and run
pub fn check_runtimes() -> Vec<RuntimeInfo> {
    vec![check_node(), check_npm()]
}

/// Names of runtimes that were not found
pub fn missing(runtimes: &[RuntimeInfo]) -> Vec<&'static str> {
    runtimes
        .iter()
        .filter(|r| !r.available)
        .map(|r| r.name)
        .collect()
}
