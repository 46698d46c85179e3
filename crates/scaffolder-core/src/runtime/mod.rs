//! Runtime detection and package installation
//!
//! This module provides:
//! - Node.js / npm detection
//! - The package installer run after the files are written

pub mod check;
pub mod installer;

pub use check::{check_node, check_npm, check_runtimes, RuntimeInfo};
pub use installer::{InstallOutcome, Installer, InstallerConfig};
