use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::catalog::Package;
use crate::runner::{CommandRunner, CommandSpec, Mode};

/// One declarative operation in a menu item's action sequence. Each item is
/// an ordered list of these, interpreted by a single executor instead of
/// per-item ad-hoc command strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Privileged package install, attached to the terminal.
    InstallPackage(Package),
    /// Arbitrary command through the runner.
    Run { spec: CommandSpec, mode: Mode },
    /// Write a file (e.g. a desktop launcher entry), creating parents.
    WriteFile { path: PathBuf, contents: String },
    /// Append a line to a shell rc file. Best-effort: failures degrade to a
    /// warning and never abort the item.
    AppendLine { path: PathBuf, line: String },
}

impl Step {
    pub fn run(spec: CommandSpec, mode: Mode) -> Self {
        Step::Run { spec, mode }
    }

    /// Human-readable description for dry runs and failure messages.
    pub fn describe(&self) -> String {
        match self {
            Step::InstallPackage(pkg) => pkg.install_spec().display(),
            Step::Run { spec, .. } => spec.display(),
            Step::WriteFile { path, .. } => format!("write {}", path.display()),
            Step::AppendLine { path, line } => {
                format!("append `{}` to {}", line, path.display())
            }
        }
    }
}

/// Execute one item's steps strictly in order, awaiting each before the
/// next. The first hard failure aborts the remaining steps of this item.
pub fn execute_steps<R: CommandRunner>(steps: &[Step], runner: &R, dry_run: bool) -> Result<()> {
    for step in steps {
        if dry_run {
            println!("  → Would run: {}", step.describe());
            continue;
        }

        execute_step(step, runner)?;
    }

    Ok(())
}

fn execute_step<R: CommandRunner>(step: &Step, runner: &R) -> Result<()> {
    match step {
        Step::InstallPackage(pkg) => {
            runner.run(&pkg.install_spec(), Mode::Interactive)?;
            Ok(())
        }

        Step::Run { spec, mode } => {
            runner.run(spec, *mode)?;
            Ok(())
        }

        Step::WriteFile { path, contents } => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            log::info!("✓ Wrote {}", path.display());
            Ok(())
        }

        Step::AppendLine { path, line } => {
            if let Err(e) = append_line(path, line) {
                log::warn!("Could not update {}: {:#}", path.display(), e);
            }
            Ok(())
        }
    }
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    // Re-running the installer must not stack duplicate aliases.
    if path.exists() {
        let existing = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if existing.lines().any(|l| l.trim() == line) {
            log::info!("✓ {} already contains `{}`", path.display(), line);
            return Ok(());
        }
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    writeln!(file, "{}", line).with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("✓ Added `{}` to {}", line, path.display());
    Ok(())
}
