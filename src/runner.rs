use indicatif::ProgressBar;
use std::io;
use std::process::Command;
use std::time::Duration;
use thiserror::Error;

/// How a command's standard streams are wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Output is collected and echoed once the command finishes; a spinner
    /// runs while it does.
    Captured,
    /// The child shares the terminal so the user can answer sudo password
    /// prompts. No spinner, it would corrupt the prompt.
    Interactive,
}

/// A command to execute: a structured argv, or a fixed shell pipeline that
/// needs `sh -c` (e.g. `curl ... | sh -`). Paths and package names always go
/// through the argv form so they are never re-parsed by a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    Argv { program: String, args: Vec<String> },
    Shell(String),
}

impl CommandSpec {
    pub fn argv<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::Argv {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn shell(command: impl Into<String>) -> Self {
        CommandSpec::Shell(command.into())
    }

    /// Single-line rendering for logs and error messages.
    pub fn display(&self) -> String {
        match self {
            CommandSpec::Argv { program, args } => {
                if args.is_empty() {
                    program.clone()
                } else {
                    format!("{} {}", program, args.join(" "))
                }
            }
            CommandSpec::Shell(line) => line.clone(),
        }
    }

    fn to_command(&self) -> Command {
        match self {
            CommandSpec::Argv { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                cmd
            }
            CommandSpec::Shell(line) => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(line);
                cmd
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to spawn `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with status {code}")]
    Failed { command: String, code: i32 },
}

/// Pass-through command executor. Implementations never run two commands
/// concurrently; the session awaits each call before issuing the next.
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec, mode: Mode) -> Result<(), RunError>;
}

/// Real executor backed by child processes.
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, spec: &CommandSpec, mode: Mode) -> Result<(), RunError> {
        let display = spec.display();
        log::debug!("Executing: {}", display);

        match mode {
            Mode::Captured => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_message(format!("Running: {}", display));
                spinner.enable_steady_tick(Duration::from_millis(100));

                let output = spec.to_command().output();
                spinner.finish_and_clear();

                let output = output.map_err(|source| RunError::Spawn {
                    command: display.clone(),
                    source,
                })?;

                if output.status.success() {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    if !stdout.trim().is_empty() {
                        println!("{}", stdout.trim_end());
                    }
                    Ok(())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    if !stderr.trim().is_empty() {
                        eprintln!("{}", stderr.trim_end());
                    }
                    Err(RunError::Failed {
                        command: display,
                        code: output.status.code().unwrap_or(-1),
                    })
                }
            }

            Mode::Interactive => {
                let status = spec.to_command().status().map_err(|source| RunError::Spawn {
                    command: display.clone(),
                    source,
                })?;

                if status.success() {
                    Ok(())
                } else {
                    Err(RunError::Failed {
                        command: display,
                        code: status.code().unwrap_or(-1),
                    })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argv_display_joins_program_and_args() {
        let spec = CommandSpec::argv("sudo", ["pacman", "-S", "git", "--noconfirm"]);
        assert_eq!(spec.display(), "sudo pacman -S git --noconfirm");
    }

    #[test]
    fn shell_display_is_verbatim() {
        let spec = CommandSpec::shell("curl -fsSL https://get.pnpm.io/install.sh | sh -");
        assert_eq!(spec.display(), "curl -fsSL https://get.pnpm.io/install.sh | sh -");
    }

    #[test]
    fn captured_success() {
        let runner = ShellRunner::new();
        let spec = CommandSpec::argv("true", Vec::<String>::new());
        assert!(runner.run(&spec, Mode::Captured).is_ok());
    }

    #[test]
    fn captured_nonzero_exit_maps_to_failed() {
        let runner = ShellRunner::new();
        let spec = CommandSpec::shell("exit 3");
        match runner.run(&spec, Mode::Captured) {
            Err(RunError::Failed { command, code }) => {
                assert_eq!(command, "exit 3");
                assert_eq!(code, 3);
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn missing_program_maps_to_spawn_error() {
        let runner = ShellRunner::new();
        let spec = CommandSpec::argv("archup-no-such-binary", Vec::<String>::new());
        match runner.run(&spec, Mode::Captured) {
            Err(RunError::Spawn { command, .. }) => {
                assert_eq!(command, "archup-no-such-binary");
            }
            other => panic!("expected Spawn, got {:?}", other),
        }
    }
}
