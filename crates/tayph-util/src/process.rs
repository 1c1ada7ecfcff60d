//! Probes of the host environment through external commands.
//!
//! Command execution goes through [`ProcessRunner`] and the OS-specific
//! choice of lookup tool through [`Platform`], so both probes can be driven
//! by a scripted runner in tests.

use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Runs an external program to completion.
pub trait ProcessRunner {
    /// Run `program` with `args` and return its stdout. A non-zero exit
    /// status is an error.
    fn run(&self, program: &str, args: &[&str]) -> Result<Vec<u8>>;
}

/// Runs commands with [`std::process::Command`].
///
/// stdin is inherited so that terminal queries see the controlling terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Vec<u8>> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::Process {
                program: program.to_owned(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Process {
                program: program.to_owned(),
                detail: format!("{} {}", output.status, stderr.trim()),
            });
        }
        Ok(output.stdout)
    }
}

/// Host OS family, as far as command lookup is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// The command that resolves a name on `PATH`.
    pub fn lookup_command(self) -> &'static str {
        match self {
            Platform::Windows => "where",
            Platform::Unix => "which",
        }
    }
}

/// Whether `alias` resolves to an executable on this system.
pub fn test_alias(alias: &str) -> bool {
    test_alias_with(&SystemRunner, Platform::current(), alias)
}

/// [`test_alias`] with an explicit runner and platform. Every failure,
/// including a runner that cannot start the lookup tool, reads as `false`.
pub fn test_alias_with<R>(runner: &R, platform: Platform, alias: &str) -> bool
where
    R: ProcessRunner + ?Sized,
{
    match runner.run(platform.lookup_command(), &[alias]) {
        Ok(location) => {
            log::debug!(
                "{alias} found at {}",
                String::from_utf8_lossy(&location).trim()
            );
            true
        }
        Err(e) => {
            log::debug!("{alias} not found: {e}");
            false
        }
    }
}

/// Width of the controlling terminal in columns, as reported by `stty size`.
pub fn get_term_width() -> Result<String> {
    get_term_width_with(&SystemRunner)
}

/// [`get_term_width`] with an explicit runner.
pub fn get_term_width_with<R: ProcessRunner + ?Sized>(runner: &R) -> Result<String> {
    let output = runner.run("stty", &["size"])?;
    let text = String::from_utf8_lossy(&output);
    let fields: Vec<&str> = text.split_whitespace().collect();
    if let [_height, width] = fields.as_slice() {
        return Ok((*width).to_owned());
    }
    Err(Error::TerminalGeometry(text.to_string()))
}
