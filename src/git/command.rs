use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::diagnostic::{Diagnostic, Reporter};
use crate::git::Repository;

/// Default client binaries, tried in order
pub fn default_executables() -> Vec<String> {
    if cfg!(windows) {
        vec!["git.cmd".to_string(), "git.exe".to_string()]
    } else {
        vec!["git".to_string()]
    }
}

/// Inspector backed by the git command line client.
///
/// Every query runs with the package root as working directory.
pub struct GitCommand {
    root: PathBuf,
    executables: Vec<String>,
    reporter: Reporter,
}

impl GitCommand {
    /// Create an inspector for the checkout containing `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        GitCommand {
            root: root.as_ref().to_path_buf(),
            executables: default_executables(),
            reporter: Reporter::default(),
        }
    }

    /// Replace the list of client binaries to try
    pub fn with_executables(mut self, executables: Vec<String>) -> Self {
        self.executables = executables;
        self
    }

    pub fn with_reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Run a git subcommand and return its trimmed stdout.
    ///
    /// Falls through to the next executable only when the current one does
    /// not exist; any other failure ends the query with `None`.
    fn run(&self, args: &[&str]) -> Option<String> {
        for executable in &self.executables {
            let command = format!("{} {}", executable, args.join(" "));
            self.reporter.report(Diagnostic::TryingCommand {
                command: command.clone(),
            });

            let stderr = if self.reporter.is_verbose() {
                Stdio::inherit()
            } else {
                Stdio::null()
            };

            let output = match Command::new(executable)
                .args(args)
                .current_dir(&self.root)
                .stdin(Stdio::null())
                .stderr(stderr)
                .output()
            {
                Ok(output) => output,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    self.reporter.report(Diagnostic::CommandFailed {
                        command,
                        reason: e.to_string(),
                    });
                    return None;
                }
            };

            if !output.status.success() {
                let reason = match output.status.code() {
                    Some(code) => format!("exit code {}", code),
                    None => "terminated by signal".to_string(),
                };
                self.reporter
                    .report(Diagnostic::CommandFailed { command, reason });
                return None;
            }

            return Some(String::from_utf8_lossy(&output.stdout).trim().to_string());
        }

        self.reporter.report(Diagnostic::CommandNotFound {
            tried: self.executables.clone(),
        });
        None
    }
}

/// Interpret `describe --dirty` output; no output at all counts as dirty
pub(crate) fn describe_is_dirty(describe: Option<&str>) -> bool {
    describe.map_or(true, |d| d.ends_with("-dirty"))
}

/// Parse `rev-list --count` output
pub(crate) fn parse_count(output: &str) -> Option<u64> {
    output.trim().parse().ok()
}

impl Repository for GitCommand {
    fn current_branch(&self) -> Option<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn is_dirty(&self) -> bool {
        let describe = self.run(&["describe", "--tags", "--dirty", "--always"]);
        describe_is_dirty(describe.as_deref())
    }

    fn full_commit_id(&self) -> Option<String> {
        self.run(&["rev-parse", "HEAD"])
    }

    fn short_commit_id(&self) -> Option<String> {
        self.run(&["rev-parse", "--short", "HEAD"])
    }

    fn nearest_tag(&self) -> Option<String> {
        self.run(&["describe", "--tags", "--abbrev=0", "--always"])
    }

    fn distance_from(&self, reference: &str) -> Option<u64> {
        let range = format!("{}..HEAD", reference);
        let output = self.run(&["rev-list", &range, "--count"])?;
        parse_count(&output)
    }
}
