//! External-tool invocation with artifact-existence idempotency checks.

use anyhow::Context;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Outcome of `run_if_needed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Ran,
    Skipped,
}

/// A blocking external command whose stdout lands in a target artifact, or
/// whose stdout and stderr are diverted to a log file while the tool writes
/// the artifact itself.
///
/// The program is resolved against `$PATH` only when the command actually
/// runs; a satisfied idempotency check never touches the binary.
pub struct ToolCmd {
    program: String,
    args: Vec<String>,
    target: PathBuf,
    log_file: Option<PathBuf>,
}

impl ToolCmd {
    pub fn new(program: &str, target: &Path) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            target: target.to_path_buf(),
            log_file: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Divert stdout and stderr to this log file instead of the artifact.
    pub fn log_to(mut self, log_file: &Path) -> Self {
        self.log_file = Some(log_file.to_path_buf());
        self
    }

    fn label(&self) -> String {
        Path::new(&self.program)
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.clone())
    }

    /// The exact shell-style command line, as logged before execution.
    pub fn rendered(&self) -> String {
        let mut parts = vec![self.program.clone()];
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                parts.push(format!("\"{}\"", arg));
            } else {
                parts.push(arg.clone());
            }
        }

        match &self.log_file {
            Some(log_file) => format!(
                "{} > {} 2>&1",
                parts.join(" "),
                log_file.display()
            ),
            None => format!("{} > {}", parts.join(" "), self.target.display()),
        }
    }

    /// Executes unconditionally. The exit status is awaited but not treated
    /// as the success signal; the artifact's existence is. A failing status
    /// is logged as a warning.
    pub fn run(&self) -> anyhow::Result<()> {
        let program = which::which(&self.program)
            .map_err(|_| anyhow::anyhow!("{} not found in PATH", self.program))?;

        debug!("[Run] {}", self.rendered());

        let mut cmd = std::process::Command::new(program);
        cmd.args(&self.args);

        match &self.log_file {
            Some(log_file) => {
                let file = std::fs::File::create(log_file)
                    .with_context(|| format!("could not create {}", log_file.display()))?;
                cmd.stdout(file.try_clone()?);
                cmd.stderr(file);
            }
            None => {
                let file = std::fs::File::create(&self.target)
                    .with_context(|| format!("could not create {}", self.target.display()))?;
                cmd.stdout(file);
            }
        }

        let status = cmd
            .status()
            .with_context(|| format!("could not execute {}", self.program))?;
        if !status.success() {
            warn!("{} exited with {}", self.label(), status);
        }

        Ok(())
    }

    /// Skips execution when the target artifact already exists; with
    /// `rerun_if_empty`, a zero-byte artifact counts as not yet produced.
    pub fn run_if_needed(&self, rerun_if_empty: bool) -> anyhow::Result<Invocation> {
        if artifact_finished(&self.target, rerun_if_empty) {
            debug!(
                "[Note] Running {} has already been finished",
                self.label()
            );
            return Ok(Invocation::Skipped);
        }

        self.run()?;
        Ok(Invocation::Ran)
    }
}

fn artifact_finished(target: &Path, rerun_if_empty: bool) -> bool {
    if !target.exists() {
        return false;
    }
    if !rerun_if_empty {
        return true;
    }

    std::fs::metadata(target).map(|m| m.len() > 0).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_invocation_is_skipped() -> anyhow::Result<()> {
        if which::which("echo").is_err() {
            return Ok(());
        }

        let tempdir = tempfile::TempDir::new()?;
        let target = tempdir.path().join("artifact.txt");

        let cmd = ToolCmd::new("echo", &target).arg("hello");
        assert_eq!(cmd.run_if_needed(false)?, Invocation::Ran);
        assert_eq!(cmd.run_if_needed(false)?, Invocation::Skipped);

        let content = std::fs::read_to_string(&target)?;
        assert_eq!(content, "hello\n");

        Ok(())
    }

    #[test]
    fn empty_artifact_triggers_rerun() -> anyhow::Result<()> {
        if which::which("true").is_err() {
            return Ok(());
        }

        let tempdir = tempfile::TempDir::new()?;
        let target = tempdir.path().join("artifact.txt");

        // `true` writes nothing, leaving a zero-byte artifact behind.
        let cmd = ToolCmd::new("true", &target);
        assert_eq!(cmd.run_if_needed(true)?, Invocation::Ran);
        assert_eq!(cmd.run_if_needed(true)?, Invocation::Ran);
        assert_eq!(cmd.run_if_needed(false)?, Invocation::Skipped);

        Ok(())
    }

    #[test]
    fn missing_program_is_an_error() {
        let tempdir = tempfile::TempDir::new().unwrap();
        let target = tempdir.path().join("artifact.txt");

        let cmd = ToolCmd::new("no-such-binary-0xdead", &target);
        let err = cmd.run_if_needed(false).unwrap_err();

        assert!(err.to_string().contains("not found in PATH"));
        assert!(!target.exists());
    }

    #[test]
    fn rendered_quotes_multiword_args() {
        let cmd = ToolCmd::new("blastp", Path::new("out.tsv"))
            .arg("-outfmt")
            .arg("6 qseqid sseqid")
            .log_to(Path::new("blastp.log"));

        assert_eq!(
            cmd.rendered(),
            "blastp -outfmt \"6 qseqid sseqid\" > blastp.log 2>&1"
        );
    }
}
