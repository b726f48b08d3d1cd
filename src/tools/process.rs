use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Output};

use crate::error::{ReleaseError, Result};
use crate::tools::{BuildTool, PublishRequest, ReleaseHost, VersionControl};

/// A program invoked from a fixed working directory
#[derive(Debug, Clone)]
struct Program {
    name: String,
    workdir: PathBuf,
}

impl Program {
    fn new(name: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Program {
            name: name.into(),
            workdir: workdir.into(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.name);
        cmd.current_dir(&self.workdir);
        cmd
    }

    fn render<S: AsRef<OsStr>>(&self, args: &[S]) -> String {
        let mut line = self.name.clone();
        for arg in args {
            line.push(' ');
            line.push_str(&arg.as_ref().to_string_lossy());
        }
        line
    }

    /// Run to completion, capturing output. Spawn failures become command errors.
    fn output<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<Output> {
        let rendered = self.render(args);
        log::debug!("Running `{}` in {}", rendered, self.workdir.display());

        let output = self
            .command()
            .args(args)
            .output()
            .map_err(|e| ReleaseError::command(rendered.clone(), e.to_string()))?;

        log::debug!("`{}` exited with {}", rendered, output.status);
        Ok(output)
    }

    /// Run and return trimmed stdout, failing on a non-success status
    fn stdout<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(ReleaseError::command(self.render(args), stderr_of(&output)));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// `<program> --version` exits successfully
    fn reports_version(&self) -> Result<bool> {
        // A bad working directory fails every spawn, not just this program's.
        if !self.workdir.is_dir() {
            return Err(ReleaseError::WorkingDirectory(self.workdir.clone()));
        }

        match self.command().arg("--version").output() {
            Ok(output) if output.status.success() => {
                log::debug!(
                    "{}: {}",
                    self.name,
                    String::from_utf8_lossy(&output.stdout).trim()
                );
                Ok(true)
            }
            Ok(output) => {
                log::warn!("`{} --version` exited with {}", self.name, output.status);
                Ok(false)
            }
            Err(e) => {
                log::warn!("Cannot run `{}`: {}", self.name, e);
                Ok(false)
            }
        }
    }
}

fn stderr_of(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("exited with {}", output.status)
    } else {
        stderr
    }
}

/// Version control through the system `git` binary
#[derive(Debug, Clone)]
pub struct GitCli {
    program: Program,
}

impl GitCli {
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        GitCli {
            program: Program::new(program, workdir),
        }
    }
}

impl VersionControl for GitCli {
    fn is_available(&self) -> Result<bool> {
        self.program.reports_version()
    }

    fn current_branch(&self) -> Result<String> {
        self.program.stdout(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn is_merge_commit(&self) -> Result<bool> {
        let output = self
            .program
            .output(&["rev-parse", "-q", "--verify", "MERGE_HEAD"])?;
        Ok(output.status.success())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let stdout = self.program.stdout(&["tag", "--list"])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// GitHub release hosting through the `gh` CLI
#[derive(Debug, Clone)]
pub struct GhCli {
    program: Program,
}

impl GhCli {
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        GhCli {
            program: Program::new(program, workdir),
        }
    }

    /// Arguments passed to `gh` for a release request
    pub fn release_args(request: &PublishRequest) -> Vec<String> {
        let mut args = vec![
            "release".to_string(),
            "create".to_string(),
            request.tag.clone(),
            request.artifact.display().to_string(),
        ];
        if request.latest {
            args.push("--latest".to_string());
        }
        if request.generate_notes {
            args.push("--generate-notes".to_string());
        }
        args
    }
}

impl ReleaseHost for GhCli {
    fn is_available(&self) -> Result<bool> {
        self.program.reports_version()
    }

    fn auth_token(&self) -> Result<String> {
        let output = self.program.output(&["auth", "token"])?;
        if !output.status.success() {
            log::info!("`gh auth token` failed: {}", stderr_of(&output));
            return Ok(String::new());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn create_release(&self, request: &PublishRequest) -> Result<String> {
        let args = Self::release_args(request);
        let output = self.program.output(args.as_slice())?;
        if !output.status.success() {
            return Err(ReleaseError::publish(format!(
                "`{}`: {}",
                self.program.render(args.as_slice()),
                stderr_of(&output)
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Build operations through `cargo`
#[derive(Debug, Clone)]
pub struct CargoCli {
    program: Program,
}

impl CargoCli {
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        CargoCli {
            program: Program::new(program, workdir),
        }
    }
}

impl BuildTool for CargoCli {
    fn package_id(&self) -> Result<String> {
        self.program.stdout(&["pkgid"])
    }

    fn build_release(&self) -> Result<()> {
        let args = ["build", "--release"];
        let output = self.program.output(args.as_slice())?;
        if !output.status.success() {
            return Err(ReleaseError::build(format!(
                "`{}`: {}",
                self.program.render(args.as_slice()),
                stderr_of(&output)
            )));
        }
        Ok(())
    }
}
