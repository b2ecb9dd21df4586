//! External process handoff for atax.
//!
//! Viewing and editing is delegated to external programs. A [Launch] is resolved from a
//! list of candidates (first one found on `PATH` wins) and run by [run_suspended], which
//! hands the terminal to the child and takes it back when the child exits.
//!
//! Candidates starting with `$` name an environment variable (`$PAGER`, `$EDITOR`) whose
//! value is used as the command. Unset or empty variables are skipped.

use crate::core::{FmError, FmResult};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// A resolved external program invocation with the file path as the last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    program: PathBuf,
    args: Vec<OsString>,
    path: PathBuf,
}

impl Launch {
    pub fn new(program: PathBuf, args: Vec<OsString>, path: PathBuf) -> Self {
        Self {
            program,
            args,
            path,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(&self.path);
        cmd
    }
}

/// Expands one candidate into the program name and its extra arguments.
fn expand_candidate(candidate: &str) -> Option<(String, Vec<OsString>)> {
    let command = match candidate.strip_prefix('$') {
        Some(var) => env::var(var).ok()?,
        None => candidate.to_string(),
    };
    let mut parts = command.split_whitespace();
    let program = parts.next()?.to_string();
    let args = parts.map(OsString::from).collect();
    Some((program, args))
}

/// Returns the first candidate that resolves to an executable on `PATH`.
pub fn resolve_program(candidates: &[String]) -> Option<(PathBuf, Vec<OsString>)> {
    candidates.iter().find_map(|c| {
        let (program, args) = expand_candidate(c)?;
        which::which(&program).ok().map(|path| (path, args))
    })
}

/// Builds a [Launch] for `path` from the candidate list.
///
/// `role` names the program kind in the error ("viewer", "editor").
pub fn prepare_launch(candidates: &[String], role: &str, path: &Path) -> FmResult<Launch> {
    let (program, args) = resolve_program(candidates)
        .ok_or_else(|| FmError::ExternalProcessMissing(role.to_string()))?;
    Ok(Launch::new(program, args, path.to_path_buf()))
}

/// Leaves raw mode and the alternate screen, runs the launch to completion and restores
/// the terminal. The terminal is restored even if spawning the child failed.
pub fn run_suspended(launch: &Launch) -> io::Result<ExitStatus> {
    let mut stdout = io::stdout();
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    tracing::info!(program = %launch.program.display(), file = %launch.path.display(), "launching");
    let status = launch.command().status();

    execute!(io::stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    status
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_candidates_split_arguments() {
        let (program, args) = expand_candidate("less -R").unwrap_or_default();
        assert_eq!(program, "less");
        assert_eq!(args, vec![OsString::from("-R")]);
        assert!(expand_candidate("   ").is_none());
    }

    #[test]
    fn unset_variables_are_skipped() {
        assert!(expand_candidate("$ATAX_TEST_SURELY_UNSET_VARIABLE").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn resolve_picks_first_installed() {
        let candidates = vec![
            "atax-no-such-program-here".to_string(),
            "sh".to_string(),
            "cat".to_string(),
        ];
        let (program, args) = resolve_program(&candidates).unwrap_or_default();
        assert_eq!(program.file_name().and_then(|n| n.to_str()), Some("sh"));
        assert!(args.is_empty());
    }

    #[test]
    fn missing_programs_report_role() {
        let candidates = vec!["atax-no-such-program-here".to_string()];
        let err = prepare_launch(&candidates, "viewer", Path::new("/tmp/x"))
            .err()
            .map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("No viewer found"));
    }

    #[cfg(unix)]
    #[test]
    fn launch_appends_path_last() -> Result<(), Box<dyn std::error::Error>> {
        let launch = prepare_launch(&["cat -n".to_string()], "viewer", Path::new("/etc/hosts"))?;
        assert_eq!(launch.args(), &[OsString::from("-n")]);
        assert_eq!(launch.path(), Path::new("/etc/hosts"));
        let cmd = launch.command();
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec!["-n", "/etc/hosts"]);
        Ok(())
    }
}
