use chrono::Utc;
use gangway_core::{GangwayError, LaunchReport, LaunchSpec, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;
use uuid::Uuid;

/// Launches the pre-built application binary with the platform environment.
#[derive(Debug, Clone, Default)]
pub struct BinaryLauncher;

impl BinaryLauncher {
    pub fn new() -> Self {
        Self
    }

    /// Launch the binary and block until it exits.
    ///
    /// Stdio is inherited, so the child's output goes wherever ours does.
    /// The exit status is recorded and logged but never interpreted; a
    /// crashing or non-zero child is the platform supervisor's problem.
    pub fn launch(&self, spec: &LaunchSpec) -> Result<LaunchReport> {
        let id = Uuid::new_v4();
        let started_at = Utc::now();
        let start_instant = std::time::Instant::now();
        let port = spec.resolved_port();

        info!(
            launch_id = %id,
            binary = %spec.binary.display(),
            port = %port,
            "Launching application binary"
        );

        let status = self.command(spec)?.status()?;

        let duration_ms = start_instant.elapsed().as_millis() as u64;
        let completed_at = Utc::now();

        info!(
            launch_id = %id,
            exit_code = ?status.code(),
            duration_ms,
            "Application binary exited"
        );

        Ok(LaunchReport {
            id,
            binary: spec.binary.clone(),
            port,
            exit_code: status.code(),
            duration_ms,
            started_at,
            completed_at: Some(completed_at),
        })
    }

    /// Build the command: no arguments, inherited environment plus the
    /// platform exports, run from the spec's working directory.
    fn command(&self, spec: &LaunchSpec) -> Result<Command> {
        let program = self.resolve_binary(spec)?;
        let mut command = Command::new(program);
        command
            .envs(spec.exports())
            .current_dir(spec.work_dir.as_deref().unwrap_or_else(|| Path::new(".")));
        Ok(command)
    }

    /// Paths are checked for existence; bare names are looked up on PATH.
    fn resolve_binary(&self, spec: &LaunchSpec) -> Result<PathBuf> {
        let binary = &spec.binary;
        let is_path = binary.is_absolute() || binary.components().count() > 1;

        if is_path {
            let candidate = match spec.work_dir.as_deref() {
                Some(dir) if binary.is_relative() => dir.join(binary),
                _ => binary.clone(),
            };
            if candidate.exists() {
                Ok(binary.clone())
            } else {
                Err(GangwayError::BinaryNotFound(binary.display().to_string()))
            }
        } else {
            which::which(binary)
                .map_err(|_| GangwayError::BinaryNotFound(binary.display().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gangway_core::{PORT_VAR, RUN_MODE_VALUE, RUN_MODE_VAR};
    use std::ffi::OsString;

    #[test]
    fn launch_blocks_and_records_a_clean_exit() {
        let launcher = BinaryLauncher::new();
        let spec = LaunchSpec::new("true").with_port("8181");

        let report = launcher.launch(&spec).unwrap();

        assert_eq!(report.exit_code, Some(0));
        assert_eq!(report.port, "8181");
        assert!(report.completed_at.is_some());
    }

    #[test]
    fn nonzero_exit_is_recorded_but_not_an_error() {
        let launcher = BinaryLauncher::new();
        let spec = LaunchSpec::new("false").with_port("8181");

        let report = launcher.launch(&spec).unwrap();

        assert_eq!(report.exit_code, Some(1));
    }

    #[test]
    fn missing_binary_path_is_reported() {
        let launcher = BinaryLauncher::new();
        let spec = LaunchSpec::new("./no-such-binary-here").with_port("8181");

        let err = launcher.launch(&spec).unwrap_err();

        assert!(matches!(err, GangwayError::BinaryNotFound(_)));
    }

    #[test]
    fn missing_bare_name_is_reported() {
        let launcher = BinaryLauncher::new();
        let spec = LaunchSpec::new("gangway-no-such-command").with_port("8181");

        let err = launcher.launch(&spec).unwrap_err();

        assert!(matches!(err, GangwayError::BinaryNotFound(_)));
    }

    #[test]
    fn child_environment_carries_port_and_run_mode() {
        let launcher = BinaryLauncher::new();
        let spec = LaunchSpec::new("true").with_port("8282");

        let command = launcher.command(&spec).unwrap();
        let envs: Vec<(OsString, Option<OsString>)> = command
            .get_envs()
            .map(|(k, v)| (k.to_os_string(), v.map(|v| v.to_os_string())))
            .collect();

        assert!(envs.contains(&(OsString::from(PORT_VAR), Some(OsString::from("8282")))));
        assert!(envs.contains(&(
            OsString::from(RUN_MODE_VAR),
            Some(OsString::from(RUN_MODE_VALUE))
        )));
    }
}
