use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use uuid::Uuid;

/// Environment variable the hosting platform uses to assign the listen port.
pub const PORT_VAR: &str = "PORT";

/// Port assumed when the platform does not provide one.
pub const DEFAULT_PORT: &str = "8080";

/// Run-mode flag the application binary reads at startup.
pub const RUN_MODE_VAR: &str = "GIN_MODE";

/// The run mode is always forced to release under platform supervision.
pub const RUN_MODE_VALUE: &str = "release";

/// Relative path of the pre-built application binary.
pub const DEFAULT_BINARY: &str = "./app";

/// Describes one launch of the application binary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaunchSpec {
    pub binary: PathBuf,
    pub port: Option<String>,
    pub work_dir: Option<PathBuf>,
}

/// Record of a completed launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchReport {
    pub id: Uuid,
    pub binary: PathBuf,
    pub port: String,
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Default for LaunchSpec {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_BINARY),
            port: None,
            work_dir: None,
        }
    }
}

impl LaunchSpec {
    pub fn new<P: Into<PathBuf>>(binary: P) -> Self {
        Self {
            binary: binary.into(),
            port: None,
            work_dir: None,
        }
    }

    pub fn with_port<S: Into<String>>(mut self, port: S) -> Self {
        self.port = Some(port.into());
        self
    }

    pub fn with_work_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// The port the platform expects the application to listen on.
    ///
    /// An explicit override wins, then the platform's `PORT` variable
    /// (preserved verbatim, even when non-numeric), then the default.
    pub fn resolved_port(&self) -> String {
        match &self.port {
            Some(port) => port.clone(),
            None => env::var(PORT_VAR).unwrap_or_else(|_| DEFAULT_PORT.to_string()),
        }
    }

    /// The variables written into the child environment before launch.
    ///
    /// The run-mode flag is exported unconditionally.
    pub fn exports(&self) -> Vec<(String, String)> {
        vec![
            (PORT_VAR.to_string(), self.resolved_port()),
            (RUN_MODE_VAR.to_string(), RUN_MODE_VALUE.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_port_overrides_environment() {
        let spec = LaunchSpec::default().with_port("3000");
        assert_eq!(spec.resolved_port(), "3000");
    }

    #[test]
    fn port_defaults_and_preserves_environment_value() {
        // Single test so the PORT manipulations cannot race each other.
        env::remove_var(PORT_VAR);
        let spec = LaunchSpec::default();
        assert_eq!(spec.resolved_port(), DEFAULT_PORT);

        env::set_var(PORT_VAR, "9191");
        assert_eq!(spec.resolved_port(), "9191");

        // Preserved verbatim even when it is not a number.
        env::set_var(PORT_VAR, "not-a-port");
        assert_eq!(spec.resolved_port(), "not-a-port");
        env::remove_var(PORT_VAR);
    }

    #[test]
    fn exports_always_contain_port_and_run_mode() {
        let spec = LaunchSpec::default().with_port("4000");
        let exports = spec.exports();

        assert_eq!(exports.len(), 2);
        assert!(exports.contains(&(PORT_VAR.to_string(), "4000".to_string())));
        assert!(exports.contains(&(RUN_MODE_VAR.to_string(), RUN_MODE_VALUE.to_string())));
    }

    #[test]
    fn default_spec_targets_the_prebuilt_binary() {
        let spec = LaunchSpec::default();
        assert_eq!(spec.binary, PathBuf::from(DEFAULT_BINARY));
        assert!(spec.work_dir.is_none());
    }
}
