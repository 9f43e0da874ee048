//! Toolchain adapter that runs an external program.
//!
//! The program receives `--config <file>` pointing at the serialized
//! [`ToolchainConfig`], written next to the entry module, and is expected to
//! print its stats (`{"errors": [...], "warnings": [...]}`) on stdout.

use std::ffi::OsString;
use std::process::Stdio;

use monopack_common::constants::TOOLCHAIN_CONFIG_FILE;
use tokio::process::Command;

use super::{Toolchain, ToolchainConfig, ToolchainFault, ToolchainReport};

/// Number of trailing stderr lines kept in a fault message.
const STDERR_TAIL_LINES: usize = 20;

/// Runs a bundler adapter as a child process.
#[derive(Debug, Clone)]
pub struct CommandToolchain {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandToolchain {
    /// Creates an adapter for `program`, looked up on `PATH` at invocation.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Adds an argument passed before `--config`.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl Toolchain for CommandToolchain {
    async fn invoke(&self, config: &ToolchainConfig) -> Result<ToolchainReport, ToolchainFault> {
        let program = which::which(&self.program).map_err(|e| {
            ToolchainFault::new(format!(
                "cannot locate {}: {e}",
                self.program.to_string_lossy()
            ))
        })?;

        let config_path = config.entry.with_file_name(TOOLCHAIN_CONFIG_FILE);
        let payload = serde_json::to_vec_pretty(config)
            .map_err(|e| ToolchainFault::new(format!("cannot serialize configuration: {e}")))?;
        tokio::fs::write(&config_path, payload).await.map_err(|e| {
            ToolchainFault::new(format!("cannot write {}: {e}", config_path.display()))
        })?;

        tracing::info!(
            program = %program.display(),
            config = %config_path.display(),
            "running toolchain"
        );

        let output = Command::new(&program)
            .args(&self.args)
            .arg("--config")
            .arg(&config_path)
            .current_dir(&config.context)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ToolchainFault::new(format!("cannot run {}: {e}", program.display())))?;

        interpret(
            output.status.success(),
            output.status.code(),
            &output.stdout,
            &output.stderr,
        )
    }
}

/// Turns a finished process into a report or a fault.
///
/// A stats report carrying errors is a compile failure whatever the exit
/// status. A clean exit without a readable report counts as success with no
/// diagnostics. Any other unsuccessful exit is a fault.
fn interpret(
    success: bool,
    code: Option<i32>,
    stdout: &[u8],
    stderr: &[u8],
) -> Result<ToolchainReport, ToolchainFault> {
    let report = serde_json::from_slice::<ToolchainReport>(stdout).ok();

    match report {
        Some(report) if success || report.has_errors() => Ok(report),
        None if success => Ok(ToolchainReport::default()),
        _ => {
            let status = code.map_or_else(
                || "terminated by signal".to_string(),
                |c| format!("exit code {c}"),
            );
            Err(ToolchainFault::new(format!(
                "toolchain failed ({status}): {}",
                stderr_tail(stderr)
            )))
        }
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use monopack_common::config::BuildOptions;

    use super::*;

    #[test]
    fn clean_exit_with_stats_is_a_report() {
        let report = interpret(true, Some(0), br#"{"warnings":["big asset"]}"#, b"")
            .expect("report");
        assert_eq!(report.warnings, vec!["big asset"]);
        assert!(!report.has_errors());
    }

    #[test]
    fn clean_exit_without_stats_is_success() {
        let report = interpret(true, Some(0), b"done", b"").expect("report");
        assert_eq!(report, ToolchainReport::default());
    }

    #[test]
    fn failing_exit_with_errors_is_a_compile_report() {
        let report = interpret(false, Some(1), br#"{"errors":["Module not found: x"]}"#, b"")
            .expect("report");
        assert_eq!(report.errors, vec!["Module not found: x"]);
    }

    #[test]
    fn failing_exit_without_errors_is_a_fault() {
        let fault = interpret(false, Some(2), b"", b"line one\nout of memory").unwrap_err();
        assert!(fault.message.contains("exit code 2"), "got: {}", fault.message);
        assert!(fault.message.contains("out of memory"), "got: {}", fault.message);
    }

    #[test]
    fn signal_termination_is_a_fault() {
        let fault = interpret(false, None, b"", b"").unwrap_err();
        assert!(fault.message.contains("signal"), "got: {}", fault.message);
    }

    #[tokio::test]
    async fn missing_program_is_a_fault() {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = BuildOptions::new(dir.path());
        let config = ToolchainConfig::new(&dir.path().join("index.js"), &[], &options);

        let toolchain = CommandToolchain::new("monopack-no-such-toolchain-program");
        let fault = toolchain.invoke(&config).await.unwrap_err();
        assert!(fault.message.contains("cannot locate"), "got: {}", fault.message);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn program_stats_are_read_from_stdout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = BuildOptions::new(dir.path());
        let entry = dir.path().join("index.js");
        let config = ToolchainConfig::new(&entry, &[], &options);

        let toolchain = CommandToolchain::new("sh")
            .arg("-c")
            .arg(r#"test -f "$2" && echo '{"errors":["boom"]}'; exit 1"#)
            .arg("toolchain");
        let report = toolchain.invoke(&config).await.expect("report");
        assert_eq!(report.errors, vec!["boom"]);
        assert!(dir.path().join("toolchain.config.json").is_file());
    }
}
