use std::process::{Command, Stdio};

use tracing::debug;

use crate::{
    error::{HostnameError, Result},
    system::SystemCommand,
};

/// `run_command` runs `command` to completion and returns its standard output.
/// A command that cannot be spawned, is killed by a signal, or exits with a
/// nonzero status is reported as [HostnameError::Command] with its standard error.
pub fn run_command(command: &SystemCommand) -> Result<String> {
    debug!("running `{}`", command);

    let output = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::null())
        .output()
        .map_err(|err| HostnameError::command(command.to_string(), err.to_string()))?;

    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let reason = match output.status.code() {
        Some(code) => format!("exit status {}: {}", code, stderr.trim()),
        None => format!("terminated by a signal: {}", stderr.trim()),
    };
    Err(HostnameError::command(command.to_string(), reason))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn returns_stdout_on_success() {
        let output = run_command(&SystemCommand::new("sh", ["-c", "echo web1"])).unwrap();
        assert_eq!(output, "web1\n");
    }

    #[test]
    fn reports_exit_status_and_stderr() {
        let command = SystemCommand::new("sh", ["-c", "echo denied >&2; exit 3"]);
        match run_command(&command) {
            Err(HostnameError::Command { command, reason }) => {
                assert_eq!(command, "sh -c echo denied >&2; exit 3");
                assert_eq!(reason, "exit status 3: denied");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn reports_missing_program() {
        let command = SystemCommand::new("/nonexistent/sethost-program", Vec::<String>::new());
        assert!(matches!(
            run_command(&command),
            Err(HostnameError::Command { .. })
        ));
    }
}
