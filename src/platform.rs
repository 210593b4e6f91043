use std::path::Path;

use tracing::warn;

use crate::{
    error::Result,
    system::{HostSystem, SystemCommand},
};

pub mod command;
pub mod hostname;
pub mod hostnamectl;
pub mod netdom;

/// `OsSystem` implements [HostSystem] against the running machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSystem;

impl HostSystem for OsSystem {
    fn live_hostname(&self) -> Result<String> {
        hostname::get_hostname()
    }

    fn set_live_hostname(&self, hostname: &str) -> Result<()> {
        hostname::set_hostname(hostname)
    }

    fn hostnamectl_available(&self) -> bool {
        Path::new(hostnamectl::HOSTNAMECTL).exists()
    }

    fn resolved_hostname(&self) -> Result<String> {
        let hostname = hostname::get_hostname()?;
        match resolve(&hostname) {
            Ok(Some(resolved)) => Ok(resolved),
            Ok(None) => Ok(hostname),
            Err(err) => {
                warn!("failed to resolve {}: {}", hostname, err);
                Ok(hostname)
            }
        }
    }

    fn run(&self, command: &SystemCommand) -> Result<String> {
        command::run_command(command)
    }

    fn reboot(&self, reason: &str) -> Result<()> {
        warn!("rebooting: {}", reason);
        command::run_command(&reboot_command(reason)).map(|_| ())
    }
}

/// `resolve` returns the canonical name `hostname` resolves to through the
/// system resolver, or `None` when it does not resolve.
#[cfg(windows)]
fn resolve(hostname: &str) -> Result<Option<String>> {
    let script = format!("[System.Net.Dns]::GetHostEntry('{}').HostName", hostname);
    let output = command::run_command(&SystemCommand::new(
        "powershell",
        ["-NoProfile", "-NonInteractive", "-Command", script.as_str()],
    ))?;
    let resolved = output.trim();
    Ok((!resolved.is_empty()).then(|| resolved.to_string()))
}

#[cfg(not(windows))]
fn resolve(hostname: &str) -> Result<Option<String>> {
    let output = command::run_command(&SystemCommand::new("getent", ["hosts", hostname]))?;
    Ok(output
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .map(String::from))
}

#[cfg(windows)]
fn reboot_command(reason: &str) -> SystemCommand {
    SystemCommand::new("shutdown", ["/r", "/t", "0", "/c", reason])
}

#[cfg(not(windows))]
fn reboot_command(reason: &str) -> SystemCommand {
    SystemCommand::new("shutdown", ["-r", "now", reason])
}
