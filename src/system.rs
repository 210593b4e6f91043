use std::fmt::{Display, Formatter};

use crate::error::Result;

/// `SystemCommand` is an external program invocation, such as
/// `hostnamectl set-hostname web1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl SystemCommand {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SystemCommand {
            program: String::from(program),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Display for SystemCommand {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// `HostSystem` is the boundary between the convergence logic and the host.
/// Every query of the current state and every command goes through it, so the
/// decision logic can run against a recording implementation in tests.
pub trait HostSystem {
    /// The hostname the kernel currently reports.
    fn live_hostname(&self) -> Result<String>;

    fn set_live_hostname(&self, hostname: &str) -> Result<()>;

    /// Whether the systemd hostname control surface is installed.
    fn hostnamectl_available(&self) -> bool;

    /// The canonical name the current hostname resolves to.
    fn resolved_hostname(&self) -> Result<String>;

    /// Runs `command` to completion and returns its standard output.
    fn run(&self, command: &SystemCommand) -> Result<String>;

    fn reboot(&self, reason: &str) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;

    use super::*;
    use crate::error::HostnameError;

    /// `RecordingSystem` answers queries from fixed values and records every
    /// mutation instead of performing it.
    #[derive(Debug, Default)]
    pub struct RecordingSystem {
        pub live_hostname: RefCell<String>,
        pub resolved_hostname: String,
        pub static_hostname: RefCell<String>,
        pub hostnamectl: bool,
        pub failing_program: Option<String>,
        pub commands: RefCell<Vec<SystemCommand>>,
        pub hostname_sets: RefCell<Vec<String>>,
        pub reboots: RefCell<Vec<String>>,
    }

    impl RecordingSystem {
        pub fn with_hostname(hostname: &str) -> Self {
            RecordingSystem {
                live_hostname: RefCell::new(String::from(hostname)),
                resolved_hostname: String::from(hostname),
                static_hostname: RefCell::new(String::from(hostname)),
                ..Default::default()
            }
        }
    }

    impl HostSystem for RecordingSystem {
        fn live_hostname(&self) -> Result<String> {
            Ok(self.live_hostname.borrow().clone())
        }

        fn set_live_hostname(&self, hostname: &str) -> Result<()> {
            self.hostname_sets.borrow_mut().push(String::from(hostname));
            *self.live_hostname.borrow_mut() = String::from(hostname);
            Ok(())
        }

        fn hostnamectl_available(&self) -> bool {
            self.hostnamectl
        }

        fn resolved_hostname(&self) -> Result<String> {
            Ok(self.resolved_hostname.clone())
        }

        fn run(&self, command: &SystemCommand) -> Result<String> {
            self.commands.borrow_mut().push(command.clone());
            if self.failing_program.as_deref() == Some(command.program.as_str()) {
                return Err(HostnameError::command(command.to_string(), "exit status 1"));
            }

            match command.args.first().map(String::as_str) {
                Some("status") => Ok(format!("{}\n", self.static_hostname.borrow())),
                Some("set-hostname") => {
                    *self.static_hostname.borrow_mut() = command.args[1].clone();
                    Ok(String::new())
                }
                _ => Ok(String::new()),
            }
        }

        fn reboot(&self, reason: &str) -> Result<()> {
            self.reboots.borrow_mut().push(String::from(reason));
            Ok(())
        }
    }
}
