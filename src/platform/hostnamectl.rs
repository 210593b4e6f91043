use crate::system::SystemCommand;

pub const HOSTNAMECTL: &str = "/usr/bin/hostnamectl";

/// `static_hostname_command` queries the static hostname systemd-hostnamed
/// applies at boot.
/// For more information, see the [hostnamectl(1)](https://man7.org/linux/man-pages/man1/hostnamectl.1.html)
/// man page.
pub fn static_hostname_command() -> SystemCommand {
    SystemCommand::new(HOSTNAMECTL, ["status", "--static"])
}

pub fn set_hostname_command(hostname: &str) -> SystemCommand {
    SystemCommand::new(HOSTNAMECTL, ["set-hostname", hostname])
}
