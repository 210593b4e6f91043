use crate::error::{HostnameError, Result};

/// `get_hostname` returns the hostname of the running kernel.
/// For more information, see the [gethostname(2)](https://man7.org/linux/man-pages/man2/gethostname.2.html)
/// man page.
#[cfg(unix)]
pub fn get_hostname() -> Result<String> {
    let hostname = nix::unistd::gethostname()
        .map_err(|errno| HostnameError::command("gethostname", errno.to_string()))?;
    Ok(hostname.to_string_lossy().into_owned())
}

/// `set_hostname` updates the system hostname to the given string.
/// For more information, see the [sethostname(2)](https://man7.org/linux/man-pages/man2/gethostname.2.html)
/// man page.
#[cfg(unix)]
pub fn set_hostname(hostname: &str) -> Result<()> {
    nix::unistd::sethostname(hostname).map_err(|errno| {
        HostnameError::command(format!("sethostname {}", hostname), errno.to_string())
    })
}

#[cfg(not(unix))]
pub fn get_hostname() -> Result<String> {
    use crate::{platform::command::run_command, system::SystemCommand};

    let output = run_command(&SystemCommand::new("hostname", Vec::<String>::new()))?;
    Ok(output.trim().to_string())
}

#[cfg(not(unix))]
pub fn set_hostname(hostname: &str) -> Result<()> {
    Err(HostnameError::command(
        format!("sethostname {}", hostname),
        "not supported on this platform, use netdom",
    ))
}
