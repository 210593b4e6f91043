use tracing::{debug, info};

use crate::{
    converge::ChangeSet,
    error::Result,
    layout::Layout,
    lines,
    platform::hostnamectl,
    request::HostnameRequest,
    strategy::Strategy,
    system::HostSystem,
};

/// `set_live_hostname` changes the hostname of the running system unless it
/// already equals the requested one.
pub fn set_live_hostname(
    request: &HostnameRequest,
    system: &dyn HostSystem,
    changes: &mut ChangeSet,
) -> Result<()> {
    let current = system.live_hostname()?;
    if current == request.hostname() {
        debug!("live hostname is already {}", current);
        return Ok(());
    }

    system.set_live_hostname(request.hostname())?;
    info!("changed live hostname from {} to {}", current, request.hostname());
    changes.live_hostname_changed = true;
    changes.facts_stale = true;
    Ok(())
}

/// `hosts_pattern` matches an `/etc/hosts` line that starts with `ip_address`
/// or carries `hostname` as a name after the address.
pub fn hosts_pattern(ip_address: &str, hostname: &str) -> String {
    format!(
        r"^{}\s+|\s{}(\s|$)",
        regex::escape(ip_address),
        regex::escape(hostname)
    )
}

/// `update_hosts_file` makes `/etc/hosts` hold a single entry for the
/// requested IP address and hostname. Requests without an IP address leave
/// the file alone.
pub fn update_hosts_file(
    request: &HostnameRequest,
    layout: &Layout,
    changes: &mut ChangeSet,
) -> Result<()> {
    let (Some(ip_address), Some(line)) = (&request.ip_address, request.hosts_line()) else {
        return Ok(());
    };

    let pattern = hosts_pattern(ip_address, request.hostname());
    if lines::ensure_line(&layout.hosts(), &pattern, &line, layout.owner.as_ref())? {
        changes.hosts_file_changed = true;
        changes.facts_stale = true;
    }
    Ok(())
}

/// `persist` stores the hostname where the platform reads it at boot.
pub fn persist(
    strategy: Strategy,
    request: &HostnameRequest,
    system: &dyn HostSystem,
    layout: &Layout,
    changes: &mut ChangeSet,
) -> Result<()> {
    let hostname = request.hostname();
    let owner = layout.owner.as_ref();
    let hostname_file = format!("{}\n", hostname);

    match strategy {
        Strategy::Systemd => {
            let static_hostname = system.run(&hostnamectl::static_hostname_command())?;
            if static_hostname.trim() == hostname {
                debug!("static hostname is already {}", hostname);
                return Ok(());
            }

            let command = hostnamectl::set_hostname_command(hostname);
            system.run(&command)?;
            info!("ran `{}`", command);
            changes.persisted.push(command.to_string());
            changes.facts_stale = true;
        }
        Strategy::Sysconfig => {
            let path = layout.sysconfig_network();
            let line = format!("HOSTNAME={}", hostname);
            if lines::ensure_line(&path, r"^\s*HOSTNAME\s*=", &line, owner)? {
                changes.persisted.push(path.display().to_string());
            }
        }
        Strategy::Bsd => {
            let rc_conf = layout.rc_conf();
            let line = format!("hostname={}", hostname);
            if lines::ensure_line(&rc_conf, r"^\s*hostname\s*=", &line, owner)? {
                changes.persisted.push(rc_conf.display().to_string());
            }

            let myname = layout.myname();
            if lines::ensure_content(&myname, &hostname_file, owner)? {
                changes.persisted.push(myname.display().to_string());
            }
        }
        Strategy::Debian | Strategy::Suse => {
            let path = if strategy == Strategy::Debian {
                layout.debian_hostname()
            } else {
                layout.suse_hostname()
            };
            if lines::ensure_content(&path, &hostname_file, owner)? {
                changes.persisted.push(path.display().to_string());
            }
        }
        Strategy::Sysctl => {
            // legacy path for Linux without systemd; other sysctl managers may
            // rewrite this line
            let path = layout.sysctl_conf();
            let line = format!("kernel.hostname={}", hostname);
            if lines::ensure_line(&path, r"^\s*kernel\.hostname\s*=", &line, owner)? {
                changes.persisted.push(path.display().to_string());
            }
        }
        Strategy::Windows => debug!("windows hostnames are persisted by netdom"),
    }
    Ok(())
}
