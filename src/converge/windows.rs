use tracing::{debug, info, warn};

use crate::{
    converge::ChangeSet,
    error::Result,
    layout::Layout,
    lines,
    platform::netdom,
    request::HostnameRequest,
    system::HostSystem,
};

/// The EC2Config settings with `Ec2SetComputerName` disabled, so the agent
/// does not reset the computer name on the next boot.
pub const EC2_CONFIG_TEMPLATE: &str = include_str!("../../templates/ec2_config.xml");

/// `converge` renames a Windows host:
/// - Disable the EC2Config computer name plugin if the service is installed
/// - Rename the computer with `netdom computername` unless the current name already resolves to the target
/// - Request a reboot, which the rename needs to take effect
pub fn converge(
    request: &HostnameRequest,
    system: &dyn HostSystem,
    layout: &Layout,
    changes: &mut ChangeSet,
) -> Result<()> {
    let ec2_config = layout.ec2_config();
    if ec2_config.exists() && lines::ensure_content(&ec2_config, EC2_CONFIG_TEMPLATE, None)? {
        changes.persisted.push(ec2_config.display().to_string());
    }

    let hostname = request.hostname();
    let resolved = system.resolved_hostname()?;
    if resolved == hostname {
        debug!("computer name already resolves to {}", hostname);
        return Ok(());
    }

    let current = system.live_hostname()?;
    for command in netdom::rename_commands(&current, &resolved, hostname) {
        system.run(&command)?;
    }
    info!("renamed computer from {} to {}", current, hostname);
    changes.persisted.push(format!("netdom computername {}", current));
    changes.facts_stale = true;

    if request.allow_reboot {
        let reason = format!("setting hostname to {}", hostname);
        warn!("reboot requested: {}", reason);
        changes.reboot_requested = Some(reason);
    }
    Ok(())
}
