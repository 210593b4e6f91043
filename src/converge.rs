use serde::Serialize;
use tracing::{debug, info};

use crate::{
    error::Result,
    facts::PlatformFacts,
    layout::Layout,
    request::HostnameRequest,
    strategy::{self, Strategy},
    system::HostSystem,
};

pub mod unix;
pub mod windows;

/// `ChangeSet` reports what a convergence run changed.
/// The caller must reload its cached host identity when `facts_stale` is set,
/// and reboot the machine when `reboot_requested` carries a reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    pub strategy: Strategy,
    pub live_hostname_changed: bool,
    pub hosts_file_changed: bool,
    pub persisted: Vec<String>,
    pub facts_stale: bool,
    pub reboot_requested: Option<String>,
}

impl ChangeSet {
    fn new(strategy: Strategy) -> Self {
        ChangeSet {
            strategy,
            live_hostname_changed: false,
            hosts_file_changed: false,
            persisted: Vec::new(),
            facts_stale: false,
            reboot_requested: None,
        }
    }

    pub fn changed(&self) -> bool {
        self.live_hostname_changed || self.hosts_file_changed || !self.persisted.is_empty()
    }
}

/// `apply` converges the host to the requested hostname in a single pass:
/// - [select](strategy::select): Pick the persistence strategy, failing before any change on an unsupported platform
/// - [set_live_hostname](unix::set_live_hostname): Change the running hostname
/// - [update_hosts_file](unix::update_hosts_file): Map the IP address to the hostname in `/etc/hosts`
/// - [persist](unix::persist): Make the hostname survive a reboot
///
/// On Windows the steps are replaced by [windows::converge].
pub fn apply(
    request: &HostnameRequest,
    facts: &PlatformFacts,
    system: &dyn HostSystem,
    layout: &Layout,
) -> Result<ChangeSet> {
    let strategy = strategy::select(facts, system.hostnamectl_available())?;
    info!(
        "setting hostname to {} on {} {} ({}) with the {} strategy",
        request.hostname(),
        facts.platform,
        facts.platform_version,
        facts.platform_family,
        strategy
    );

    let mut changes = ChangeSet::new(strategy);
    if strategy == Strategy::Windows {
        windows::converge(request, system, layout, &mut changes)?;
        return Ok(changes);
    }

    unix::set_live_hostname(request, system, &mut changes)?;
    unix::update_hosts_file(request, layout, &mut changes)?;

    if request.persist_across_reboot {
        unix::persist(strategy, request, system, layout, &mut changes)?;
    } else {
        debug!("not persisting the hostname across reboots");
    }

    Ok(changes)
}
