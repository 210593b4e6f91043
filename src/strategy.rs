use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    error::{HostnameError, Result},
    facts::PlatformFacts,
};

/// `Strategy` is the procedure that persists the hostname across a reboot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// `hostnamectl set-hostname` on systemd-based Linux.
    Systemd,
    /// `HOSTNAME=` in `/etc/sysconfig/network` on RHEL and Fedora.
    Sysconfig,
    /// `hostname=` in `/etc/rc.conf` plus `/etc/myname` on the BSD family.
    Bsd,
    /// `/etc/hostname` on Debian and derivatives.
    Debian,
    /// `/etc/HOSTNAME` on SUSE and openSUSE.
    Suse,
    /// `kernel.hostname=` in `/etc/sysctl.conf` on any other Linux.
    Sysctl,
    /// `netdom computername` on Windows.
    Windows,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            Strategy::Systemd => "systemd",
            Strategy::Sysconfig => "sysconfig",
            Strategy::Bsd => "bsd",
            Strategy::Debian => "debian",
            Strategy::Suse => "suse",
            Strategy::Sysctl => "sysctl",
            Strategy::Windows => "windows",
        };
        write!(f, "{}", name)
    }
}

/// The inputs a strategy predicate may look at.
struct Probe<'a> {
    facts: &'a PlatformFacts,
    hostnamectl_available: bool,
}

impl Probe<'_> {
    fn is_linux(&self) -> bool {
        self.facts.os == "linux"
    }

    fn family_in(&self, families: &[&str]) -> bool {
        families.contains(&self.facts.platform_family.as_str())
    }
}

type Predicate = fn(&Probe) -> bool;

fn systemd(probe: &Probe) -> bool {
    probe.is_linux() && probe.hostnamectl_available
}

fn sysconfig(probe: &Probe) -> bool {
    probe.family_in(&["rhel", "fedora"])
}

fn bsd(probe: &Probe) -> bool {
    probe.family_in(&["freebsd", "openbsd", "netbsd"])
}

fn debian(probe: &Probe) -> bool {
    probe.family_in(&["debian"])
}

fn suse(probe: &Probe) -> bool {
    probe.family_in(&["suse"])
}

fn sysctl(probe: &Probe) -> bool {
    probe.is_linux()
}

fn windows(probe: &Probe) -> bool {
    probe.facts.os == "windows" || probe.family_in(&["windows"])
}

/// Evaluated top to bottom, the first matching predicate selects the strategy.
/// Any Linux reaching the sysctl row has neither systemd nor a known family.
const STRATEGY_TABLE: &[(Predicate, Strategy)] = &[
    (systemd, Strategy::Systemd),
    (sysconfig, Strategy::Sysconfig),
    (bsd, Strategy::Bsd),
    (debian, Strategy::Debian),
    (suse, Strategy::Suse),
    (sysctl, Strategy::Sysctl),
    (windows, Strategy::Windows),
];

/// `select` picks the persistence strategy for the given facts.
/// `hostnamectl_available` tells whether the systemd hostname control
/// surface is installed on the host.
pub fn select(facts: &PlatformFacts, hostnamectl_available: bool) -> Result<Strategy> {
    let probe = Probe {
        facts,
        hostnamectl_available,
    };

    STRATEGY_TABLE
        .iter()
        .find(|(predicate, _)| predicate(&probe))
        .map(|(_, strategy)| *strategy)
        .ok_or_else(|| HostnameError::UnsupportedPlatform {
            os: facts.os.clone(),
            platform: facts.platform.clone(),
            platform_family: facts.platform_family.clone(),
            platform_version: facts.platform_version.clone(),
        })
}
