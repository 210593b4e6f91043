use std::path::{Path, PathBuf};

use crate::lines::FileOwner;

pub const EC2_CONFIG_PATH: &str = r"C:\Program Files\Amazon\Ec2ConfigService\Settings\config.xml";

/// `Layout` resolves the managed configuration files below a root directory,
/// which is `/` on a live system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    pub owner: Option<FileOwner>,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, owner: Option<FileOwner>) -> Self {
        Layout {
            root: root.into(),
            owner,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn etc(&self, name: &str) -> PathBuf {
        self.root.join("etc").join(name)
    }

    pub fn hosts(&self) -> PathBuf {
        self.etc("hosts")
    }

    pub fn sysconfig_network(&self) -> PathBuf {
        self.etc("sysconfig").join("network")
    }

    pub fn rc_conf(&self) -> PathBuf {
        self.etc("rc.conf")
    }

    pub fn myname(&self) -> PathBuf {
        self.etc("myname")
    }

    pub fn debian_hostname(&self) -> PathBuf {
        self.etc("hostname")
    }

    pub fn suse_hostname(&self) -> PathBuf {
        self.etc("HOSTNAME")
    }

    pub fn sysctl_conf(&self) -> PathBuf {
        self.etc("sysctl.conf")
    }

    /// The EC2Config settings file lives at a fixed Windows path; it is only
    /// re-rooted when a non-default root is configured.
    pub fn ec2_config(&self) -> PathBuf {
        if self.root == Path::new("/") {
            PathBuf::from(EC2_CONFIG_PATH)
        } else {
            self.root
                .join("Program Files")
                .join("Amazon")
                .join("Ec2ConfigService")
                .join("Settings")
                .join("config.xml")
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::new("/", None)
    }
}
