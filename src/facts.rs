use std::{collections::HashMap, fs::read_to_string, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// `PlatformFacts` describes the operating system the hostname is converged on.
/// The values follow the names configuration-management tools report,
/// such as `linux` / `ubuntu` / `debian` / `22.04`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFacts {
    pub os: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub platform_family: String,
    #[serde(default)]
    pub platform_version: String,
    #[serde(default)]
    pub root_group: Option<String>,
}

impl PlatformFacts {
    pub fn new(os: &str, platform: &str, platform_family: &str, platform_version: &str) -> Self {
        PlatformFacts {
            os: String::from(os),
            platform: String::from(platform),
            platform_family: String::from(platform_family),
            platform_version: String::from(platform_version),
            root_group: None,
        }
    }

    /// `root_group` returns the group that owns system configuration files,
    /// `wheel` on the BSD family and macOS, `root` elsewhere.
    pub fn root_group(&self) -> &str {
        if let Some(root_group) = &self.root_group {
            return root_group;
        }
        match self.platform_family.as_str() {
            "freebsd" | "openbsd" | "netbsd" | "dragonflybsd" | "mac_os_x" => "wheel",
            _ => "root",
        }
    }

    /// `load` reads the facts from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let facts_json = read_to_string(path)
            .context(format!("failed to read the facts from {}", path.display()))?;
        let facts: PlatformFacts =
            serde_json::from_str(&facts_json).context("failed to deserialize the facts from JSON")?;
        Ok(facts)
    }
}

/// `detect` inspects the running system below `root` and returns its facts.
/// On Linux the platform is read from `/etc/os-release`, falling back to
/// `/usr/lib/os-release`.
/// For more information, see the [os-release(5)](https://man7.org/linux/man-pages/man5/os-release.5.html)
/// man page.
pub fn detect(root: &Path) -> Result<PlatformFacts> {
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    };

    match os {
        "linux" => {
            let os_release_path = root.join("etc/os-release");
            let os_release = read_to_string(&os_release_path)
                .or_else(|_| read_to_string(root.join("usr/lib/os-release")))
                .context(format!("failed to read {}", os_release_path.display()))?;
            Ok(linux_facts(&os_release))
        }
        "freebsd" | "openbsd" | "netbsd" | "dragonfly" => {
            let family = if os == "dragonfly" { "dragonflybsd" } else { os };
            Ok(PlatformFacts::new(os, os, family, &kernel_release()?))
        }
        "windows" => Ok(PlatformFacts::new(os, "windows", "windows", "")),
        "darwin" => Ok(PlatformFacts::new(os, "mac_os_x", "mac_os_x", &kernel_release()?)),
        _ => Ok(PlatformFacts::new(os, os, os, "")),
    }
}

fn linux_facts(os_release: &str) -> PlatformFacts {
    let fields = parse_os_release(os_release);
    let id = fields.get("ID").map(String::as_str).unwrap_or("linux");
    let version = fields.get("VERSION_ID").map(String::as_str).unwrap_or("");

    let family = platform_family(id).or_else(|| {
        fields
            .get("ID_LIKE")
            .and_then(|id_like| id_like.split_whitespace().find_map(platform_family))
    });

    let mut facts = PlatformFacts::new("linux", id, family.unwrap_or(id), version);
    facts.root_group = Some(String::from("root"));
    facts
}

/// `parse_os_release` parses the `KEY=value` pairs of an os-release file,
/// stripping optional single or double quotes around the value.
fn parse_os_release(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

fn platform_family(id: &str) -> Option<&'static str> {
    let family = match id {
        "debian" | "ubuntu" | "linuxmint" | "raspbian" | "pop" | "kali" | "elementary" => "debian",
        "rhel" | "centos" | "rocky" | "almalinux" | "ol" | "scientific" | "xenserver"
        | "cloudlinux" => "rhel",
        "fedora" => "fedora",
        "amzn" => "amazon",
        "sles" | "sled" | "opensuse" | "opensuse-leap" | "opensuse-tumbleweed" | "suse" => "suse",
        "arch" | "manjaro" | "endeavouros" => "arch",
        "gentoo" => "gentoo",
        "alpine" => "alpine",
        "slackware" => "slackware",
        "clear-linux-os" => "clearlinux",
        _ => return None,
    };
    Some(family)
}

#[cfg(unix)]
fn kernel_release() -> Result<String> {
    let uname = nix::sys::utsname::uname().context("failed to invoke uname")?;
    Ok(uname.release().to_string_lossy().into_owned())
}

#[cfg(not(unix))]
fn kernel_release() -> Result<String> {
    Ok(String::new())
}
