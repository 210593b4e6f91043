use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use sethost::{
    converge,
    facts::{self, PlatformFacts},
    layout::Layout,
    platform::OsSystem,
    request::HostnameRequest,
    strategy as platform_strategy,
    system::HostSystem,
};

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CliSubcommand {
    #[command(about = "set the hostname and persist it across reboots")]
    Set {
        hostname: String,

        #[arg(long, help = "IP address to map to the hostname in /etc/hosts")]
        ip: Option<String>,

        #[arg(long, help = "additional /etc/hosts alias, may be repeated")]
        alias: Vec<String>,

        #[arg(long, help = "only change the running hostname and /etc/hosts")]
        no_persist: bool,

        #[arg(long, help = "never reboot, even when the platform requires it")]
        no_reboot: bool,

        #[command(flatten)]
        target: TargetArgs,
    },

    #[command(about = "print the detected platform facts")]
    Facts {
        #[arg(long, env = "SETHOST_ROOT", default_value = "/")]
        root: PathBuf,
    },

    #[command(about = "print the strategy that would persist the hostname")]
    Strategy {
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    #[arg(
        long,
        env = "SETHOST_ROOT",
        default_value = "/",
        help = "root directory of the managed files"
    )]
    root: PathBuf,

    #[arg(
        long,
        env = "SETHOST_FACTS",
        help = "JSON file with platform facts, detected when omitted"
    )]
    facts: Option<PathBuf>,
}

impl TargetArgs {
    fn load_facts(&self) -> Result<PlatformFacts> {
        match &self.facts {
            Some(path) => PlatformFacts::load(path),
            None => facts::detect(&self.root).context("failed to detect the platform facts"),
        }
    }

    fn layout(&self, facts: &PlatformFacts) -> Result<Layout> {
        Ok(Layout::new(&self.root, file_owner(facts)?))
    }
}

#[cfg(unix)]
fn file_owner(facts: &PlatformFacts) -> Result<Option<sethost::lines::FileOwner>> {
    let owner = sethost::lines::FileOwner::root(facts.root_group()).context(format!(
        "failed to look up the group {}",
        facts.root_group()
    ))?;
    Ok(Some(owner))
}

#[cfg(not(unix))]
fn file_owner(_facts: &PlatformFacts) -> Result<Option<sethost::lines::FileOwner>> {
    Ok(None)
}

pub fn set(
    hostname: &str,
    ip: &Option<String>,
    alias: &[String],
    no_persist: bool,
    no_reboot: bool,
    target: &TargetArgs,
) -> Result<()> {
    let facts = target.load_facts()?;
    let layout = target.layout(&facts)?;

    let mut request = HostnameRequest::new(hostname)?.with_aliases(alias.to_vec());
    if let Some(ip) = ip {
        request = request.with_ip_address(ip.as_str());
    }
    request.persist_across_reboot = !no_persist;
    request.allow_reboot = !no_reboot;

    let system = OsSystem;
    let changes = converge::apply(&request, &facts, &system, &layout)
        .context(format!("failed to set the hostname to {}", hostname))?;

    let serialized_changes =
        serde_json::to_string(&changes).context("failed to serialize the changes")?;
    println!("{}", serialized_changes);

    if changes.facts_stale {
        info!("hostname changed, cached host facts must be reloaded");
    }
    if let Some(reason) = &changes.reboot_requested {
        warn!("rebooting to finish {}", reason);
        system.reboot(reason).context("failed to reboot")?;
    }
    Ok(())
}

pub fn facts(root: &Path) -> Result<()> {
    let facts = facts::detect(root).context("failed to detect the platform facts")?;
    let serialized_facts =
        serde_json::to_string(&facts).context("failed to serialize the facts")?;
    println!("{}", serialized_facts);
    Ok(())
}

pub fn strategy(target: &TargetArgs) -> Result<()> {
    let facts = target.load_facts()?;
    let strategy = platform_strategy::select(&facts, OsSystem.hostnamectl_available())?;
    println!("{}", strategy);
    Ok(())
}
