use std::{cell::RefCell, fs, path::Path};

use sethost::{
    apply,
    error::Result,
    layout::Layout,
    system::{HostSystem, SystemCommand},
    HostnameError, HostnameRequest, PlatformFacts, Strategy,
};
use tempfile::TempDir;

/// A host whose kernel hostname starts as `current` and that records commands.
struct StubHost {
    hostname: RefCell<String>,
    hostnamectl: bool,
    commands: RefCell<Vec<SystemCommand>>,
}

impl StubHost {
    fn new(current: &str) -> Self {
        StubHost {
            hostname: RefCell::new(String::from(current)),
            hostnamectl: false,
            commands: RefCell::new(Vec::new()),
        }
    }
}

impl HostSystem for StubHost {
    fn live_hostname(&self) -> Result<String> {
        Ok(self.hostname.borrow().clone())
    }

    fn set_live_hostname(&self, hostname: &str) -> Result<()> {
        *self.hostname.borrow_mut() = String::from(hostname);
        Ok(())
    }

    fn hostnamectl_available(&self) -> bool {
        self.hostnamectl
    }

    fn resolved_hostname(&self) -> Result<String> {
        Ok(self.hostname.borrow().clone())
    }

    fn run(&self, command: &SystemCommand) -> Result<String> {
        self.commands.borrow_mut().push(command.clone());
        Ok(String::new())
    }

    fn reboot(&self, _reason: &str) -> Result<()> {
        panic!("the library must never reboot on its own");
    }
}

fn target_root(files: &[(&str, &str)]) -> (TempDir, Layout) {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("etc/sysconfig")).unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    let layout = Layout::new(dir.path(), None);
    (dir, layout)
}

fn read(root: &Path, name: &str) -> String {
    fs::read_to_string(root.join(name)).unwrap()
}

#[test]
fn rhel_host_converges_and_stays_converged() {
    let (dir, layout) = target_root(&[
        ("etc/hosts", "127.0.0.1 localhost localhost.localdomain\n10.0.0.7 db1.example.com db1\n"),
        ("etc/sysconfig/network", "NETWORKING=yes\nHOSTNAME=localhost.localdomain"),
    ]);
    let host = StubHost::new("localhost.localdomain");
    let facts = PlatformFacts::new("linux", "centos", "rhel", "6.10");
    let request = HostnameRequest::new("db1.example.com")
        .unwrap()
        .with_ip_address("10.0.0.5")
        .with_aliases(vec![String::from("db")]);

    let first = apply(&request, &facts, &host, &layout).unwrap();
    assert_eq!(first.strategy, Strategy::Sysconfig);
    assert!(first.live_hostname_changed);
    assert!(first.hosts_file_changed);
    assert!(first.facts_stale);
    assert_eq!(
        read(dir.path(), "etc/hosts"),
        "127.0.0.1 localhost localhost.localdomain\n10.0.0.5 db1.example.com db db1\n"
    );
    assert_eq!(
        read(dir.path(), "etc/sysconfig/network"),
        "NETWORKING=yes\nHOSTNAME=db1.example.com\n"
    );

    let second = apply(&request, &facts, &host, &layout).unwrap();
    assert!(!second.changed());
    assert!(!second.facts_stale);
}

#[test]
fn systemd_host_uses_hostnamectl_whatever_the_family() {
    let (dir, layout) = target_root(&[("etc/hostname", "old\n")]);
    let mut host = StubHost::new("old");
    host.hostnamectl = true;
    let facts = PlatformFacts::new("linux", "ubuntu", "debian", "22.04");

    let changes = apply(&HostnameRequest::new("web1").unwrap(), &facts, &host, &layout).unwrap();

    assert_eq!(changes.strategy, Strategy::Systemd);
    assert!(host
        .commands
        .borrow()
        .iter()
        .any(|command| command.to_string().ends_with("set-hostname web1")));
    assert_eq!(read(dir.path(), "etc/hostname"), "old\n");
}

#[test]
fn unsupported_platform_reports_all_facts() {
    let (_dir, layout) = target_root(&[]);
    let host = StubHost::new("old");
    let facts = PlatformFacts::new("plan9", "plan9", "plan9", "4");

    let err = apply(&HostnameRequest::new("web1").unwrap(), &facts, &host, &layout).unwrap_err();

    assert!(matches!(err, HostnameError::UnsupportedPlatform { .. }));
    assert_eq!(
        err.to_string(),
        "do not know how to set hostname on os plan9, platform plan9, platform_version 4, platform_family plan9"
    );
    assert_eq!(*host.hostname.borrow(), "old");
}

#[test]
fn windows_host_requests_reboot_from_caller() {
    let (_dir, layout) = target_root(&[]);
    let host = StubHost::new("WIN-ABC");
    let facts = PlatformFacts::new("windows", "windows", "windows", "10.0.17763");

    let changes = apply(&HostnameRequest::new("web1").unwrap(), &facts, &host, &layout).unwrap();

    assert_eq!(changes.strategy, Strategy::Windows);
    assert_eq!(host.commands.borrow().len(), 4);
    assert_eq!(
        changes.reboot_requested.as_deref(),
        Some("setting hostname to web1")
    );
}
