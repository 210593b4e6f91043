use crate::error::{HostnameError, Result};

/// `HostnameRequest` is the desired state for a single convergence run.
/// The hostname is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostnameRequest {
    hostname: String,
    pub ip_address: Option<String>,
    pub aliases: Vec<String>,
    pub persist_across_reboot: bool,
    pub allow_reboot: bool,
}

impl HostnameRequest {
    pub fn new(hostname: impl Into<String>) -> Result<Self> {
        let hostname = hostname.into();
        if hostname.is_empty() {
            return Err(HostnameError::EmptyHostname);
        }

        Ok(HostnameRequest {
            hostname,
            ip_address: None,
            aliases: Vec::new(),
            persist_across_reboot: true,
            allow_reboot: true,
        })
    }

    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// `short_name` returns the hostname up to the first domain separator,
    /// so `host1.example.com` becomes `host1`.
    pub fn short_name(&self) -> &str {
        self.hostname
            .split('.')
            .next()
            .unwrap_or(self.hostname.as_str())
    }

    /// `hosts_line` builds the `/etc/hosts` entry for the request, in the form
    /// `<ip> <hostname> [alias...] <shortname>`.
    /// Returns `None` when the request carries no IP address.
    pub fn hosts_line(&self) -> Option<String> {
        let ip_address = self.ip_address.as_ref()?;

        let mut fields = vec![ip_address.as_str(), self.hostname.as_str()];
        fields.extend(self.aliases.iter().map(String::as_str));
        fields.push(self.short_name());
        Some(fields.join(" "))
    }
}
