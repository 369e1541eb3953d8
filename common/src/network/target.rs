//! # Scan Target Model
//!
//! Defines what the user hands to a module and what the module acts upon.
//!
//! A [`Targets`] specification can be:
//! * A single host (IP address or hostname).
//! * A host-list file with one host per line.
//!
//! Modules turn it into [`ModuleTarget`]s with [`expand`] and process them
//! one at a time.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::net::IpAddr;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Targets as given by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    /// A single IP address or hostname.
    pub host: String,
    /// Path to a file containing multiple hosts. Takes precedence over `host`.
    pub host_file: String,
}

/// A single host handed to a module run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleTarget {
    /// Either an IP address or a hostname.
    pub host: String,
}

impl ModuleTarget {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// Returns the target as an IP address.
    ///
    /// Literal addresses are returned as-is without touching DNS. Hostnames
    /// are looked up, preferring the first IPv4 answer.
    pub fn resolve_to_ip(&self) -> Result<String> {
        if let Ok(addr) = self.host.parse::<IpAddr>() {
            return Ok(addr.to_string());
        }

        let addrs: Vec<IpAddr> = dns_lookup::getaddrinfo(Some(&self.host), None, None)
            .map_err(|e| Error::resolution(&self.host, format!("{e:?}")))?
            .filter_map(|info| info.ok())
            .map(|info| info.sockaddr.ip())
            .collect();

        pick_address(&addrs)
            .map(|addr| addr.to_string())
            .ok_or_else(|| Error::resolution(&self.host, "no address returned"))
    }

    /// Returns the target as a domain name.
    ///
    /// Hostnames are returned as-is. Literal addresses go through a reverse
    /// lookup; the trailing root dot of the answer is stripped.
    pub fn resolve_to_domain(&self) -> Result<String> {
        let Ok(addr) = self.host.parse::<IpAddr>() else {
            return Ok(self.host.clone());
        };

        let name = dns_lookup::lookup_addr(&addr).map_err(|e| Error::resolution(&self.host, e))?;
        let name = name.strip_suffix('.').unwrap_or(&name);

        // getnameinfo hands back the numeric form when there is no PTR record
        if name.is_empty() || name.parse::<IpAddr>().is_ok() {
            return Err(Error::resolution(&self.host, "no PTR record"));
        }

        Ok(name.to_string())
    }
}

/// Expands the user's specification into the list of hosts to process.
///
/// A host file, when set, wins over the single host.
pub fn expand(targets: &Targets) -> Result<Vec<ModuleTarget>> {
    if !targets.host_file.is_empty() {
        return read_host_file(Path::new(&targets.host_file));
    }

    if targets.host.is_empty() {
        return Err(Error::EmptyTarget);
    }

    Ok(vec![ModuleTarget::new(targets.host.clone())])
}

fn read_host_file(path: &Path) -> Result<Vec<ModuleTarget>> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut hosts = Vec::new();
    let mut line = Vec::new();

    // Lines are raw bytes; invalid UTF-8 is replaced rather than rejected.
    while reader.read_until(b'\n', &mut line).map_err(io_err)? > 0 {
        let text = String::from_utf8_lossy(&line);
        let host = text.trim();
        if !host.is_empty() {
            hosts.push(ModuleTarget::new(host));
        }
        line.clear();
    }

    debug!(path = %path.display(), count = hosts.len(), "Loaded host file");
    Ok(hosts)
}

fn pick_address(addrs: &[IpAddr]) -> Option<IpAddr> {
    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
