//! `list-shares`: first look at the SMB shares of a host.

use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use rexec_common::auth::{AuthStrategy, Credentials};
use rexec_common::network::target::{self, ModuleTarget, Targets};
use rexec_core::binder::{InputShape, ModuleInput};
use rexec_core::module::{Finding, ModuleMetadata, ScanModule};
use tracing::debug;

use super::client::{ShareClient, ShareListing, TcpShareClient};

pub const METADATA: ModuleMetadata = ModuleMetadata {
    unique_name: "list-shares",
    description: "List-shares is a SMB module aiming at getting first information about SMB \
                  shares such as: open shares, rights, and more.",
    labels: &["SMB", "Shares", "Low-Privilege"],
};

const SMB_PORT: &str = "445";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSharesInput {
    pub targets: Targets,
    pub credentials: Credentials,
    pub port: String,
}

impl Default for ListSharesInput {
    fn default() -> Self {
        Self {
            targets: Targets::default(),
            credentials: Credentials::default(),
            port: SMB_PORT.to_string(),
        }
    }
}

impl ModuleInput for ListSharesInput {
    fn describe(shape: &mut InputShape<Self>) {
        shape
            .nest(|i| &mut i.targets)
            .nest(|i| &mut i.credentials)
            .text("port", "SMB port to connect to (default 445)", |i| &mut i.port);
    }
}

/// Environment lookup used to find the Kerberos ticket cache.
pub type EnvLookup = fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

pub struct ListSharesModule {
    input: ListSharesInput,
    port: u16,
    auth: Option<AuthStrategy>,
    client: Box<dyn ShareClient>,
    env: EnvLookup,
}

impl Default for ListSharesModule {
    fn default() -> Self {
        Self::with_client(TcpShareClient::default())
    }
}

impl ListSharesModule {
    pub fn with_client(client: impl ShareClient + 'static) -> Self {
        Self {
            input: ListSharesInput::default(),
            port: 0,
            auth: None,
            client: Box::new(client),
            env: process_env,
        }
    }

    /// Replaces the process environment as the source of `KRB5CCNAME`.
    pub fn with_env(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }
}

impl ScanModule for ListSharesModule {
    type Input = ListSharesInput;

    fn configure(&mut self, input: ListSharesInput) -> anyhow::Result<()> {
        self.port = input
            .port
            .trim()
            .parse()
            .with_context(|| format!("invalid SMB port '{}'", input.port))?;
        // Fails early, before any connection, when Kerberos has no ticket cache.
        self.auth = Some(input.credentials.auth_strategy_with(self.env)?);
        self.input = input;
        Ok(())
    }

    fn run(&mut self) -> anyhow::Result<Vec<Finding>> {
        let targets = target::expand(&self.input.targets)?;
        targets.iter().map(|t| self.run_once(t)).collect()
    }

    fn run_once(&mut self, target: &ModuleTarget) -> anyhow::Result<Finding> {
        let auth = self.auth.as_ref().context("list-shares used before configure")?;

        let ip: IpAddr = target.resolve_to_ip()?.parse()?;
        let addr = SocketAddr::new(ip, self.port);
        let finding = Finding::new(&target.host)
            .with("address", addr)
            .with("auth", auth);

        let shares = match self.client.list_shares(addr, auth)? {
            ShareListing::Enumerated(shares) => shares,
            ShareListing::Reachable => {
                return Ok(finding
                    .with("reachable", true)
                    .with("shares", "not enumerated"));
            }
        };

        let mut finding = finding.with("shares", shares.len());

        for share in shares {
            debug!(share_name = %share.name, share_comment = %share.comment, "Found a share");
            let value = match share.comment.is_empty() {
                true => share.rights.to_string(),
                false => format!("{} ({})", share.rights, share.comment),
            };
            finding = finding.with(share.name, value);
        }

        Ok(finding)
    }
}
