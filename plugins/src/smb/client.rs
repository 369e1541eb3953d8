//! Boundary between the `list-shares` module and an SMB client.

use std::fmt;
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use anyhow::Context;
use rexec_common::auth::AuthStrategy;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Access the authenticated user has on a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShareRights {
    #[default]
    Unknown,
    None,
    Read,
    ReadWrite,
}

impl fmt::Display for ShareRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ShareRights::Unknown => "unknown",
            ShareRights::None => "no access",
            ShareRights::Read => "read",
            ShareRights::ReadWrite => "read/write",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub name: String,
    pub comment: String,
    pub rights: ShareRights,
}

/// What a [`ShareClient`] learned about an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareListing {
    /// The server answered and listed its shares.
    Enumerated(Vec<Share>),
    /// The endpoint accepted a connection but shares were not listed.
    Reachable,
}

/// Lists the shares exposed by an SMB server.
pub trait ShareClient {
    fn list_shares(&self, addr: SocketAddr, auth: &AuthStrategy) -> anyhow::Result<ShareListing>;
}

/// Checks that the SMB endpoint accepts TCP connections.
///
/// It does not speak SMB, so it only ever answers [`ShareListing::Reachable`].
#[derive(Debug, Clone)]
pub struct TcpShareClient {
    pub timeout: Duration,
}

impl Default for TcpShareClient {
    fn default() -> Self {
        Self {
            timeout: CONNECT_TIMEOUT,
        }
    }
}

impl ShareClient for TcpShareClient {
    fn list_shares(&self, addr: SocketAddr, auth: &AuthStrategy) -> anyhow::Result<ShareListing> {
        let stream = TcpStream::connect_timeout(&addr, self.timeout)
            .with_context(|| format!("SMB endpoint {addr} is unreachable"))?;
        debug!(%addr, auth = %auth, "SMB endpoint accepts connections");
        drop(stream);

        Ok(ShareListing::Reachable)
    }
}
