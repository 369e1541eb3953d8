//! # Credential Model
//!
//! Credentials against a Windows/Active Directory host can be:
//! * Username/Password (empty values mean anonymous or guest).
//! * Kerberos, delegated to an existing credential cache.
//!
//! Exactly one [`AuthStrategy`] is picked per invocation and handed to the
//! code opening the connection.

use std::fmt;

use crate::error::{Error, Result};

/// Environment variable pointing at the Kerberos credential cache.
pub const KERBEROS_CACHE_ENV: &str = "KRB5CCNAME";

/// Credentials as given by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub domain: String,
    pub username: String,
    pub password: String,
    /// Use the Kerberos ticket found in the credential cache.
    pub kerberos: bool,
}

/// The authentication method selected for a run.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthStrategy {
    UsernamePassword {
        domain: String,
        username: String,
        password: String,
    },
    Kerberos {
        /// Value of [`KERBEROS_CACHE_ENV`].
        cache: String,
    },
}

impl Credentials {
    /// Picks the authentication strategy, reading the process environment.
    pub fn auth_strategy(&self) -> Result<AuthStrategy> {
        self.auth_strategy_with(|key| std::env::var(key).ok())
    }

    /// Picks the authentication strategy with a custom environment lookup.
    ///
    /// Kerberos wins whenever requested; a missing cache reference is an
    /// error, never a fallback to username/password.
    pub fn auth_strategy_with<F>(&self, env: F) -> Result<AuthStrategy>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.kerberos {
            let cache = env(KERBEROS_CACHE_ENV)
                .filter(|value| !value.trim().is_empty())
                .ok_or(Error::MissingEnvironment(KERBEROS_CACHE_ENV))?;
            return Ok(AuthStrategy::Kerberos { cache });
        }

        Ok(AuthStrategy::UsernamePassword {
            domain: self.domain.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

impl AuthStrategy {
    pub fn uses_kerberos(&self) -> bool {
        matches!(self, AuthStrategy::Kerberos { .. })
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, AuthStrategy::UsernamePassword { username, .. } if username.is_empty())
    }
}

impl fmt::Display for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStrategy::Kerberos { .. } => write!(f, "kerberos"),
            AuthStrategy::UsernamePassword { username, .. } if username.is_empty() => {
                write!(f, "anonymous")
            }
            AuthStrategy::UsernamePassword {
                domain, username, ..
            } if domain.is_empty() => write!(f, "password ({username})"),
            AuthStrategy::UsernamePassword {
                domain, username, ..
            } => write!(f, "password ({domain}\\{username})"),
        }
    }
}

// Keeps passwords out of debug logs.
impl fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStrategy::UsernamePassword {
                domain, username, ..
            } => f
                .debug_struct("UsernamePassword")
                .field("domain", domain)
                .field("username", username)
                .finish_non_exhaustive(),
            AuthStrategy::Kerberos { cache } => {
                f.debug_struct("Kerberos").field("cache", cache).finish()
            }
        }
    }
}
