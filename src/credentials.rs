//! Target and user credentials for a Cloud Foundry instance.

use std::env;

use url::Url;

use crate::error::{CfError, Result};

/// Credentials for a Cloud Foundry target.
///
/// Holds the Cloud Controller endpoint plus the username/password used for
/// the OAuth password grant. The bearer token obtained from `login` lives on
/// the client, not here.
#[derive(Clone)]
pub struct CfCredentials {
    target: Url,
    username: String,
    password: String,
}

impl std::fmt::Debug for CfCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CfCredentials")
            .field("target", &self.target.as_str())
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl CfCredentials {
    /// Create credentials for the given target endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the target URL is invalid.
    pub fn new(target: &str, username: &str, password: &str) -> Result<Self> {
        // Ensure the target ends with / so Url::join keeps the full path
        let target_str = if target.ends_with('/') {
            target.to_string()
        } else {
            format!("{target}/")
        };

        Ok(Self {
            target: Url::parse(&target_str)?,
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Create credentials from environment variables.
    ///
    /// Uses `CF_TARGET` for the endpoint and `CF_USERNAME`/`CF_PASSWORD`
    /// for the password grant.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three variables is not set.
    pub fn from_env() -> Result<Self> {
        let target = env::var("CF_TARGET")
            .map_err(|_| CfError::ConfigMissing("CF_TARGET environment variable not set".into()))?;
        let username = env::var("CF_USERNAME").map_err(|_| {
            CfError::ConfigMissing("CF_USERNAME environment variable not set".into())
        })?;
        let password = env::var("CF_PASSWORD").map_err(|_| {
            CfError::ConfigMissing("CF_PASSWORD environment variable not set".into())
        })?;

        Self::new(&target, &username, &password)
    }

    /// The Cloud Controller endpoint.
    pub fn target(&self) -> &Url {
        &self.target
    }

    /// The username for the password grant.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_trailing_slash() {
        let a = CfCredentials::new("https://api.cf.example.com", "admin", "pw").unwrap();
        let b = CfCredentials::new("https://api.cf.example.com/", "admin", "pw").unwrap();
        assert_eq!(a.target().as_str(), b.target().as_str());
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = CfCredentials::new("https://api.cf.example.com", "admin", "s3cret").unwrap();
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_invalid_target_rejected() {
        assert!(CfCredentials::new("not a url", "admin", "pw").is_err());
    }
}
