//! Bearer credentials for the catalog service.
//!
//! The client-credentials exchange itself happens outside this server: the
//! token is either configured statically or printed by an external command
//! (which is free to perform the exchange and cache the result).

use super::trait_def::CatalogError;
use std::fmt;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Timeout for token_command execution.
const TOKEN_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Bearer token sent with every catalog request.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Never print the token itself
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Where the bearer token comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Static token.
    Static(String),
    /// Shell command that outputs the token (for rotating tokens).
    Command(String),
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Static(_) => f.write_str("Static(***)"),
            CredentialSource::Command(cmd) => f.debug_tuple("Command").field(cmd).finish(),
        }
    }
}

impl CredentialSource {
    /// Get the current token, executing the command if necessary.
    pub async fn resolve(&self) -> Result<BearerToken, CatalogError> {
        match self {
            CredentialSource::Static(token) => {
                if token.trim().is_empty() {
                    return Err(CatalogError::Credential(
                        "configured token is empty".to_string(),
                    ));
                }
                Ok(BearerToken::new(token.trim()))
            }
            CredentialSource::Command(cmd) => {
                debug!(command = %cmd, "Fetching catalog token via command");

                let result = tokio::time::timeout(
                    TOKEN_COMMAND_TIMEOUT,
                    Command::new("sh").arg("-c").arg(cmd).output(),
                )
                .await;

                let output = match result {
                    Ok(Ok(output)) => output,
                    Ok(Err(e)) => {
                        warn!(command = %cmd, error = %e, "token_command failed to execute");
                        return Err(CatalogError::Credential(format!(
                            "Failed to execute token_command: {}",
                            e
                        )));
                    }
                    Err(_) => {
                        warn!(command = %cmd, "token_command timed out");
                        return Err(CatalogError::Credential(
                            "token_command timed out".to_string(),
                        ));
                    }
                };

                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    warn!(command = %cmd, stderr = %stderr, "token_command failed");
                    return Err(CatalogError::Credential(format!(
                        "token_command failed with status {}: {}",
                        output.status,
                        stderr.trim()
                    )));
                }

                let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if token.is_empty() {
                    warn!(command = %cmd, "token_command returned empty token");
                    return Err(CatalogError::Credential(
                        "token_command returned empty token".to_string(),
                    ));
                }

                Ok(BearerToken::new(token))
            }
        }
    }
}
