//! Error taxonomy for the deployment workflow.
//!
//! Every failure surfaces to the single top-level handler in the binary;
//! nothing is retried. The only tolerated recovery is the gas-price fallback
//! in the orchestrator, which never produces an error at all.

/// Errors raised by the deployment and balance workflows.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// A required identifier or parameter is absent or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The deployer account cannot fund the deployment.
    #[error("insufficient funds: balance {have} {symbol} is below the {need} {symbol} minimum")]
    Preflight {
        have: String,
        need: String,
        symbol: String,
    },

    /// An RPC query failed or returned something unusable.
    #[error("network error: {0}")]
    Network(String),

    /// The proxy deployment itself failed.
    #[error("deployment error: {0}")]
    Deployment(String),
}

impl DeployError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn deployment(msg: impl Into<String>) -> Self {
        Self::Deployment(msg.into())
    }
}
