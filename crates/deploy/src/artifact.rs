//! Compiled contract artifacts.
//!
//! The tool does not compile anything itself; it instantiates bytecode from
//! hardhat-style artifact JSON files (`contractName` + `bytecode`) produced
//! by the contract build.

use std::path::Path;

use serde::Deserialize;

use crate::error::DeployError;

/// Artifact name of the ERC-1967 proxy wrapper deployed in front of the
/// token implementation.
pub const PROXY_ARTIFACT: &str = "ERC1967Proxy";

/// A compiled contract artifact.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    /// Creation bytecode as a 0x-prefixed hex string.
    pub bytecode: String,
}

impl Artifact {
    /// Load `{dir}/{name}.json`.
    pub fn load(dir: &Path, name: &str) -> Result<Self, DeployError> {
        let path = dir.join(format!("{name}.json"));
        let content = std::fs::read_to_string(&path).map_err(|e| {
            DeployError::config(format!(
                "cannot read contract artifact {}: {e}",
                path.display()
            ))
        })?;
        let artifact: Artifact = serde_json::from_str(&content).map_err(|e| {
            DeployError::config(format!(
                "malformed contract artifact {}: {e}",
                path.display()
            ))
        })?;
        if artifact.bytecode_bytes()?.is_empty() {
            return Err(DeployError::config(format!(
                "artifact {} has no creation bytecode (is it an interface?)",
                artifact.contract_name
            )));
        }
        Ok(artifact)
    }

    /// The decoded creation bytecode.
    pub fn bytecode_bytes(&self) -> Result<Vec<u8>, DeployError> {
        let digits = self.bytecode.strip_prefix("0x").unwrap_or(&self.bytecode);
        hex::decode(digits).map_err(|e| {
            DeployError::config(format!(
                "artifact {} has invalid bytecode hex: {e}",
                self.contract_name
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn write_artifact(dir: &Path, name: &str, bytecode: &str) {
        let json = serde_json::json!({
            "contractName": name,
            "abi": [],
            "bytecode": bytecode,
        });
        std::fs::write(dir.join(format!("{name}.json")), json.to_string()).unwrap();
    }

    #[test]
    fn test_load_artifact() {
        let dir = TempDir::new("tokup-artifacts").unwrap();
        write_artifact(dir.path(), "MyToken", "0x600160015500");

        let artifact = Artifact::load(dir.path(), "MyToken").unwrap();
        assert_eq!(artifact.contract_name, "MyToken");
        assert_eq!(
            artifact.bytecode_bytes().unwrap(),
            vec![0x60, 0x01, 0x60, 0x01, 0x55, 0x00]
        );
    }

    #[test]
    fn test_missing_artifact_is_config_error() {
        let dir = TempDir::new("tokup-artifacts").unwrap();
        let err = Artifact::load(dir.path(), "Nope").unwrap_err();
        assert!(matches!(err, DeployError::Config(_)));
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        let dir = TempDir::new("tokup-artifacts").unwrap();
        write_artifact(dir.path(), "Iface", "0x");
        let err = Artifact::load(dir.path(), "Iface").unwrap_err();
        assert!(matches!(err, DeployError::Config(_)));
    }
}
