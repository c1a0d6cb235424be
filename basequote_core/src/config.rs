//! Declarative configuration: the static vendor list plus per-backend
//! settings. The loader validates nothing beyond what bootstrap needs to
//! attempt construction; a missing or malformed backend section shows up
//! later as an invalid-vendor substitution, not as a load failure.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VendorError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub controller: ControllerSection,
    #[serde(default)]
    pub backends: BackendSection,
}

impl AppConfig {
    pub fn from_str(yaml: &str) -> Result<Self, VendorError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, VendorError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_str(&raw)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerSection {
    #[serde(default)]
    pub vendors: Vec<VendorEntry>,
}

/// One declared vendor: display metadata plus the backend kind identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorEntry {
    pub name: String,
    pub short_name: String,
    /// Backend kind identifier, e.g. "geneart", "idt", "dummy", "mock".
    /// Unknown identifiers resolve to the invalid placeholder at bootstrap.
    pub backend: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendSection {
    #[serde(default)]
    pub geneart: Option<GeneArtSettings>,
    #[serde(default)]
    pub idt: Option<IdtSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneArtSettings {
    pub username: String,
    pub token: String,
    #[serde(default = "default_geneart_server")]
    pub server: String,
    /// Seconds per wire call.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_true")]
    pub dna_strings: bool,
    #[serde(default = "default_true")]
    pub hq_dna_strings: bool,
}

fn default_geneart_server() -> String {
    "https://www.thermofisher.com/order/gene-design-ordering/api".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdtSettings {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_idt_scope")]
    pub scope: String,
    #[serde(default = "default_idt_token_url")]
    pub token_url: String,
    #[serde(default = "default_idt_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_idt_scope() -> String {
    "test".to_string()
}

fn default_idt_token_url() -> String {
    "https://eu.idtdna.com/Identityserver/connect/token".to_string()
}

fn default_idt_api_url() -> String {
    "https://eu.idtdna.com/restapi/v1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
controller:
  vendors:
    - name: TWIST DNA
      shortName: TWIST
      backend: twist
    - name: IDT DNA
      shortName: IDT
      backend: idt
    - name: GeneArt
      shortName: GeneArt
      backend: geneart
backends:
  geneart:
    username: alice
    token: secret
  idt:
    username: alice
    password: hunter2
    clientId: client
    clientSecret: sauce
"#;

    #[test]
    fn test_parse_example() {
        let cfg = AppConfig::from_str(EXAMPLE).unwrap();
        assert_eq!(cfg.controller.vendors.len(), 3);
        assert_eq!(cfg.controller.vendors[0].short_name, "TWIST");
        assert_eq!(cfg.controller.vendors[2].backend, "geneart");

        let geneart = cfg.backends.geneart.unwrap();
        assert_eq!(geneart.username, "alice");
        assert!(geneart.dna_strings);
        assert!(geneart.hq_dna_strings);
        assert_eq!(geneart.timeout, 60);
        assert!(geneart.server.contains("thermofisher"));

        let idt = cfg.backends.idt.unwrap();
        assert_eq!(idt.scope, "test");
        assert!(idt.token_url.contains("connect/token"));
    }

    #[test]
    fn test_missing_backends_section() {
        let cfg = AppConfig::from_str(
            "controller:\n  vendors:\n    - name: Demo\n      shortName: D\n      backend: dummy\n",
        )
        .unwrap();
        assert!(cfg.backends.geneart.is_none());
        assert!(cfg.backends.idt.is_none());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(AppConfig::from_str("controller: [").is_err());
    }
}
