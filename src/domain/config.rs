use crate::error::{PaymentError, Result};
use serde::Deserialize;

/// Widget kind the host's admin panel renders for a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Input,
    Check,
    Select,
}

/// One entry of the declared configuration schema.
#[derive(Debug, Clone, Copy)]
pub struct ConfigField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: &'static str,
}

/// Fields the host collects from the merchant before loading the module.
pub const CONFIG_SCHEMA: &[ConfigField] = &[
    ConfigField {
        name: "API Login",
        kind: FieldKind::Input,
        default: "",
    },
    ConfigField {
        name: "Transaction Key",
        kind: FieldKind::Input,
        default: "",
    },
    ConfigField {
        name: "MD5 Hash",
        kind: FieldKind::Input,
        default: "",
    },
    ConfigField {
        name: "Enable Test Mode",
        kind: FieldKind::Check,
        default: "1",
    },
];

/// Currencies the gateway settles. An empty list would mean all.
pub const SUPPORTED_CURRENCIES: &[&str] = &["USD", "CAD", "EUR", "GBP"];

/// Gateway credentials and mode flags, populated once at load time.
///
/// The adapter never mutates this after construction, so a single instance
/// can serve concurrent captures.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub api_login: String,
    pub transaction_key: String,
    #[serde(default)]
    pub md5_hash: String,
    #[serde(default = "default_test_mode")]
    pub test_mode: bool,
}

fn default_test_mode() -> bool {
    true
}

impl GatewayConfig {
    /// Checks that the credentials required for any gateway call are present.
    pub fn validate(&self) -> Result<()> {
        if self.api_login.is_empty() {
            return Err(PaymentError::Configuration(
                "API Login is not set".to_string(),
            ));
        }
        if self.transaction_key.is_empty() {
            return Err(PaymentError::Configuration(
                "Transaction Key is not set".to_string(),
            ));
        }
        Ok(())
    }
}
