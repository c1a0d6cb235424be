// src/error.rs
use crate::offers::Diagnostic;

#[derive(Debug, thiserror::Error)]
pub enum VendorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Missing setting: {0}")]
    MissingSetting(String),

    #[error("Unknown backend kind: {0}")]
    UnknownBackend(String),

    #[error("Backend not available: {0}")]
    Unsupported(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Timeout: {0}")]
    Timeout(String),
}

impl VendorError {
    pub fn code_str(&self) -> &'static str {
        match self {
            VendorError::Authentication(_) => "auth_failed",
            VendorError::MissingSetting(_) => "missing_setting",
            VendorError::UnknownBackend(_) => "unknown_backend",
            VendorError::Unsupported(_) => "unsupported",
            VendorError::HttpRequest(_) => "upstream_error",
            VendorError::Upstream(_) => "upstream_error",
            VendorError::Timeout(_) => "timeout",
            VendorError::Url(_) => "invalid_config",
            VendorError::Yaml(_) => "invalid_config",
            _ => "internal_error",
        }
    }

    /// Convert this error into the diagnostic that crosses a leaf boundary.
    ///
    /// Search failures never propagate as faults; they surface as
    /// warning-tagged messages on the offers of the affected round.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::warning(format!("{}: {}", self.code_str(), self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offers::Severity;

    #[test]
    fn test_code_classification() {
        assert_eq!(
            VendorError::Authentication("token rejected".into()).code_str(),
            "auth_failed"
        );
        assert_eq!(
            VendorError::UnknownBackend("snapgene".into()).code_str(),
            "unknown_backend"
        );
        assert_eq!(
            VendorError::Timeout("validate call".into()).code_str(),
            "timeout"
        );
    }

    #[test]
    fn test_to_diagnostic_is_warning() {
        let diag = VendorError::Upstream("malformed response".into()).to_diagnostic();
        assert_eq!(diag.severity, Severity::Warning);
        assert!(diag.text.contains("upstream_error"));
        assert!(diag.text.contains("malformed response"));
    }
}
