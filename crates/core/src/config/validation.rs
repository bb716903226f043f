//! Configuration validation rules.
//!
//! Validation runs after loading, before a dispatch service is built from the
//! config. Directory existence is deliberately not checked here: the web dir
//! is revalidated on every dispatch, since it can appear or vanish between
//! deploys.

use thiserror::Error;
use url::Url;

use crate::config::DispatchConfig;
use crate::script;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl DispatchConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `host` is not an absolute URL
    /// - `script_template` is missing a substitution point
    /// - `artifact_prefix` or `artifact_ext` is empty or contains a path separator
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Url::parse(&self.host).is_err() {
            return Err(ConfigError::Invalid {
                field: "host".into(),
                reason: format!("\"{}\" is not an absolute URL", self.host),
            });
        }

        for placeholder in
            [script::CODE_PLACEHOLDER, script::USER_PLACEHOLDER, script::OPCODE_PLACEHOLDER]
        {
            if !self.script_template.contains(placeholder) {
                return Err(ConfigError::Invalid {
                    field: "script_template".into(),
                    reason: format!("missing substitution point {placeholder}"),
                });
            }
        }

        if self.artifact_prefix.is_empty() || self.artifact_prefix.contains('/') {
            return Err(ConfigError::Invalid {
                field: "artifact_prefix".into(),
                reason: "must be a non-empty file name component".into(),
            });
        }
        if self.artifact_ext.is_empty() || self.artifact_ext.contains('/') {
            return Err(ConfigError::Invalid {
                field: "artifact_ext".into(),
                reason: "must be a non-empty file name component".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = DispatchConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_relative_host() {
        let config = DispatchConfig { host: "localhost/web".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "host"));
    }

    #[test]
    fn test_validate_template_without_code_placeholder() {
        let config =
            DispatchConfig { script_template: "%user% %opcode%".into(), ..Default::default() };
        let result = config.validate();
        assert!(
            matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "script_template")
        );
    }

    #[test]
    fn test_validate_empty_prefix() {
        let config = DispatchConfig { artifact_prefix: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(
            matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "artifact_prefix")
        );
    }

    #[test]
    fn test_validate_ext_with_separator() {
        let config = DispatchConfig { artifact_ext: "php/../..".into(), ..Default::default() };
        let result = config.validate();
        assert!(
            matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "artifact_ext")
        );
    }
}
