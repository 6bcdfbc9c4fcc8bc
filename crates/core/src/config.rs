//! Workflow configuration (`spec-config.json`)
//!
//! The configuration file lives at `.claude/spec-config.json` and records the
//! workflow settings the slash commands rely on. The shape is stable across
//! installations so migration checks can validate it.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::SpecflowResult;

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SpecConfig {
    pub spec_workflow: SpecWorkflowConfig,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SpecWorkflowConfig {
    pub version: String,
    pub auto_create_directories: bool,
    pub auto_reference_requirements: bool,
    pub enforce_approval_workflow: bool,
    pub default_feature_prefix: String,
    pub supported_formats: Vec<String>,
}

impl Default for SpecConfig {
    fn default() -> Self {
        Self {
            spec_workflow: SpecWorkflowConfig {
                version: "1.0.0".to_string(),
                auto_create_directories: true,
                auto_reference_requirements: true,
                enforce_approval_workflow: true,
                default_feature_prefix: "feature-".to_string(),
                supported_formats: vec!["markdown".to_string(), "mermaid".to_string()],
            },
        }
    }
}

pub fn parse_spec_config(json_str: &str) -> SpecflowResult<SpecConfig> {
    let config: SpecConfig = serde_json::from_str(json_str)?;
    Ok(config)
}

pub fn write_spec_config(path: &Path, config: &SpecConfig) -> SpecflowResult<()> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips() {
        let config = SpecConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed = parse_spec_config(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let json = r#"{"spec_workflow": {"version": "1.0.0", "bogus": true}}"#;
        assert!(parse_spec_config(json).is_err());
    }

    #[test]
    fn test_default_values() {
        let config = SpecConfig::default();
        assert!(config.spec_workflow.auto_create_directories);
        assert_eq!(config.spec_workflow.default_feature_prefix, "feature-");
        assert_eq!(
            config.spec_workflow.supported_formats,
            vec!["markdown", "mermaid"]
        );
    }
}
