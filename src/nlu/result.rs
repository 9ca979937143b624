//! The structured record handed to the downstream rule generator.

use std::path::Path;

use iiq_rule_types::RuleType;
use serde::{Deserialize, Serialize};

use super::attributes::AttributeRoute;
use super::intent::Intent;
use crate::error::Result;
use crate::io::write_to_file;

/// Everything extracted from one instruction. Absent fields are expected on
/// ambiguous input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub intent: Option<Intent>,
    pub rule_type: Option<RuleType>,
    pub application_name: Option<String>,
    pub source_attributes: Vec<String>,
    pub identity_attributes: Vec<String>,
}

impl ExtractionResult {
    pub fn assemble(
        intent: Option<Intent>,
        rule_type: Option<RuleType>,
        application_name: Option<String>,
        route: AttributeRoute,
    ) -> Self {
        Self {
            intent,
            rule_type,
            application_name,
            source_attributes: route.source,
            identity_attributes: route.identity,
        }
    }

    /// True when nothing at all was recognised.
    pub fn is_empty(&self) -> bool {
        self.intent.is_none()
            && self.rule_type.is_none()
            && self.application_name.is_none()
            && self.source_attributes.is_empty()
            && self.identity_attributes.is_empty()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the JSON form to `path`, creating parent directories.
    pub fn write_json(&self, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
        let json = self.to_json(pretty)?;
        write_to_file(path, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NluError;
    use crate::io::read_from_file;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_assemble_moves_route_lists() {
        let result = ExtractionResult::assemble(
            Some(Intent::GenerateRule),
            Some(RuleType::BuildMap),
            Some("Workday".to_string()),
            AttributeRoute {
                source: vec!["employeeId".to_string()],
                identity: vec!["identity_name".to_string()],
            },
        );

        assert_eq!(result.source_attributes, vec!["employeeId"]);
        assert_eq!(result.identity_attributes, vec!["identity_name"]);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let result = ExtractionResult::assemble(
            Some(Intent::ExplainRule),
            Some(RuleType::PreIterate),
            Some("SAP".to_string()),
            AttributeRoute::default(),
        );

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "intent": "ExplainRule",
                "rule_type": "PreIterate",
                "application_name": "SAP",
                "source_attributes": [],
                "identity_attributes": [],
            })
        );
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let value = serde_json::to_value(ExtractionResult::default()).unwrap();
        assert!(value["intent"].is_null());
        assert!(value["rule_type"].is_null());
        assert!(value["application_name"].is_null());
        assert!(ExtractionResult::default().is_empty());
    }

    #[test]
    fn test_write_json_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/result.json");
        let result = ExtractionResult::assemble(
            Some(Intent::GenerateRule),
            Some(RuleType::Correlation),
            Some("Active Directory".to_string()),
            AttributeRoute {
                source: vec!["sAMAccountName".to_string()],
                identity: vec![],
            },
        );

        result.write_json(&path, true).unwrap();

        let content = read_from_file(&path).unwrap();
        assert!(content.contains('\n'));
        let back: ExtractionResult = serde_json::from_str(&content).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_compact_json_is_single_line() {
        let json = ExtractionResult::default().to_json(false).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with("{\"intent\":null"));
    }

    #[test]
    fn test_write_json_failure_is_persistence_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // Parent is a regular file, so the directory cannot be created
        let path = file.path().join("result.json");

        let err = ExtractionResult::default()
            .write_json(&path, false)
            .unwrap_err();
        assert!(matches!(err, NluError::Persistence(_)));
    }
}
