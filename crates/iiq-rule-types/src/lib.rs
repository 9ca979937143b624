//! Shared IdentityIQ rule data model
//!
//! These types are the boundary between the natural-language extractor and the
//! downstream rule generator. They carry no extraction logic.

use serde::{Deserialize, Serialize};

// ============================================================================
// RULE TYPE
// ============================================================================

/// The IdentityIQ rule categories the extractor can recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleType {
    /// Matches an application account to an existing identity
    Correlation,
    /// Transforms a delimited-file record into a map during aggregation
    BuildMap,
    /// Runs once before a connector iterates over its source
    PreIterate,
}

impl RuleType {
    /// All rule types, in classification priority order.
    pub fn all() -> [RuleType; 3] {
        [RuleType::Correlation, RuleType::BuildMap, RuleType::PreIterate]
    }

    /// Name used by IdentityIQ for the rule `type` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Correlation => "Correlation",
            RuleType::BuildMap => "BuildMap",
            RuleType::PreIterate => "PreIterate",
        }
    }

    /// Input parameters IdentityIQ passes to a rule of this type.
    ///
    /// Every rule receives `log` and `context`; the remainder depend on the
    /// hook the rule is attached to.
    pub fn standard_parameters(&self) -> Vec<RuleParameter> {
        let mut params = vec![
            RuleParameter::new("log", "Log").with_description("Logger for the rule"),
            RuleParameter::new("context", "SailPointContext")
                .with_description("Handle to the IdentityIQ object store"),
        ];

        let specific: &[(&str, &str, &str)] = match self {
            RuleType::Correlation => &[
                ("environment", "Map", "Arguments passed to the aggregation task"),
                ("application", "Application", "Application being aggregated"),
                ("account", "ResourceObject", "Account read from the application"),
                ("link", "Link", "Existing link for the account, if any"),
            ],
            RuleType::BuildMap => &[
                ("application", "Application", "Application being aggregated"),
                ("schema", "Schema", "Schema of the object being built"),
                ("state", "Map", "Shared state across rule invocations"),
                ("record", "List", "Values parsed from the current line"),
                ("cols", "List", "Column names from the file header"),
            ],
            RuleType::PreIterate => &[
                ("application", "Application", "Application being aggregated"),
                ("schema", "Schema", "Schema of the object being iterated"),
                ("stats", "Map", "File statistics captured before iteration"),
            ],
        };

        params.extend(
            specific
                .iter()
                .map(|(name, ty, desc)| RuleParameter::new(*name, *ty).with_description(*desc)),
        );
        params
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "correlation" => Ok(RuleType::Correlation),
            "buildmap" | "build map" | "build_map" => Ok(RuleType::BuildMap),
            "preiterate" | "pre-iterate" | "pre_iterate" => Ok(RuleType::PreIterate),
            _ => Err(format!(
                "Unknown rule type: '{}'. Valid types: Correlation, BuildMap, PreIterate",
                s
            )),
        }
    }
}

// ============================================================================
// RULE DEFINITION
// ============================================================================

/// An input parameter of a rule, e.g. `log` or `context`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleParameter {
    /// Parameter name as bound in the rule's BeanShell scope
    pub name: String,

    /// Java type of the parameter, e.g. `SailPointContext`
    pub param_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RuleParameter {
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A complete rule as handed to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub name: String,

    pub rule_type: RuleType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<RuleParameter>,

    /// Rule body; filled in by the generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,
}

impl RuleDefinition {
    pub fn new(name: impl Into<String>, rule_type: RuleType) -> Self {
        Self {
            name: name.into(),
            rule_type,
            description: None,
            parameters: Vec::new(),
            source_code: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parameter(mut self, parameter: RuleParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Seed the parameter list from [`RuleType::standard_parameters`].
    pub fn with_standard_parameters(mut self) -> Self {
        self.parameters.extend(self.rule_type.standard_parameters());
        self
    }

    pub fn with_source_code(mut self, source_code: impl Into<String>) -> Self {
        self.source_code = Some(source_code.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_type_serializes_as_iiq_name() {
        let json = serde_json::to_string(&RuleType::BuildMap).unwrap();
        assert_eq!(json, "\"BuildMap\"");

        let back: RuleType = serde_json::from_str("\"PreIterate\"").unwrap();
        assert_eq!(back, RuleType::PreIterate);
    }

    #[test]
    fn test_rule_type_from_str_accepts_spellings() {
        assert_eq!("correlation".parse::<RuleType>(), Ok(RuleType::Correlation));
        assert_eq!("Build Map".parse::<RuleType>(), Ok(RuleType::BuildMap));
        assert_eq!("pre-iterate".parse::<RuleType>(), Ok(RuleType::PreIterate));
        assert!("provisioning".parse::<RuleType>().is_err());
    }

    #[test]
    fn test_display_matches_as_str() {
        for rule_type in RuleType::all() {
            assert_eq!(rule_type.to_string(), rule_type.as_str());
        }
    }

    #[test]
    fn test_standard_parameters_always_include_log_and_context() {
        for rule_type in RuleType::all() {
            let names: Vec<String> = rule_type
                .standard_parameters()
                .into_iter()
                .map(|p| p.name)
                .collect();
            assert_eq!(&names[..2], &["log".to_string(), "context".to_string()]);
        }
    }

    #[test]
    fn test_build_map_parameters() {
        let names: Vec<String> = RuleType::BuildMap
            .standard_parameters()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert!(names.contains(&"record".to_string()));
        assert!(names.contains(&"cols".to_string()));
        assert!(!names.contains(&"link".to_string()));
    }

    #[test]
    fn test_rule_definition_builder() {
        let rule = RuleDefinition::new("AD Correlation", RuleType::Correlation)
            .with_description("Correlate on sAMAccountName")
            .with_standard_parameters()
            .with_source_code("return null;");

        assert_eq!(rule.parameters.len(), 6);
        assert_eq!(rule.source_code.as_deref(), Some("return null;"));

        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["rule_type"], "Correlation");
        assert_eq!(json["parameters"][1]["param_type"], "SailPointContext");
    }

    #[test]
    fn test_rule_definition_optional_fields_omitted() {
        let rule = RuleDefinition::new("Empty", RuleType::PreIterate);
        let json = serde_json::to_value(&rule).unwrap();
        assert!(json.get("description").is_none());
        assert!(json.get("source_code").is_none());
        assert_eq!(json["parameters"], serde_json::json!([]));
    }
}
